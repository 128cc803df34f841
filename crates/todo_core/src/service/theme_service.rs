//! Light/dark theme preference.
//!
//! # Responsibility
//! - Resolve the applied theme from a saved choice or the system preference.
//! - Persist explicit user choices in the shared key-value store.
//!
//! # Invariants
//! - Resolving from the system preference never writes to storage, so later
//!   system changes keep being followed until the user picks a theme.
//! - Storage failures degrade to in-memory behavior; they are logged, not fatal.

use crate::storage::{KeyValueStore, StorageResult};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Storage key for the saved theme.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Stored and displayed value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Maps a `prefers-color-scheme: dark` flag to a theme.
    pub fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Accessible label for a toggle button showing this theme.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Light => "Switch to dark mode",
            Self::Dark => "Switch to light mode",
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a stored theme value.
pub fn parse_theme(value: &str) -> Option<Theme> {
    match value.trim() {
        "light" => Some(Theme::Light),
        "dark" => Some(Theme::Dark),
        _ => None,
    }
}

/// Theme preference holder for one widget instance.
pub struct ThemeService<S: KeyValueStore> {
    store: S,
    key: String,
    applied: Option<Theme>,
}

impl<S: KeyValueStore> ThemeService<S> {
    /// Uses [`THEME_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, THEME_KEY)
    }

    /// Reads and writes the preference under `key`.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            applied: None,
        }
    }

    /// Saved explicit choice, if any readable one exists.
    pub fn saved(&self) -> Option<Theme> {
        let bytes = match self.store.get(&self.key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(err) => {
                warn!("event=theme_load module=service status=error error={err}");
                return None;
            }
        };

        let theme = std::str::from_utf8(&bytes).ok().and_then(parse_theme);
        if theme.is_none() {
            warn!(
                "event=theme_load module=service status=invalid bytes={}",
                bytes.len()
            );
        }
        theme
    }

    /// Whether the user has saved a readable choice.
    pub fn has_explicit_preference(&self) -> bool {
        self.saved().is_some()
    }

    /// Applies the saved choice, or the system preference when none exists.
    pub fn resolve(&mut self, system_prefers_dark: bool) -> Theme {
        let theme = self
            .saved()
            .unwrap_or_else(|| Theme::from_system(system_prefers_dark));
        self.applied = Some(theme);
        theme
    }

    /// Currently applied theme; light before anything was resolved.
    pub fn current(&self) -> Theme {
        self.applied.unwrap_or_default()
    }

    /// Applies `theme` and saves it as the explicit choice.
    ///
    /// The theme is applied even when saving fails.
    pub fn set(&mut self, theme: Theme) -> StorageResult<()> {
        self.applied = Some(theme);
        match self.store.set(&self.key, theme.as_str().as_bytes()) {
            Ok(()) => {
                info!("event=theme_set module=service status=ok theme={theme}");
                Ok(())
            }
            Err(err) => {
                warn!("event=theme_set module=service status=error theme={theme} error={err}");
                Err(err)
            }
        }
    }

    /// Switches between light and dark and returns the new theme.
    pub fn toggle(&mut self) -> Theme {
        let next = self.current().toggled();
        let _ = self.set(next);
        next
    }

    /// Follows a system preference change unless the user chose explicitly.
    ///
    /// Returns the newly applied theme, or `None` when the change was ignored.
    pub fn on_system_change(&mut self, prefers_dark: bool) -> Option<Theme> {
        if self.has_explicit_preference() {
            return None;
        }
        let theme = Theme::from_system(prefers_dark);
        self.applied = Some(theme);
        Some(theme)
    }
}
