//! Filter mode selector for task list views.

use crate::model::task::Task;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Which subset of tasks a view shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Every task.
    #[default]
    All,
    /// Tasks not yet completed.
    Active,
    /// Completed tasks.
    Completed,
}

/// Stable string value for `FilterMode::All`.
pub const FILTER_MODE_ALL: &str = "all";
/// Stable string value for `FilterMode::Active`.
pub const FILTER_MODE_ACTIVE: &str = "active";
/// Stable string value for `FilterMode::Completed`.
pub const FILTER_MODE_COMPLETED: &str = "completed";

impl FilterMode {
    /// Every mode in display order.
    pub const ALL_MODES: [FilterMode; 3] = [Self::All, Self::Active, Self::Completed];

    /// Stable string id, as used by filter buttons.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => FILTER_MODE_ALL,
            Self::Active => FILTER_MODE_ACTIVE,
            Self::Completed => FILTER_MODE_COMPLETED,
        }
    }

    /// Returns whether `task` is visible under this mode.
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

impl Display for FilterMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a filter mode from its string id.
///
/// Input is trimmed and matched case-insensitively.
pub fn parse_filter_mode(value: &str) -> Result<FilterMode, FilterModeError> {
    let normalized = value.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return Err(FilterModeError::Empty);
    }

    match normalized.as_str() {
        FILTER_MODE_ALL => Ok(FilterMode::All),
        FILTER_MODE_ACTIVE => Ok(FilterMode::Active),
        FILTER_MODE_COMPLETED => Ok(FilterMode::Completed),
        _ => Err(FilterModeError::Unsupported(value.trim().to_string())),
    }
}

/// Filter mode parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterModeError {
    Empty,
    Unsupported(String),
}

impl Display for FilterModeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "filter mode must not be empty"),
            Self::Unsupported(value) => write!(
                f,
                "unsupported filter mode `{value}`; expected all|active|completed"
            ),
        }
    }
}

impl Error for FilterModeError {}
