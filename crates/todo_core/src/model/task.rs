//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical to-do record shared by store, persistence and view.
//! - Own text validation rules for untrusted user input.
//!
//! # Invariants
//! - `id` is unique within one store and never reused while the task lives.
//! - `text` is stored raw (unescaped), trimmed and never empty.
//! - Tasks are created incomplete; only toggling changes `completed`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default upper bound for task text, counted in characters.
pub const MAX_TASK_TEXT_CHARS: usize = 100;

/// Opaque task identifier.
///
/// Serialized as a bare JSON number so collections written with numeric
/// millisecond ids load without conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Wraps a raw numeric id.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Raw user text. Renderers must escape before inserting into markup.
    pub text: String,
    pub completed: bool,
}

impl Task {
    /// Creates an incomplete task from already validated text.
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }

    /// Flips completion state.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    /// Returns whether this task still needs doing.
    pub fn is_active(&self) -> bool {
        !self.completed
    }
}

/// Validation failures for task text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Input was empty or whitespace only.
    Empty,
    /// Trimmed input exceeds the configured cap.
    TooLong { max: usize, actual: usize },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "task text must not be empty"),
            Self::TooLong { max, actual } => {
                write!(f, "task text is {actual} characters; limit is {max}")
            }
        }
    }
}

impl Error for TaskValidationError {}

/// Strips leading and trailing whitespace, including U+FEFF.
///
/// `str::trim` keeps the byte-order mark, which renders as nothing.
pub fn trim_task_text(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// Trims raw input and checks it against the length cap.
///
/// Returns the trimmed slice on success. Length is measured in Unicode
/// scalar values, not bytes.
///
/// # Errors
/// - `Empty` when nothing but whitespace was supplied.
/// - `TooLong` when the trimmed text has more than `max_chars` characters.
pub fn validate_task_text(raw: &str, max_chars: usize) -> Result<&str, TaskValidationError> {
    let trimmed = trim_task_text(raw);
    if trimmed.is_empty() {
        return Err(TaskValidationError::Empty);
    }

    let actual = trimmed.chars().count();
    if actual > max_chars {
        return Err(TaskValidationError::TooLong {
            max: max_chars,
            actual,
        });
    }

    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::{
        trim_task_text, validate_task_text, Task, TaskId, TaskValidationError,
        MAX_TASK_TEXT_CHARS,
    };

    #[test]
    fn validate_trims_surrounding_whitespace() {
        assert_eq!(
            validate_task_text("  Buy milk \n", MAX_TASK_TEXT_CHARS).expect("valid text"),
            "Buy milk"
        );
    }

    #[test]
    fn validate_rejects_blank_input() {
        assert_eq!(
            validate_task_text(" \t ", MAX_TASK_TEXT_CHARS),
            Err(TaskValidationError::Empty)
        );
    }

    #[test]
    fn validate_rejects_byte_order_mark_only_input() {
        assert_eq!(
            validate_task_text("\u{FEFF}", MAX_TASK_TEXT_CHARS),
            Err(TaskValidationError::Empty)
        );
        assert_eq!(
            validate_task_text("\u{FEFF} \u{00A0}\u{FEFF}", MAX_TASK_TEXT_CHARS),
            Err(TaskValidationError::Empty)
        );
        assert_eq!(
            validate_task_text("\u{FEFF}Buy milk\u{FEFF}", MAX_TASK_TEXT_CHARS),
            Ok("Buy milk")
        );
    }

    #[test]
    fn trim_keeps_interior_byte_order_mark() {
        assert_eq!(trim_task_text(" a\u{FEFF}b "), "a\u{FEFF}b");
    }

    #[test]
    fn validate_counts_characters_not_bytes() {
        let accented = "é".repeat(MAX_TASK_TEXT_CHARS);
        assert!(validate_task_text(&accented, MAX_TASK_TEXT_CHARS).is_ok());

        let err = validate_task_text(&format!("{accented}é"), MAX_TASK_TEXT_CHARS)
            .expect_err("101 characters must be rejected");
        assert_eq!(
            err,
            TaskValidationError::TooLong {
                max: 100,
                actual: 101
            }
        );
    }

    #[test]
    fn toggle_has_period_two() {
        let mut task = Task::new(TaskId::new(7), "water plants");
        assert!(task.is_active());
        task.toggle();
        assert!(task.completed);
        task.toggle();
        assert!(!task.completed);
    }
}
