//! Render-ready projection of the task list.
//!
//! Rows keep raw task text. Front-ends building markup pass it through
//! [`escape_html`] first.

use crate::model::filter::FilterMode;
use crate::model::task::{Task, TaskId};
use crate::view::summary::summarize;

/// One visible list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            text: task.text.clone(),
            completed: task.completed,
        }
    }
}

/// Everything a view needs to redraw the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListView {
    pub filter: FilterMode,
    /// Visible rows in display order.
    pub rows: Vec<TaskRow>,
    /// Counter text for the current filter.
    pub summary: String,
    /// True when no row is visible and the placeholder should show instead.
    pub show_empty_state: bool,
}

/// Builds the view model for `tasks` under `mode`.
pub fn project(tasks: &[Task], mode: FilterMode) -> TaskListView {
    let rows: Vec<TaskRow> = tasks
        .iter()
        .filter(|task| mode.matches(task))
        .map(TaskRow::from)
        .collect();

    TaskListView {
        filter: mode,
        show_empty_state: rows.is_empty(),
        summary: summarize(tasks, mode),
        rows,
    }
}

/// Escapes text for safe insertion into HTML element content or attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
