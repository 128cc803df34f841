//! Counter text shown beside the task list.

use crate::model::filter::FilterMode;
use crate::model::task::Task;
use crate::view::filter::count_matching;

/// Text shown when the store holds no tasks at all under `FilterMode::All`.
pub const EMPTY_SUMMARY: &str = "0 tasks";

/// Formats the counter text for `mode`.
///
/// - `All`: `"2 tasks (1 active)"`, or [`EMPTY_SUMMARY`] when empty.
/// - `Active`: `"1 active task"`.
/// - `Completed`: `"3 completed tasks"`.
pub fn summarize(tasks: &[Task], mode: FilterMode) -> String {
    match mode {
        FilterMode::All => {
            let total = tasks.len();
            if total == 0 {
                return EMPTY_SUMMARY.to_string();
            }
            let active = count_matching(tasks, FilterMode::Active);
            format!("{total} {} ({active} active)", noun(total))
        }
        FilterMode::Active | FilterMode::Completed => {
            let count = count_matching(tasks, mode);
            format!("{count} {} {}", mode.as_str(), noun(count))
        }
    }
}

fn noun(count: usize) -> &'static str {
    if count == 1 {
        "task"
    } else {
        "tasks"
    }
}
