//! Filter engine.

use crate::model::filter::FilterMode;
use crate::model::task::Task;

/// Returns the tasks visible under `mode`, preserving relative order.
pub fn filter_tasks(tasks: &[Task], mode: FilterMode) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| mode.matches(task))
        .cloned()
        .collect()
}

/// Counts the tasks visible under `mode` without cloning them.
pub fn count_matching(tasks: &[Task], mode: FilterMode) -> usize {
    tasks.iter().filter(|task| mode.matches(task)).count()
}
