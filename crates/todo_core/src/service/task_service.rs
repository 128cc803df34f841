//! Task store use-case service.
//!
//! # Responsibility
//! - Own the authoritative, ordered task list for one widget instance.
//! - Apply add/toggle/delete/clear commands and write each result through
//!   to the repository.
//! - Hold the active filter mode and answer view queries against it.
//!
//! # Invariants
//! - In-memory state is the source of truth for the session. A failed save
//!   never rolls back or rejects a mutation that already succeeded.
//! - Ids come from a per-store counter seeded above every loaded id; they
//!   are never derived from wall-clock time.
//! - Rejected commands (validation, unknown id) leave state untouched and
//!   do not write to storage.

use crate::model::filter::FilterMode;
use crate::model::task::{
    validate_task_text, Task, TaskId, TaskValidationError, MAX_TASK_TEXT_CHARS,
};
use crate::repo::task_repo::{RepoError, TaskRepository};
use crate::view::filter::{count_matching, filter_tasks};
use crate::view::projection::{project, TaskListView};
use crate::view::summary::summarize;
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, TaskServiceError>;

/// Rejection returned by task commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskServiceError {
    /// Input text failed validation; nothing changed.
    Validation(TaskValidationError),
    /// No task has this id; nothing changed.
    NotFound(TaskId),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<TaskValidationError> for TaskServiceError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Tunables for one task store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskServiceConfig {
    /// Maximum characters accepted by `add` after trimming.
    pub max_text_chars: usize,
}

impl Default for TaskServiceConfig {
    fn default() -> Self {
        Self {
            max_text_chars: MAX_TASK_TEXT_CHARS,
        }
    }
}

/// Authoritative task store backed by a write-through repository.
pub struct TaskService<R: TaskRepository> {
    repo: R,
    config: TaskServiceConfig,
    tasks: Vec<Task>,
    next_id: u64,
    filter: FilterMode,
    last_persistence_error: Option<RepoError>,
}

impl<R: TaskRepository> TaskService<R> {
    /// Opens a store with default configuration.
    pub fn new(repo: R) -> Self {
        Self::open(repo, TaskServiceConfig::default())
    }

    /// Loads persisted tasks and opens the store.
    ///
    /// Load failures are logged and replaced by an empty list; the failure
    /// stays readable through [`Self::last_persistence_error`].
    pub fn open(repo: R, config: TaskServiceConfig) -> Self {
        let (tasks, load_error) = match repo.load() {
            Ok(tasks) => (tasks, None),
            Err(err) => {
                error!(
                    "event=store_open module=service status=error fallback=empty error={}",
                    err
                );
                (Vec::new(), Some(err))
            }
        };

        let next_id = tasks
            .iter()
            .map(|task| task.id.get())
            .max()
            .map_or(1, |max| max.saturating_add(1));

        info!(
            "event=store_open module=service status=ok count={} next_id={}",
            tasks.len(),
            next_id
        );

        Self {
            repo,
            config,
            tasks,
            next_id,
            filter: FilterMode::default(),
            last_persistence_error: load_error,
        }
    }

    /// Tunables this store was opened with.
    pub fn config(&self) -> TaskServiceConfig {
        self.config
    }

    /// Read-only snapshot of every task in display order.
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up one task by id.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Number of tasks regardless of filter.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the store holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of tasks not yet completed.
    pub fn active_count(&self) -> usize {
        count_matching(&self.tasks, FilterMode::Active)
    }

    /// Number of completed tasks.
    pub fn completed_count(&self) -> usize {
        count_matching(&self.tasks, FilterMode::Completed)
    }

    /// Validates `raw_text` and appends a new incomplete task.
    ///
    /// # Errors
    /// - `Validation` when trimmed text is empty or over the configured cap.
    pub fn add(&mut self, raw_text: &str) -> ServiceResult<Task> {
        let text = match validate_task_text(raw_text, self.config.max_text_chars) {
            Ok(text) => text,
            Err(err) => {
                debug!("event=task_add module=service status=rejected reason={err}");
                return Err(err.into());
            }
        };

        let task = Task::new(self.allocate_id(), text);
        self.tasks.push(task.clone());
        info!(
            "event=task_add module=service status=ok id={} count={}",
            task.id,
            self.tasks.len()
        );
        self.persist("task_add");
        Ok(task)
    }

    /// Flips completion of one task.
    ///
    /// # Errors
    /// - `NotFound` when no task has `id`.
    pub fn toggle(&mut self, id: TaskId) -> ServiceResult<Task> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            debug!("event=task_toggle module=service status=not_found id={id}");
            return Err(TaskServiceError::NotFound(id));
        };

        task.toggle();
        let updated = task.clone();
        info!(
            "event=task_toggle module=service status=ok id={} completed={}",
            updated.id, updated.completed
        );
        self.persist("task_toggle");
        Ok(updated)
    }

    /// Removes one task immediately.
    ///
    /// Any exit animation is the view's business; store state changes here.
    ///
    /// # Errors
    /// - `NotFound` when no task has `id`.
    pub fn delete(&mut self, id: TaskId) -> ServiceResult<()> {
        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            debug!("event=task_delete module=service status=not_found id={id}");
            return Err(TaskServiceError::NotFound(id));
        };

        self.tasks.remove(index);
        info!(
            "event=task_delete module=service status=ok id={} count={}",
            id,
            self.tasks.len()
        );
        self.persist("task_delete");
        Ok(())
    }

    /// Removes every task.
    pub fn clear(&mut self) {
        let removed = self.tasks.len();
        self.tasks.clear();
        info!("event=task_clear module=service status=ok removed={removed}");
        self.persist("task_clear");
    }

    /// Active filter; `All` until changed.
    pub fn filter_mode(&self) -> FilterMode {
        self.filter
    }

    /// Switches the filter used by `visible_tasks`, `summary` and `view`.
    pub fn set_filter(&mut self, mode: FilterMode) {
        debug!(
            "event=filter_set module=service status=ok from={} to={}",
            self.filter, mode
        );
        self.filter = mode;
    }

    /// Tasks visible under the active filter.
    pub fn visible_tasks(&self) -> Vec<Task> {
        filter_tasks(&self.tasks, self.filter)
    }

    /// Counter text for the active filter.
    pub fn summary(&self) -> String {
        summarize(&self.tasks, self.filter)
    }

    /// Full render model for the active filter.
    pub fn view(&self) -> TaskListView {
        project(&self.tasks, self.filter)
    }

    /// Most recent load or save failure, cleared by the next successful save.
    pub fn last_persistence_error(&self) -> Option<&RepoError> {
        self.last_persistence_error.as_ref()
    }

    fn allocate_id(&mut self) -> TaskId {
        loop {
            let candidate = TaskId::new(self.next_id);
            self.next_id = self.next_id.checked_add(1).unwrap_or(1);
            if self.get(candidate).is_none() {
                return candidate;
            }
        }
    }

    fn persist(&mut self, operation: &'static str) {
        match self.repo.save(&self.tasks) {
            Ok(()) => self.last_persistence_error = None,
            Err(err) => {
                error!(
                    "event=persist module=service status=error operation={} count={} error={}",
                    operation,
                    self.tasks.len(),
                    err
                );
                self.last_persistence_error = Some(err);
            }
        }
    }
}
