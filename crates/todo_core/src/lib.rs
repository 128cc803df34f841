//! Core state management for the to-do list widget.
//! This crate is the single source of truth for task invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::filter::{parse_filter_mode, FilterMode, FilterModeError};
pub use model::task::{
    trim_task_text, validate_task_text, Task, TaskId, TaskValidationError, MAX_TASK_TEXT_CHARS,
};
pub use repo::task_repo::{
    KvTaskRepository, RepoError, RepoResult, TaskRepository, DEFAULT_TASKS_KEY,
};
pub use service::task_service::{ServiceResult, TaskService, TaskServiceConfig, TaskServiceError};
pub use service::theme_service::{parse_theme, Theme, ThemeService, THEME_KEY};
pub use storage::{
    ExpiringKvStore, ExpiryPolicy, KeyValueStore, MemoryKvStore, SqliteKvStore, StorageError,
    StorageResult,
};
pub use view::filter::{count_matching, filter_tasks};
pub use view::projection::{escape_html, project, TaskListView, TaskRow};
pub use view::summary::summarize;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
