//! Task persistence contract and key-value implementation.
//!
//! # Responsibility
//! - Serialize the full task sequence under one fixed key.
//! - Decode stored data back into an ordered task list.
//!
//! # Invariants
//! - Wire format is a JSON array of `{ "id", "text", "completed" }` objects
//!   in display order; round-trips are lossless.
//! - An absent key loads as an empty list, never an error.
//! - Loaded data with duplicate ids or blank text is rejected as invalid
//!   instead of being partially repaired.

use crate::model::task::{trim_task_text, Task, TaskId};
use crate::storage::{KeyValueStore, StorageError};
use log::debug;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key used when none is configured.
pub const DEFAULT_TASKS_KEY: &str = "todos";

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure while loading or saving the task list.
#[derive(Debug)]
pub enum RepoError {
    Store(StorageError),
    Decode(serde_json::Error),
    Encode(serde_json::Error),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Decode(err) => write!(f, "stored task list is malformed: {err}"),
            Self::Encode(err) => write!(f, "task list could not be encoded: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Decode(err) | Self::Encode(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Store(value)
    }
}

/// Repository interface for the task list snapshot.
pub trait TaskRepository {
    fn load(&self) -> RepoResult<Vec<Task>>;
    fn save(&self, tasks: &[Task]) -> RepoResult<()>;
}

impl<R: TaskRepository + ?Sized> TaskRepository for &R {
    fn load(&self) -> RepoResult<Vec<Task>> {
        (**self).load()
    }

    fn save(&self, tasks: &[Task]) -> RepoResult<()> {
        (**self).save(tasks)
    }
}

/// Task repository writing JSON snapshots into a key-value store.
pub struct KvTaskRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KvTaskRepository<S> {
    /// Uses [`DEFAULT_TASKS_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_TASKS_KEY)
    }

    /// Stores the task list under `key` instead of the default.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Storage key the snapshot is written under.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<S: KeyValueStore> TaskRepository for KvTaskRepository<S> {
    fn load(&self) -> RepoResult<Vec<Task>> {
        let Some(bytes) = self.store.get(&self.key)? else {
            debug!("event=tasks_load module=repo status=absent key={}", self.key);
            return Ok(Vec::new());
        };

        let tasks = decode_tasks(&bytes)?;
        debug!(
            "event=tasks_load module=repo status=ok key={} count={} bytes={}",
            self.key,
            tasks.len(),
            bytes.len()
        );
        Ok(tasks)
    }

    fn save(&self, tasks: &[Task]) -> RepoResult<()> {
        let bytes = encode_tasks(tasks)?;
        self.store.set(&self.key, &bytes)?;
        debug!(
            "event=tasks_save module=repo status=ok key={} count={} bytes={}",
            self.key,
            tasks.len(),
            bytes.len()
        );
        Ok(())
    }
}

/// Encodes tasks into the stored JSON array form.
pub fn encode_tasks(tasks: &[Task]) -> RepoResult<Vec<u8>> {
    serde_json::to_vec(tasks).map_err(RepoError::Encode)
}

/// Decodes the stored JSON array form and checks store invariants.
pub fn decode_tasks(bytes: &[u8]) -> RepoResult<Vec<Task>> {
    let tasks: Vec<Task> = serde_json::from_slice(bytes).map_err(RepoError::Decode)?;

    let mut seen: HashSet<TaskId> = HashSet::with_capacity(tasks.len());
    for task in &tasks {
        if !seen.insert(task.id) {
            return Err(RepoError::InvalidData(format!(
                "duplicate task id `{}`",
                task.id
            )));
        }
        if trim_task_text(&task.text).is_empty() {
            return Err(RepoError::InvalidData(format!(
                "task `{}` has blank text",
                task.id
            )));
        }
    }

    Ok(tasks)
}
