//! Key-value byte storage boundary and its backings.
//!
//! # Responsibility
//! - Define the minimal `get`/`set`/`remove` contract persistence relies on.
//! - Provide interchangeable backings (in-memory, SQLite, expiring wrapper).
//!
//! # Invariants
//! - Backings never interpret stored bytes; encoding belongs to callers.
//! - `get` on a missing key is `Ok(None)`, never an error.
//! - Callers above this layer must stay agnostic of the concrete backing.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod expiring;
pub mod memory;
pub mod migrations;
pub mod sqlite;

pub use expiring::{Clock, ExpiringKvStore, ExpiryPolicy, SystemClock};
pub use memory::MemoryKvStore;
pub use sqlite::{open_db, open_db_in_memory, SqliteKvStore};

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure reported by a storage backing.
#[derive(Debug)]
pub enum StorageError {
    /// Backing cannot be reached at all.
    Unavailable(String),
    /// Write rejected because it would exceed the backing's capacity.
    QuotaExceeded { key: String, bytes: usize },
    /// Stored entry exists but its framing is unreadable.
    CorruptEntry(String),
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
            Self::QuotaExceeded { key, bytes } => {
                write!(f, "storage quota exceeded writing {bytes} bytes to `{key}`")
            }
            Self::CorruptEntry(key) => write!(f, "stored entry `{key}` is corrupt"),
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Byte-oriented key-value store.
///
/// Methods take `&self`; backings use interior mutability or a borrowed
/// connection, so one store can be shared by several adapters.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;
    fn set(&self, key: &str, value: &[u8]) -> StorageResult<()>;
    fn remove(&self, key: &str) -> StorageResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}
