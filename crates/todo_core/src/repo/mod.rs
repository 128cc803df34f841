//! Repository layer: task snapshot persistence over key-value storage.
//!
//! # Invariants
//! - Repositories hold no task state of their own; every save writes the
//!   full snapshot handed to them.
//! - Repository APIs report semantic decode errors separately from storage
//!   transport errors.

pub mod task_repo;
