//! Domain model for the to-do list.
//!
//! # Responsibility
//! - Define the task record and the filter selector used by every layer.
//!
//! # Invariants
//! - Every task is identified by a `TaskId` unique within its store.
//! - Deletion is a hard removal; there are no tombstones.

pub mod filter;
pub mod task;
