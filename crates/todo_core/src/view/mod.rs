//! Read-side projections of the task list.
//!
//! # Responsibility
//! - Derive visible subsets, counter text and render rows from task state.
//!
//! # Invariants
//! - Every function here is pure: same input, same output, no mutation.
//! - Filtering and counting share `FilterMode::matches`, so counts always
//!   agree with the rows a view shows.

pub mod filter;
pub mod projection;
pub mod summary;
