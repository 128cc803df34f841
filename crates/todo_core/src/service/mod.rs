//! Core use-case services.
//!
//! # Responsibility
//! - Own widget state and expose an explicit command interface to views.
//! - Keep views decoupled from repository and storage details.

pub mod task_service;
pub mod theme_service;
