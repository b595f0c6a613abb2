//! Core domain logic for the to-do list.
//! This crate is the single source of truth for task invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Task, TaskId, TaskValidationError, MAX_DESCRIPTION_CHARS};
pub use repo::task_repo::{
    RepoError, RepoResult, SqliteTaskRepository, TaskRepository, TaskStats,
};
pub use service::task_service::TaskService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
