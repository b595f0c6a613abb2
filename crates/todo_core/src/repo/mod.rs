//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes enforce `Task::validate_description()` before persistence.
//! - Every storage failure surfaces as `RepoError::StoreUnavailable`.

pub mod task_repo;
