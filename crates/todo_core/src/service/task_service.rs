//! Task use-case service.
//!
//! # Responsibility
//! - Provide the create and list entry points for core callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::task::Task;
use crate::repo::task_repo::{RepoResult, TaskRepository, TaskStats};

/// Use-case service wrapper for task operations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new task and returns it with its assigned id.
    ///
    /// # Contract
    /// - The description is stored verbatim.
    /// - Blank or over-long descriptions are rejected with `RepoError::Validation`.
    pub fn create_task(&self, description: &str) -> RepoResult<Task> {
        self.repo.create_task(description)
    }

    /// Lists every task in insertion order. Empty store yields an empty vec.
    pub fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        self.repo.list_tasks()
    }

    /// Returns task count and newest creation time.
    pub fn stats(&self) -> RepoResult<TaskStats> {
        self.repo.stats()
    }
}
