//! Async task store facade.
//!
//! # Responsibility
//! - Own the shared SQLite connection for the server process.
//! - Run blocking repository calls off the async runtime.
//!
//! # Invariants
//! - Every store call holds the connection lock for exactly one round-trip,
//!   so concurrent creates are serialized and never share an id.
//! - A poisoned lock is recovered; SQLite keeps the connection consistent
//!   when a caller panics mid-call.
//! - Worker failures surface as `RepoError::StoreUnavailable`.

use log::{error, warn};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use todo_core::db::{open_db, open_db_in_memory, DbError, DbResult};
use todo_core::{RepoError, RepoResult, SqliteTaskRepository, Task, TaskService, TaskStats};

type SqliteTaskService<'conn> = TaskService<SqliteTaskRepository<'conn>>;

/// Cloneable handle to the process-wide task store.
#[derive(Clone)]
pub struct TaskStore {
    conn: Arc<Mutex<Connection>>,
}

impl TaskStore {
    /// Wraps an already-bootstrapped connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Opens (and migrates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        open_db(path).map(Self::new)
    }

    /// Opens an isolated in-memory store.
    pub fn open_in_memory() -> DbResult<Self> {
        open_db_in_memory().map(Self::new)
    }

    /// Returns every task in insertion order.
    pub async fn list_all(&self) -> RepoResult<Vec<Task>> {
        self.run("task_list", |service| service.list_tasks()).await
    }

    /// Persists a new task and returns it with its assigned id.
    pub async fn create(&self, description: String) -> RepoResult<Task> {
        self.run("task_create", move |service| {
            service.create_task(&description)
        })
        .await
    }

    /// Returns task count and newest creation time.
    pub async fn stats(&self) -> RepoResult<TaskStats> {
        self.run("task_stats", |service| service.stats()).await
    }

    async fn run<T, F>(&self, event: &'static str, op: F) -> RepoResult<T>
    where
        T: Send + 'static,
        F: for<'conn> FnOnce(&SqliteTaskService<'conn>) -> RepoResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let joined = tokio::task::spawn_blocking(move || {
            let guard = conn.lock().unwrap_or_else(|poisoned| {
                warn!("event={event} module=store status=recovered error_code=lock_poisoned");
                conn.clear_poison();
                poisoned.into_inner()
            });
            let service = TaskService::new(SqliteTaskRepository::new(&guard));
            op(&service)
        })
        .await;

        match joined {
            Ok(result) => result,
            Err(err) => {
                error!("event={event} module=store status=error error_code=worker_failed error={err}");
                Err(RepoError::StoreUnavailable(DbError::Unreachable(format!(
                    "store worker failed: {err}"
                ))))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TaskStore;
    use std::collections::HashSet;
    use todo_core::TaskStats;

    #[tokio::test]
    async fn list_all_on_empty_store_is_empty() {
        let store = TaskStore::open_in_memory().unwrap();
        assert!(store.list_all().await.unwrap().is_empty());
        assert_eq!(
            store.stats().await.unwrap(),
            TaskStats {
                count: 0,
                last_created_at_ms: None
            }
        );
    }

    #[tokio::test]
    async fn create_then_list_all_round_trips_through_worker() {
        let store = TaskStore::open_in_memory().unwrap();

        let created = store.create("x".to_string()).await.unwrap();
        let listed = store.list_all().await.unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_never_share_an_id() {
        let store = TaskStore::open_in_memory().unwrap();

        let handles: Vec<_> = (0..32)
            .map(|n| {
                let store = store.clone();
                let description = if n % 2 == 0 { "a" } else { "b" };
                tokio::spawn(async move { store.create(description.to_string()).await })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            let task = handle.await.unwrap().unwrap();
            assert!(ids.insert(task.id), "duplicate id {}", task.id);
        }

        assert_eq!(store.list_all().await.unwrap().len(), 32);
    }

    #[tokio::test]
    async fn store_keeps_serving_after_a_caller_panics_holding_the_lock() {
        let store = TaskStore::open_in_memory().unwrap();
        let before = store.create("before".to_string()).await.unwrap();

        let conn = std::sync::Arc::clone(&store.conn);
        let _ = std::thread::spawn(move || {
            let _guard = conn.lock().unwrap();
            panic!("panic while holding the connection lock");
        })
        .join();
        assert!(store.conn.is_poisoned());

        let after = store.create("after".to_string()).await.unwrap();
        assert!(after.id > before.id);
        assert_eq!(store.list_all().await.unwrap(), vec![before, after]);
        assert!(!store.conn.is_poisoned());
    }
}
