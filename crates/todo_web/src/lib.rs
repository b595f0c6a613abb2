//! HTTP surface for the to-do list.
//!
//! # Responsibility
//! - Serve the server-rendered task page and the JSON task API.
//! - Bridge async request handling to the synchronous core store.
//!
//! # Invariants
//! - Handlers never touch SQLite directly; all access goes through `TaskStore`.
//! - The page renders on every request, even when the store is unavailable.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod render;
pub mod routes;
pub mod store;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::{build_router, serve, AppState, API_TODO_PATH};
pub use store::TaskStore;
