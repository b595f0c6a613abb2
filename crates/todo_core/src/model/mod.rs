//! Domain model for the to-do list.
//!
//! # Responsibility
//! - Define the canonical task record shared by storage, API and page rendering.
//!
//! # Invariants
//! - Every task is identified by a store-assigned `TaskId` that is never reused.
//! - Tasks are immutable once persisted; there is no update or delete path.

pub mod task;
