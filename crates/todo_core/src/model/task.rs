//! Task domain model.
//!
//! # Responsibility
//! - Define the persisted task record and its wire shape.
//! - Validate user-supplied descriptions before they reach storage.
//!
//! # Invariants
//! - `id` is assigned by the store and immutable afterwards.
//! - `description` is stored verbatim; validation never rewrites it.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned task identifier (SQLite rowid).
pub type TaskId = i64;

/// Upper bound on description length, counted in chars.
pub const MAX_DESCRIPTION_CHARS: usize = 1000;

/// Persisted to-do item.
///
/// Serialized as `{ "id": number, "description": string }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub description: String,
}

impl Task {
    /// Builds a task from an already-persisted row.
    pub fn new(id: TaskId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
        }
    }

    /// Checks a candidate description against write-path rules.
    ///
    /// # Errors
    /// - `EmptyDescription` when the text is empty or whitespace-only.
    /// - `DescriptionTooLong` when it exceeds `MAX_DESCRIPTION_CHARS`.
    pub fn validate_description(description: &str) -> Result<(), TaskValidationError> {
        if description.trim().is_empty() {
            return Err(TaskValidationError::EmptyDescription);
        }

        let chars = description.chars().count();
        if chars > MAX_DESCRIPTION_CHARS {
            return Err(TaskValidationError::DescriptionTooLong {
                chars,
                max: MAX_DESCRIPTION_CHARS,
            });
        }

        Ok(())
    }

    /// Read-path check for a persisted row.
    ///
    /// Only the store-assigned id is checked. Description rules guard the
    /// write path; rows written by other writers are listed as stored.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id <= 0 {
            return Err(TaskValidationError::InvalidId(self.id));
        }
        Ok(())
    }
}

/// Rejection reasons for task data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyDescription,
    DescriptionTooLong { chars: usize, max: usize },
    InvalidId(TaskId),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "task description cannot be empty"),
            Self::DescriptionTooLong { chars, max } => write!(
                f,
                "task description is {chars} characters long; maximum is {max}"
            ),
            Self::InvalidId(id) => write!(f, "invalid task id {id}"),
        }
    }
}

impl Error for TaskValidationError {}
