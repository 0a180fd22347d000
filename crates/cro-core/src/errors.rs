//! Cross-cutting error types for the field tracker.
//!
//! `CoreError` covers every failure the task and checklist state model can
//! report. Persistence and configuration errors live in their own crates and
//! wrap this one where needed.

use thiserror::Error;

use crate::enums::{EntityKind, TaskStatus};

/// Errors raised by the task and checklist state model.
///
/// All variants are local and recoverable; the caller decides how to surface
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Lookup of a task, category, or checklist item returned no result.
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    /// `mark_complete` was called on a task that is already terminal.
    #[error("Task {id} is already completed")]
    AlreadyCompleted { id: String },

    /// A checklist mutation was attempted on a completed task.
    #[error("Task {id} is completed; its checklist is frozen")]
    TaskFrozen { id: String },

    /// A status change was attempted that the state machine does not allow.
    #[error("Invalid state transition: task {id} from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: TaskStatus,
        to: TaskStatus,
    },

    /// Input failed validation (unknown enum tag, bad intake record, ...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The OS random source could not produce bytes for a new ID.
    #[error("ID generation failed: OS random source unavailable: {0}")]
    RandomSource(String),
}

impl CoreError {
    #[must_use]
    pub fn task_not_found(id: &str) -> Self {
        Self::NotFound {
            entity: EntityKind::Task,
            id: id.to_string(),
        }
    }

    #[must_use]
    pub fn category_not_found(name: &str) -> Self {
        Self::NotFound {
            entity: EntityKind::Category,
            id: name.to_string(),
        }
    }

    /// Item ids are reported as `{task_id}/{label}`.
    #[must_use]
    pub fn item_not_found(task_id: &str, label: &str) -> Self {
        Self::NotFound {
            entity: EntityKind::ChecklistItem,
            id: format!("{task_id}/{label}"),
        }
    }
}
