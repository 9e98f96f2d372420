//! Service-level errors for task lifecycle operations.

use crate::access::{DenyReason, TaskOperation};
use crate::error::ErrorKind;
use crate::identity::{
    domain::{Email, IdentityDomainError},
    ports::UserDirectoryError,
};
use crate::task::{
    domain::{
        ParsePriorityError, ParseTaskStatusError, ParseViewerRoleError, TaskDomainError, TaskId,
    },
    ports::TaskRepositoryError,
};
use thiserror::Error;

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Task input failed domain validation.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// An email in the input is malformed.
    #[error(transparent)]
    Identity(#[from] IdentityDomainError),

    /// The requested status is not a known value.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),

    /// The requested priority is not a known value.
    #[error(transparent)]
    InvalidPriority(#[from] ParsePriorityError),

    /// The requested viewer role is not a known value.
    #[error(transparent)]
    InvalidViewerRole(#[from] ParseViewerRoleError),

    /// An assignee does not exist in the user directory.
    #[error("unknown assignee: {0}")]
    UnknownAssignee(Email),

    /// The caller does not exist in the user directory.
    #[error("unknown caller: {0}")]
    UnknownCaller(Email),

    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The caller may not perform the operation on the task.
    #[error("{operation} on task {task_id} denied: {reason}")]
    Forbidden {
        /// Task that was targeted.
        task_id: TaskId,
        /// Operation that was refused.
        operation: TaskOperation,
        /// Rule that refused it.
        reason: DenyReason,
    },

    /// The task changed between read and write.
    #[error("task {task_id} was modified concurrently, retry with fresh state")]
    Conflict {
        /// Task that was being written.
        task_id: TaskId,
    },

    /// The user directory could not be reached.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),

    /// Persistence failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),
}

impl From<TaskRepositoryError> for TaskServiceError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(task_id) => Self::NotFound(task_id),
            TaskRepositoryError::RevisionConflict { task_id, .. } => Self::Conflict { task_id },
            other => Self::Repository(other),
        }
    }
}

impl TaskServiceError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_)
            | Self::Identity(_)
            | Self::InvalidStatus(_)
            | Self::InvalidPriority(_)
            | Self::InvalidViewerRole(_) => ErrorKind::BadInput,
            Self::UnknownAssignee(_) => ErrorKind::Validation,
            Self::UnknownCaller(_) => ErrorKind::Unauthenticated,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Forbidden { .. } => ErrorKind::Forbidden,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Directory(_) => ErrorKind::Unavailable,
            Self::Repository(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;
