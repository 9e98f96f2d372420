//! Error types for task domain validation and parsing.

use super::TaskId;
use crate::identity::domain::Email;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the configured length.
    #[error("task title exceeds {max} characters")]
    TitleTooLong {
        /// Maximum permitted length in characters.
        max: usize,
    },

    /// The task description exceeds the configured length.
    #[error("task description exceeds {max} characters")]
    DescriptionTooLong {
        /// Maximum permitted length in characters.
        max: usize,
    },

    /// No deadline was supplied.
    #[error("task deadline is required")]
    MissingDeadline,

    /// The deadline is not a calendar date.
    #[error("invalid deadline '{0}', expected YYYY-MM-DD")]
    InvalidDeadline(String),

    /// The task has no assignees.
    #[error("a task must have at least one assignee")]
    EmptyAssignees,

    /// The task would exceed the configured assignee count.
    #[error("a task may have at most {max} assignees")]
    TooManyAssignees {
        /// Maximum permitted number of assignees.
        max: usize,
    },

    /// Removing the assignee would leave the task unassigned.
    #[error("cannot remove the last assignee of task {0}")]
    LastAssignee(TaskId),

    /// The identity is not assigned to the task.
    #[error("{email} is not assigned to task {task_id}")]
    NotAssigned {
        /// Task that was targeted.
        task_id: TaskId,
        /// Identity that is not a member of the assignee set.
        email: Email,
    },

    /// The comment text is empty after trimming.
    #[error("comment text must not be empty")]
    EmptyComment,

    /// The comment text exceeds the configured length.
    #[error("comment exceeds {max} characters")]
    CommentTooLong {
        /// Maximum permitted length in characters.
        max: usize,
    },

    /// The attachment reference is empty after trimming.
    #[error("file reference must not be empty")]
    EmptyFileReference,
}

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);

/// Error returned while parsing task viewer roles.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task viewer role: {0}")]
pub struct ParseViewerRoleError(pub String);
