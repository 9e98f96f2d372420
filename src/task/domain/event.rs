//! Events emitted after a task mutation has been committed.

use super::{Attachment, Comment, Task, TaskStatus};
use crate::identity::domain::Email;

/// What happened to the task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskChange {
    /// The task was created; every assignee is new.
    Created,
    /// Identities were added to the assignee set.
    Assigned {
        /// Identities that were not assigned before.
        added: Vec<Email>,
    },
    /// Descriptive fields were edited.
    DetailsUpdated,
    /// The status was set.
    StatusChanged {
        /// Status before the change.
        from: TaskStatus,
        /// Status after the change.
        to: TaskStatus,
    },
    /// A comment was appended.
    CommentAdded(Comment),
    /// An attachment was appended.
    AttachmentAdded(Attachment),
}

/// A committed task mutation, carrying the task as stored afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEvent {
    /// Identity that caused the mutation.
    pub actor: Email,
    /// Task snapshot after the mutation.
    pub task: Task,
    /// Kind of mutation.
    pub change: TaskChange,
}

impl TaskEvent {
    /// Creates an event.
    #[must_use]
    pub const fn new(actor: Email, task: Task, change: TaskChange) -> Self {
        Self {
            actor,
            task,
            change,
        }
    }
}
