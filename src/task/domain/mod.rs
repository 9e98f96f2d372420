//! Domain model for task lifecycle management.
//!
//! Tasks are owned exclusively by the task store. Identities are referenced
//! by email value, never by live handle into the user directory.

mod assignees;
mod attributes;
mod content;
mod error;
mod event;
mod ids;
mod limits;
mod task;

pub use assignees::Assignees;
pub use attributes::{Priority, TaskStatus, ViewerRole};
pub use content::{Attachment, Comment, CommentText, FileRef, TaskTitle, parse_deadline};
pub use error::{ParsePriorityError, ParseTaskStatusError, ParseViewerRoleError, TaskDomainError};
pub use event::{TaskChange, TaskEvent};
pub use ids::TaskId;
pub use limits::TaskLimits;
pub use task::{NewTask, PersistedTaskData, Task, TaskDetailsChange};
