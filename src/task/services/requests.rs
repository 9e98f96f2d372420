//! Request payloads accepted by the task lifecycle service.
//!
//! Requests carry raw strings as received from a client. The service
//! validates them into domain values before touching any state.

use crate::task::domain::{Priority, Task, TaskStatus};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub(super) title: String,
    pub(super) deadline: String,
    pub(super) assigned_to: Vec<String>,
    pub(super) description: Option<String>,
    pub(super) priority: Option<String>,
    pub(super) viewer_role: Option<String>,
    pub(super) department: Option<String>,
    pub(super) comment: Option<String>,
    pub(super) attachment: Option<AttachFileRequest>,
}

impl CreateTaskRequest {
    /// Creates a request with the required task fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        deadline: impl Into<String>,
        assigned_to: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            title: title.into(),
            deadline: deadline.into(),
            assigned_to: assigned_to.into_iter().collect(),
            description: None,
            priority: None,
            viewer_role: None,
            department: None,
            comment: None,
            attachment: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the task priority (`high`, `medium` or `low`).
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the viewer role hint (`admin`, `editor` or `viewer`).
    #[must_use]
    pub fn with_viewer_role(mut self, viewer_role: impl Into<String>) -> Self {
        self.viewer_role = Some(viewer_role.into());
        self
    }

    /// Sets the task department.
    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Records an initial comment authored by the creator.
    ///
    /// A blank comment is treated as absent.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Records an initial attachment uploaded by the creator.
    #[must_use]
    pub fn with_attachment(mut self, attachment: AttachFileRequest) -> Self {
        self.attachment = Some(attachment);
        self
    }
}

/// Request payload describing an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachFileRequest {
    pub(super) location: String,
    pub(super) file_name: Option<String>,
}

impl AttachFileRequest {
    /// Creates a request for a file stored at `location`.
    #[must_use]
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            file_name: None,
        }
    }

    /// Sets the original file name.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }
}

/// Request payload for editing a task's descriptive fields.
///
/// Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskDetailsRequest {
    pub(super) title: Option<String>,
    pub(super) description: Option<String>,
    pub(super) priority: Option<String>,
    pub(super) viewer_role: Option<String>,
    pub(super) deadline: Option<String>,
    pub(super) department: Option<Option<String>>,
}

impl UpdateTaskDetailsRequest {
    /// Creates a request that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Replaces the viewer role hint.
    #[must_use]
    pub fn with_viewer_role(mut self, viewer_role: impl Into<String>) -> Self {
        self.viewer_role = Some(viewer_role.into());
        self
    }

    /// Replaces the deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }

    /// Moves the task to another department.
    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(Some(department.into()));
        self
    }

    /// Removes the task from any department.
    #[must_use]
    pub fn without_department(mut self) -> Self {
        self.department = Some(None);
        self
    }
}

/// Optional narrowing applied after visibility scoping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskQuery {
    status: Option<TaskStatus>,
    priority: Option<Priority>,
}

impl TaskQuery {
    /// Creates a query matching every visible task.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Keeps only tasks with the given status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Keeps only tasks with the given priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Returns `true` when the task satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|status| task.status() == status)
            && self.priority.is_none_or(|priority| task.priority() == priority)
    }
}
