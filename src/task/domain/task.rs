//! Task aggregate root.

use super::{
    Assignees, Attachment, Comment, CommentText, FileRef, Priority, TaskDomainError, TaskId,
    TaskStatus, TaskTitle, ViewerRole,
};
use crate::identity::domain::{Department, Email};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated input for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task title.
    pub title: TaskTitle,
    /// Free-text description, possibly empty.
    pub description: String,
    /// Creator email.
    pub created_by: Email,
    /// Initial assignees.
    pub assigned_to: Assignees,
    /// Task priority.
    pub priority: Priority,
    /// Informational viewer role hint.
    pub viewer_role: ViewerRole,
    /// Due date.
    pub deadline: NaiveDate,
    /// Department used for subadmin scoping.
    pub department: Option<Department>,
    /// Comment recorded with the task, authored by the creator.
    pub initial_comment: Option<CommentText>,
    /// Attachment recorded with the task, uploaded by the creator.
    pub initial_attachment: Option<FileRef>,
}

/// Changes to a task's descriptive fields. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDetailsChange {
    /// Replacement title.
    pub title: Option<TaskTitle>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement priority.
    pub priority: Option<Priority>,
    /// Replacement viewer role hint.
    pub viewer_role: Option<ViewerRole>,
    /// Replacement deadline.
    pub deadline: Option<NaiveDate>,
    /// Replacement department; `Some(None)` clears it.
    pub department: Option<Option<Department>>,
}

impl TaskDetailsChange {
    /// Returns `true` when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.viewer_role.is_none()
            && self.deadline.is_none()
            && self.department.is_none()
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: String,
    created_by: Email,
    assigned_to: Assignees,
    priority: Priority,
    #[serde(rename = "role")]
    viewer_role: ViewerRole,
    status: TaskStatus,
    deadline: NaiveDate,
    department: Option<Department>,
    comments: Vec<Comment>,
    attachments: Vec<Attachment>,
    revision: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: String,
    /// Persisted creator.
    pub created_by: Email,
    /// Persisted assignees.
    pub assigned_to: Assignees,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted viewer role hint.
    pub viewer_role: ViewerRole,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted deadline.
    pub deadline: NaiveDate,
    /// Persisted department.
    pub department: Option<Department>,
    /// Persisted comment history.
    pub comments: Vec<Comment>,
    /// Persisted attachment history.
    pub attachments: Vec<Attachment>,
    /// Persisted revision counter.
    pub revision: u64,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new pending task.
    #[must_use]
    pub fn new(input: NewTask, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let NewTask {
            title,
            description,
            created_by,
            assigned_to,
            priority,
            viewer_role,
            deadline,
            department,
            initial_comment,
            initial_attachment,
        } = input;

        let comments = initial_comment
            .map(|text| Comment {
                author: created_by.clone(),
                text,
                created_at: timestamp,
            })
            .into_iter()
            .collect();
        let attachments = initial_attachment
            .map(|file| Attachment {
                uploader: created_by.clone(),
                file,
                created_at: timestamp,
            })
            .into_iter()
            .collect();

        Self {
            id: TaskId::new(),
            title,
            description,
            created_by,
            assigned_to,
            priority,
            viewer_role,
            status: TaskStatus::Pending,
            deadline,
            department,
            comments,
            attachments,
            revision: 0,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            created_by: data.created_by,
            assigned_to: data.assigned_to,
            priority: data.priority,
            viewer_role: data.viewer_role,
            status: data.status,
            deadline: data.deadline,
            department: data.department,
            comments: data.comments,
            attachments: data.attachments,
            revision: data.revision,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the creator email.
    #[must_use]
    pub const fn created_by(&self) -> &Email {
        &self.created_by
    }

    /// Returns the assignee set.
    #[must_use]
    pub const fn assigned_to(&self) -> &Assignees {
        &self.assigned_to
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the informational viewer role hint.
    #[must_use]
    pub const fn viewer_role(&self) -> ViewerRole {
        self.viewer_role
    }

    /// Returns the task status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the deadline.
    #[must_use]
    pub const fn deadline(&self) -> NaiveDate {
        self.deadline
    }

    /// Returns the department, if any.
    #[must_use]
    pub const fn department(&self) -> Option<&Department> {
        self.department.as_ref()
    }

    /// Returns the comment history in arrival order.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Returns the attachment history in arrival order.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Returns the revision counter, bumped by every mutation.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when the email is an assignee.
    #[must_use]
    pub fn is_assignee(&self, email: &Email) -> bool {
        self.assigned_to.contains(email)
    }

    /// Returns `true` when the email created the task.
    #[must_use]
    pub fn is_creator(&self, email: &Email) -> bool {
        &self.created_by == email
    }

    /// Returns `true` when the task belongs to the department.
    #[must_use]
    pub fn in_department(&self, department: &Department) -> bool {
        self.department.as_ref() == Some(department)
    }

    /// Returns assignees followed by the creator, without repeats.
    #[must_use]
    pub fn stakeholders(&self) -> Vec<Email> {
        let mut emails: Vec<Email> = self.assigned_to.iter().cloned().collect();
        if !emails.contains(&self.created_by) {
            emails.push(self.created_by.clone());
        }
        emails
    }

    /// Sets the status and returns the previous one.
    ///
    /// Any status may follow any other, including itself.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) -> TaskStatus {
        let previous = self.status;
        self.status = status;
        self.touch(clock);
        previous
    }

    /// Appends a comment and returns the stored entry.
    pub fn add_comment(&mut self, author: Email, text: CommentText, clock: &impl Clock) -> Comment {
        let comment = Comment {
            author,
            text,
            created_at: clock.utc(),
        };
        self.comments.push(comment.clone());
        self.touch(clock);
        comment
    }

    /// Appends an attachment reference and returns the stored entry.
    pub fn add_attachment(
        &mut self,
        uploader: Email,
        file: FileRef,
        clock: &impl Clock,
    ) -> Attachment {
        let attachment = Attachment {
            uploader,
            file,
            created_at: clock.utc(),
        };
        self.attachments.push(attachment.clone());
        self.touch(clock);
        attachment
    }

    /// Applies a details change.
    pub fn apply_details(&mut self, change: TaskDetailsChange, clock: &impl Clock) {
        let TaskDetailsChange {
            title,
            description,
            priority,
            viewer_role,
            deadline,
            department,
        } = change;

        if let Some(value) = title {
            self.title = value;
        }
        if let Some(value) = description {
            self.description = value;
        }
        if let Some(value) = priority {
            self.priority = value;
        }
        if let Some(value) = viewer_role {
            self.viewer_role = value;
        }
        if let Some(value) = deadline {
            self.deadline = value;
        }
        if let Some(value) = department {
            self.department = value;
        }
        self.touch(clock);
    }

    /// Adds assignees and returns those that were not already members.
    ///
    /// The task is left untouched when every email is already assigned.
    pub fn assign(
        &mut self,
        emails: impl IntoIterator<Item = Email>,
        clock: &impl Clock,
    ) -> Vec<Email> {
        let added: Vec<Email> = emails
            .into_iter()
            .filter(|email| self.assigned_to.insert(email.clone()))
            .collect();
        if !added.is_empty() {
            self.touch(clock);
        }
        added
    }

    /// Removes an assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotAssigned`] when the email is not a
    /// member and [`TaskDomainError::LastAssignee`] when it is the only one.
    pub fn unassign(&mut self, email: &Email, clock: &impl Clock) -> Result<(), TaskDomainError> {
        let removed = self
            .assigned_to
            .remove(email)
            .map_err(|_| TaskDomainError::LastAssignee(self.id))?;
        if !removed {
            return Err(TaskDomainError::NotAssigned {
                task_id: self.id,
                email: email.clone(),
            });
        }
        self.touch(clock);
        Ok(())
    }

    /// Records a mutation.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
        self.revision += 1;
    }
}
