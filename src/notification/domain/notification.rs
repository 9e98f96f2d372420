//! Notification record and inbox filter.

use super::{NotificationId, ParseNotificationFilterError, ParseNotificationKindError};
use crate::identity::domain::Email;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of task mutation produced a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// The recipient was assigned to a task.
    TaskAssigned,
    /// A task's details were edited.
    TaskUpdated,
    /// A comment was added to a task.
    CommentAdded,
    /// A file was attached to a task.
    FileUploaded,
    /// A task's status was set.
    StatusChanged,
}

impl NotificationKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskAssigned => "task_assigned",
            Self::TaskUpdated => "task_updated",
            Self::CommentAdded => "comment_added",
            Self::FileUploaded => "file_uploaded",
            Self::StatusChanged => "status_changed",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for NotificationKind {
    type Error = ParseNotificationKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "task_assigned" => Ok(Self::TaskAssigned),
            "task_updated" => Ok(Self::TaskUpdated),
            "comment_added" => Ok(Self::CommentAdded),
            "file_uploaded" => Ok(Self::FileUploaded),
            "status_changed" => Ok(Self::StatusChanged),
            _ => Err(ParseNotificationKindError(value.to_owned())),
        }
    }
}

/// Inbox filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NotificationFilter {
    /// Every notification.
    #[default]
    All,
    /// Notifications not yet read.
    Unread,
    /// Notifications flagged important.
    Important,
}

impl NotificationFilter {
    /// Returns `true` when the notification passes the filter.
    #[must_use]
    pub const fn matches(self, notification: &Notification) -> bool {
        match self {
            Self::All => true,
            Self::Unread => !notification.is_read,
            Self::Important => notification.is_important,
        }
    }
}

impl TryFrom<&str> for NotificationFilter {
    type Error = ParseNotificationFilterError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "unread" => Ok(Self::Unread),
            "important" => Ok(Self::Important),
            _ => Err(ParseNotificationFilterError(value.to_owned())),
        }
    }
}

/// Content of a notification about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    /// Identity the notification is addressed to.
    pub recipient: Email,
    /// Kind of task mutation.
    pub kind: NotificationKind,
    /// Short heading.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Task the notification refers to.
    pub related_task: TaskId,
}

/// Notification record owned by its recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    id: NotificationId,
    recipient: Email,
    #[serde(rename = "type")]
    kind: NotificationKind,
    title: String,
    message: String,
    related_task: TaskId,
    is_read: bool,
    is_important: bool,
    created_at: DateTime<Utc>,
    read_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedNotificationData {
    /// Persisted identifier.
    pub id: NotificationId,
    /// Persisted recipient.
    pub recipient: Email,
    /// Persisted kind.
    pub kind: NotificationKind,
    /// Persisted heading.
    pub title: String,
    /// Persisted body.
    pub message: String,
    /// Persisted task reference.
    pub related_task: TaskId,
    /// Persisted read flag.
    pub is_read: bool,
    /// Persisted importance flag.
    pub is_important: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted first-read timestamp.
    pub read_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// Creates an unread, unflagged notification.
    #[must_use]
    pub fn new(content: NewNotification, clock: &impl Clock) -> Self {
        let NewNotification {
            recipient,
            kind,
            title,
            message,
            related_task,
        } = content;
        Self {
            id: NotificationId::new(),
            recipient,
            kind,
            title,
            message,
            related_task,
            is_read: false,
            is_important: false,
            created_at: clock.utc(),
            read_at: None,
        }
    }

    /// Reconstructs a notification from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedNotificationData) -> Self {
        Self {
            id: data.id,
            recipient: data.recipient,
            kind: data.kind,
            title: data.title,
            message: data.message,
            related_task: data.related_task,
            is_read: data.is_read,
            is_important: data.is_important,
            created_at: data.created_at,
            read_at: data.read_at,
        }
    }

    /// Returns the notification identifier.
    #[must_use]
    pub const fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the recipient email.
    #[must_use]
    pub const fn recipient(&self) -> &Email {
        &self.recipient
    }

    /// Returns the notification kind.
    #[must_use]
    pub const fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// Returns the heading.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the body text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the referenced task. The task may since have changed.
    #[must_use]
    pub const fn related_task(&self) -> TaskId {
        self.related_task
    }

    /// Returns `true` once the recipient has read the notification.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        self.is_read
    }

    /// Returns `true` when the recipient flagged the notification.
    #[must_use]
    pub const fn is_important(&self) -> bool {
        self.is_important
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the time of the first read, if any.
    #[must_use]
    pub const fn read_at(&self) -> Option<DateTime<Utc>> {
        self.read_at
    }

    /// Returns `true` when addressed to the email.
    #[must_use]
    pub fn is_addressed_to(&self, email: &Email) -> bool {
        &self.recipient == email
    }

    /// Marks the notification read. Returns `false` if it already was.
    pub fn mark_read(&mut self, clock: &impl Clock) -> bool {
        self.mark_read_at(clock.utc())
    }

    /// Marks the notification read at a given time.
    ///
    /// The first read time is kept; returns `false` if already read.
    pub fn mark_read_at(&mut self, read_at: DateTime<Utc>) -> bool {
        if self.is_read {
            return false;
        }
        self.is_read = true;
        self.read_at = Some(read_at);
        true
    }

    /// Flips the importance flag and returns the new value.
    pub const fn toggle_important(&mut self) -> bool {
        self.is_important = !self.is_important;
        self.is_important
    }
}
