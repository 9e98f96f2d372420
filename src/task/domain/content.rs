//! Validated task text values and append-only history entries.

use super::TaskDomainError;
use crate::identity::domain::Email;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-empty, trimmed task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated task title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the value is empty after
    /// trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskTitle {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskTitle> for String {
    fn from(value: TaskTitle) -> Self {
        value.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Non-empty, trimmed comment body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommentText(String);

impl CommentText {
    /// Creates validated comment text.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyComment`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyComment);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the comment text as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CommentText {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CommentText> for String {
    fn from(value: CommentText) -> Self {
        value.0
    }
}

/// Reference to a stored file.
///
/// File storage is external; the task only records where the upload lives
/// (an object key or URL) and optionally the original file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRef {
    location: String,
    file_name: Option<String>,
}

impl FileRef {
    /// Creates a validated file reference.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyFileReference`] when the location is
    /// empty after trimming.
    pub fn new(location: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = location.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyFileReference);
        }
        Ok(Self {
            location: trimmed.to_owned(),
            file_name: None,
        })
    }

    /// Records the original file name. Blank names are ignored.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        let name = file_name.into();
        let trimmed = name.trim();
        if !trimmed.is_empty() {
            self.file_name = Some(trimmed.to_owned());
        }
        self
    }

    /// Returns the storage location.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns the original file name, if known.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }
}

/// Entry in a task's append-only comment history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Author of the comment.
    pub author: Email,
    /// Comment body.
    pub text: CommentText,
    /// Time the comment reached the store.
    pub created_at: DateTime<Utc>,
}

/// Entry in a task's append-only attachment history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Identity that uploaded the file.
    pub uploader: Email,
    /// Reference to the stored file.
    pub file: FileRef,
    /// Time the attachment reached the store.
    pub created_at: DateTime<Utc>,
}

/// Parses a deadline given as `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// Timestamps keep only their calendar date in their own offset, matching
/// what a date picker submitted.
///
/// # Errors
///
/// Returns [`TaskDomainError::MissingDeadline`] for blank input and
/// [`TaskDomainError::InvalidDeadline`] when neither format matches.
pub fn parse_deadline(value: &str) -> Result<NaiveDate, TaskDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::MissingDeadline);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|timestamp| timestamp.date_naive())
        .map_err(|_| TaskDomainError::InvalidDeadline(value.to_owned()))
}
