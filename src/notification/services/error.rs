//! Service-level errors for recipient notification operations.

use crate::error::ErrorKind;
use crate::identity::{domain::Email, ports::UserDirectoryError};
use crate::notification::{
    domain::{NotificationId, ParseNotificationFilterError},
    ports::NotificationRepositoryError,
};
use thiserror::Error;

/// Service-level errors for recipient notification operations.
#[derive(Debug, Error)]
pub enum NotificationServiceError {
    /// The notification does not exist.
    #[error("notification not found: {0}")]
    NotFound(NotificationId),

    /// The caller is not the notification's recipient.
    #[error("notification {id} belongs to another recipient")]
    Forbidden {
        /// Notification that was targeted.
        id: NotificationId,
    },

    /// The caller does not exist in the user directory.
    #[error("unknown caller: {0}")]
    UnknownCaller(Email),

    /// The user directory could not be reached.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),

    /// The list filter is not a known value.
    #[error(transparent)]
    InvalidFilter(#[from] ParseNotificationFilterError),

    /// Persistence failed.
    #[error(transparent)]
    Repository(NotificationRepositoryError),
}

impl From<NotificationRepositoryError> for NotificationServiceError {
    fn from(err: NotificationRepositoryError) -> Self {
        match err {
            NotificationRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

impl NotificationServiceError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Forbidden { .. } => ErrorKind::Forbidden,
            Self::UnknownCaller(_) => ErrorKind::Unauthenticated,
            Self::Directory(_) => ErrorKind::Unavailable,
            Self::InvalidFilter(_) => ErrorKind::BadInput,
            Self::Repository(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for notification service operations.
pub type NotificationServiceResult<T> = Result<T, NotificationServiceError>;
