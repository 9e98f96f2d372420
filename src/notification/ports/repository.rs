//! Repository port for notification records.

use crate::identity::domain::Email;
use crate::notification::domain::{Notification, NotificationId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for notification repository operations.
pub type NotificationRepositoryResult<T> = Result<T, NotificationRepositoryError>;

/// Notification persistence contract.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Stores a new notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationRepositoryError::Duplicate`] when the ID already
    /// exists.
    async fn store(&self, notification: &Notification) -> NotificationRepositoryResult<()>;

    /// Persists read and importance flags of an existing notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationRepositoryError::NotFound`] when the record does
    /// not exist.
    async fn update(&self, notification: &Notification) -> NotificationRepositoryResult<()>;

    /// Finds a notification by identifier.
    async fn find_by_id(
        &self,
        id: NotificationId,
    ) -> NotificationRepositoryResult<Option<Notification>>;

    /// Returns every notification addressed to the email, newest first.
    async fn list_for_recipient(
        &self,
        recipient: &Email,
    ) -> NotificationRepositoryResult<Vec<Notification>>;

    /// Marks every unread notification of the recipient read.
    ///
    /// Returns the number of records changed.
    async fn mark_all_read(
        &self,
        recipient: &Email,
        read_at: DateTime<Utc>,
    ) -> NotificationRepositoryResult<usize>;

    /// Deletes a notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationRepositoryError::NotFound`] when the record does
    /// not exist.
    async fn delete(&self, id: NotificationId) -> NotificationRepositoryResult<()>;
}

/// Errors returned by notification repository implementations.
#[derive(Debug, Clone, Error)]
pub enum NotificationRepositoryError {
    /// A notification with the same identifier already exists.
    #[error("duplicate notification identifier: {0}")]
    Duplicate(NotificationId),

    /// The notification was not found.
    #[error("notification not found: {0}")]
    NotFound(NotificationId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotificationRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
