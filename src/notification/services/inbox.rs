//! Recipient-facing notification operations.

use super::{NotificationServiceError, NotificationServiceResult};
use crate::identity::{
    domain::{Caller, Identity},
    ports::UserDirectory,
};
use crate::notification::{
    domain::{Notification, NotificationFilter, NotificationId},
    ports::NotificationRepository,
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info};

/// Inbox operations for the recipient of notifications.
///
/// Every operation first resolves the caller through the user directory,
/// then acts on their behalf and refuses records addressed to anyone else.
#[derive(Clone)]
pub struct NotificationService<N, D, C>
where
    N: NotificationRepository,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    repository: Arc<N>,
    directory: Arc<D>,
    clock: Arc<C>,
}

impl<N, D, C> NotificationService<N, D, C>
where
    N: NotificationRepository,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new notification service.
    #[must_use]
    pub const fn new(repository: Arc<N>, directory: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            repository,
            directory,
            clock,
        }
    }

    /// Lists the caller's notifications matching the filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::UnknownCaller`] when the caller
    /// does not resolve, or [`NotificationServiceError::Repository`] when
    /// persistence fails.
    pub async fn list_notifications(
        &self,
        caller: &Caller,
        filter: NotificationFilter,
    ) -> NotificationServiceResult<Vec<Notification>> {
        let identity = self.resolve_caller(caller).await?;
        self.list_for(&identity, filter).await
    }

    /// Lists the caller's notifications using a textual filter.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::InvalidFilter`] for an unknown
    /// filter value, otherwise as [`Self::list_notifications`].
    pub async fn list_notifications_by(
        &self,
        caller: &Caller,
        filter: &str,
    ) -> NotificationServiceResult<Vec<Notification>> {
        let identity = self.resolve_caller(caller).await?;
        let parsed = NotificationFilter::try_from(filter)?;
        self.list_for(&identity, parsed).await
    }

    /// Marks one notification read. Marking it again keeps the first
    /// read timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::UnknownCaller`],
    /// [`NotificationServiceError::NotFound`] or
    /// [`NotificationServiceError::Forbidden`].
    pub async fn mark_read(
        &self,
        id: NotificationId,
        caller: &Caller,
    ) -> NotificationServiceResult<Notification> {
        let mut notification = self.load_owned(id, caller).await?;
        if notification.mark_read(&*self.clock) {
            self.repository.update(&notification).await?;
            debug!(
                notification_id = %id,
                recipient = %notification.recipient(),
                "notification read"
            );
        }
        Ok(notification)
    }

    /// Marks every unread notification of the caller read.
    ///
    /// Returns the number of records changed.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::UnknownCaller`] when the caller
    /// does not resolve, or [`NotificationServiceError::Repository`] when
    /// persistence fails.
    pub async fn mark_all_read(&self, caller: &Caller) -> NotificationServiceResult<usize> {
        let identity = self.resolve_caller(caller).await?;
        let changed = self
            .repository
            .mark_all_read(identity.email(), self.clock.utc())
            .await?;
        info!(recipient = %identity.email(), changed, "notifications marked read");
        Ok(changed)
    }

    /// Flips the importance flag of one notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::UnknownCaller`],
    /// [`NotificationServiceError::NotFound`] or
    /// [`NotificationServiceError::Forbidden`].
    pub async fn toggle_important(
        &self,
        id: NotificationId,
        caller: &Caller,
    ) -> NotificationServiceResult<Notification> {
        let mut notification = self.load_owned(id, caller).await?;
        let important = notification.toggle_important();
        self.repository.update(&notification).await?;
        debug!(notification_id = %id, important, "notification importance toggled");
        Ok(notification)
    }

    /// Deletes one notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::UnknownCaller`],
    /// [`NotificationServiceError::NotFound`] or
    /// [`NotificationServiceError::Forbidden`].
    pub async fn delete(
        &self,
        id: NotificationId,
        caller: &Caller,
    ) -> NotificationServiceResult<()> {
        let notification = self.load_owned(id, caller).await?;
        self.repository.delete(id).await?;
        info!(
            notification_id = %id,
            recipient = %notification.recipient(),
            "notification deleted"
        );
        Ok(())
    }

    /// Counts the caller's unread notifications.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::UnknownCaller`] when the caller
    /// does not resolve, or [`NotificationServiceError::Repository`] when
    /// persistence fails.
    pub async fn unread_count(&self, caller: &Caller) -> NotificationServiceResult<usize> {
        let identity = self.resolve_caller(caller).await?;
        let notifications = self
            .repository
            .list_for_recipient(identity.email())
            .await?;
        Ok(notifications
            .iter()
            .filter(|notification| !notification.is_read())
            .count())
    }

    async fn list_for(
        &self,
        identity: &Identity,
        filter: NotificationFilter,
    ) -> NotificationServiceResult<Vec<Notification>> {
        let notifications = self
            .repository
            .list_for_recipient(identity.email())
            .await?;
        Ok(notifications
            .into_iter()
            .filter(|notification| filter.matches(notification))
            .collect())
    }

    async fn resolve_caller(&self, caller: &Caller) -> NotificationServiceResult<Identity> {
        self.directory
            .resolve(caller.email())
            .await?
            .ok_or_else(|| NotificationServiceError::UnknownCaller(caller.email().clone()))
    }

    async fn load_owned(
        &self,
        id: NotificationId,
        caller: &Caller,
    ) -> NotificationServiceResult<Notification> {
        let identity = self.resolve_caller(caller).await?;
        let notification = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(NotificationServiceError::NotFound(id))?;
        if !notification.is_addressed_to(identity.email()) {
            debug!(
                notification_id = %id,
                caller = %identity.email(),
                "notification access denied"
            );
            return Err(NotificationServiceError::Forbidden { id });
        }
        Ok(notification)
    }
}
