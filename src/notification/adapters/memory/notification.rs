//! In-memory repository for notification tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::domain::Email;
use crate::notification::{
    domain::{Notification, NotificationId},
    ports::{NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult},
};

/// Thread-safe in-memory notification repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationRepository {
    state: Arc<RwLock<InMemoryNotificationState>>,
}

#[derive(Debug, Default)]
struct InMemoryNotificationState {
    notifications: HashMap<NotificationId, Notification>,
    /// Notification IDs per recipient in creation order.
    recipient_index: HashMap<Email, Vec<NotificationId>>,
}

impl InMemoryNotificationRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every stored notification regardless of recipient.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn all(&self) -> NotificationRepositoryResult<Vec<Notification>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.notifications.values().cloned().collect())
    }
}

fn lock_error(err: impl std::fmt::Display) -> NotificationRepositoryError {
    NotificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn store(&self, notification: &Notification) -> NotificationRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.notifications.contains_key(&notification.id()) {
            return Err(NotificationRepositoryError::Duplicate(notification.id()));
        }
        state
            .recipient_index
            .entry(notification.recipient().clone())
            .or_default()
            .push(notification.id());
        state
            .notifications
            .insert(notification.id(), notification.clone());
        Ok(())
    }

    async fn update(&self, notification: &Notification) -> NotificationRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .notifications
            .get_mut(&notification.id())
            .ok_or(NotificationRepositoryError::NotFound(notification.id()))?;
        *stored = notification.clone();
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: NotificationId,
    ) -> NotificationRepositoryResult<Option<Notification>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.notifications.get(&id).cloned())
    }

    async fn list_for_recipient(
        &self,
        recipient: &Email,
    ) -> NotificationRepositoryResult<Vec<Notification>> {
        let state = self.state.read().map_err(lock_error)?;
        let notifications = state
            .recipient_index
            .get(recipient)
            .map(|ids| {
                ids.iter()
                    .rev()
                    .filter_map(|id| state.notifications.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        Ok(notifications)
    }

    async fn mark_all_read(
        &self,
        recipient: &Email,
        read_at: DateTime<Utc>,
    ) -> NotificationRepositoryResult<usize> {
        let mut state = self.state.write().map_err(lock_error)?;
        let ids = state
            .recipient_index
            .get(recipient)
            .cloned()
            .unwrap_or_default();
        let changed = ids
            .iter()
            .filter(|id| {
                state
                    .notifications
                    .get_mut(*id)
                    .is_some_and(|notification| notification.mark_read_at(read_at))
            })
            .count();
        Ok(changed)
    }

    async fn delete(&self, id: NotificationId) -> NotificationRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let removed = state
            .notifications
            .remove(&id)
            .ok_or(NotificationRepositoryError::NotFound(id))?;
        if let Some(ids) = state.recipient_index.get_mut(removed.recipient()) {
            ids.retain(|existing| *existing != id);
            if ids.is_empty() {
                state.recipient_index.remove(removed.recipient());
            }
        }
        Ok(())
    }
}
