//! Fan-out of committed task mutations into per-recipient notifications.

use crate::identity::{domain::Email, ports::UserDirectory};
use crate::notification::{
    domain::{Notification, derive_notifications},
    ports::NotificationRepository,
};
use crate::task::{domain::TaskEvent, ports::TaskEventSink};
use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, warn};

/// Fan-out behaviour settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanoutConfig {
    /// Whether each recipient is looked up in the user directory before
    /// its notification is stored.
    pub verify_recipients: bool,
    /// Maximum characters of a comment quoted in a notification message.
    pub excerpt_length: usize,
}

impl Default for FanoutConfig {
    fn default() -> Self {
        Self {
            verify_recipients: true,
            excerpt_length: 80,
        }
    }
}

/// Outcome of fanning out one task event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FanoutReport {
    /// Notifications that were stored.
    pub created: usize,
    /// Recipients that were skipped.
    pub skipped: Vec<Email>,
}

/// Creates notification records for committed task mutations.
///
/// Failures never propagate: a stale recipient, a directory outage or a
/// storage error is logged and the recipient is skipped.
#[derive(Clone)]
pub struct NotificationFanout<N, D, C>
where
    N: NotificationRepository,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    repository: Arc<N>,
    directory: Arc<D>,
    clock: Arc<C>,
    config: FanoutConfig,
}

impl<N, D, C> NotificationFanout<N, D, C>
where
    N: NotificationRepository,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a fan-out service with the default configuration.
    #[must_use]
    pub fn new(repository: Arc<N>, directory: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            repository,
            directory,
            clock,
            config: FanoutConfig::default(),
        }
    }

    /// Replaces the fan-out configuration.
    #[must_use]
    pub const fn with_config(mut self, config: FanoutConfig) -> Self {
        self.config = config;
        self
    }

    /// Stores one notification per recipient of the event.
    pub async fn fan_out(&self, event: &TaskEvent) -> FanoutReport {
        let mut report = FanoutReport::default();
        let candidates =
            derive_notifications(event, self.config.excerpt_length, &*self.clock);

        for notification in candidates {
            if self.deliver(event, &notification).await {
                report.created += 1;
            } else {
                report.skipped.push(notification.recipient().clone());
            }
        }

        debug!(
            task_id = %event.task.id(),
            created = report.created,
            skipped = report.skipped.len(),
            "task event fanned out"
        );
        report
    }

    async fn deliver(&self, event: &TaskEvent, notification: &Notification) -> bool {
        let recipient = notification.recipient();
        if self.config.verify_recipients {
            match self.directory.resolve(recipient).await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    warn!(
                        task_id = %event.task.id(),
                        recipient = %recipient,
                        "skipping notification for unknown recipient"
                    );
                    return false;
                }
                Err(err) => {
                    warn!(
                        task_id = %event.task.id(),
                        recipient = %recipient,
                        error = %err,
                        "skipping notification, recipient lookup failed"
                    );
                    return false;
                }
            }
        }

        if let Err(err) = self.repository.store(notification).await {
            warn!(
                task_id = %event.task.id(),
                recipient = %recipient,
                error = %err,
                "failed to store notification"
            );
            return false;
        }
        true
    }
}

#[async_trait]
impl<N, D, C> TaskEventSink for NotificationFanout<N, D, C>
where
    N: NotificationRepository,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    async fn publish(&self, event: &TaskEvent) {
        self.fan_out(event).await;
    }
}
