//! Diesel row models for notification persistence.

use super::schema::notifications;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result and insert row for notification records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NotificationRow {
    /// Notification identifier.
    pub id: uuid::Uuid,
    /// Recipient email.
    pub recipient: String,
    /// Kind storage value.
    pub kind: String,
    /// Short heading.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Related task identifier.
    pub related_task: uuid::Uuid,
    /// Read flag.
    pub is_read: bool,
    /// Importance flag.
    pub is_important: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// First-read timestamp.
    pub read_at: Option<DateTime<Utc>>,
}

/// Changeset for the recipient-controlled flags.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = notifications)]
#[diesel(treat_none_as_null = true)]
pub struct NotificationFlagsChangeset {
    /// Read flag.
    pub is_read: bool,
    /// Importance flag.
    pub is_important: bool,
    /// First-read timestamp.
    pub read_at: Option<DateTime<Utc>>,
}
