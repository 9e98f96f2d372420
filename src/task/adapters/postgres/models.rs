//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Creator email.
    pub created_by: String,
    /// Assignee emails.
    pub assigned_to: Vec<String>,
    /// Priority storage value.
    pub priority: String,
    /// Viewer role storage value.
    pub viewer_role: String,
    /// Status storage value.
    pub status: String,
    /// Due date.
    pub deadline: NaiveDate,
    /// Optional department.
    pub department: Option<String>,
    /// Comment history JSON array.
    pub comments: Value,
    /// Attachment history JSON array.
    pub attachments: Value,
    /// Revision counter.
    pub revision: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Creator email.
    pub created_by: String,
    /// Assignee emails.
    pub assigned_to: Vec<String>,
    /// Priority storage value.
    pub priority: String,
    /// Viewer role storage value.
    pub viewer_role: String,
    /// Status storage value.
    pub status: String,
    /// Due date.
    pub deadline: NaiveDate,
    /// Optional department.
    pub department: Option<String>,
    /// Comment history JSON array.
    pub comments: Value,
    /// Attachment history JSON array.
    pub attachments: Value,
    /// Revision counter.
    pub revision: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied when an existing task is rewritten.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Assignee emails.
    pub assigned_to: Vec<String>,
    /// Priority storage value.
    pub priority: String,
    /// Viewer role storage value.
    pub viewer_role: String,
    /// Status storage value.
    pub status: String,
    /// Due date.
    pub deadline: NaiveDate,
    /// Optional department.
    pub department: Option<String>,
    /// Comment history JSON array.
    pub comments: Value,
    /// Attachment history JSON array.
    pub attachments: Value,
    /// Revision counter.
    pub revision: i64,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
