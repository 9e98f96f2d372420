//! `PostgreSQL` repository implementation for notification storage.

use super::{
    models::{NotificationFlagsChangeset, NotificationRow},
    schema::notifications,
};
use crate::identity::domain::Email;
use crate::notification::{
    domain::{Notification, NotificationId, NotificationKind, PersistedNotificationData},
    ports::{NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult},
};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by notification adapters.
pub type NotificationPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed notification repository.
#[derive(Debug, Clone)]
pub struct PostgresNotificationRepository {
    pool: NotificationPgPool,
}

impl PostgresNotificationRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: NotificationPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> NotificationRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> NotificationRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(NotificationRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(NotificationRepositoryError::persistence)?
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn store(&self, notification: &Notification) -> NotificationRepositoryResult<()> {
        let id = notification.id();
        let row = to_row(notification);
        self.run_blocking(move |connection| {
            diesel::insert_into(notifications::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        NotificationRepositoryError::Duplicate(id)
                    }
                    _ => NotificationRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, notification: &Notification) -> NotificationRepositoryResult<()> {
        let id = notification.id();
        let changeset = NotificationFlagsChangeset {
            is_read: notification.is_read(),
            is_important: notification.is_important(),
            read_at: notification.read_at(),
        };
        self.run_blocking(move |connection| {
            let updated = diesel::update(notifications::table.find(id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(NotificationRepositoryError::persistence)?;
            if updated == 0 {
                return Err(NotificationRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: NotificationId,
    ) -> NotificationRepositoryResult<Option<Notification>> {
        self.run_blocking(move |connection| {
            let row = notifications::table
                .find(id.into_inner())
                .select(NotificationRow::as_select())
                .first::<NotificationRow>(connection)
                .optional()
                .map_err(NotificationRepositoryError::persistence)?;
            row.map(row_to_notification).transpose()
        })
        .await
    }

    async fn list_for_recipient(
        &self,
        recipient: &Email,
    ) -> NotificationRepositoryResult<Vec<Notification>> {
        let recipient_key = recipient.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = notifications::table
                .filter(notifications::recipient.eq(recipient_key))
                .order(notifications::created_at.desc())
                .select(NotificationRow::as_select())
                .load::<NotificationRow>(connection)
                .map_err(NotificationRepositoryError::persistence)?;
            rows.into_iter().map(row_to_notification).collect()
        })
        .await
    }

    async fn mark_all_read(
        &self,
        recipient: &Email,
        read_at: DateTime<Utc>,
    ) -> NotificationRepositoryResult<usize> {
        let recipient_key = recipient.as_str().to_owned();
        self.run_blocking(move |connection| {
            diesel::update(
                notifications::table
                    .filter(notifications::recipient.eq(recipient_key))
                    .filter(notifications::is_read.eq(false)),
            )
            .set((
                notifications::is_read.eq(true),
                notifications::read_at.eq(Some(read_at)),
            ))
            .execute(connection)
            .map_err(NotificationRepositoryError::persistence)
        })
        .await
    }

    async fn delete(&self, id: NotificationId) -> NotificationRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(notifications::table.find(id.into_inner()))
                .execute(connection)
                .map_err(NotificationRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(NotificationRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn to_row(notification: &Notification) -> NotificationRow {
    NotificationRow {
        id: notification.id().into_inner(),
        recipient: notification.recipient().as_str().to_owned(),
        kind: notification.kind().as_str().to_owned(),
        title: notification.title().to_owned(),
        message: notification.message().to_owned(),
        related_task: notification.related_task().into_inner(),
        is_read: notification.is_read(),
        is_important: notification.is_important(),
        created_at: notification.created_at(),
        read_at: notification.read_at(),
    }
}

fn row_to_notification(row: NotificationRow) -> NotificationRepositoryResult<Notification> {
    let NotificationRow {
        id,
        recipient,
        kind,
        title,
        message,
        related_task,
        is_read,
        is_important,
        created_at,
        read_at,
    } = row;

    let data = PersistedNotificationData {
        id: NotificationId::from_uuid(id),
        recipient: Email::new(recipient).map_err(NotificationRepositoryError::persistence)?,
        kind: NotificationKind::try_from(kind.as_str())
            .map_err(NotificationRepositoryError::persistence)?,
        title,
        message,
        related_task: TaskId::from_uuid(related_task),
        is_read,
        is_important,
        created_at,
        read_at,
    };
    Ok(Notification::from_persisted(data))
}
