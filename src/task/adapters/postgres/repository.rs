//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::identity::domain::{Department, Email};
use crate::task::{
    domain::{
        Assignees, Attachment, Comment, PersistedTaskData, Priority, Task, TaskId, TaskStatus,
        TaskTitle, ViewerRole,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task, expected_revision: u64) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = to_changeset(task)?;
        let expected = to_db_revision(expected_revision)?;

        self.run_blocking(move |connection| {
            let updated = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(task_id.into_inner()))
                    .filter(tasks::revision.eq(expected)),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;

            if updated > 0 {
                return Ok(());
            }

            let stored_revision = tasks::table
                .filter(tasks::id.eq(task_id.into_inner()))
                .select(tasks::revision)
                .first::<i64>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;

            match stored_revision {
                None => Err(TaskRepositoryError::NotFound(task_id)),
                Some(actual) => Err(TaskRepositoryError::RevisionConflict {
                    task_id,
                    expected: expected_revision,
                    actual: from_db_revision(actual)?,
                }),
            }
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .order(tasks::created_at.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_by_assignee(&self, email: &Email) -> TaskRepositoryResult<Vec<Task>> {
        let member = vec![email.as_str().to_owned()];
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::assigned_to.contains(member))
                .order(tasks::created_at.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

fn to_db_revision(revision: u64) -> TaskRepositoryResult<i64> {
    i64::try_from(revision).map_err(TaskRepositoryError::persistence)
}

fn from_db_revision(revision: i64) -> TaskRepositoryResult<u64> {
    u64::try_from(revision).map_err(TaskRepositoryError::persistence)
}

fn assignee_column(task: &Task) -> Vec<String> {
    task.assigned_to()
        .iter()
        .map(|email| email.as_str().to_owned())
        .collect()
}

fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    let comments =
        serde_json::to_value(task.comments()).map_err(TaskRepositoryError::persistence)?;
    let attachments =
        serde_json::to_value(task.attachments()).map_err(TaskRepositoryError::persistence)?;

    Ok(NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().to_owned(),
        created_by: task.created_by().as_str().to_owned(),
        assigned_to: assignee_column(task),
        priority: task.priority().as_str().to_owned(),
        viewer_role: task.viewer_role().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        deadline: task.deadline(),
        department: task.department().map(|department| department.as_str().to_owned()),
        comments,
        attachments,
        revision: to_db_revision(task.revision())?,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn to_changeset(task: &Task) -> TaskRepositoryResult<TaskChangeset> {
    let NewTaskRow {
        title,
        description,
        assigned_to,
        priority,
        viewer_role,
        status,
        deadline,
        department,
        comments,
        attachments,
        revision,
        updated_at,
        ..
    } = to_new_row(task)?;

    Ok(TaskChangeset {
        title,
        description,
        assigned_to,
        priority,
        viewer_role,
        status,
        deadline,
        department,
        comments,
        attachments,
        revision,
        updated_at,
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        created_by,
        assigned_to,
        priority,
        viewer_role,
        status,
        deadline,
        department,
        comments,
        attachments,
        revision,
        created_at,
        updated_at,
    } = row;

    let emails = assigned_to
        .into_iter()
        .map(Email::new)
        .collect::<Result<Vec<_>, _>>()
        .map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        title: TaskTitle::new(title).map_err(TaskRepositoryError::persistence)?,
        description,
        created_by: Email::new(created_by).map_err(TaskRepositoryError::persistence)?,
        assigned_to: Assignees::new(emails).map_err(TaskRepositoryError::persistence)?,
        priority: Priority::try_from(priority.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        viewer_role: ViewerRole::try_from(viewer_role.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        status: TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?,
        deadline,
        department: department
            .map(Department::new)
            .transpose()
            .map_err(TaskRepositoryError::persistence)?,
        comments: serde_json::from_value::<Vec<Comment>>(comments)
            .map_err(TaskRepositoryError::persistence)?,
        attachments: serde_json::from_value::<Vec<Attachment>>(attachments)
            .map_err(TaskRepositoryError::persistence)?,
        revision: from_db_revision(revision)?,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
