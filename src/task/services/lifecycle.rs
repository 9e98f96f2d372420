//! Service layer for task creation, scoped reads and mutations.

use super::{
    AttachFileRequest, CreateTaskRequest, TaskQuery, TaskServiceError, TaskServiceResult,
    UpdateTaskDetailsRequest,
};
use crate::access::{self, Decision, TaskOperation};
use crate::identity::{
    domain::{Caller, Department, Email, Identity},
    ports::UserDirectory,
};
use crate::task::{
    domain::{
        Assignees, CommentText, FileRef, NewTask, Priority, Task, TaskChange, TaskDetailsChange,
        TaskEvent, TaskId, TaskLimits, TaskStatus, TaskTitle, ViewerRole, parse_deadline,
    },
    ports::{TaskEventSink, TaskRepository},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info};

/// Task lifecycle orchestration service.
///
/// Every operation resolves the caller through the user directory before
/// looking at its input, asks the access rules for a decision, mutates and persists the task, and
/// finally publishes the committed change to the event sink.
#[derive(Clone)]
pub struct TaskLifecycleService<R, D, C>
where
    R: TaskRepository,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    directory: Arc<D>,
    events: Arc<dyn TaskEventSink>,
    clock: Arc<C>,
    limits: TaskLimits,
}

impl<R, D, C> TaskLifecycleService<R, D, C>
where
    R: TaskRepository,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service with default limits.
    #[must_use]
    pub fn new(
        repository: Arc<R>,
        directory: Arc<D>,
        events: Arc<dyn TaskEventSink>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            repository,
            directory,
            events,
            clock,
            limits: TaskLimits::default(),
        }
    }

    /// Replaces the content limits.
    #[must_use]
    pub fn with_limits(mut self, limits: TaskLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Returns the content limits in force.
    #[must_use]
    pub const fn limits(&self) -> &TaskLimits {
        &self.limits
    }

    /// Creates a task and notifies every assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::UnknownCaller`] when the caller does not
    /// resolve, a bad-input variant when a field is missing or malformed,
    /// [`TaskServiceError::UnknownAssignee`] when an assignee does not
    /// resolve, and [`TaskServiceError::Directory`] or
    /// [`TaskServiceError::Repository`] on infrastructure failure. Nothing
    /// is persisted on error.
    pub async fn create_task(
        &self,
        request: CreateTaskRequest,
        caller: &Caller,
    ) -> TaskServiceResult<Task> {
        let creator = self.resolve_caller(caller).await?;
        let input = self.validate_new_task(request, creator.email().clone())?;
        self.ensure_resolvable(input.assigned_to.iter()).await?;

        let task = Task::new(input, &*self.clock);
        self.repository.store(&task).await?;
        info!(
            task_id = %task.id(),
            actor = %creator.email(),
            assignees = task.assigned_to().len(),
            "task created"
        );

        self.publish(creator.email(), &task, TaskChange::Created).await;
        Ok(task)
    }

    /// Lists every task the caller may read, newest first.
    ///
    /// Hidden tasks are omitted, never reported as errors.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::UnknownCaller`] when the caller does not
    /// resolve, or an infrastructure error.
    pub async fn list_visible_tasks(
        &self,
        caller: &Caller,
        query: TaskQuery,
    ) -> TaskServiceResult<Vec<Task>> {
        let identity = self.resolve_caller(caller).await?;
        let tasks = self.repository.list_all().await?;
        Ok(access::filter_visible(&identity, tasks)
            .into_iter()
            .filter(|task| query.matches(task))
            .collect())
    }

    /// Lists the tasks the caller is assigned to, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::UnknownCaller`] when the caller does not
    /// resolve, or an infrastructure error.
    pub async fn list_assigned_tasks(&self, caller: &Caller) -> TaskServiceResult<Vec<Task>> {
        let identity = self.resolve_caller(caller).await?;
        let tasks = self.repository.find_by_assignee(identity.email()).await?;
        Ok(access::filter_visible(&identity, tasks))
    }

    /// Retrieves one task the caller may read.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist
    /// and [`TaskServiceError::Forbidden`] when the caller may not read it.
    pub async fn get_task(&self, task_id: TaskId, caller: &Caller) -> TaskServiceResult<Task> {
        let identity = self.resolve_caller(caller).await?;
        self.load_authorized(task_id, &identity, TaskOperation::Read)
            .await
    }

    /// Sets the status of a task.
    ///
    /// Any of the three statuses may be set from any other. Assignees and
    /// the creator, except the actor, are notified.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::InvalidStatus`] for an unknown status,
    /// [`TaskServiceError::NotFound`], [`TaskServiceError::Forbidden`] unless
    /// the caller is an admin, a subadmin of the task's department or an
    /// assignee, and [`TaskServiceError::Conflict`] when the task changed
    /// concurrently.
    pub async fn update_status(
        &self,
        task_id: TaskId,
        status: &str,
        caller: &Caller,
    ) -> TaskServiceResult<Task> {
        let identity = self.resolve_caller(caller).await?;
        let new_status = TaskStatus::try_from(status)?;
        let mut task = self
            .load_authorized(task_id, &identity, TaskOperation::UpdateStatus)
            .await?;

        let expected_revision = task.revision();
        let from = task.set_status(new_status, &*self.clock);
        self.repository.update(&task, expected_revision).await?;
        info!(
            task_id = %task_id,
            actor = %identity.email(),
            from = %from,
            to = %new_status,
            "task status updated"
        );

        self.publish(
            identity.email(),
            &task,
            TaskChange::StatusChanged {
                from,
                to: new_status,
            },
        )
        .await;
        Ok(task)
    }

    /// Appends a comment to a task.
    ///
    /// Anyone who may read the task may comment. Repeating the call
    /// appends a second, identical comment and notifies again.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for empty or oversized text,
    /// [`TaskServiceError::NotFound`], [`TaskServiceError::Forbidden`] when
    /// the caller may not read the task, and [`TaskServiceError::Conflict`]
    /// when the task changed concurrently.
    pub async fn add_comment(
        &self,
        task_id: TaskId,
        text: impl Into<String>,
        caller: &Caller,
    ) -> TaskServiceResult<Task> {
        let identity = self.resolve_caller(caller).await?;
        let comment_text = CommentText::new(text)?;
        self.limits.check_comment(&comment_text)?;
        let mut task = self
            .load_authorized(task_id, &identity, TaskOperation::Comment)
            .await?;

        let expected_revision = task.revision();
        let comment = task.add_comment(identity.email().clone(), comment_text, &*self.clock);
        self.repository.update(&task, expected_revision).await?;
        info!(task_id = %task_id, actor = %identity.email(), "comment added");

        self.publish(identity.email(), &task, TaskChange::CommentAdded(comment))
            .await;
        Ok(task)
    }

    /// Appends an attachment reference to a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for an empty file reference,
    /// [`TaskServiceError::NotFound`], [`TaskServiceError::Forbidden`] unless
    /// the caller is an admin, a subadmin of the task's department or an
    /// assignee, and [`TaskServiceError::Conflict`] when the task changed
    /// concurrently.
    pub async fn add_attachment(
        &self,
        task_id: TaskId,
        request: AttachFileRequest,
        caller: &Caller,
    ) -> TaskServiceResult<Task> {
        let identity = self.resolve_caller(caller).await?;
        let file = to_file_ref(request)?;
        let mut task = self
            .load_authorized(task_id, &identity, TaskOperation::Attach)
            .await?;

        let expected_revision = task.revision();
        let attachment = task.add_attachment(identity.email().clone(), file, &*self.clock);
        self.repository.update(&task, expected_revision).await?;
        info!(task_id = %task_id, actor = %identity.email(), "attachment added");

        self.publish(
            identity.email(),
            &task,
            TaskChange::AttachmentAdded(attachment),
        )
        .await;
        Ok(task)
    }

    /// Edits a task's descriptive fields.
    ///
    /// A request that changes nothing returns the task untouched and
    /// notifies nobody.
    ///
    /// # Errors
    ///
    /// Returns a bad-input variant for malformed fields,
    /// [`TaskServiceError::NotFound`], [`TaskServiceError::Forbidden`] unless
    /// the caller is an admin or a subadmin of the task's department, and
    /// [`TaskServiceError::Conflict`] when the task changed concurrently.
    pub async fn update_details(
        &self,
        task_id: TaskId,
        request: UpdateTaskDetailsRequest,
        caller: &Caller,
    ) -> TaskServiceResult<Task> {
        let identity = self.resolve_caller(caller).await?;
        let change = self.validate_details(request)?;
        let mut task = self
            .load_authorized(task_id, &identity, TaskOperation::Manage)
            .await?;
        if change.is_empty() {
            return Ok(task);
        }

        let expected_revision = task.revision();
        task.apply_details(change, &*self.clock);
        self.repository.update(&task, expected_revision).await?;
        info!(task_id = %task_id, actor = %identity.email(), "task details updated");

        self.publish(identity.email(), &task, TaskChange::DetailsUpdated).await;
        Ok(task)
    }

    /// Adds assignees to a task and notifies those newly added.
    ///
    /// Emails already assigned are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Identity`] for malformed emails,
    /// [`TaskServiceError::Domain`] when the assignee limit would be
    /// exceeded, [`TaskServiceError::UnknownAssignee`] when a new assignee
    /// does not resolve, [`TaskServiceError::NotFound`],
    /// [`TaskServiceError::Forbidden`] unless the caller is an admin or a
    /// subadmin of the task's department, and [`TaskServiceError::Conflict`]
    /// when the task changed concurrently.
    pub async fn assign_users(
        &self,
        task_id: TaskId,
        emails: impl IntoIterator<Item = String>,
        caller: &Caller,
    ) -> TaskServiceResult<Task> {
        let identity = self.resolve_caller(caller).await?;
        let requested = parse_emails(emails)?;
        let mut task = self
            .load_authorized(task_id, &identity, TaskOperation::Manage)
            .await?;

        let mut candidates: Vec<Email> = Vec::new();
        for email in requested {
            if !task.is_assignee(&email) && !candidates.contains(&email) {
                candidates.push(email);
            }
        }
        if candidates.is_empty() {
            return Ok(task);
        }
        self.limits
            .check_assignee_count(task.assigned_to().len() + candidates.len())?;
        self.ensure_resolvable(candidates.iter()).await?;

        let expected_revision = task.revision();
        let added = task.assign(candidates, &*self.clock);
        self.repository.update(&task, expected_revision).await?;
        info!(
            task_id = %task_id,
            actor = %identity.email(),
            added = added.len(),
            "assignees added"
        );

        self.publish(identity.email(), &task, TaskChange::Assigned { added })
            .await;
        Ok(task)
    }

    /// Removes an assignee from a task.
    ///
    /// No notification is emitted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when the email is not assigned
    /// or is the last assignee, [`TaskServiceError::NotFound`],
    /// [`TaskServiceError::Forbidden`] unless the caller is an admin or a
    /// subadmin of the task's department, and [`TaskServiceError::Conflict`]
    /// when the task changed concurrently.
    pub async fn unassign_user(
        &self,
        task_id: TaskId,
        email: &str,
        caller: &Caller,
    ) -> TaskServiceResult<Task> {
        let identity = self.resolve_caller(caller).await?;
        let assignee = Email::new(email)?;
        let mut task = self
            .load_authorized(task_id, &identity, TaskOperation::Manage)
            .await?;

        let expected_revision = task.revision();
        task.unassign(&assignee, &*self.clock)?;
        self.repository.update(&task, expected_revision).await?;
        info!(
            task_id = %task_id,
            actor = %identity.email(),
            removed = %assignee,
            "assignee removed"
        );
        Ok(task)
    }

    async fn resolve_caller(&self, caller: &Caller) -> TaskServiceResult<Identity> {
        self.directory
            .resolve(caller.email())
            .await?
            .ok_or_else(|| TaskServiceError::UnknownCaller(caller.email().clone()))
    }

    /// Fails with the first email that does not resolve.
    async fn ensure_resolvable<'a>(
        &self,
        emails: impl Iterator<Item = &'a Email>,
    ) -> TaskServiceResult<()> {
        for email in emails {
            if self.directory.resolve(email).await?.is_none() {
                return Err(TaskServiceError::UnknownAssignee(email.clone()));
            }
        }
        Ok(())
    }

    async fn load_authorized(
        &self,
        task_id: TaskId,
        identity: &Identity,
        operation: TaskOperation,
    ) -> TaskServiceResult<Task> {
        let task = self
            .repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskServiceError::NotFound(task_id))?;

        match access::authorize(identity, operation, &task) {
            Decision::Allow => Ok(task),
            Decision::Deny(reason) => {
                debug!(
                    task_id = %task_id,
                    caller = %identity.email(),
                    role = %identity.role(),
                    operation = %operation,
                    reason = %reason,
                    "task access denied"
                );
                Err(TaskServiceError::Forbidden {
                    task_id,
                    operation,
                    reason,
                })
            }
        }
    }

    async fn publish(&self, actor: &Email, task: &Task, change: TaskChange) {
        let event = TaskEvent::new(actor.clone(), task.clone(), change);
        self.events.publish(&event).await;
    }

    fn validate_new_task(
        &self,
        request: CreateTaskRequest,
        created_by: Email,
    ) -> TaskServiceResult<NewTask> {
        let CreateTaskRequest {
            title,
            deadline,
            assigned_to,
            description,
            priority,
            viewer_role,
            department,
            comment,
            attachment,
        } = request;

        let task_title = TaskTitle::new(title)?;
        self.limits.check_title(&task_title)?;
        let task_description = description.unwrap_or_default();
        self.limits.check_description(&task_description)?;
        let due = parse_deadline(&deadline)?;
        let assignees = Assignees::new(parse_emails(assigned_to)?)?;
        self.limits.check_assignee_count(assignees.len())?;

        let initial_comment = comment
            .filter(|text| !text.trim().is_empty())
            .map(CommentText::new)
            .transpose()?;
        if let Some(text) = &initial_comment {
            self.limits.check_comment(text)?;
        }

        Ok(NewTask {
            title: task_title,
            description: task_description,
            created_by,
            assigned_to: assignees,
            priority: priority
                .as_deref()
                .map(Priority::try_from)
                .transpose()?
                .unwrap_or_default(),
            viewer_role: viewer_role
                .as_deref()
                .map(ViewerRole::try_from)
                .transpose()?
                .unwrap_or_default(),
            deadline: due,
            department: department.map(Department::new).transpose()?,
            initial_comment,
            initial_attachment: attachment.map(to_file_ref).transpose()?,
        })
    }

    fn validate_details(
        &self,
        request: UpdateTaskDetailsRequest,
    ) -> TaskServiceResult<TaskDetailsChange> {
        let UpdateTaskDetailsRequest {
            title,
            description,
            priority,
            viewer_role,
            deadline,
            department,
        } = request;

        let new_title = title.map(TaskTitle::new).transpose()?;
        if let Some(value) = &new_title {
            self.limits.check_title(value)?;
        }
        if let Some(value) = &description {
            self.limits.check_description(value)?;
        }

        Ok(TaskDetailsChange {
            title: new_title,
            description,
            priority: priority.as_deref().map(Priority::try_from).transpose()?,
            viewer_role: viewer_role
                .as_deref()
                .map(ViewerRole::try_from)
                .transpose()?,
            deadline: deadline.as_deref().map(parse_deadline).transpose()?,
            department: department
                .map(|value| value.map(Department::new).transpose())
                .transpose()?,
        })
    }
}

fn parse_emails(emails: impl IntoIterator<Item = String>) -> TaskServiceResult<Vec<Email>> {
    Ok(emails
        .into_iter()
        .map(Email::new)
        .collect::<Result<Vec<_>, _>>()?)
}

fn to_file_ref(request: AttachFileRequest) -> TaskServiceResult<FileRef> {
    let AttachFileRequest {
        location,
        file_name,
    } = request;
    let mut file = FileRef::new(location)?;
    if let Some(name) = file_name {
        file = file.with_file_name(name);
    }
    Ok(file)
}
