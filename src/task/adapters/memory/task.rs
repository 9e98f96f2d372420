//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::domain::Email;
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    /// Task IDs in creation order.
    order: Vec<TaskId>,
    assignee_index: HashMap<Email, Vec<TaskId>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn index_assignees(state: &mut InMemoryTaskState, task: &Task) {
    for email in task.assigned_to() {
        state
            .assignee_index
            .entry(email.clone())
            .or_default()
            .push(task.id());
    }
}

/// Removes a task ID from the assignee index, cleaning up empty entries.
fn unindex_assignees(state: &mut InMemoryTaskState, task: &Task) {
    for email in task.assigned_to() {
        if let Some(ids) = state.assignee_index.get_mut(email) {
            ids.retain(|id| *id != task.id());
            if ids.is_empty() {
                state.assignee_index.remove(email);
            }
        }
    }
}

/// Collects tasks newest first, keeping only IDs accepted by `keep`.
fn newest_first(state: &InMemoryTaskState, keep: impl Fn(&TaskId) -> bool) -> Vec<Task> {
    state
        .order
        .iter()
        .rev()
        .filter(|id| keep(id))
        .filter_map(|id| state.tasks.get(id).cloned())
        .collect()
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }

        index_assignees(&mut state, task);
        state.order.push(task.id());
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task, expected_revision: u64) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;

        let old_task = state
            .tasks
            .get(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?
            .clone();

        if old_task.revision() != expected_revision {
            return Err(TaskRepositoryError::RevisionConflict {
                task_id: task.id(),
                expected: expected_revision,
                actual: old_task.revision(),
            });
        }

        unindex_assignees(&mut state, &old_task);
        index_assignees(&mut state, task);
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(newest_first(&state, |_| true))
    }

    async fn find_by_assignee(&self, email: &Email) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        let Some(ids) = state.assignee_index.get(email) else {
            return Ok(Vec::new());
        };
        Ok(newest_first(&state, |id| ids.contains(id)))
    }
}
