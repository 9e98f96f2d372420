//! Access rule evaluation.

use crate::identity::domain::{Department, Identity, Role};
use crate::task::domain::Task;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operation a caller wants to perform on a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskOperation {
    /// View the task.
    Read,
    /// Append a comment.
    Comment,
    /// Set the task status.
    UpdateStatus,
    /// Append an attachment.
    Attach,
    /// Edit details or change assignment.
    Manage,
}

impl TaskOperation {
    /// Returns the canonical name of the operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Comment => "comment",
            Self::UpdateStatus => "update_status",
            Self::Attach => "attach",
            Self::Manage => "manage",
        }
    }

    /// Membership a regular user needs for this operation.
    const fn membership(self) -> Membership {
        match self {
            Self::Read | Self::Comment => Membership::AssigneeOrCreator,
            Self::UpdateStatus | Self::Attach => Membership::Assignee,
            Self::Manage => Membership::Never,
        }
    }
}

impl fmt::Display for TaskOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an operation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// The caller is neither assignee nor creator.
    NotVisible,
    /// The operation needs assignment and the caller is not assigned.
    NotAssignee,
    /// A subadmin targeted a task outside their department.
    OutsideDepartment,
    /// Only admins and department subadmins may perform the operation.
    RequiresManager,
}

impl DenyReason {
    /// Returns a short human-readable explanation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotVisible => "task is not visible to the caller",
            Self::NotAssignee => "caller is not assigned to the task",
            Self::OutsideDepartment => "task is outside the caller's department",
            Self::RequiresManager => "operation requires an admin or department subadmin",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The operation may proceed.
    Allow,
    /// The operation is refused.
    Deny(DenyReason),
}

impl Decision {
    /// Returns `true` for [`Decision::Allow`].
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Task relationship a regular user must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Membership {
    AssigneeOrCreator,
    Assignee,
    Never,
}

/// Reach of an identity, derived from its role.
enum Scope<'a> {
    Global,
    Department(Option<&'a Department>),
    Membership,
}

const fn scope_of(identity: &Identity) -> Scope<'_> {
    match identity.role() {
        Role::Admin => Scope::Global,
        Role::Subadmin => Scope::Department(identity.department()),
        Role::User => Scope::Membership,
    }
}

/// Decides whether the identity may perform the operation on the task.
#[must_use]
pub fn authorize(identity: &Identity, operation: TaskOperation, task: &Task) -> Decision {
    match scope_of(identity) {
        Scope::Global => Decision::Allow,
        Scope::Department(Some(department)) if task.in_department(department) => Decision::Allow,
        Scope::Department(_) => Decision::Deny(DenyReason::OutsideDepartment),
        Scope::Membership => {
            let email = identity.email();
            match operation.membership() {
                Membership::AssigneeOrCreator
                    if task.is_assignee(email) || task.is_creator(email) =>
                {
                    Decision::Allow
                }
                Membership::AssigneeOrCreator => Decision::Deny(DenyReason::NotVisible),
                Membership::Assignee if task.is_assignee(email) => Decision::Allow,
                Membership::Assignee => Decision::Deny(DenyReason::NotAssignee),
                Membership::Never => Decision::Deny(DenyReason::RequiresManager),
            }
        }
    }
}

/// Returns `true` when the identity may read the task.
#[must_use]
pub fn can_view(identity: &Identity, task: &Task) -> bool {
    authorize(identity, TaskOperation::Read, task).is_allowed()
}

/// Keeps only the tasks the identity may read, preserving order.
#[must_use]
pub fn filter_visible(identity: &Identity, tasks: Vec<Task>) -> Vec<Task> {
    tasks
        .into_iter()
        .filter(|task| can_view(identity, task))
        .collect()
}
