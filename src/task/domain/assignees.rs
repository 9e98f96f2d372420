//! Ordered, duplicate-free assignee set.

use super::TaskDomainError;
use crate::identity::domain::Email;
use serde::{Deserialize, Serialize};

/// Identities assigned to a task.
///
/// Insertion order is preserved for display. The set is never empty: the
/// only constructor rejects an empty input and removal refuses to drop the
/// last member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Email>", into = "Vec<Email>")]
pub struct Assignees(Vec<Email>);

impl Assignees {
    /// Creates an assignee set, dropping repeated emails.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyAssignees`] when no email is given.
    pub fn new(emails: impl IntoIterator<Item = Email>) -> Result<Self, TaskDomainError> {
        let mut members: Vec<Email> = Vec::new();
        for email in emails {
            if !members.contains(&email) {
                members.push(email);
            }
        }
        if members.is_empty() {
            return Err(TaskDomainError::EmptyAssignees);
        }
        Ok(Self(members))
    }

    /// Returns `true` when the email is a member.
    #[must_use]
    pub fn contains(&self, email: &Email) -> bool {
        self.0.contains(email)
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates members in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Email> {
        self.0.iter()
    }

    /// Returns the members as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Email] {
        &self.0
    }

    /// Appends an email when absent. Returns `true` when it was added.
    pub(crate) fn insert(&mut self, email: Email) -> bool {
        if self.contains(&email) {
            return false;
        }
        self.0.push(email);
        true
    }

    /// Removes a member unless it is the last one.
    ///
    /// Returns `Ok(false)` when the email was not a member.
    pub(crate) fn remove(&mut self, email: &Email) -> Result<bool, TaskDomainError> {
        if !self.contains(email) {
            return Ok(false);
        }
        if self.0.len() == 1 {
            return Err(TaskDomainError::EmptyAssignees);
        }
        self.0.retain(|member| member != email);
        Ok(true)
    }
}

impl TryFrom<Vec<Email>> for Assignees {
    type Error = TaskDomainError;

    fn try_from(value: Vec<Email>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Assignees> for Vec<Email> {
    fn from(value: Assignees) -> Self {
        value.0
    }
}

impl<'a> IntoIterator for &'a Assignees {
    type Item = &'a Email;
    type IntoIter = std::slice::Iter<'a, Email>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
