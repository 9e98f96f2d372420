//! Configurable size limits for task content.

use super::{CommentText, TaskDomainError, TaskTitle};

/// Size limits applied to task input.
///
/// Lengths are counted in characters, not bytes.
///
/// # Examples
///
/// ```
/// use taskboard::task::domain::TaskLimits;
///
/// let limits = TaskLimits::default();
/// assert_eq!(limits.max_assignees, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLimits {
    /// Maximum title length.
    pub max_title_length: usize,
    /// Maximum description length.
    pub max_description_length: usize,
    /// Maximum comment length.
    pub max_comment_length: usize,
    /// Maximum number of assignees per task.
    pub max_assignees: usize,
}

impl Default for TaskLimits {
    fn default() -> Self {
        Self {
            max_title_length: 200,
            max_description_length: 10_000,
            max_comment_length: 5_000,
            max_assignees: 50,
        }
    }
}

impl TaskLimits {
    /// Checks the title length.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TitleTooLong`] when over the limit.
    pub fn check_title(&self, title: &TaskTitle) -> Result<(), TaskDomainError> {
        if title.as_str().chars().count() > self.max_title_length {
            return Err(TaskDomainError::TitleTooLong {
                max: self.max_title_length,
            });
        }
        Ok(())
    }

    /// Checks the description length.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DescriptionTooLong`] when over the limit.
    pub fn check_description(&self, description: &str) -> Result<(), TaskDomainError> {
        if description.chars().count() > self.max_description_length {
            return Err(TaskDomainError::DescriptionTooLong {
                max: self.max_description_length,
            });
        }
        Ok(())
    }

    /// Checks the comment length.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::CommentTooLong`] when over the limit.
    pub fn check_comment(&self, text: &CommentText) -> Result<(), TaskDomainError> {
        if text.as_str().chars().count() > self.max_comment_length {
            return Err(TaskDomainError::CommentTooLong {
                max: self.max_comment_length,
            });
        }
        Ok(())
    }

    /// Checks the number of assignees a task would carry.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TooManyAssignees`] when over the limit.
    pub const fn check_assignee_count(&self, count: usize) -> Result<(), TaskDomainError> {
        if count > self.max_assignees {
            return Err(TaskDomainError::TooManyAssignees {
                max: self.max_assignees,
            });
        }
        Ok(())
    }
}
