//! Directory port for resolving emails into identities.

use crate::identity::domain::{Email, Identity};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user directory lookups.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// Read-only identity lookup contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolves an email into an identity.
    ///
    /// Returns `None` when no identity exists for the email.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Unavailable`] when the directory cannot
    /// be reached.
    async fn resolve(&self, email: &Email) -> UserDirectoryResult<Option<Identity>>;
}

/// Errors returned by user directory implementations.
#[derive(Debug, Clone, Error)]
pub enum UserDirectoryError {
    /// The directory could not answer the lookup.
    #[error("user directory unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserDirectoryError {
    /// Wraps a backend failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
