//! Thread-safe in-memory user directory for tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{Email, Identity},
    ports::{UserDirectory, UserDirectoryError, UserDirectoryResult},
};

/// In-memory identity store keyed by email.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    identities: Arc<RwLock<HashMap<Email, Identity>>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory seeded with the given identities.
    #[must_use]
    pub fn with_identities(identities: impl IntoIterator<Item = Identity>) -> Self {
        let map = identities
            .into_iter()
            .map(|identity| (identity.email().clone(), identity))
            .collect();
        Self {
            identities: Arc::new(RwLock::new(map)),
        }
    }

    /// Inserts or replaces an identity.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Unavailable`] when the lock is poisoned.
    pub fn insert(&self, identity: Identity) -> UserDirectoryResult<()> {
        let mut identities = self.identities.write().map_err(|err| {
            UserDirectoryError::unavailable(std::io::Error::other(err.to_string()))
        })?;
        identities.insert(identity.email().clone(), identity);
        Ok(())
    }

    /// Removes an identity, returning it if it existed.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Unavailable`] when the lock is poisoned.
    pub fn remove(&self, email: &Email) -> UserDirectoryResult<Option<Identity>> {
        let mut identities = self.identities.write().map_err(|err| {
            UserDirectoryError::unavailable(std::io::Error::other(err.to_string()))
        })?;
        Ok(identities.remove(email))
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn resolve(&self, email: &Email) -> UserDirectoryResult<Option<Identity>> {
        let identities = self.identities.read().map_err(|err| {
            UserDirectoryError::unavailable(std::io::Error::other(err.to_string()))
        })?;
        Ok(identities.get(email).cloned())
    }
}
