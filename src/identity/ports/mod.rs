//! Port contracts for identity resolution.
//!
//! The user directory is owned by an external collaborator; the core only
//! reads from it.

pub mod directory;

#[cfg(test)]
pub use directory::MockUserDirectory;
pub use directory::{UserDirectory, UserDirectoryError, UserDirectoryResult};
