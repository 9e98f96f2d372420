//! Error types for identity value validation and parsing.

use thiserror::Error;

/// Errors returned while constructing identity values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The email is empty after trimming.
    #[error("email must not be empty")]
    EmptyEmail,

    /// The email is not of the form `local@domain`.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The department name is empty after trimming.
    #[error("department must not be empty")]
    EmptyDepartment,
}

/// Error returned while parsing an identity role.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
