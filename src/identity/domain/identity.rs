//! Resolved identity and explicit caller context.

use super::{Email, IdentityDomainError, Role};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Department name used to scope subadmin visibility.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Department(String);

impl Department {
    /// Creates a validated department name.
    ///
    /// Department names are trimmed and compared case-sensitively.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyDepartment`] when the value is
    /// empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdentityDomainError::EmptyDepartment);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the department name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Department {
    type Error = IdentityDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Department> for String {
    fn from(value: Department) -> Self {
        value.0
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity as resolved from the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    email: Email,
    role: Role,
    department: Option<Department>,
}

impl Identity {
    /// Creates an identity without a department.
    #[must_use]
    pub const fn new(email: Email, role: Role) -> Self {
        Self {
            email,
            role,
            department: None,
        }
    }

    /// Sets the identity's department.
    #[must_use]
    pub fn with_department(mut self, department: Department) -> Self {
        self.department = Some(department);
        self
    }

    /// Returns the identity email.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Returns the identity role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the identity department, if any.
    #[must_use]
    pub const fn department(&self) -> Option<&Department> {
        self.department.as_ref()
    }
}

/// Explicit request context naming the acting identity.
///
/// Services never read identity from ambient state. The caller only names
/// an email; role and department are re-resolved from the directory on
/// every call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Caller {
    email: Email,
}

impl Caller {
    /// Creates a caller context for an already validated email.
    #[must_use]
    pub const fn new(email: Email) -> Self {
        Self { email }
    }

    /// Creates a caller context from a raw email string.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError`] when the email is invalid.
    pub fn parse(email: impl Into<String>) -> Result<Self, IdentityDomainError> {
        Ok(Self::new(Email::new(email)?))
    }

    /// Returns the caller email.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }
}

impl From<Email> for Caller {
    fn from(email: Email) -> Self {
        Self::new(email)
    }
}
