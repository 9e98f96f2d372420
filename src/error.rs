//! Error classification shared by every service.
//!
//! Each service error maps onto one [`ErrorKind`], which fixes the HTTP
//! status an adapter should answer with and whether the caller may retry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-facing class of a service failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required field is missing or malformed.
    BadInput,
    /// A referenced identity does not exist.
    Validation,
    /// The caller email does not resolve to an identity.
    Unauthenticated,
    /// The caller lacks the role or membership the operation needs.
    Forbidden,
    /// The task or notification does not exist.
    NotFound,
    /// The record changed between read and write.
    Conflict,
    /// The user directory could not be reached.
    Unavailable,
    /// Persistence failed.
    Internal,
}

impl ErrorKind {
    /// Returns the HTTP status code for the class.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::BadInput | Self::Validation => 400,
            Self::Unauthenticated => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Internal => 500,
            Self::Unavailable => 503,
        }
    }

    /// Returns `true` when repeating the same request may succeed.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Unavailable | Self::Conflict)
    }

    /// Returns the canonical name of the class.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BadInput => "bad_input",
            Self::Validation => "validation",
            Self::Unauthenticated => "unauthenticated",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Unavailable => "unavailable",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
