//! Error types for notification parsing.

use thiserror::Error;

/// Error returned while parsing notification kinds from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown notification kind: {0}")]
pub struct ParseNotificationKindError(pub String);

/// Error returned while parsing an inbox filter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown notification filter '{0}', expected all, unread or important")]
pub struct ParseNotificationFilterError(pub String);
