//! Domain model for identities and caller context.
//!
//! Identities are referenced by value (their normalized email). The core
//! never holds live references into the user store.

mod email;
mod error;
mod identity;
mod role;

pub use email::Email;
pub use error::{IdentityDomainError, ParseRoleError};
pub use identity::{Caller, Department, Identity};
pub use role::Role;
