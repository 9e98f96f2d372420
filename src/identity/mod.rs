//! Identity resolution for Taskboard.
//!
//! Identities are owned by an external user store. This module models the
//! values the core reads from it (email, role, department), the explicit
//! caller context passed into every service call, and the directory port
//! used to resolve an email into an identity.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;
