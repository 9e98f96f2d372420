//! Task records for Taskboard.
//!
//! A task is created by an identity, assigned to one or more identities and
//! optionally scoped to a department. Reads and mutations are gated by the
//! role rules in [`crate::access`]; every committed mutation is published
//! through [`ports::TaskEventSink`] so notifications can be derived from it.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
