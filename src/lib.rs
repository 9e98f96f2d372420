//! Taskboard: role-scoped task tracking with notification fan-out.
//!
//! Tasks are created by one identity, assigned to others and optionally
//! scoped to a department. Who may see or change a task depends on the
//! caller's role: admins see everything, subadmins their department, and
//! users the tasks they created or are assigned to. Every committed task
//! mutation produces per-recipient notifications.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`identity`]: Emails, roles and the user directory port
//! - [`access`]: Role-scoped access decisions
//! - [`task`]: Task records, mutations and the lifecycle service
//! - [`notification`]: Fan-out of task events and recipient inboxes
//! - [`config`]: Runtime configuration
//! - [`error`]: Caller-facing error classification

pub mod access;
pub mod config;
pub mod error;
pub mod identity;
pub mod notification;
pub mod task;
