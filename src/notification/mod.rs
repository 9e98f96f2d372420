//! Notification fan-out and recipient inbox for Taskboard.
//!
//! Notifications are created only as a side effect of committed task
//! mutations: [`services::NotificationFanout`] listens on the task event
//! port and stores one record per affected recipient. Recipients read and
//! manage their records through [`services::NotificationService`].
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
