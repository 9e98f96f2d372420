//! Role-scoped access decisions for tasks.
//!
//! A single pure function, [`authorize`], maps an identity, an operation
//! and a task to a [`Decision`]. Task services consult it before every read
//! or write; listing applies the read rule as a filter instead of failing.
//!
//! Rules, in precedence order:
//!
//! 1. `admin` may do anything to any task.
//! 2. `subadmin` may do anything to tasks of their own department and
//!    nothing to other tasks.
//! 3. `user` may read and comment on tasks they are assigned to or created,
//!    and may update status or attach files only where assigned.

mod policy;

pub use policy::{Decision, DenyReason, TaskOperation, authorize, can_view, filter_visible};
