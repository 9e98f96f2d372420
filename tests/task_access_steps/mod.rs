//! Step definitions for task access behaviour scenarios.

pub mod given;
pub mod then;
