//! Application services for task lifecycle orchestration.

mod error;
mod lifecycle;
mod requests;

pub use error::{TaskServiceError, TaskServiceResult};
pub use lifecycle::TaskLifecycleService;
pub use requests::{AttachFileRequest, CreateTaskRequest, TaskQuery, UpdateTaskDetailsRequest};
