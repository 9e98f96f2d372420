//! Services that create notifications and serve recipients' inboxes.

mod error;
mod fanout;
mod inbox;

pub use error::{NotificationServiceError, NotificationServiceResult};
pub use fanout::{FanoutConfig, FanoutReport, NotificationFanout};
pub use inbox::NotificationService;
