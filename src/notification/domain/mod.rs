//! Domain model for notifications.

mod error;
mod fanout;
mod ids;
mod notification;

pub use error::{ParseNotificationFilterError, ParseNotificationKindError};
pub use fanout::{derive_notifications, kind_for, recipients_for};
pub use ids::NotificationId;
pub use notification::{
    NewNotification, Notification, NotificationFilter, NotificationKind,
    PersistedNotificationData,
};
