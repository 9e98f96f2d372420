//! In-memory notification persistence.

mod notification;

pub use notification::InMemoryNotificationRepository;
