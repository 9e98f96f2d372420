//! Diesel schema for notification persistence.

diesel::table! {
    /// Notification records addressed to a single recipient.
    notifications (id) {
        /// Notification identifier.
        id -> Uuid,
        /// Recipient email.
        recipient -> Text,
        /// Notification kind.
        #[max_length = 50]
        kind -> Varchar,
        /// Short heading.
        title -> Text,
        /// Body text.
        message -> Text,
        /// Related task identifier (not a foreign key).
        related_task -> Uuid,
        /// Whether the recipient has read the notification.
        is_read -> Bool,
        /// Whether the recipient flagged the notification.
        is_important -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// First-read timestamp.
        read_at -> Nullable<Timestamptz>,
    }
}
