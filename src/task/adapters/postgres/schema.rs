//! Diesel schema for task persistence.

diesel::table! {
    /// Task records with assignment, history and lifecycle state.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        title -> Text,
        /// Task description.
        description -> Text,
        /// Creator email.
        created_by -> Text,
        /// Assignee emails in insertion order.
        assigned_to -> Array<Text>,
        /// Task priority.
        #[max_length = 20]
        priority -> Varchar,
        /// Informational viewer role hint.
        #[max_length = 20]
        viewer_role -> Varchar,
        /// Task status.
        #[max_length = 20]
        status -> Varchar,
        /// Due date.
        deadline -> Date,
        /// Optional department used for subadmin scoping.
        department -> Nullable<Text>,
        /// Append-only comment history.
        comments -> Jsonb,
        /// Append-only attachment history.
        attachments -> Jsonb,
        /// Optimistic concurrency counter.
        revision -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
