//! Derivation of notification records from committed task mutations.

use super::{NewNotification, Notification, NotificationKind};
use crate::identity::domain::Email;
use crate::task::domain::{TaskChange, TaskEvent};
use mockable::Clock;

/// Returns the notification kind produced by a task change.
#[must_use]
pub const fn kind_for(change: &TaskChange) -> NotificationKind {
    match change {
        TaskChange::Created | TaskChange::Assigned { .. } => NotificationKind::TaskAssigned,
        TaskChange::DetailsUpdated => NotificationKind::TaskUpdated,
        TaskChange::StatusChanged { .. } => NotificationKind::StatusChanged,
        TaskChange::CommentAdded(_) => NotificationKind::CommentAdded,
        TaskChange::AttachmentAdded(_) => NotificationKind::FileUploaded,
    }
}

/// Returns the distinct recipients of a task change.
///
/// Assignment notifies exactly the identities that became assignees, the
/// actor included. Every other change notifies assignees and creator
/// except the actor.
#[must_use]
pub fn recipients_for(event: &TaskEvent) -> Vec<Email> {
    match &event.change {
        TaskChange::Created => event.task.assigned_to().iter().cloned().collect(),
        TaskChange::Assigned { added } => {
            let mut recipients: Vec<Email> = Vec::with_capacity(added.len());
            for email in added {
                if !recipients.contains(email) {
                    recipients.push(email.clone());
                }
            }
            recipients
        }
        TaskChange::DetailsUpdated
        | TaskChange::StatusChanged { .. }
        | TaskChange::CommentAdded(_)
        | TaskChange::AttachmentAdded(_) => event
            .task
            .stakeholders()
            .into_iter()
            .filter(|email| email != &event.actor)
            .collect(),
    }
}

/// Builds one unsaved notification per recipient of the event.
///
/// Comment bodies are quoted up to `excerpt_length` characters.
#[must_use]
pub fn derive_notifications(
    event: &TaskEvent,
    excerpt_length: usize,
    clock: &impl Clock,
) -> Vec<Notification> {
    let kind = kind_for(&event.change);
    let (title, message) = describe(event, excerpt_length);
    recipients_for(event)
        .into_iter()
        .map(|recipient| {
            Notification::new(
                NewNotification {
                    recipient,
                    kind,
                    title: title.clone(),
                    message: message.clone(),
                    related_task: event.task.id(),
                },
                clock,
            )
        })
        .collect()
}

fn describe(event: &TaskEvent, excerpt_length: usize) -> (String, String) {
    let actor = &event.actor;
    let task_title = event.task.title();
    match &event.change {
        TaskChange::Created | TaskChange::Assigned { .. } => (
            "New task assigned".to_owned(),
            format!("{actor} assigned you to \"{task_title}\""),
        ),
        TaskChange::DetailsUpdated => (
            "Task updated".to_owned(),
            format!("{actor} updated \"{task_title}\""),
        ),
        TaskChange::StatusChanged { from, to } => (
            "Task status changed".to_owned(),
            format!(
                "{actor} moved \"{task_title}\" from {} to {}",
                from.label(),
                to.label()
            ),
        ),
        TaskChange::CommentAdded(comment) => (
            "New comment".to_owned(),
            format!(
                "{actor} commented on \"{task_title}\": {}",
                excerpt(comment.text.as_str(), excerpt_length)
            ),
        ),
        TaskChange::AttachmentAdded(attachment) => {
            let file = attachment
                .file
                .file_name()
                .map_or_else(|| "a file".to_owned(), |name| format!("\"{name}\""));
            (
                "New attachment".to_owned(),
                format!("{actor} attached {file} to \"{task_title}\""),
            )
        }
    }
}

/// Truncates on a character boundary, marking the cut with `...`.
fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", text.get(..cut).unwrap_or(text)),
        None => text.to_owned(),
    }
}
