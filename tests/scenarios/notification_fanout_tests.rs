//! End-to-end tests for notification recipients of task mutations.

use super::helpers::{Portal, caller, portal, request};
use rstest::rstest;
use taskboard::notification::domain::NotificationKind;
use taskboard::task::services::{AttachFileRequest, UpdateTaskDetailsRequest};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn creation_notifies_each_assignee_once(portal: Portal) {
    portal
        .create(
            "admin@x.com",
            request("Fix bug", &["a@x.com", "b@x.com", "c@x.com"]),
        )
        .await;

    for assignee in ["a@x.com", "b@x.com", "c@x.com"] {
        assert_eq!(
            portal.count_of(assignee, NotificationKind::TaskAssigned).await,
            1
        );
    }
    assert!(portal.notifications_for("admin@x.com").await.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn creator_who_assigns_themselves_is_notified(portal: Portal) {
    portal
        .create("boss@x.com", request("Self", &["boss@x.com", "a@x.com"]))
        .await;

    assert_eq!(
        portal
            .count_of("boss@x.com", NotificationKind::TaskAssigned)
            .await,
        1
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_change_skips_the_actor(portal: Portal) {
    let created = portal
        .create("admin@x.com", request("Fix bug", &["a@x.com", "b@x.com"]))
        .await;

    portal
        .tasks
        .update_status(created.id(), "InProgress", &caller("a@x.com"))
        .await
        .expect("assignee may update status");

    assert_eq!(
        portal.count_of("b@x.com", NotificationKind::StatusChanged).await,
        1
    );
    assert_eq!(
        portal
            .count_of("admin@x.com", NotificationKind::StatusChanged)
            .await,
        1
    );
    assert_eq!(
        portal.count_of("a@x.com", NotificationKind::StatusChanged).await,
        0
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comment_notifies_creator_but_not_commenter(portal: Portal) {
    let created = portal
        .create("boss@x.com", request("Review", &["b@x.com"]))
        .await;

    let updated = portal
        .tasks
        .add_comment(created.id(), "looks good", &caller("b@x.com"))
        .await
        .expect("assignee may comment");

    assert_eq!(updated.comments().len(), 1);
    assert_eq!(
        portal
            .count_of("boss@x.com", NotificationKind::CommentAdded)
            .await,
        1
    );
    assert_eq!(
        portal.count_of("b@x.com", NotificationKind::CommentAdded).await,
        0
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_comments_are_not_deduplicated(portal: Portal) {
    let created = portal
        .create("boss@x.com", request("Review", &["a@x.com"]))
        .await;

    for _ in 0..2 {
        portal
            .tasks
            .add_comment(created.id(), "ping", &caller("a@x.com"))
            .await
            .expect("assignee may comment");
    }
    let stored = portal
        .tasks
        .get_task(created.id(), &caller("a@x.com"))
        .await
        .expect("assignee reads task");

    assert_eq!(stored.comments().len(), 2);
    assert_eq!(
        portal
            .count_of("boss@x.com", NotificationKind::CommentAdded)
            .await,
        2
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn attachment_and_details_changes_notify_stakeholders(portal: Portal) {
    let created = portal
        .create("boss@x.com", request("Docs", &["a@x.com", "b@x.com"]))
        .await;

    portal
        .tasks
        .add_attachment(
            created.id(),
            AttachFileRequest::new("s3://bucket/spec.pdf").with_file_name("spec.pdf"),
            &caller("a@x.com"),
        )
        .await
        .expect("assignee may attach");
    portal
        .tasks
        .update_details(
            created.id(),
            UpdateTaskDetailsRequest::new().with_deadline("2025-02-01"),
            &caller("admin@x.com"),
        )
        .await
        .expect("admin may edit");

    assert_eq!(
        portal.count_of("b@x.com", NotificationKind::FileUploaded).await,
        1
    );
    assert_eq!(
        portal.count_of("a@x.com", NotificationKind::FileUploaded).await,
        0
    );
    for stakeholder in ["a@x.com", "b@x.com", "boss@x.com"] {
        assert_eq!(
            portal.count_of(stakeholder, NotificationKind::TaskUpdated).await,
            1
        );
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignment_notifies_only_new_assignees(portal: Portal) {
    let created = portal
        .create("boss@x.com", request("Grow team", &["a@x.com"]))
        .await;

    portal
        .tasks
        .assign_users(
            created.id(),
            ["a@x.com".to_owned(), "b@x.com".to_owned()],
            &caller("admin@x.com"),
        )
        .await
        .expect("admin may assign");

    assert_eq!(
        portal.count_of("a@x.com", NotificationKind::TaskAssigned).await,
        1
    );
    assert_eq!(
        portal.count_of("b@x.com", NotificationKind::TaskAssigned).await,
        1
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recipient_removed_from_directory_is_skipped(portal: Portal) {
    let created = portal
        .create("boss@x.com", request("Churn", &["a@x.com", "b@x.com"]))
        .await;
    portal
        .directory
        .remove(&super::helpers::email("b@x.com"))
        .expect("remove should succeed");

    portal
        .tasks
        .update_status(created.id(), "done", &caller("a@x.com"))
        .await
        .expect("mutation succeeds despite stale recipient");

    assert_eq!(
        portal.count_of("b@x.com", NotificationKind::StatusChanged).await,
        0
    );
    assert_eq!(
        portal
            .count_of("boss@x.com", NotificationKind::StatusChanged)
            .await,
        1
    );
}
