//! End-to-end tests for role-scoped task access.

use super::helpers::{Portal, caller, email, portal, request};
use rstest::rstest;
use taskboard::error::ErrorKind;
use taskboard::task::{
    domain::TaskStatus,
    services::{TaskQuery, TaskServiceError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admin_creates_pending_task(portal: Portal) {
    let created = portal
        .create("admin@x.com", request("Fix bug", &["a@x.com", "b@x.com"]))
        .await;

    let fetched = portal
        .tasks
        .get_task(created.id(), &caller("admin@x.com"))
        .await
        .expect("admin reads every task");

    assert_eq!(fetched.status(), TaskStatus::Pending);
    assert_eq!(fetched.created_by(), &email("admin@x.com"));
    assert_eq!(fetched.assigned_to().len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unrelated_user_cannot_read_task(portal: Portal) {
    let created = portal
        .create("admin@x.com", request("Fix bug", &["a@x.com", "b@x.com"]))
        .await;

    let result = portal
        .tasks
        .get_task(created.id(), &caller("c@x.com"))
        .await;
    let listed = portal
        .tasks
        .list_visible_tasks(&caller("c@x.com"), TaskQuery::all())
        .await
        .expect("listing should succeed");

    assert!(matches!(result, Err(TaskServiceError::Forbidden { .. })));
    assert!(listed.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn subadmin_lists_only_department_tasks(portal: Portal) {
    let eng = portal
        .create(
            "boss@x.com",
            request("Eng work", &["a@x.com"]).with_department("Eng"),
        )
        .await;
    portal
        .create(
            "boss@x.com",
            request("Sales work", &["a@x.com"]).with_department("Sales"),
        )
        .await;
    portal
        .create("boss@x.com", request("Unscoped work", &["a@x.com"]))
        .await;

    let listed = portal
        .tasks
        .list_visible_tasks(&caller("lead@x.com"), TaskQuery::all())
        .await
        .expect("listing should succeed");

    assert_eq!(listed, vec![eng]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignee_updates_status_but_outsider_cannot(portal: Portal) {
    let created = portal
        .create("boss@x.com", request("Fix bug", &["a@x.com", "b@x.com"]))
        .await;

    let by_assignee = portal
        .tasks
        .update_status(created.id(), "InProgress", &caller("a@x.com"))
        .await
        .expect("assignee may update status");
    let by_outsider = portal
        .tasks
        .update_status(created.id(), "Done", &caller("c@x.com"))
        .await;

    assert_eq!(by_assignee.status(), TaskStatus::InProgress);
    assert_eq!(
        by_outsider.expect_err("outsider is forbidden").kind(),
        ErrorKind::Forbidden
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_assignee_leaves_no_trace(portal: Portal) {
    let result = portal
        .tasks
        .create_task(request("Ghost work", &["unknown@x.com"]), &caller("admin@x.com"))
        .await;

    assert_eq!(
        result.expect_err("unknown assignee").kind(),
        ErrorKind::Validation
    );
    assert_eq!(portal.task_count().await, 0);
    assert!(portal.notifications_for("unknown@x.com").await.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn last_assignee_cannot_be_removed(portal: Portal) {
    let created = portal
        .create("boss@x.com", request("Solo", &["a@x.com"]))
        .await;

    let result = portal
        .tasks
        .unassign_user(created.id(), "a@x.com", &caller("admin@x.com"))
        .await;
    let stored = portal
        .tasks
        .get_task(created.id(), &caller("admin@x.com"))
        .await
        .expect("task still readable");

    assert_eq!(result.expect_err("last assignee").kind(), ErrorKind::BadInput);
    assert!(!stored.assigned_to().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reassignment_changes_visibility(portal: Portal) {
    let created = portal
        .create("boss@x.com", request("Handover", &["a@x.com", "b@x.com"]))
        .await;

    portal
        .tasks
        .assign_users(created.id(), ["c@x.com".to_owned()], &caller("admin@x.com"))
        .await
        .expect("admin may assign");
    portal
        .tasks
        .unassign_user(created.id(), "a@x.com", &caller("admin@x.com"))
        .await
        .expect("admin may unassign");

    let for_c = portal
        .tasks
        .list_assigned_tasks(&caller("c@x.com"))
        .await
        .expect("listing should succeed");
    let for_a = portal.tasks.get_task(created.id(), &caller("a@x.com")).await;

    assert_eq!(for_c.len(), 1);
    assert_eq!(for_a.expect_err("no longer assigned").kind(), ErrorKind::Forbidden);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stale_revision_surfaces_as_conflict(portal: Portal) {
    use taskboard::task::ports::TaskRepository;

    let created = portal
        .create("boss@x.com", request("Race", &["a@x.com"]))
        .await;
    let mut stale = created.clone();

    portal
        .tasks
        .update_status(created.id(), "done", &caller("a@x.com"))
        .await
        .expect("first writer wins");
    stale.set_status(TaskStatus::InProgress, &mockable::DefaultClock);
    let result = portal.task_store.update(&stale, created.revision()).await;

    let err = TaskServiceError::from(result.expect_err("stale write"));
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert!(err.kind().is_retryable());
}
