//! Notification repository tests against embedded `PostgreSQL`.

use super::helpers::{prepare_database, test_runtime};
use chrono::Utc;
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use std::time::Duration;
use taskboard::identity::domain::Email;
use taskboard::notification::{
    domain::{NewNotification, Notification, NotificationId, NotificationKind},
    ports::{NotificationRepository, NotificationRepositoryError},
};
use taskboard::task::domain::TaskId;

fn email(value: &str) -> Email {
    Email::new(value).expect("valid email")
}

fn notification(recipient: &str, kind: NotificationKind) -> Notification {
    Notification::new(
        NewNotification {
            recipient: email(recipient),
            kind,
            title: "Task updated".to_owned(),
            message: "boss@x.com changed Quarterly report".to_owned(),
            related_task: TaskId::new(),
        },
        &DefaultClock,
    )
}

#[rstest]
fn stored_notification_lists_for_its_recipient_only(shared_test_cluster: &'static TestCluster) {
    let db = prepare_database(shared_test_cluster, "inbox_list").expect("database setup");
    let rt = test_runtime();
    let older = notification("a@x.com", NotificationKind::TaskAssigned);
    std::thread::sleep(Duration::from_millis(5));
    let newer = notification("a@x.com", NotificationKind::CommentAdded);
    let foreign = notification("b@x.com", NotificationKind::TaskAssigned);
    for record in [&older, &newer, &foreign] {
        rt.block_on(db.notifications.store(record))
            .expect("store should succeed");
    }

    let listed = rt
        .block_on(db.notifications.list_for_recipient(&email("a@x.com")))
        .expect("listing should succeed");

    let listed_ids: Vec<NotificationId> = listed.iter().map(Notification::id).collect();
    assert_eq!(listed_ids, vec![newer.id(), older.id()]);
    let first = listed.first().expect("newest record");
    assert_eq!(first.kind(), NotificationKind::CommentAdded);
    assert_eq!(first.message(), newer.message());
    assert!(!first.is_read());
}

#[rstest]
fn storing_the_same_notification_twice_is_a_duplicate(
    shared_test_cluster: &'static TestCluster,
) {
    let db = prepare_database(shared_test_cluster, "inbox_duplicate").expect("database setup");
    let record = notification("a@x.com", NotificationKind::TaskAssigned);
    let rt = test_runtime();

    rt.block_on(db.notifications.store(&record))
        .expect("store should succeed");
    let result = rt.block_on(db.notifications.store(&record));

    assert!(matches!(
        result,
        Err(NotificationRepositoryError::Duplicate(id)) if id == record.id()
    ));
}

#[rstest]
fn update_persists_flags(shared_test_cluster: &'static TestCluster) {
    let db = prepare_database(shared_test_cluster, "inbox_flags").expect("database setup");
    let mut record = notification("a@x.com", NotificationKind::StatusChanged);
    let rt = test_runtime();
    rt.block_on(db.notifications.store(&record))
        .expect("store should succeed");

    record.mark_read(&DefaultClock);
    record.toggle_important();
    rt.block_on(db.notifications.update(&record))
        .expect("update should succeed");
    let found = rt
        .block_on(db.notifications.find_by_id(record.id()))
        .expect("lookup should succeed")
        .expect("notification should exist");

    assert!(found.is_read());
    assert!(found.is_important());
    assert!(found.read_at().is_some());
}

#[rstest]
fn mark_all_read_touches_only_unread_records_of_the_recipient(
    shared_test_cluster: &'static TestCluster,
) {
    let db = prepare_database(shared_test_cluster, "inbox_mark_all").expect("database setup");
    let rt = test_runtime();
    let mut already_read = notification("a@x.com", NotificationKind::TaskAssigned);
    already_read.mark_read(&DefaultClock);
    let first_read_at = already_read.read_at();
    let unread = [
        notification("a@x.com", NotificationKind::CommentAdded),
        notification("a@x.com", NotificationKind::FileUploaded),
    ];
    let foreign = notification("b@x.com", NotificationKind::CommentAdded);
    for record in unread.iter().chain([&already_read, &foreign]) {
        rt.block_on(db.notifications.store(record))
            .expect("store should succeed");
    }

    let changed = rt
        .block_on(db.notifications.mark_all_read(&email("a@x.com"), Utc::now()))
        .expect("bulk update should succeed");
    let mine = rt
        .block_on(db.notifications.list_for_recipient(&email("a@x.com")))
        .expect("listing should succeed");
    let theirs = rt
        .block_on(db.notifications.list_for_recipient(&email("b@x.com")))
        .expect("listing should succeed");

    assert_eq!(changed, 2);
    assert!(mine.iter().all(Notification::is_read));
    let kept = mine
        .iter()
        .find(|record| record.id() == already_read.id())
        .expect("previously read record");
    assert_eq!(
        kept.read_at().map(|at| at.timestamp_micros()),
        first_read_at.map(|at| at.timestamp_micros())
    );
    assert!(theirs.iter().all(|record| !record.is_read()));
}

#[rstest]
fn delete_removes_the_record_and_reports_missing_ids(
    shared_test_cluster: &'static TestCluster,
) {
    let db = prepare_database(shared_test_cluster, "inbox_delete").expect("database setup");
    let record = notification("a@x.com", NotificationKind::TaskUpdated);
    let rt = test_runtime();
    rt.block_on(db.notifications.store(&record))
        .expect("store should succeed");

    rt.block_on(db.notifications.delete(record.id()))
        .expect("delete should succeed");
    let found = rt
        .block_on(db.notifications.find_by_id(record.id()))
        .expect("lookup should succeed");
    let again = rt.block_on(db.notifications.delete(record.id()));

    assert!(found.is_none());
    assert!(matches!(
        again,
        Err(NotificationRepositoryError::NotFound(id)) if id == record.id()
    ));
}

#[rstest]
fn updating_a_missing_notification_is_not_found(shared_test_cluster: &'static TestCluster) {
    let db = prepare_database(shared_test_cluster, "inbox_update_missing").expect("database setup");
    let record = notification("a@x.com", NotificationKind::TaskAssigned);
    let rt = test_runtime();

    let result = rt.block_on(db.notifications.update(&record));

    assert!(matches!(
        result,
        Err(NotificationRepositoryError::NotFound(id)) if id == record.id()
    ));
}
