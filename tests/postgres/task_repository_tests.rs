//! Task repository tests against embedded `PostgreSQL`.

use super::helpers::{prepare_database, test_runtime};
use chrono::NaiveDate;
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use std::time::Duration;
use taskboard::identity::domain::{Department, Email};
use taskboard::task::{
    domain::{
        Assignees, CommentText, FileRef, NewTask, Priority, Task, TaskId, TaskStatus, TaskTitle,
        ViewerRole,
    },
    ports::{TaskRepository, TaskRepositoryError},
};

fn email(value: &str) -> Email {
    Email::new(value).expect("valid email")
}

fn new_task(creator: &str, assignees: &[&str]) -> Task {
    Task::new(
        NewTask {
            title: TaskTitle::new("Quarterly report").expect("valid title"),
            description: "Numbers for Q4".to_owned(),
            created_by: email(creator),
            assigned_to: Assignees::new(assignees.iter().map(|value| email(value)))
                .expect("non-empty assignees"),
            priority: Priority::High,
            viewer_role: ViewerRole::default(),
            deadline: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
            department: Some(Department::new("Eng").expect("valid department")),
            initial_comment: Some(CommentText::new("kick-off").expect("valid comment")),
            initial_attachment: Some(
                FileRef::new("s3://bucket/brief.pdf")
                    .expect("valid file")
                    .with_file_name("brief.pdf"),
            ),
        },
        &DefaultClock,
    )
}

fn ids(tasks: &[Task]) -> Vec<TaskId> {
    tasks.iter().map(Task::id).collect()
}

#[rstest]
fn store_and_find_round_trips_every_field(shared_test_cluster: &'static TestCluster) {
    let db = prepare_database(shared_test_cluster, "task_round_trip").expect("database setup");
    let task = new_task("boss@x.com", &["a@x.com", "b@x.com"]);
    let rt = test_runtime();

    rt.block_on(db.tasks.store(&task)).expect("store should succeed");
    let found = rt
        .block_on(db.tasks.find_by_id(task.id()))
        .expect("lookup should succeed")
        .expect("task should exist");

    assert_eq!(found.title(), task.title());
    assert_eq!(found.description(), task.description());
    assert_eq!(found.created_by(), task.created_by());
    assert_eq!(found.assigned_to(), task.assigned_to());
    assert_eq!(found.priority(), Priority::High);
    assert_eq!(found.status(), TaskStatus::Pending);
    assert_eq!(found.deadline(), task.deadline());
    assert_eq!(found.department(), task.department());
    assert_eq!(found.comments(), task.comments());
    assert_eq!(found.attachments(), task.attachments());
    assert_eq!(found.revision(), 0);
    assert_eq!(
        found.created_at().timestamp_micros(),
        task.created_at().timestamp_micros()
    );
}

#[rstest]
fn find_by_id_returns_none_for_missing(shared_test_cluster: &'static TestCluster) {
    let db = prepare_database(shared_test_cluster, "task_missing").expect("database setup");
    let rt = test_runtime();

    let found = rt
        .block_on(db.tasks.find_by_id(TaskId::new()))
        .expect("lookup should succeed");

    assert!(found.is_none());
}

#[rstest]
fn storing_the_same_task_twice_is_a_duplicate(shared_test_cluster: &'static TestCluster) {
    let db = prepare_database(shared_test_cluster, "task_duplicate").expect("database setup");
    let task = new_task("boss@x.com", &["a@x.com"]);
    let rt = test_runtime();

    rt.block_on(db.tasks.store(&task)).expect("store should succeed");
    let result = rt.block_on(db.tasks.store(&task));

    assert!(matches!(
        result,
        Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()
    ));
}

#[rstest]
fn update_with_matching_revision_persists_changes(shared_test_cluster: &'static TestCluster) {
    let db = prepare_database(shared_test_cluster, "task_update").expect("database setup");
    let original = new_task("boss@x.com", &["a@x.com"]);
    let rt = test_runtime();
    rt.block_on(db.tasks.store(&original)).expect("store should succeed");

    let mut changed = original.clone();
    changed.set_status(TaskStatus::InProgress, &DefaultClock);
    changed.add_comment(
        email("a@x.com"),
        CommentText::new("on it").expect("valid comment"),
        &DefaultClock,
    );
    rt.block_on(db.tasks.update(&changed, original.revision()))
        .expect("update should succeed");
    let found = rt
        .block_on(db.tasks.find_by_id(original.id()))
        .expect("lookup should succeed")
        .expect("task should exist");

    assert_eq!(found.status(), TaskStatus::InProgress);
    assert_eq!(found.comments().len(), 2);
    assert_eq!(found.revision(), changed.revision());
    assert!(found.revision() > original.revision());
}

#[rstest]
fn stale_revision_is_a_conflict_and_leaves_the_row(shared_test_cluster: &'static TestCluster) {
    let db = prepare_database(shared_test_cluster, "task_conflict").expect("database setup");
    let original = new_task("boss@x.com", &["a@x.com"]);
    let rt = test_runtime();
    rt.block_on(db.tasks.store(&original)).expect("store should succeed");

    let mut first = original.clone();
    first.set_status(TaskStatus::Done, &DefaultClock);
    rt.block_on(db.tasks.update(&first, original.revision()))
        .expect("first writer wins");
    let mut second = original.clone();
    second.set_status(TaskStatus::InProgress, &DefaultClock);
    let result = rt.block_on(db.tasks.update(&second, original.revision()));

    assert!(matches!(
        result,
        Err(TaskRepositoryError::RevisionConflict { task_id, expected: 0, actual })
            if task_id == original.id() && actual == first.revision()
    ));
    let found = rt
        .block_on(db.tasks.find_by_id(original.id()))
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(found.status(), TaskStatus::Done);
}

#[rstest]
fn updating_a_missing_task_is_not_found(shared_test_cluster: &'static TestCluster) {
    let db = prepare_database(shared_test_cluster, "task_update_missing").expect("database setup");
    let task = new_task("boss@x.com", &["a@x.com"]);
    let rt = test_runtime();

    let result = rt.block_on(db.tasks.update(&task, task.revision()));

    assert!(matches!(
        result,
        Err(TaskRepositoryError::NotFound(id)) if id == task.id()
    ));
}

#[rstest]
fn find_by_assignee_matches_array_membership(shared_test_cluster: &'static TestCluster) {
    let db = prepare_database(shared_test_cluster, "task_assignee").expect("database setup");
    let shared = new_task("boss@x.com", &["a@x.com", "b@x.com"]);
    let only_b = new_task("boss@x.com", &["b@x.com"]);
    let authored_by_a = new_task("a@x.com", &["c@x.com"]);
    let rt = test_runtime();
    for task in [&shared, &only_b, &authored_by_a] {
        rt.block_on(db.tasks.store(task)).expect("store should succeed");
    }

    let for_a = rt
        .block_on(db.tasks.find_by_assignee(&email("a@x.com")))
        .expect("lookup should succeed");
    let for_b = rt
        .block_on(db.tasks.find_by_assignee(&email("b@x.com")))
        .expect("lookup should succeed");
    let for_nobody = rt
        .block_on(db.tasks.find_by_assignee(&email("boss@x.com")))
        .expect("lookup should succeed");

    assert_eq!(ids(&for_a), vec![shared.id()]);
    assert_eq!(for_b.len(), 2);
    assert!(for_b.iter().all(|task| task.is_assignee(&email("b@x.com"))));
    assert!(for_nobody.is_empty());
}

#[rstest]
fn unassigned_member_drops_out_of_assignee_lookup(shared_test_cluster: &'static TestCluster) {
    let db = prepare_database(shared_test_cluster, "task_unassign").expect("database setup");
    let original = new_task("boss@x.com", &["a@x.com", "b@x.com"]);
    let rt = test_runtime();
    rt.block_on(db.tasks.store(&original)).expect("store should succeed");

    let mut changed = original.clone();
    changed
        .unassign(&email("a@x.com"), &DefaultClock)
        .expect("a is not the last assignee");
    rt.block_on(db.tasks.update(&changed, original.revision()))
        .expect("update should succeed");
    let for_a = rt
        .block_on(db.tasks.find_by_assignee(&email("a@x.com")))
        .expect("lookup should succeed");

    assert!(for_a.is_empty());
}

#[rstest]
fn list_all_returns_newest_first(shared_test_cluster: &'static TestCluster) {
    let db = prepare_database(shared_test_cluster, "task_order").expect("database setup");
    let rt = test_runtime();
    let mut created = Vec::new();
    for _ in 0..3 {
        let task = new_task("boss@x.com", &["a@x.com"]);
        rt.block_on(db.tasks.store(&task)).expect("store should succeed");
        created.push(task.id());
        std::thread::sleep(Duration::from_millis(5));
    }

    let listed = rt.block_on(db.tasks.list_all()).expect("listing should succeed");

    created.reverse();
    assert_eq!(ids(&listed), created);
}
