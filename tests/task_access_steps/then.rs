//! Then steps for task access BDD scenarios.

use super::world::{TaskAccessWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use taskboard::error::ErrorKind;
use taskboard::identity::domain::Email;
use taskboard::notification::{domain::NotificationKind, ports::NotificationRepository};
use taskboard::task::{domain::TaskStatus, ports::TaskRepository};

fn failure_kind(world: &TaskAccessWorld) -> Result<ErrorKind, eyre::Report> {
    match world.last_result.as_ref() {
        Some(Err(err)) => Ok(err.kind()),
        Some(Ok(_)) => Err(eyre::eyre!("expected the operation to fail")),
        None => Err(eyre::eyre!("missing operation result")),
    }
}

#[then("the operation succeeds")]
fn operation_succeeds(world: &TaskAccessWorld) -> Result<(), eyre::Report> {
    match world.last_result.as_ref() {
        Some(Ok(_)) => Ok(()),
        Some(Err(err)) => Err(eyre::eyre!("expected success, got {err}")),
        None => Err(eyre::eyre!("missing operation result")),
    }
}

#[then("the operation is forbidden")]
fn operation_is_forbidden(world: &TaskAccessWorld) -> Result<(), eyre::Report> {
    let kind = failure_kind(world)?;
    eyre::ensure!(kind == ErrorKind::Forbidden, "expected forbidden, got {kind}");
    Ok(())
}

#[then("the operation fails validation")]
fn operation_fails_validation(world: &TaskAccessWorld) -> Result<(), eyre::Report> {
    let kind = failure_kind(world)?;
    eyre::ensure!(kind == ErrorKind::Validation, "expected validation, got {kind}");
    Ok(())
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskAccessWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let actual = world.current_task()?.status();
    eyre::ensure!(actual == expected, "expected status {expected}, found {actual}");
    Ok(())
}

#[then(r#""{email}" received {count:usize} "{kind}" notifications"#)]
fn received_notifications(
    world: &TaskAccessWorld,
    email: String,
    count: usize,
    kind: String,
) -> Result<(), eyre::Report> {
    let recipient = Email::new(email)?;
    let expected_kind = NotificationKind::try_from(kind.as_str())
        .map_err(|err| eyre::eyre!("invalid notification kind in scenario: {err}"))?;
    let received = run_async(world.notifications.list_for_recipient(&recipient))
        .wrap_err("list notifications")?
        .iter()
        .filter(|notification| notification.kind() == expected_kind)
        .count();
    eyre::ensure!(
        received == count,
        "expected {count} {expected_kind} notifications for {recipient}, found {received}"
    );
    Ok(())
}

#[then(r#"the listing contains only "{title}""#)]
fn listing_contains_only(world: &TaskAccessWorld, title: String) -> Result<(), eyre::Report> {
    let listing = world
        .last_listing
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing listing"))?;
    let titles: Vec<&str> = listing.iter().map(|task| task.title().as_str()).collect();
    eyre::ensure!(titles == [title.as_str()], "unexpected listing {titles:?}");
    Ok(())
}

#[then("no task is stored")]
fn no_task_is_stored(world: &TaskAccessWorld) -> Result<(), eyre::Report> {
    let stored = run_async(world.tasks.list_all()).wrap_err("list tasks")?;
    eyre::ensure!(stored.is_empty(), "expected no tasks, found {}", stored.len());
    Ok(())
}
