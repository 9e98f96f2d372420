//! End-to-end tests for recipients managing their notifications.

use super::helpers::{Portal, caller, portal, request};
use rstest::rstest;
use taskboard::error::ErrorKind;
use taskboard::notification::domain::NotificationFilter;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recipient_reads_flags_and_deletes(portal: Portal) -> eyre::Result<()> {
    let created = portal
        .create("boss@x.com", request("Inbox", &["a@x.com"]))
        .await;
    portal
        .tasks
        .add_comment(created.id(), "first", &caller("boss@x.com"))
        .await?;
    let me = caller("a@x.com");

    let all = portal
        .inbox
        .list_notifications(&me, NotificationFilter::All)
        .await?;
    eyre::ensure!(all.len() == 2, "expected assignment and comment");
    let newest = all.first().ok_or_else(|| eyre::eyre!("empty inbox"))?;
    let oldest = all.last().ok_or_else(|| eyre::eyre!("empty inbox"))?;

    portal.inbox.mark_read(oldest.id(), &me).await?;
    portal.inbox.toggle_important(newest.id(), &me).await?;
    let unread = portal
        .inbox
        .list_notifications_by(&me, "unread")
        .await?;
    let important = portal
        .inbox
        .list_notifications(&me, NotificationFilter::Important)
        .await?;
    eyre::ensure!(unread.len() == 1, "one unread expected");
    eyre::ensure!(important.len() == 1, "one important expected");

    portal.inbox.delete(newest.id(), &me).await?;
    let remaining = portal.inbox.unread_count(&me).await?;
    eyre::ensure!(remaining == 0, "deleted record still counted");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn other_identities_cannot_touch_notifications(portal: Portal) -> eyre::Result<()> {
    portal
        .create("boss@x.com", request("Private", &["a@x.com"]))
        .await;
    let inbox = portal
        .inbox
        .list_notifications(&caller("a@x.com"), NotificationFilter::All)
        .await?;
    let target = inbox.first().ok_or_else(|| eyre::eyre!("empty inbox"))?;

    let result = portal.inbox.mark_read(target.id(), &caller("b@x.com")).await;

    let err = result.err().ok_or_else(|| eyre::eyre!("foreign read succeeded"))?;
    eyre::ensure!(err.kind() == ErrorKind::Forbidden, "unexpected error {err}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mark_all_read_clears_unread_count(portal: Portal) -> eyre::Result<()> {
    let created = portal
        .create("boss@x.com", request("Busy", &["a@x.com", "b@x.com"]))
        .await;
    portal
        .tasks
        .update_status(created.id(), "in progress", &caller("b@x.com"))
        .await?;
    let me = caller("a@x.com");

    let changed = portal.inbox.mark_all_read(&me).await?;
    let remaining = portal.inbox.unread_count(&me).await?;

    eyre::ensure!(changed == 2, "expected two changes, got {changed}");
    eyre::ensure!(remaining == 0, "unread remain");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_caller_cannot_open_an_inbox(portal: Portal) -> eyre::Result<()> {
    let ghost = caller("ghost@x.com");

    let listed = portal
        .inbox
        .list_notifications(&ghost, NotificationFilter::All)
        .await;
    let marked = portal.inbox.mark_all_read(&ghost).await;

    let list_err = listed.err().ok_or_else(|| eyre::eyre!("unknown caller listed"))?;
    let mark_err = marked.err().ok_or_else(|| eyre::eyre!("unknown caller marked"))?;
    eyre::ensure!(
        list_err.kind() == ErrorKind::Unauthenticated,
        "unexpected error {list_err}"
    );
    eyre::ensure!(
        mark_err.kind() == ErrorKind::Unauthenticated,
        "unexpected error {mark_err}"
    );
    eyre::ensure!(list_err.kind().http_status() == 401, "expected 401");
    Ok(())
}
