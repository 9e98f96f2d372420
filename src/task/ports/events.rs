//! Port through which committed task mutations are published.

use crate::task::domain::TaskEvent;
use async_trait::async_trait;

/// Receiver of committed task mutations.
///
/// Publishing is infallible from the task store's point of view: a sink
/// handles and logs its own failures, and nothing it does can roll back
/// the mutation that produced the event.
#[async_trait]
pub trait TaskEventSink: Send + Sync {
    /// Handles one committed task mutation.
    async fn publish(&self, event: &TaskEvent);
}
