//! Live query over the task collection.
//!
//! A background task re-runs the ordered list query whenever the store
//! reports a local write, and on a fixed interval to pick up writes made by
//! other processes. A snapshot is delivered first on start and then only
//! when the result set differs from the last one delivered. The first error
//! is delivered and ends the subscription.

use super::store::{DocumentStore, StoreError, TaskDocument};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const BUFFER: usize = 16;

pub type Snapshot = Result<Vec<TaskDocument>, StoreError>;

pub struct Subscription {
    receiver: mpsc::Receiver<Snapshot>,
    task: JoinHandle<()>,
}

impl Subscription {
    /// The next snapshot, or `None` once the subscription has ended.
    pub async fn next(&mut self) -> Option<Snapshot> {
        self.receiver.recv().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub fn subscribe<S>(store: S, interval: Duration) -> Subscription
where
    S: DocumentStore + Send + Sync + 'static,
{
    let (sender, receiver) = mpsc::channel(BUFFER);

    let task = tokio::spawn(async move {
        let mut changes = store.changes();
        let mut watching = true;
        let mut last: Option<Vec<TaskDocument>> = None;

        loop {
            match store.list().await {
                Ok(documents) => {
                    if last.as_ref() != Some(&documents) {
                        if sender.send(Ok(documents.clone())).await.is_err() {
                            return;
                        }
                        last = Some(documents);
                    }
                }
                Err(error) => {
                    tracing::warn!("task subscription failed: {}", error);
                    let _ = sender.send(Err(error)).await;
                    return;
                }
            }

            if watching {
                tokio::select! {
                    changed = changes.changed() => {
                        // The store is gone; fall back to polling alone.
                        if changed.is_err() {
                            watching = false;
                        }
                    }
                    _ = tokio::time::sleep(interval) => {}
                }
            } else {
                tokio::time::sleep(interval).await;
            }
        }
    });

    Subscription { receiver, task }
}
