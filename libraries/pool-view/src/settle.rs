//! Settle-after-quiet commit primitive
//!
//! Bursts of collection updates (many detection results landing together)
//! are coalesced into one committed value. A value is committed once no newer
//! value has been submitted for the settle window. Empty values skip the
//! window and commit immediately. Each submission restarts the window.

use pool_core::Keyed;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::trace;

/// Default settle window
pub const DEFAULT_SETTLE_WINDOW: Duration = Duration::from_millis(100);

/// Debounced committer running on a background task.
pub struct Settler<T> {
    input: mpsc::UnboundedSender<T>,
    committed: watch::Receiver<Option<T>>,
    task: JoinHandle<()>,
}

impl<T> Settler<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Spawn the settle task on the current runtime.
    pub fn spawn<F>(window: Duration, is_empty: F) -> Self
    where
        F: Fn(&T) -> bool + Send + 'static,
    {
        let (input, rx) = mpsc::unbounded_channel();
        let (tx, committed) = watch::channel(None);
        let task = tokio::spawn(run(window, is_empty, rx, tx));

        Self {
            input,
            committed,
            task,
        }
    }

    /// Submit a new value. Returns false if the task has stopped.
    pub fn submit(&self, value: T) -> bool {
        self.input.send(value).is_ok()
    }

    /// Last committed value
    pub fn committed(&self) -> Option<T> {
        self.committed.borrow().clone()
    }

    /// Receiver notified on every commit
    pub fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.committed.clone()
    }

    /// Stop accepting input, flush any pending value, and return the last commit.
    pub async fn close(self) -> Option<T> {
        let Self {
            input,
            committed,
            task,
        } = self;
        drop(input);
        let _ = task.await;
        let last = committed.borrow().clone();
        last
    }
}

async fn run<T, F>(
    window: Duration,
    is_empty: F,
    mut input: mpsc::UnboundedReceiver<T>,
    output: watch::Sender<Option<T>>,
) where
    F: Fn(&T) -> bool,
{
    let commit = |value: T| {
        trace!("Settled value committed");
        output.send_replace(Some(value));
    };

    let mut pending: Option<T> = None;

    loop {
        let Some(value) = pending.take() else {
            match input.recv().await {
                Some(next) if is_empty(&next) => commit(next),
                Some(next) => pending = Some(next),
                None => break,
            }
            continue;
        };

        tokio::select! {
            next = input.recv() => match next {
                Some(next) if is_empty(&next) => commit(next),
                Some(next) => pending = Some(next),
                None => {
                    commit(value);
                    break;
                }
            },
            () = tokio::time::sleep(window) => commit(value),
        }
    }
}

/// Feeds a [`Settler`] only when the ordered key list of a collection changes.
pub struct CollectionStabilizer<T> {
    settler: Settler<Vec<T>>,
    last_keys: Option<Vec<String>>,
}

impl<T> CollectionStabilizer<T>
where
    T: Keyed + Clone + Send + Sync + 'static,
{
    pub fn new(window: Duration) -> Self {
        Self {
            settler: Settler::spawn(window, Vec::is_empty),
            last_keys: None,
        }
    }

    /// Offer the current collection. Returns whether it was submitted.
    pub fn offer(&mut self, items: &[T]) -> bool {
        let keys: Vec<String> = items
            .iter()
            .map(|item| item.selection_key().into_owned())
            .collect();

        if self.last_keys.as_ref() == Some(&keys) {
            return false;
        }

        self.last_keys = Some(keys);
        self.settler.submit(items.to_vec())
    }

    /// Last committed collection
    pub fn committed(&self) -> Option<Vec<T>> {
        self.settler.committed()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Vec<T>>> {
        self.settler.subscribe()
    }

    /// Flush and return the last committed collection.
    pub async fn close(self) -> Option<Vec<T>> {
        self.settler.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(String);

    impl Keyed for Row {
        fn selection_key(&self) -> Cow<'_, str> {
            Cow::Borrowed(&self.0)
        }
    }

    fn rows(keys: &[&str]) -> Vec<Row> {
        keys.iter().map(|k| Row(k.to_string())).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_commits_once_after_quiet() {
        let settler = Settler::spawn(Duration::from_millis(100), |v: &Vec<u32>| v.is_empty());
        let mut commits = settler.subscribe();

        for n in 1..=5 {
            settler.submit(vec![n]);
            tokio::time::sleep(Duration::from_millis(30)).await;
        }
        assert_eq!(settler.committed(), None);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(commits.has_changed().unwrap());
        assert_eq!(*commits.borrow_and_update(), Some(vec![5]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_commits_immediately() {
        let settler = Settler::spawn(Duration::from_secs(10), |v: &Vec<u32>| v.is_empty());

        settler.submit(vec![1, 2]);
        tokio::time::sleep(Duration::from_millis(1)).await;
        settler.submit(Vec::new());
        tokio::time::sleep(Duration::from_millis(1)).await;

        assert_eq!(settler.committed(), Some(Vec::new()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_flushes_pending() {
        let settler = Settler::spawn(Duration::from_secs(10), |v: &Vec<u32>| v.is_empty());
        settler.submit(vec![7]);

        assert_eq!(settler.close().await, Some(vec![7]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stabilizer_ignores_same_membership() {
        let mut stabilizer = CollectionStabilizer::new(Duration::from_millis(100));

        assert!(stabilizer.offer(&rows(&["a", "b"])));
        assert!(!stabilizer.offer(&rows(&["a", "b"])));
        assert!(stabilizer.offer(&rows(&["a"])));
        assert!(stabilizer.offer(&rows(&["b", "a"])));

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(stabilizer.committed(), Some(rows(&["b", "a"])));
    }
}
