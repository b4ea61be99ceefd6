//! Detection progress reporting
//!
//! Item events arrive in bursts of up to a chunk at a time; they are folded
//! into a [`Tally`] and printed only once the tally has settled.

use pool_importer::DetectionEvent;
use pool_view::Settler;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub total: usize,
    pub detected: usize,
    pub failed: usize,
    pub chunks_done: usize,
    pub chunks_total: usize,
}

impl Tally {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    pub fn apply(&mut self, event: &DetectionEvent) {
        match event {
            DetectionEvent::Detected { .. } => self.detected += 1,
            DetectionEvent::Failed { .. } => self.failed += 1,
            DetectionEvent::ChunkDone { chunk, total } => {
                self.chunks_done = *chunk;
                self.chunks_total = *total;
            }
        }
    }

    pub fn line(&self) -> String {
        format!(
            "detected {}/{} ({} failed), chunk {}/{}",
            self.detected, self.total, self.failed, self.chunks_done, self.chunks_total
        )
    }
}

/// Consume detection events until the sender side closes, printing the
/// settled tally to stderr. Returns the final tally.
pub async fn follow(
    mut events: mpsc::Receiver<DetectionEvent>,
    total: usize,
    window: Duration,
) -> Tally {
    let settler = Settler::spawn(window, |_: &Tally| false);
    let mut commits = settler.subscribe();

    let printer = tokio::spawn(async move {
        let mut printed = 0;
        while commits.changed().await.is_ok() {
            let settled = *commits.borrow_and_update();
            if let Some(tally) = settled {
                eprintln!("{}", tally.line());
                printed += 1;
            }
        }
        printed
    });

    let mut tally = Tally::new(total);
    while let Some(event) = events.recv().await {
        tally.apply(&event);
        settler.submit(tally);
    }

    settler.close().await;
    if let Ok(printed) = printer.await {
        debug!(printed, "Progress lines printed");
    }
    tally
}
