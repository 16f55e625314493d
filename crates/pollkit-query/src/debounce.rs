//! Debounce timer
//!
//! Pure timing primitive: collapses a rapid stream of raw values into a
//! single settled value after a quiet period. No network or validation
//! logic lives here; it is reusable for any input.

use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Quiet period used by the live search box.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_secs(1);

/// Debounces a continuously-updating input value.
///
/// Each [`update`](Self::update) cancels the pending quiet-period timer and
/// schedules a new one; the settled value is published through the paired
/// `watch` receiver only once the input has been stable for the full quiet
/// period. Dropping the debouncer cancels any pending timer, so no settled
/// value ever fires after teardown.
#[derive(Debug)]
pub struct Debouncer<T> {
    input: mpsc::UnboundedSender<T>,
    worker: JoinHandle<()>,
}

impl<T: Clone + Send + Sync + 'static> Debouncer<T> {
    /// Create a debouncer with the given quiet period.
    ///
    /// The receiver starts at `None` and moves to `Some(value)` on each
    /// settle.
    #[must_use]
    pub fn new(quiet_period: Duration) -> (Self, watch::Receiver<Option<T>>) {
        let (input, inbox) = mpsc::unbounded_channel();
        let (settled_tx, settled_rx) = watch::channel(None);
        let worker = tokio::spawn(run(quiet_period, inbox, settled_tx));
        (Self { input, worker }, settled_rx)
    }

    /// Push the latest raw value. Non-blocking; resets the quiet-period
    /// timer. Values pushed after shutdown are silently dropped.
    pub fn update(&self, value: T) {
        let _ = self.input.send(value);
    }

    /// Cancel any pending timer and stop the worker. Idempotent; calling
    /// this after the debouncer already settled or shut down is a no-op.
    pub fn shutdown(&self) {
        self.worker.abort();
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

async fn run<T: Clone + Send + Sync + 'static>(
    quiet_period: Duration,
    mut inbox: mpsc::UnboundedReceiver<T>,
    settled: watch::Sender<Option<T>>,
) {
    let mut pending: Option<T> = None;
    let timer = tokio::time::sleep(quiet_period);
    tokio::pin!(timer);

    loop {
        tokio::select! {
            next = inbox.recv() => match next {
                Some(value) => {
                    pending = Some(value);
                    timer.as_mut().reset(Instant::now() + quiet_period);
                }
                // Sender dropped: tear down without settling the pending
                // value.
                None => break,
            },
            () = &mut timer, if pending.is_some() => {
                if settled.send(pending.take()).is_err() {
                    // Nobody is observing settled values anymore.
                    break;
                }
            }
        }
    }
}
