//! Keystroke-to-results pipeline
//!
//! Wires a [`Debouncer`] into a [`SearchSession`]: raw text goes in on
//! every keystroke, a snapshot stream comes out. Dropping the pipeline
//! tears down the timer, the forwarder and the session's in-flight request.

use crate::backend::SearchBackend;
use crate::debounce::Debouncer;
use crate::session::{SearchHandle, SearchSession};
use crate::state::QuerySnapshot;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Debounced live search over a backend.
#[derive(Debug)]
pub struct SearchPipeline {
    debouncer: Debouncer<String>,
    handle: SearchHandle,
    forwarder: JoinHandle<()>,
}

impl SearchPipeline {
    /// Build a pipeline with the given quiet period.
    #[must_use]
    pub fn new<B: SearchBackend>(quiet_period: Duration, backend: B) -> Self {
        let (debouncer, mut settled) = Debouncer::new(quiet_period);
        let handle = SearchSession::spawn(backend);

        let session = handle.clone();
        let forwarder = tokio::spawn(async move {
            while settled.changed().await.is_ok() {
                let term = settled.borrow_and_update().clone();
                if let Some(term) = term {
                    session.settle(term);
                }
            }
        });

        Self {
            debouncer,
            handle,
            forwarder,
        }
    }

    /// Feed the raw query text on every keystroke.
    pub fn input(&self, text: impl Into<String>) {
        self.handle.typing();
        self.debouncer.update(text.into());
    }

    /// Subscribe to snapshot updates.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<QuerySnapshot> {
        self.handle.watch()
    }

    /// Current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> QuerySnapshot {
        self.handle.snapshot()
    }

    /// Tear the pipeline down: pending timer and in-flight request are
    /// released, nothing fires afterwards. Idempotent.
    pub fn shutdown(&self) {
        self.debouncer.shutdown();
        self.forwarder.abort();
    }
}

impl Drop for SearchPipeline {
    fn drop(&mut self) {
        self.shutdown();
    }
}
