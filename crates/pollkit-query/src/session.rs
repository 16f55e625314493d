//! Search session orchestration
//!
//! Runs the [`QueryState`](crate::state::QueryState) machine on its own
//! task. Settled terms come in through a [`SearchHandle`]; each dispatch
//! spawns one tagged fetch against the [`SearchBackend`], and a superseded
//! fetch is asked to abort. Abortion is best-effort signaling only: the
//! sequence-number check in the state machine discards late completions
//! regardless of whether the old request actually stopped.
//!
//! All work happens as reactions to discrete events on one logical queue;
//! fetch tasks never touch session state, they only send `(seq, result)`
//! back.

use crate::backend::{SearchBackend, SearchBackendError};
use crate::state::{CompletionOutcome, QuerySnapshot, QueryState, SettleOutcome};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::AbortHandle;
use tracing::{debug, trace};

/// Control events fed into a session by its handles.
#[derive(Debug)]
enum SessionEvent {
    /// Raw input changed; show `Debouncing` until the next settle.
    Typing,
    /// A value settled after the quiet period.
    Settled(String),
}

type Completion = (u64, Result<Vec<String>, SearchBackendError>);

/// Owner of one search session task.
///
/// Purely a namespace for [`spawn`](Self::spawn); the session lives as long
/// as any [`SearchHandle`] does and tears itself down (aborting anything in
/// flight) when the last handle is dropped.
#[derive(Debug, Clone, Copy)]
pub struct SearchSession;

impl SearchSession {
    /// Spawn a session over `backend` and return its handle.
    pub fn spawn<B: SearchBackend>(backend: B) -> SearchHandle {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(QuerySnapshot::idle());
        tokio::spawn(run(Arc::new(backend), events_rx, snapshot_tx));
        SearchHandle {
            events: events_tx,
            snapshot: snapshot_rx,
        }
    }
}

/// Cheaply cloneable handle feeding a search session.
#[derive(Debug, Clone)]
pub struct SearchHandle {
    events: mpsc::UnboundedSender<SessionEvent>,
    snapshot: watch::Receiver<QuerySnapshot>,
}

impl SearchHandle {
    /// Signal that raw input changed (quiet period restarted).
    pub fn typing(&self) {
        let _ = self.events.send(SessionEvent::Typing);
    }

    /// Feed a settled term into the session. An empty term resets the
    /// session to idle.
    pub fn settle(&self, term: impl Into<String>) {
        let _ = self.events.send(SessionEvent::Settled(term.into()));
    }

    /// Subscribe to snapshot updates.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<QuerySnapshot> {
        self.snapshot.clone()
    }

    /// Current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> QuerySnapshot {
        self.snapshot.borrow().clone()
    }
}

async fn run<B: SearchBackend>(
    backend: Arc<B>,
    mut events: mpsc::UnboundedReceiver<SessionEvent>,
    snapshot_tx: watch::Sender<QuerySnapshot>,
) {
    let mut state = QueryState::new();
    let mut inflight: Option<AbortHandle> = None;
    let (completions_tx, mut completions) = mpsc::unbounded_channel::<Completion>();

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                match event {
                    SessionEvent::Typing => {
                        state.on_typing();
                    }
                    SessionEvent::Settled(term) => match state.on_settled(term) {
                        SettleOutcome::Dispatch { seq, term } => {
                            abort_inflight(&mut inflight);
                            debug!(seq, %term, "dispatching search");
                            let backend = Arc::clone(&backend);
                            let completions_tx = completions_tx.clone();
                            let task = tokio::spawn(async move {
                                let result = backend.search(&term).await;
                                let _ = completions_tx.send((seq, result));
                            });
                            inflight = Some(task.abort_handle());
                        }
                        SettleOutcome::Reset => {
                            debug!("settled term emptied, resetting session");
                            abort_inflight(&mut inflight);
                        }
                        SettleOutcome::Unchanged => {}
                    },
                }
                let _ = snapshot_tx.send(state.snapshot());
            }
            Some((seq, result)) = completions.recv() => {
                match state.on_completion(seq, result) {
                    CompletionOutcome::Applied => {
                        inflight = None;
                        let _ = snapshot_tx.send(state.snapshot());
                    }
                    CompletionOutcome::Stale => {
                        trace!(seq, current = state.sequence(), "discarding stale completion");
                    }
                }
            }
        }
    }

    // Last handle dropped: release the in-flight request so nothing keeps
    // running after teardown.
    abort_inflight(&mut inflight);
}

/// Best-effort cancellation of the outstanding fetch. Aborting a task that
/// already finished (or was aborted before) is a no-op.
fn abort_inflight(inflight: &mut Option<AbortHandle>) {
    if let Some(handle) = inflight.take() {
        handle.abort();
    }
}
