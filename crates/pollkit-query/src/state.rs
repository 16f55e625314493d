//! Query session state machine
//!
//! Pure transition logic over one search session's lifecycle. The session
//! loop in [`crate::session`] drives this machine and performs the actual
//! spawning and aborting; keeping the transitions synchronous makes the
//! ordering rules directly testable.
//!
//! Staleness is enforced by a monotonically increasing sequence number: a
//! completion is applied only when its tag equals the current sequence.
//! This is the sole "last request wins" mechanism, so it must reject *any*
//! non-current tag, not merely tags older than the most recently observed
//! completion.

use crate::backend::SearchBackendError;

/// Lifecycle of one search session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// Settled term is empty; no network activity.
    Idle,
    /// Raw input is changing; the quiet period has not elapsed.
    Debouncing,
    /// A request for the current settled term is outstanding.
    Fetching,
    /// The most recent request returned successfully.
    Resolved,
    /// The most recent request failed; the next settled term is the only
    /// recovery path.
    Failed,
}

/// Presentation-facing view of a session: `{status, data, error}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySnapshot {
    /// Current lifecycle status.
    pub status: QueryStatus,
    /// Result list for the highest-sequence resolved request.
    pub results: Vec<String>,
    /// Failure message, present only in `Failed`.
    pub error: Option<String>,
}

impl QuerySnapshot {
    /// Snapshot of a session with no settled term.
    #[must_use]
    pub fn idle() -> Self {
        Self {
            status: QueryStatus::Idle,
            results: Vec::new(),
            error: None,
        }
    }
}

impl Default for QuerySnapshot {
    fn default() -> Self {
        Self::idle()
    }
}

/// What the session loop must do after a settled-term transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettleOutcome {
    /// Cancel any outstanding request, then issue a request for `term`
    /// tagged with `seq`.
    Dispatch {
        /// Tag for the new request.
        seq: u64,
        /// Term to query.
        term: String,
    },
    /// Settled term became empty: cancel any outstanding request, publish
    /// the cleared snapshot.
    Reset,
    /// Settled term matches the current one; nothing to dispatch.
    Unchanged,
}

/// Whether a completion was applied or discarded as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The completion matched the current sequence and updated the snapshot.
    Applied,
    /// The completion carried a superseded tag and was silently discarded.
    Stale,
}

/// State for one search session.
#[derive(Debug, Clone)]
pub struct QueryState {
    term: String,
    seq: u64,
    debouncing: bool,
    settled_status: QueryStatus,
    results: Vec<String>,
    error: Option<String>,
}

impl QueryState {
    /// Fresh session: idle, empty term, no results.
    #[must_use]
    pub fn new() -> Self {
        Self {
            term: String::new(),
            seq: 0,
            debouncing: false,
            settled_status: QueryStatus::Idle,
            results: Vec::new(),
            error: None,
        }
    }

    /// Current sequence number.
    #[inline]
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.seq
    }

    /// Current settled term.
    #[inline]
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Presentation-facing snapshot of the current state.
    ///
    /// While raw input is changing, the status reads `Debouncing` but the
    /// previously surfaced results stay visible.
    #[must_use]
    pub fn snapshot(&self) -> QuerySnapshot {
        QuerySnapshot {
            status: if self.debouncing {
                QueryStatus::Debouncing
            } else {
                self.settled_status
            },
            results: self.results.clone(),
            error: self.error.clone(),
        }
    }

    /// Raw input changed; the quiet period is running.
    pub fn on_typing(&mut self) {
        self.debouncing = true;
    }

    /// A settled term arrived from the debouncer.
    ///
    /// Every term change bumps the sequence number, so completions for the
    /// superseded request can never be applied even if the transport ignores
    /// the cancellation signal.
    pub fn on_settled(&mut self, term: impl Into<String>) -> SettleOutcome {
        let term = term.into();
        self.debouncing = false;

        if term == self.term {
            return SettleOutcome::Unchanged;
        }
        self.term = term;
        self.seq += 1;

        if self.term.is_empty() {
            self.settled_status = QueryStatus::Idle;
            self.results.clear();
            self.error = None;
            return SettleOutcome::Reset;
        }

        self.settled_status = QueryStatus::Fetching;
        self.results.clear();
        self.error = None;
        SettleOutcome::Dispatch {
            seq: self.seq,
            term: self.term.clone(),
        }
    }

    /// A request completed with the given tag.
    ///
    /// Applied only when `seq` equals the current sequence; anything else is
    /// a superseded request whose cancellation was not (or not yet)
    /// honored, and is discarded without touching the snapshot.
    pub fn on_completion(
        &mut self,
        seq: u64,
        result: Result<Vec<String>, SearchBackendError>,
    ) -> CompletionOutcome {
        if seq != self.seq {
            return CompletionOutcome::Stale;
        }

        match result {
            Ok(results) => {
                self.settled_status = QueryStatus::Resolved;
                self.results = results;
                self.error = None;
            }
            Err(err) => {
                self.settled_status = QueryStatus::Failed;
                self.results.clear();
                self.error = Some(err.message().to_string());
            }
        }
        CompletionOutcome::Applied
    }
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new()
    }
}
