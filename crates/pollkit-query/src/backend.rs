//! Search backend boundary
//!
//! The orchestrator talks to the remote poll service through this trait so
//! the state machine and session loop stay independent of any transport.

/// Failure reported by a search backend.
///
/// Transport-level errors and service-reported logical errors both surface
/// through this single type; the orchestrator treats them identically
/// (transition to `Failed` with the message, no retry).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SearchBackendError {
    message: String,
}

impl SearchBackendError {
    /// Wrap a displayable failure message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The user-facing failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for SearchBackendError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for SearchBackendError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// A source of live search results.
///
/// Implementations may be cancelled mid-flight (the driving task is
/// aborted); they must tolerate that, and the orchestrator additionally
/// discards any late completion by sequence tag, so correctness never
/// depends on the cancellation being honored.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SearchBackend: Send + Sync + 'static {
    /// Fetch the poll names matching `term`.
    async fn search(&self, term: &str) -> Result<Vec<String>, SearchBackendError>;
}
