//! Error taxonomy for the service boundary
//!
//! - Transport errors: network unreachable, aborted, TLS failures
//! - Service-reported errors: non-2xx with a structured message body
//! - Protocol violations: success status but a missing expected field
//!
//! All of these are caught at the pipeline boundary and converted to
//! user-facing state; none propagate as unhandled faults.

/// Failure talking to the remote poll service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The request never produced a usable response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status. The message is the
    /// body's `message` field when present, otherwise a generic fallback.
    #[error("{message}")]
    Service {
        /// HTTP status code.
        status: u16,
        /// User-facing message.
        message: String,
    },

    /// The service answered with a success status but the body violated the
    /// expected shape (for example, a login response without a token).
    #[error("malformed response: {0}")]
    Protocol(String),
}

impl ServiceError {
    /// HTTP status of a service-reported error, if this is one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            Self::Protocol(_) => None,
        }
    }

    /// Whether the service rejected the bearer token. Callers treat this as
    /// the signal to re-authenticate, since the header is attached even when
    /// no token is stored.
    #[inline]
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}
