//! Pollkit Client - Authenticated boundary to the remote poll service
//!
//! Wraps the three service operations the client core needs:
//! - `GET /search?name=<term>` for live search
//! - `POST /create-poll` for draft submission
//! - `POST /login` for obtaining a bearer token
//!
//! Every outbound request carries an `Authorization: Bearer <token>` header
//! sourced from a [`TokenStore`]; when no token is stored the header is
//! still attached with an empty token, and an unauthenticated reply from the
//! service is the caller's recovery signal.
//!
//! [`PollService`] also implements
//! [`SearchBackend`](pollkit_query::SearchBackend), plugging the real
//! transport into the search orchestrator.

#![warn(unreachable_pub)]

pub mod error;
pub mod service;
pub mod token;

pub use error::ServiceError;
pub use service::PollService;
pub use token::{MemoryTokenStore, TokenStore};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
