//! Pollkit Query - Debounced, cancellation-safe search orchestration
//!
//! Drives the live search-as-you-type experience:
//! - [`Debouncer`] collapses a rapid stream of raw input into a single
//!   settled value after a quiet period
//! - [`SearchSession`] issues at most one request per settled value and
//!   guarantees that only the response to the most recent request is ever
//!   surfaced, even when the transport completes out of order
//! - [`SearchPipeline`] wires the two together behind a keystroke-shaped API
//!
//! The presentation-facing output is a [`QuerySnapshot`] published through a
//! `watch` channel on every transition; it never exposes partial or stale
//! data.
//!
//! # Example
//!
//! ```rust,ignore
//! use pollkit_query::{SearchPipeline, DEFAULT_QUIET_PERIOD};
//!
//! let pipeline = SearchPipeline::new(DEFAULT_QUIET_PERIOD, backend);
//! let mut snapshots = pipeline.watch();
//!
//! pipeline.input("p");
//! pipeline.input("po");
//! pipeline.input("poll");
//! // One request is dispatched for "poll" once the input settles.
//! ```

#![warn(unreachable_pub)]

pub mod backend;
pub mod debounce;
pub mod pipeline;
pub mod session;
pub mod state;

pub use backend::{SearchBackend, SearchBackendError};
pub use debounce::{Debouncer, DEFAULT_QUIET_PERIOD};
pub use pipeline::SearchPipeline;
pub use session::{SearchHandle, SearchSession};
pub use state::{CompletionOutcome, QuerySnapshot, QueryState, QueryStatus, SettleOutcome};
