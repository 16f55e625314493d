//! Pollkit Draft - Poll authoring model and validation engine
//!
//! Holds the in-progress representation of a new poll and the rules that
//! decide whether it may be submitted:
//! - Structural rules (required text, option cardinality, uniqueness)
//! - Temporal rules (start not in the past, minimum runtime, ordering)
//!
//! Validation is a pure function over a draft and a sampled clock, so it can
//! run on every mutation as well as on submit.
//!
//! # Example
//!
//! ```rust
//! use pollkit_draft::{PollDraft, validate};
//!
//! let mut draft = PollDraft::new();
//! draft.name = "Favourite language".to_string();
//! let report = validate(&draft);
//! assert!(!report.is_valid()); // description, options and times still missing
//! ```

#![warn(unreachable_pub)]

pub mod draft;
pub mod validate;

pub use draft::{PollDraft, PollSubmission, MIN_OPTIONS};
pub use validate::{
    validate, validate_at, DraftField, ValidationReport, GRACE_WINDOW_SECS, MIN_RUNTIME_SECS,
};
