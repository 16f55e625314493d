//! Poll draft model
//!
//! A draft starts empty, is mutated field-by-field as the user edits the
//! form, and is destroyed on successful submission or navigation away.
//! The option list keeps a floor of two entries because a poll with fewer
//! choices is never submittable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimum number of options a poll must offer.
pub const MIN_OPTIONS: usize = 2;

/// In-progress authoring state for a new poll.
///
/// Fields are public so a form layer can bind to them directly; the helper
/// methods cover the option-list edits that carry invariants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollDraft {
    /// Poll name as typed.
    pub name: String,
    /// Poll description as typed.
    pub description: String,
    /// Ordered option texts, including still-empty rows.
    pub options: Vec<String>,
    /// When voting opens, if the user has picked it yet.
    pub start_time: Option<DateTime<Utc>>,
    /// When voting closes, if the user has picked it yet.
    pub end_time: Option<DateTime<Utc>>,
}

impl PollDraft {
    /// Create an empty draft with the two blank option rows the form
    /// starts with.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: vec![String::new(), String::new()],
            ..Self::default()
        }
    }

    /// Append a new option row.
    pub fn add_option(&mut self, text: impl Into<String>) {
        self.options.push(text.into());
    }

    /// Replace the option at `index` in place. Out-of-range indices are
    /// ignored.
    pub fn set_option(&mut self, index: usize, text: impl Into<String>) {
        if let Some(slot) = self.options.get_mut(index) {
            *slot = text.into();
        }
    }

    /// Remove the option at `index`.
    ///
    /// Removal below [`MIN_OPTIONS`] rows is a no-op, mirroring the form's
    /// disabled delete button. Returns whether anything was removed.
    pub fn remove_option(&mut self, index: usize) -> bool {
        if self.options.len() <= MIN_OPTIONS || index >= self.options.len() {
            return false;
        }
        self.options.remove(index);
        true
    }

    /// Options that would actually be submitted: trimmed, with empty rows
    /// discarded.
    #[must_use]
    pub fn filtered_options(&self) -> Vec<String> {
        self.options
            .iter()
            .map(|opt| opt.trim())
            .filter(|opt| !opt.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Build the wire form of this draft.
    ///
    /// Returns `None` while either timestamp is missing; it does not re-run
    /// the other validation rules, so callers should check
    /// [`validate`](crate::validate::validate) first.
    #[must_use]
    pub fn submission(&self) -> Option<PollSubmission> {
        Some(PollSubmission {
            name: self.name.trim().to_owned(),
            description: self.description.trim().to_owned(),
            start_time: self.start_time?,
            end_time: self.end_time?,
            options: self.filtered_options(),
        })
    }
}

/// Wire form of a completed draft, as posted to the remote poll service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollSubmission {
    /// Poll name, trimmed.
    pub name: String,
    /// Poll description, trimmed.
    pub description: String,
    /// When voting opens.
    pub start_time: DateTime<Utc>,
    /// When voting closes.
    pub end_time: DateTime<Utc>,
    /// Trimmed, non-empty options only.
    pub options: Vec<String>,
}
