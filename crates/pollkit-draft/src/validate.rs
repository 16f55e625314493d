//! Validation engine for poll drafts
//!
//! Pure function from a draft (plus a sampled clock) to a set of field-level
//! violations. All rules are evaluated on every pass, so the report can hold
//! several entries at once; a draft is submittable iff the report is empty.
//!
//! "Now" is sampled exactly once per pass. Re-sampling per rule would let a
//! field pass one time-dependent check and fail another within the same
//! validation call.

use crate::draft::{PollDraft, MIN_OPTIONS};
use chrono::{DateTime, Duration, Utc};
use std::collections::btree_map;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Tolerance subtracted from "now" when checking a start time, absorbing
/// clock and network skew between form render and submission.
pub const GRACE_WINDOW_SECS: i64 = 10;

/// Minimum gap between "now" and a poll's end time.
pub const MIN_RUNTIME_SECS: i64 = 5 * 60;

/// Field identifiers for violations, in form order.
///
/// `Display` yields the wire-format field name so a presentation layer can
/// key error slots the same way the service does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DraftField {
    /// Poll name.
    Name,
    /// Poll description.
    Description,
    /// Option list.
    Options,
    /// Voting start timestamp.
    StartTime,
    /// Voting end timestamp.
    EndTime,
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Options => "options",
            Self::StartTime => "startTime",
            Self::EndTime => "endTime",
        };
        f.write_str(name)
    }
}

/// Field-scoped violations produced by one validation pass.
///
/// Absence of an entry means the field is valid. Iteration order follows
/// [`DraftField`] form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    violations: BTreeMap<DraftField, String>,
}

impl ValidationReport {
    /// Whether the draft may be submitted.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violation message for `field`, if any.
    #[must_use]
    pub fn message(&self, field: DraftField) -> Option<&str> {
        self.violations.get(&field).map(String::as_str)
    }

    /// Number of violated fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Whether the report holds no violations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Iterate violations in form order.
    pub fn iter(&self) -> impl Iterator<Item = (DraftField, &str)> {
        self.violations
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    fn record(&mut self, field: DraftField, message: &str) {
        self.violations.insert(field, message.to_string());
    }
}

impl IntoIterator for ValidationReport {
    type Item = (DraftField, String);
    type IntoIter = btree_map::IntoIter<DraftField, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

/// Validate a draft against the current wall clock.
///
/// Samples `Utc::now()` once and delegates to [`validate_at`].
#[must_use]
pub fn validate(draft: &PollDraft) -> ValidationReport {
    validate_at(draft, Utc::now())
}

/// Validate a draft against an explicit clock sample.
///
/// Deterministic and side-effect free; callable on every mutation as well as
/// on submit.
///
/// When the end time is both too soon and not after the start, the
/// after-start check runs last and its message is the one reported.
#[must_use]
pub fn validate_at(draft: &PollDraft, now: DateTime<Utc>) -> ValidationReport {
    let mut report = ValidationReport::default();

    if draft.name.trim().is_empty() {
        report.record(DraftField::Name, "Poll name is required.");
    }
    if draft.description.trim().is_empty() {
        report.record(DraftField::Description, "Description is required.");
    }

    let filled = draft.filtered_options();
    if filled.len() < MIN_OPTIONS {
        report.record(DraftField::Options, "At least two options are required.");
    } else {
        let unique: HashSet<&str> = filled.iter().map(String::as_str).collect();
        if unique.len() != filled.len() {
            report.record(DraftField::Options, "Options must be unique.");
        }
    }

    match draft.start_time {
        None => report.record(DraftField::StartTime, "Start time is required."),
        Some(start) => {
            if start < now - Duration::seconds(GRACE_WINDOW_SECS) {
                report.record(DraftField::StartTime, "Start time cannot be in the past.");
            }
        }
    }

    match draft.end_time {
        None => report.record(DraftField::EndTime, "End time is required."),
        Some(end) => {
            if end < now + Duration::seconds(MIN_RUNTIME_SECS) {
                report.record(
                    DraftField::EndTime,
                    "End time must be at least 5 minutes from now.",
                );
            }
            // Evaluated last: authoritative when both end-time checks fail.
            if let Some(start) = draft.start_time {
                if end <= start {
                    report.record(
                        DraftField::EndTime,
                        "End time must be after the start time.",
                    );
                }
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    /// A draft that passes every rule at `now()`.
    fn valid_draft() -> PollDraft {
        let mut draft = PollDraft::new();
        draft.name = "Favourite language".to_string();
        draft.description = "Pick one".to_string();
        draft.set_option(0, "Rust");
        draft.set_option(1, "Go");
        draft.start_time = Some(now() + Duration::minutes(1));
        draft.end_time = Some(now() + Duration::minutes(10));
        draft
    }

    #[test]
    fn valid_draft_has_empty_report() {
        let report = validate_at(&valid_draft(), now());
        assert!(report.is_valid());
        assert_eq!(report.len(), 0);
    }

    #[test]
    fn empty_draft_violates_every_field() {
        let report = validate_at(&PollDraft::new(), now());
        assert_eq!(report.len(), 5);
        assert_eq!(report.message(DraftField::Name), Some("Poll name is required."));
        assert_eq!(
            report.message(DraftField::Description),
            Some("Description is required.")
        );
        assert_eq!(
            report.message(DraftField::Options),
            Some("At least two options are required.")
        );
        assert_eq!(
            report.message(DraftField::StartTime),
            Some("Start time is required.")
        );
        assert_eq!(
            report.message(DraftField::EndTime),
            Some("End time is required.")
        );
    }

    #[test]
    fn whitespace_only_text_fields_are_rejected() {
        let mut draft = valid_draft();
        draft.name = "   ".to_string();
        draft.description = "\t\n".to_string();

        let report = validate_at(&draft, now());
        assert!(report.message(DraftField::Name).is_some());
        assert!(report.message(DraftField::Description).is_some());
    }

    #[test]
    fn trimmed_duplicate_options_are_rejected() {
        let mut draft = valid_draft();
        draft.options = vec!["A".to_string(), " A ".to_string(), "B".to_string()];

        let report = validate_at(&draft, now());
        assert_eq!(report.message(DraftField::Options), Some("Options must be unique."));
    }

    #[test]
    fn distinct_options_pass() {
        let mut draft = valid_draft();
        draft.options = vec!["A".to_string(), "B".to_string()];

        let report = validate_at(&draft, now());
        assert_eq!(report.message(DraftField::Options), None);
    }

    #[test]
    fn duplicate_comparison_is_case_sensitive() {
        let mut draft = valid_draft();
        draft.options = vec!["rust".to_string(), "Rust".to_string()];

        let report = validate_at(&draft, now());
        assert_eq!(report.message(DraftField::Options), None);
    }

    #[test]
    fn empty_rows_do_not_count_toward_cardinality() {
        let mut draft = valid_draft();
        draft.options = vec!["A".to_string(), "  ".to_string()];

        let report = validate_at(&draft, now());
        assert_eq!(
            report.message(DraftField::Options),
            Some("At least two options are required.")
        );
    }

    #[test]
    fn start_just_inside_grace_window_passes() {
        let mut draft = valid_draft();
        draft.start_time = Some(now() - Duration::seconds(5));

        let report = validate_at(&draft, now());
        assert_eq!(report.message(DraftField::StartTime), None);
    }

    #[test]
    fn start_outside_grace_window_fails() {
        let mut draft = valid_draft();
        draft.start_time = Some(now() - Duration::seconds(11));

        let report = validate_at(&draft, now());
        assert_eq!(
            report.message(DraftField::StartTime),
            Some("Start time cannot be in the past.")
        );
    }

    #[test]
    fn end_below_minimum_runtime_fails() {
        let mut draft = valid_draft();
        draft.start_time = Some(now());
        draft.end_time = Some(now() + Duration::minutes(4));

        let report = validate_at(&draft, now());
        assert_eq!(
            report.message(DraftField::EndTime),
            Some("End time must be at least 5 minutes from now.")
        );
    }

    #[test]
    fn end_not_after_start_fails() {
        let mut draft = valid_draft();
        draft.start_time = Some(now() + Duration::minutes(7));
        draft.end_time = Some(now() + Duration::minutes(6));

        let report = validate_at(&draft, now());
        assert_eq!(
            report.message(DraftField::EndTime),
            Some("End time must be after the start time.")
        );
    }

    #[test]
    fn after_start_message_wins_when_both_end_checks_fail() {
        let mut draft = valid_draft();
        // End is both below the 5 minute minimum and not after start.
        draft.start_time = Some(now() + Duration::minutes(3));
        draft.end_time = Some(now() + Duration::minutes(2));

        let report = validate_at(&draft, now());
        assert_eq!(
            report.message(DraftField::EndTime),
            Some("End time must be after the start time.")
        );
    }

    #[test]
    fn end_equal_to_start_is_rejected() {
        let mut draft = valid_draft();
        draft.start_time = Some(now() + Duration::minutes(10));
        draft.end_time = Some(now() + Duration::minutes(10));

        let report = validate_at(&draft, now());
        assert_eq!(
            report.message(DraftField::EndTime),
            Some("End time must be after the start time.")
        );
    }

    #[test]
    fn violations_accumulate_across_fields() {
        let mut draft = valid_draft();
        draft.name.clear();
        draft.start_time = Some(now() - Duration::minutes(1));

        let report = validate_at(&draft, now());
        assert_eq!(report.len(), 2);
        let fields: Vec<DraftField> = report.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec![DraftField::Name, DraftField::StartTime]);
    }

    #[test]
    fn field_display_matches_wire_names() {
        assert_eq!(DraftField::StartTime.to_string(), "startTime");
        assert_eq!(DraftField::Options.to_string(), "options");
    }

    proptest! {
        /// The options rule fires exactly when the filtered list is too
        /// short or contains a trimmed duplicate.
        #[test]
        fn prop_options_rule_matches_definition(
            options in proptest::collection::vec("[ a-zA-Z]{0,8}", 0..6)
        ) {
            let mut draft = valid_draft();
            draft.options = options;

            let filled = draft.filtered_options();
            let unique: HashSet<&str> = filled.iter().map(String::as_str).collect();
            let expect_violation = filled.len() < MIN_OPTIONS || unique.len() != filled.len();

            let report = validate_at(&draft, now());
            prop_assert_eq!(report.message(DraftField::Options).is_some(), expect_violation);
        }

        /// Validation terminates for arbitrary time offsets and reports
        /// emptiness exactly when every rule passes.
        #[test]
        fn prop_temporal_rules_are_total(
            start_offset in -600i64..600,
            end_offset in -600i64..600,
        ) {
            let mut draft = valid_draft();
            draft.start_time = Some(now() + Duration::seconds(start_offset));
            draft.end_time = Some(now() + Duration::seconds(end_offset));

            let report = validate_at(&draft, now());

            let start_ok = start_offset >= -GRACE_WINDOW_SECS;
            let end_ok = end_offset >= MIN_RUNTIME_SECS && end_offset > start_offset;
            prop_assert_eq!(report.message(DraftField::StartTime).is_none(), start_ok);
            prop_assert_eq!(report.message(DraftField::EndTime).is_none(), end_ok);
            prop_assert_eq!(report.is_valid(), start_ok && end_ok);
        }
    }
}
