// LetterLedger - core/query.rs
//
// Derived views over the canonical store: filtering, display ordering,
// and monthly summary counts. All functions here are pure: they read a
// record slice and compute, never mutate. The view is recomputed from
// (store snapshot, filter state) on every call so it can never diverge
// from storage.

use chrono::{Datelike, NaiveDate, Utc};
use regex::Regex;

use crate::core::model::{LetterRecord, LetterType, SummaryStats};
use crate::util::error::FilterError;

// =============================================================================
// Filter state
// =============================================================================

/// Complete filter state. All active fields are AND-combined.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Case-insensitive substring search over subject, reference, and
    /// counterparty. Empty = no filter.
    pub search: String,

    /// Restrict to one letter type. `None` = all types.
    pub letter_type: Option<LetterType>,

    /// Compiled regex search over the same three fields. `None` = off.
    pub regex_search: Option<Regex>,
}

impl RecordFilter {
    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.letter_type.is_none() && self.regex_search.is_none()
    }

    /// Set the regex search pattern, compiling it.
    /// An empty pattern clears the regex filter.
    pub fn set_regex(&mut self, pattern: &str) -> Result<(), FilterError> {
        if pattern.is_empty() {
            self.regex_search = None;
            return Ok(());
        }
        let regex = Regex::new(pattern).map_err(|e| FilterError::InvalidRegex {
            pattern: pattern.to_string(),
            source: e,
        })?;
        self.regex_search = Some(regex);
        Ok(())
    }
}

// =============================================================================
// Filtered, sorted view
// =============================================================================

/// Compute the display view: indices of records matching the filter,
/// ordered by letter date descending.
///
/// Returns indices into `records` rather than copies, so the caller can
/// resolve against the canonical store. The sort is stable; records with
/// equal dates keep their storage (newest-first) order, and records whose
/// date does not parse sort as oldest, i.e. last.
pub fn view(records: &[LetterRecord], filter: &RecordFilter) -> Vec<usize> {
    let mut indices: Vec<usize> = if filter.is_empty() {
        (0..records.len()).collect()
    } else {
        let search_lower = filter.search.to_lowercase();
        records
            .iter()
            .enumerate()
            .filter(|(_, record)| matches_all(record, filter, &search_lower))
            .map(|(idx, _)| idx)
            .collect()
    };

    indices.sort_by(|&a, &b| sort_key(&records[b]).cmp(&sort_key(&records[a])));
    indices
}

/// Date-descending sort key. `None` orders before every `Some`, which the
/// descending comparison places last — the documented home of invalid dates.
fn sort_key(record: &LetterRecord) -> Option<NaiveDate> {
    record.parsed_date()
}

/// Check if a single record matches all active filters.
fn matches_all(record: &LetterRecord, filter: &RecordFilter, search_lower: &str) -> bool {
    // Type filter
    if let Some(wanted) = filter.letter_type {
        if record.letter_type != wanted {
            return false;
        }
    }

    // Text search (case-insensitive substring across the three text keys)
    if !search_lower.is_empty() {
        let hit = record.subject.to_lowercase().contains(search_lower)
            || record.reference.to_lowercase().contains(search_lower)
            || record.from_to.to_lowercase().contains(search_lower);
        if !hit {
            return false;
        }
    }

    // Regex search over the same fields
    if let Some(ref regex) = filter.regex_search {
        let hit = regex.is_match(&record.subject)
            || regex.is_match(&record.reference)
            || regex.is_match(&record.from_to);
        if !hit {
            return false;
        }
    }

    true
}

// =============================================================================
// Monthly summary
// =============================================================================

/// Count records dated in the given month, partitioned by type.
///
/// Records whose date does not parse are excluded from every bucket.
pub fn summarize(records: &[LetterRecord], year: i32, month: u32) -> SummaryStats {
    let mut stats = SummaryStats::default();
    for record in records {
        let Some(date) = record.parsed_date() else {
            continue;
        };
        if date.year() != year || date.month() != month {
            continue;
        }
        match record.letter_type {
            LetterType::Incoming => stats.incoming += 1,
            LetterType::Outgoing => stats.outgoing += 1,
        }
    }
    stats
}

/// Summary for the current wall-clock month, evaluated at call time.
pub fn summarize_current_month(records: &[LetterRecord]) -> SummaryStats {
    let today = Utc::now().date_naive();
    summarize(records, today.year(), today.month())
}
