// LetterLedger - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// dependency on the app layer.
//
// These types are the shared vocabulary across all layers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::util::constants::LETTER_DATE_FORMAT;

// =============================================================================
// Letter type
// =============================================================================

/// Direction of a piece of correspondence.
///
/// The register uses a fixed Malay label set for display and export
/// ("Masuk" = incoming, "Keluar" = outgoing); the variant names stay
/// English so the API reads naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterType {
    Incoming,
    Outgoing,
}

impl LetterType {
    /// Fixed report label, as it appears in the "Jenis" column.
    pub fn label(&self) -> &'static str {
        match self {
            LetterType::Incoming => "Masuk",
            LetterType::Outgoing => "Keluar",
        }
    }
}

impl std::fmt::Display for LetterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Letter record
// =============================================================================

/// Identifier issued by a [`RecordStore`](crate::core::store::RecordStore).
///
/// Monotonically increasing within a store instance; never reused, even
/// after the record it named is removed.
pub type RecordId = u64;

/// A single logged piece of correspondence.
///
/// This is the core data unit that flows through duplicate detection,
/// filtering, summary counting, and export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LetterRecord {
    /// Unique ID within the store instance. Immutable.
    pub id: RecordId,

    /// Incoming or outgoing. Immutable after creation.
    pub letter_type: LetterType,

    /// Counterparty name (agency or individual). Free text.
    pub from_to: String,

    /// Reference code. Free text; duplicate matching compares it
    /// case-insensitively.
    pub reference: String,

    /// Calendar date of the letter (not of data entry), ISO `YYYY-MM-DD`.
    ///
    /// Stored exactly as entered: duplicate matching uses string equality,
    /// while sorting and summary bucketing go through [`parsed_date`]
    /// (unparseable dates degrade, they never fail).
    ///
    /// [`parsed_date`]: LetterRecord::parsed_date
    pub date: String,

    /// Subject / summary line. Free text.
    pub subject: String,

    /// Filing reference. Free text.
    pub related_file: String,

    /// Responsible officer. Mutable post-creation; empty = unassigned.
    pub assigned_officer: String,

    /// Timestamp of record insertion. Audit/display only; no business
    /// logic depends on it.
    pub created_at: DateTime<Utc>,
}

impl LetterRecord {
    /// The letter date parsed as a calendar date, or `None` when the
    /// stored string is not valid ISO `YYYY-MM-DD`.
    ///
    /// Degradation policy for invalid dates: they sort as oldest in the
    /// date-descending view and are excluded from monthly summary buckets.
    /// Both behaviours derive from this one helper so they cannot diverge.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, LETTER_DATE_FORMAT).ok()
    }
}

// =============================================================================
// Record draft (insertion candidate)
// =============================================================================

/// An insertion candidate: everything a [`LetterRecord`] carries except
/// the store-assigned `id` and `created_at`.
///
/// All text fields are optional; [`RecordDraft::finalize`] is the single
/// place where missing fields collapse to the empty-string default, so
/// call sites never null-coalesce individually.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordDraft {
    pub letter_type: Option<LetterType>,
    pub from_to: Option<String>,
    pub reference: Option<String>,
    pub date: Option<String>,
    pub subject: Option<String>,
    pub related_file: Option<String>,
    pub assigned_officer: Option<String>,
}

impl RecordDraft {
    /// Convenience constructor for the common entry-form shape.
    pub fn new(letter_type: LetterType) -> Self {
        Self {
            letter_type: Some(letter_type),
            ..Default::default()
        }
    }

    /// Reference code as seen by duplicate matching (missing = empty).
    pub fn reference_or_empty(&self) -> &str {
        self.reference.as_deref().unwrap_or("")
    }

    /// Letter date as seen by duplicate matching (missing = empty).
    pub fn date_or_empty(&self) -> &str {
        self.date.as_deref().unwrap_or("")
    }

    /// Counterparty as seen by duplicate matching (missing = empty).
    pub fn from_to_or_empty(&self) -> &str {
        self.from_to.as_deref().unwrap_or("")
    }

    /// Build the finalized record from this draft.
    ///
    /// The fixed default table: every missing text field becomes the empty
    /// string; a missing letter type defaults to incoming (the entry form
    /// pre-selects it). `id` and `created_at` are supplied by the store.
    pub fn finalize(self, id: RecordId, created_at: DateTime<Utc>) -> LetterRecord {
        LetterRecord {
            id,
            letter_type: self.letter_type.unwrap_or(LetterType::Incoming),
            from_to: self.from_to.unwrap_or_default(),
            reference: self.reference.unwrap_or_default(),
            date: self.date.unwrap_or_default(),
            subject: self.subject.unwrap_or_default(),
            related_file: self.related_file.unwrap_or_default(),
            assigned_officer: self.assigned_officer.unwrap_or_default(),
            created_at,
        }
    }
}

// =============================================================================
// Summary statistics
// =============================================================================

/// Per-type record counts for one calendar month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SummaryStats {
    /// Records of type Incoming dated in the reference month.
    pub incoming: usize,

    /// Records of type Outgoing dated in the reference month.
    pub outgoing: usize,
}

impl SummaryStats {
    /// Total records dated in the reference month.
    pub fn total(&self) -> usize {
        self.incoming + self.outgoing
    }
}
