// LetterLedger - core/duplicate.rs
//
// Duplicate submission detection.
// Core layer: pure read-only scan, no side effects.

use crate::core::model::{LetterRecord, RecordDraft};

/// Find the first existing record that matches the candidate's duplicate key.
///
/// The duplicate key is the `(reference, date, from_to)` triple: reference
/// and counterparty compared case-insensitively, the letter date by exact
/// string equality on the ISO form. The scan runs in store order, which is
/// newest-first, so the most recently entered collision is the one reported.
///
/// The key is deliberately narrow. Office logs commonly receive the same
/// letter entered twice by different clerks; exact reference + date +
/// counterparty collisions catch that without near-match heuristics that
/// would block legitimate entries over typos.
pub fn find_duplicate<'a>(
    records: &'a [LetterRecord],
    candidate: &RecordDraft,
) -> Option<&'a LetterRecord> {
    let reference = candidate.reference_or_empty().to_lowercase();
    let from_to = candidate.from_to_or_empty().to_lowercase();
    let date = candidate.date_or_empty();

    records.iter().find(|r| {
        r.reference.to_lowercase() == reference
            && r.date == date
            && r.from_to.to_lowercase() == from_to
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::LetterType;
    use chrono::Utc;

    fn record(id: u64, reference: &str, date: &str, from_to: &str) -> LetterRecord {
        LetterRecord {
            id,
            letter_type: LetterType::Incoming,
            from_to: from_to.to_string(),
            reference: reference.to_string(),
            date: date.to_string(),
            subject: String::new(),
            related_file: String::new(),
            assigned_officer: String::new(),
            created_at: Utc::now(),
        }
    }

    fn draft(reference: &str, date: &str, from_to: &str) -> RecordDraft {
        RecordDraft {
            letter_type: Some(LetterType::Incoming),
            from_to: Some(from_to.to_string()),
            reference: Some(reference.to_string()),
            date: Some(date.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn matches_regardless_of_case() {
        let records = vec![record(1, "REF-1", "2024-03-01", "Agency X")];
        let hit = find_duplicate(&records, &draft("ref-1", "2024-03-01", "AGENCY x"));
        assert_eq!(hit.map(|r| r.id), Some(1));
    }

    #[test]
    fn date_must_match_exactly() {
        let records = vec![record(1, "REF-1", "2024-03-01", "Agency X")];
        assert!(find_duplicate(&records, &draft("REF-1", "2024-03-02", "Agency X")).is_none());
    }

    #[test]
    fn first_match_in_store_order_wins() {
        // Newest-first store order: id 2 was entered after id 1.
        let records = vec![
            record(2, "REF-1", "2024-03-01", "Agency X"),
            record(1, "REF-1", "2024-03-01", "Agency X"),
        ];
        let hit = find_duplicate(&records, &draft("REF-1", "2024-03-01", "Agency X"));
        assert_eq!(hit.map(|r| r.id), Some(2));
    }

    #[test]
    fn different_counterparty_is_not_a_duplicate() {
        let records = vec![record(1, "REF-1", "2024-03-01", "Agency X")];
        assert!(find_duplicate(&records, &draft("REF-1", "2024-03-01", "Agency Y")).is_none());
    }

    #[test]
    fn empty_store_has_no_duplicates() {
        assert!(find_duplicate(&[], &draft("REF-1", "2024-03-01", "Agency X")).is_none());
    }
}
