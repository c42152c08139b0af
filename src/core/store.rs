// LetterLedger - core/store.rs
//
// The canonical record store: an ordered, newest-first collection with
// monotonic id issuance. Display order is always computed elsewhere
// (core/query.rs); storage order is never re-sorted.

use chrono::Utc;

use crate::core::duplicate::find_duplicate;
use crate::core::model::{LetterRecord, RecordDraft, RecordId};

/// Outcome of a duplicate-gated insertion attempt.
///
/// A duplicate hit is control flow, not an error: the caller is expected to
/// surface the existing record and either drop the candidate or insert it
/// anyway via [`RecordStore::force_insert`].
#[derive(Debug, Clone)]
pub enum Insertion {
    /// The candidate was inserted; this is the finalized record.
    Inserted(LetterRecord),

    /// An existing record shares the candidate's duplicate key; the store
    /// was left untouched. Carries a snapshot of the existing record.
    DuplicateOf(LetterRecord),
}

/// In-memory store of letter records.
///
/// Records are kept in newest-first insertion order for the store's whole
/// lifetime. Ids increase monotonically and are never reused, so every id
/// the store has ever issued stays unique even across removals.
#[derive(Debug)]
pub struct RecordStore {
    records: Vec<LetterRecord>,
    next_id: RecordId,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// All records in storage (newest-first) order.
    pub fn records(&self) -> &[LetterRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by id.
    pub fn get(&self, id: RecordId) -> Option<&LetterRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Insert a candidate, gated by duplicate detection.
    ///
    /// Detection runs before every insertion through this path. On a hit the
    /// store is unchanged and the existing record is returned for the caller
    /// to present; on a miss the draft is finalized (fresh id, current
    /// timestamp, empty-string defaults) and prepended.
    pub fn insert(&mut self, draft: RecordDraft) -> Insertion {
        if let Some(existing) = find_duplicate(&self.records, &draft) {
            tracing::debug!(
                existing_id = existing.id,
                reference = %existing.reference,
                "Duplicate key hit; insertion withheld"
            );
            return Insertion::DuplicateOf(existing.clone());
        }
        Insertion::Inserted(self.commit(draft))
    }

    /// Insert a candidate with the duplicate warning explicitly overridden.
    pub fn force_insert(&mut self, draft: RecordDraft) -> LetterRecord {
        tracing::debug!("Duplicate check bypassed by explicit override");
        self.commit(draft)
    }

    /// Replace the assigned officer on one record.
    ///
    /// Unknown ids are a silent no-op; callers only hold ids obtained from
    /// this store, so a miss means the record was already removed.
    pub fn assign_officer(&mut self, id: RecordId, officer: &str) {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.assigned_officer = officer.to_string();
                tracing::info!(id, officer, "Officer assigned");
            }
            None => tracing::debug!(id, "assign_officer on unknown id; ignored"),
        }
    }

    /// Permanently remove one record. Unknown ids are a silent no-op.
    ///
    /// The user-facing confirmation step belongs to the boundary layer
    /// (see `app::state`); this is the non-undoable second phase.
    pub fn remove(&mut self, id: RecordId) {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() < before {
            tracing::info!(id, "Record removed");
        } else {
            tracing::debug!(id, "remove on unknown id; ignored");
        }
    }

    /// Finalize and prepend. The single point where ids are issued.
    fn commit(&mut self, draft: RecordDraft) -> LetterRecord {
        let id = self.next_id;
        self.next_id += 1;

        let record = draft.finalize(id, Utc::now());
        self.records.insert(0, record.clone());
        tracing::info!(
            id,
            reference = %record.reference,
            letter_type = %record.letter_type,
            "Record inserted"
        );
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::LetterType;

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
    fn insert_prepends_newest_first() {
        let mut store = RecordStore::new();
        store.insert(draft("REF-1", "2024-03-01", "Agency X"));
        store.insert(draft("REF-2", "2024-03-02", "Agency Y"));

        assert_eq!(store.records()[0].reference, "REF-2");
        assert_eq!(store.records()[1].reference, "REF-1");
    }

    #[test]
    fn ids_are_unique_across_removals() {
        let mut store = RecordStore::new();
        let mut issued = Vec::new();
        for i in 0..5 {
            match store.insert(draft(&format!("REF-{i}"), "2024-03-01", "Agency X")) {
                Insertion::Inserted(r) => issued.push(r.id),
                Insertion::DuplicateOf(_) => panic!("unexpected duplicate"),
            }
        }
        store.remove(issued[0]);
        if let Insertion::Inserted(r) = store.insert(draft("REF-9", "2024-03-09", "Agency Z")) {
            issued.push(r.id);
        }

        let mut deduped = issued.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), issued.len(), "ids must never repeat");
    }

    #[test]
    fn duplicate_key_withholds_insert_until_forced() {
        let mut store = RecordStore::new();
        store.insert(draft("REF-1", "2024-03-01", "Agency X"));

        let second = draft("ref-1", "2024-03-01", "agency x");
        match store.insert(second.clone()) {
            Insertion::DuplicateOf(existing) => assert_eq!(existing.reference, "REF-1"),
            Insertion::Inserted(_) => panic!("duplicate should have been flagged"),
        }
        assert_eq!(store.len(), 1);

        store.force_insert(second);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn assign_officer_touches_only_the_target_field() {
        let mut store = RecordStore::new();
        let mut d = draft("REF-1", "2024-03-01", "Agency X");
        d.subject = Some("Permohonan Berlabuh".to_string());
        let record = match store.insert(d) {
            Insertion::Inserted(r) => r,
            Insertion::DuplicateOf(_) => unreachable!(),
        };

        store.assign_officer(record.id, "En. Ahmad Fauzi");
        let updated = store.get(record.id).unwrap();
        assert_eq!(updated.assigned_officer, "En. Ahmad Fauzi");
        assert_eq!(updated.subject, "Permohonan Berlabuh");
        assert_eq!(updated.created_at, record.created_at);
    }

    #[test]
    fn unknown_ids_are_silent_noops() {
        let mut store = RecordStore::new();
        store.insert(draft("REF-1", "2024-03-01", "Agency X"));

        store.assign_officer(999, "Nobody");
        store.remove(999);
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].assigned_officer, "");
    }
}
