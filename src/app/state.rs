// LetterLedger - app/state.rs
//
// Registry state management. Holds the canonical store, the current
// filter, the recomputed display view, and the pending-confirmation
// state for the two flows that need an explicit second step:
//
//   - duplicate override: `submit` parks the draft when the duplicate
//     key hits; `confirm_pending_insert` is the explicit override.
//   - destructive removal: `request_removal` records intent;
//     `confirm_removal` commits the store's single-step removal.
//
// Keeping both phases as separate calls leaves the core trivially
// testable without simulating user prompts.

use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::core::export;
use crate::core::model::{LetterRecord, LetterType, RecordDraft, RecordId, SummaryStats};
use crate::core::query::{self, RecordFilter};
use crate::core::store::{Insertion, RecordStore};
use crate::util::error::{ExportError, Result};

/// Outcome of submitting an entry-form draft.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// No duplicate key hit; the record is in the store.
    Saved(LetterRecord),

    /// The duplicate key hit `existing`; the draft is parked and the
    /// store is unchanged until the caller confirms or discards.
    DuplicateFlagged { existing: LetterRecord },
}

/// A draft withheld by duplicate detection, awaiting confirm-or-discard.
#[derive(Debug, Clone)]
pub struct PendingInsert {
    pub draft: RecordDraft,
    pub existing_id: RecordId,
}

/// Top-level registry state.
#[derive(Debug, Default)]
pub struct RegistryState {
    store: RecordStore,
    filter: RecordFilter,

    /// Indices into `store.records()` matching the current filter, in
    /// display (date-descending) order. Recomputed after every mutation
    /// and filter change; never stored sorted in the store itself.
    visible: Vec<usize>,

    pending_insert: Option<PendingInsert>,
    pending_removal: Option<RecordId>,
}

impl RegistryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the canonical store.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn filter(&self) -> &RecordFilter {
        &self.filter
    }

    // -------------------------------------------------------------------
    // Entry form: duplicate-gated insertion
    // -------------------------------------------------------------------

    /// Submit a draft from the entry form.
    ///
    /// Runs duplicate detection via the store's gated insert. On a hit the
    /// draft is parked as [`PendingInsert`] so the presentation layer can
    /// show the existing record and ask the clerk to confirm or discard.
    pub fn submit(&mut self, draft: RecordDraft) -> SubmitOutcome {
        match self.store.insert(draft.clone()) {
            Insertion::Inserted(record) => {
                self.refresh_view();
                SubmitOutcome::Saved(record)
            }
            Insertion::DuplicateOf(existing) => {
                self.pending_insert = Some(PendingInsert {
                    draft,
                    existing_id: existing.id,
                });
                SubmitOutcome::DuplicateFlagged { existing }
            }
        }
    }

    /// The draft currently withheld by duplicate detection, if any.
    pub fn pending_insert(&self) -> Option<&PendingInsert> {
        self.pending_insert.as_ref()
    }

    /// Explicitly override the duplicate warning and insert the parked
    /// draft. Returns the finalized record, or `None` when nothing was
    /// pending.
    pub fn confirm_pending_insert(&mut self) -> Option<LetterRecord> {
        let pending = self.pending_insert.take()?;
        let record = self.store.force_insert(pending.draft);
        self.refresh_view();
        Some(record)
    }

    /// Drop the parked draft without inserting it.
    pub fn discard_pending_insert(&mut self) {
        if self.pending_insert.take().is_some() {
            tracing::debug!("Pending insert discarded");
        }
    }

    // -------------------------------------------------------------------
    // Officer assignment
    // -------------------------------------------------------------------

    /// Replace the assigned officer on one record (silent no-op on an
    /// unknown id).
    pub fn assign_officer(&mut self, id: RecordId, officer: &str) {
        self.store.assign_officer(id, officer);
        self.refresh_view();
    }

    // -------------------------------------------------------------------
    // Removal: two-phase (intent, then commit)
    // -------------------------------------------------------------------

    /// Phase 1: record the intent to remove. The presentation layer shows
    /// its confirmation prompt while this is set.
    pub fn request_removal(&mut self, id: RecordId) {
        self.pending_removal = Some(id);
    }

    pub fn pending_removal(&self) -> Option<RecordId> {
        self.pending_removal
    }

    /// Phase 2: commit the removal. Returns true when an intent existed
    /// (whether or not the id was still present — the store tolerates
    /// unknown ids as a no-op).
    pub fn confirm_removal(&mut self) -> bool {
        match self.pending_removal.take() {
            Some(id) => {
                self.store.remove(id);
                self.refresh_view();
                true
            }
            None => false,
        }
    }

    /// Abandon the removal intent.
    pub fn cancel_removal(&mut self) {
        self.pending_removal = None;
    }

    // -------------------------------------------------------------------
    // Filtering and derived views
    // -------------------------------------------------------------------

    pub fn set_search(&mut self, term: &str) {
        self.filter.search = term.to_string();
        self.refresh_view();
    }

    /// `None` shows all types.
    pub fn set_type_filter(&mut self, letter_type: Option<LetterType>) {
        self.filter.letter_type = letter_type;
        self.refresh_view();
    }

    /// Set or clear (empty pattern) the regex search.
    ///
    /// This layer is the crate's consumer-facing surface, so subsystem
    /// errors come back through the aggregated [`LedgerError`] chain.
    ///
    /// [`LedgerError`]: crate::util::error::LedgerError
    pub fn set_regex(&mut self, pattern: &str) -> Result<()> {
        self.filter.set_regex(pattern)?;
        self.refresh_view();
        Ok(())
    }

    /// Indices of the current display view, into `store().records()`.
    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    /// The current display view resolved to records, in display order.
    pub fn visible_records(&self) -> Vec<&LetterRecord> {
        let records = self.store.records();
        self.visible.iter().map(|&idx| &records[idx]).collect()
    }

    /// Per-type counts for the current wall-clock month, evaluated now.
    pub fn summary(&self) -> SummaryStats {
        query::summarize_current_month(self.store.records())
    }

    fn refresh_view(&mut self) {
        self.visible = query::view(self.store.records(), &self.filter);
    }

    // -------------------------------------------------------------------
    // Report export
    // -------------------------------------------------------------------

    /// Export the current view as the CSV report artifact in `dir`.
    ///
    /// An empty view is a skip, not an error: no file is produced and
    /// `Ok(None)` is returned. Otherwise the report is written to a
    /// temporary file beside the target and renamed into place, so a
    /// failed export never leaves a partial artifact behind.
    pub fn export_report(&self, dir: &Path) -> Result<Option<PathBuf>> {
        let records = self.visible_records();
        if records.is_empty() {
            tracing::debug!("Report export skipped: view is empty");
            return Ok(None);
        }

        let filename = export::report_filename(Utc::now().date_naive());
        let final_path = dir.join(&filename);
        let tmp_path = dir.join(format!("{filename}.tmp"));

        let file = File::create(&tmp_path).map_err(|e| ExportError::Io { source: e })?;
        let written = export::write_report(&records, BufWriter::new(file));

        match written.and_then(|count| {
            fs::rename(&tmp_path, &final_path)
                .map(|()| count)
                .map_err(|e| ExportError::Io { source: e })
        }) {
            Ok(count) => {
                tracing::info!(
                    records = count,
                    path = %final_path.display(),
                    "Report exported"
                );
                Ok(Some(final_path))
            }
            Err(e) => {
                // Paired release: a failed export must not leave the
                // transient artifact behind.
                let _ = fs::remove_file(&tmp_path);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn duplicate_flag_parks_the_draft_until_confirmed() {
        let mut state = RegistryState::new();
        state.submit(draft("REF-1", "2024-03-01", "Agency X"));

        match state.submit(draft("REF-1", "2024-03-01", "Agency X")) {
            SubmitOutcome::DuplicateFlagged { existing } => {
                assert_eq!(existing.reference, "REF-1")
            }
            SubmitOutcome::Saved(_) => panic!("expected a duplicate flag"),
        }
        assert_eq!(state.store().len(), 1);
        assert!(state.pending_insert().is_some());

        let forced = state.confirm_pending_insert().expect("pending draft");
        assert_eq!(forced.reference, "REF-1");
        assert_eq!(state.store().len(), 2);
        assert!(state.pending_insert().is_none());
    }

    #[test]
    fn discarding_a_pending_insert_leaves_the_store_unchanged() {
        let mut state = RegistryState::new();
        state.submit(draft("REF-1", "2024-03-01", "Agency X"));
        state.submit(draft("REF-1", "2024-03-01", "Agency X"));

        state.discard_pending_insert();
        assert_eq!(state.store().len(), 1);
        assert!(state.confirm_pending_insert().is_none());
    }

    #[test]
    fn removal_commits_only_after_confirmation() {
        let mut state = RegistryState::new();
        let id = match state.submit(draft("REF-1", "2024-03-01", "Agency X")) {
            SubmitOutcome::Saved(r) => r.id,
            SubmitOutcome::DuplicateFlagged { .. } => unreachable!(),
        };

        state.request_removal(id);
        assert_eq!(state.store().len(), 1, "intent alone must not remove");

        state.cancel_removal();
        assert!(!state.confirm_removal(), "cancelled intent cannot commit");
        assert_eq!(state.store().len(), 1);

        state.request_removal(id);
        assert!(state.confirm_removal());
        assert_eq!(state.store().len(), 0);
    }

    #[test]
    fn view_tracks_mutations_and_filter_changes() {
        let mut state = RegistryState::new();
        state.submit(draft("REF-1", "2024-03-01", "Agency X"));
        state.submit(draft("REF-2", "2024-03-05", "Agency Y"));
        assert_eq!(state.visible().len(), 2);

        state.set_search("agency y");
        let visible = state.visible_records();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].reference, "REF-2");

        state.set_search("");
        state.set_type_filter(Some(LetterType::Outgoing));
        assert!(state.visible_records().is_empty());
    }

    #[test]
    fn export_of_empty_view_is_skipped() {
        let state = RegistryState::new();
        let dir = tempfile::tempdir().unwrap();
        let result = state.export_report(dir.path()).unwrap();
        assert!(result.is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0, "no file produced");
    }

    #[test]
    fn subsystem_errors_surface_through_the_aggregated_chain() {
        use crate::util::error::LedgerError;

        let mut state = RegistryState::new();
        match state.set_regex("[unclosed") {
            Err(LedgerError::Filter(_)) => {}
            other => panic!("expected a filter error, got {other:?}"),
        }

        state.submit(draft("REF-1", "2024-03-01", "Agency X"));
        let missing = Path::new("/letterledger-no-such-dir/reports");
        let err = state.export_report(missing).unwrap_err();
        match &err {
            LedgerError::Export(ExportError::Io { .. }) => {}
            other => panic!("expected an export I/O error, got {other:?}"),
        }
        assert!(
            std::error::Error::source(&err).is_some(),
            "the causal chain must be preserved"
        );
    }

    #[test]
    fn export_writes_the_contract_filename_with_no_leftover_temp() {
        let mut state = RegistryState::new();
        state.submit(draft("REF-1", "2024-03-01", "Agency X"));

        let dir = tempfile::tempdir().unwrap();
        let path = state.export_report(dir.path()).unwrap().expect("artifact");

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("Laporan_Surat_PPKK_"));
        assert!(name.ends_with(".csv"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Bil,Jenis,"));
        assert!(content.contains("\"REF-1\""));
    }
}
