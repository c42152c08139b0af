// LetterLedger - app/mod.rs
//
// Workflow/state layer: the seam a presentation layer drives.
// Owns the store plus filter state and the two-phase confirmation flows
// (duplicate override, destructive removal).

pub mod state;
