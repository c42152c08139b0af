// LetterLedger - core/mod.rs
//
// Core business logic layer: the record store, duplicate detection,
// query/summary derivation, and report formatting.
// Must NOT depend on: app, or perform any file I/O (export functions
// write to any `std::io::Write`).

pub mod duplicate;
pub mod export;
pub mod model;
pub mod query;
pub mod store;
