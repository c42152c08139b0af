// LetterLedger - lib.rs
//
// Library entry point. This crate is the decision-making core of a
// single-office correspondence register; the presentation layer (forms,
// tables, confirmation dialogs) is an external collaborator that drives
// the `app` module and renders what `core` computes.

pub mod app;
pub mod core;
pub mod util;
