// LetterLedger - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LetterLedger";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Dates
// =============================================================================

/// chrono format string for the ISO letter date carried on every record.
pub const LETTER_DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Report export
// =============================================================================

/// Fixed header row of the CSV report, in column order.
pub const REPORT_HEADER: &[&str] = &[
    "Bil",
    "Jenis",
    "Daripada/Kepada",
    "Rujukan",
    "Tarikh",
    "Perkara",
    "Fail",
    "Pegawai",
];

/// Fixed filename prefix of the report artifact.
pub const REPORT_FILE_PREFIX: &str = "Laporan_Surat_PPKK_";

/// Report artifact extension (MIME type `text/csv`).
pub const REPORT_FILE_EXTENSION: &str = ".csv";

/// Maximum number of records exportable in a single report.
///
/// A single-office register holds thousands of records at most; this
/// bound exists so a buggy caller looping export cannot build an
/// unbounded in-memory report.
pub const MAX_EXPORT_RECORDS: usize = 100_000;

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG nor the debug flag is set.
pub const DEFAULT_LOG_LEVEL: &str = "info";
