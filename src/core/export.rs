// LetterLedger - core/export.rs
//
// CSV and JSON export of a record view.
// Core layer: writes to any Write trait object; file handling (naming,
// temp-file + rename, empty-view skip) lives in app::state.
//
// The CSV report has a fixed quoting contract: the five free-text columns
// are always double-quoted with embedded quotes doubled, while the
// sequence number, type label, and date are always bare. A generic CSV
// writer cannot express per-column always/never quoting, so rows are
// assembled by hand.

use std::io::Write;

use chrono::NaiveDate;

use crate::core::model::LetterRecord;
use crate::util::constants::{
    MAX_EXPORT_RECORDS, REPORT_FILE_EXTENSION, REPORT_FILE_PREFIX, REPORT_HEADER,
};
use crate::util::error::ExportError;

/// Write the CSV report for a view of records, in the exact order given.
///
/// Callers pass the already-filtered/sorted view; the sequence number is
/// the 1-based position in that list, not the record id. Returns the
/// number of data rows written.
pub fn write_report<W: Write>(
    records: &[&LetterRecord],
    mut writer: W,
) -> Result<usize, ExportError> {
    if records.len() > MAX_EXPORT_RECORDS {
        return Err(ExportError::TooManyRecords {
            count: records.len(),
            max: MAX_EXPORT_RECORDS,
        });
    }

    let mut out = String::new();
    out.push_str(&REPORT_HEADER.join(","));

    for (i, record) in records.iter().enumerate() {
        out.push('\n');
        out.push_str(&report_row(i + 1, record));
    }

    writer
        .write_all(out.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| ExportError::Io { source: e })?;

    Ok(records.len())
}

/// One report row: `Bil,Jenis,Daripada/Kepada,Rujukan,Tarikh,Perkara,Fail,Pegawai`.
fn report_row(sequence: usize, record: &LetterRecord) -> String {
    format!(
        "{},{},{},{},{},{},{},{}",
        sequence,
        record.letter_type.label(),
        quote(&record.from_to),
        quote(&record.reference),
        record.date,
        quote(&record.subject),
        quote(&record.related_file),
        quote(&record.assigned_officer),
    )
}

/// Wrap a free-text field in double quotes, doubling embedded quotes.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Export a record view as a JSON array.
pub fn write_json<W: Write>(records: &[&LetterRecord], writer: W) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, records).map_err(|e| ExportError::Json { source: e })?;
    Ok(records.len())
}

/// Report filename for a given export date: fixed prefix + ISO date + `.csv`.
///
/// Filename generation is part of the external interface even though the
/// download itself belongs to the presentation layer.
pub fn report_filename(date: NaiveDate) -> String {
    format!(
        "{}{}{}",
        REPORT_FILE_PREFIX,
        date.format("%Y-%m-%d"),
        REPORT_FILE_EXTENSION
    )
}
