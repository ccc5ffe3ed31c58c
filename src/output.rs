//! Output formatting and persistence for grade records.
//!
//! Supports a log summary, JSON serialization, and CSV append.

use anyhow::Result;
use tracing::{debug, info};

use crate::grading::GradeRecord;
use csv::WriterBuilder;
use std::fs::OpenOptions;

/// Logs one line per record.
pub fn print_pretty(records: &[GradeRecord]) {
    if records.is_empty() {
        info!("No grades found for the configured term");
    }
    for r in records {
        info!(
            course = r.course_name.as_deref().unwrap_or(""),
            course_id = %r.course_id,
            score = %r.current_score,
            grade = %r.current_grade,
            last_activity = r.last_activity.as_deref().unwrap_or("never"),
            "Grade"
        );
    }
}

/// Serializes the records as a pretty-printed JSON array.
pub fn to_json(records: &[GradeRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Writes the records to `path` as a JSON array, replacing any existing file.
pub fn write_json(path: &str, records: &[GradeRecord]) -> Result<()> {
    std::fs::write(path, to_json(records)?)?;
    debug!(path, records = records.len(), "Wrote JSON output");
    Ok(())
}

/// Appends records as rows to a CSV file.
///
/// Writes the header row only when the file is missing or empty. An empty
/// batch leaves the file untouched.
pub fn append_records(path: &str, records: &[GradeRecord]) -> Result<()> {
    if records.is_empty() {
        debug!(path, "No CSV records to append");
        return Ok(());
    }

    let needs_header = !std::fs::metadata(path).is_ok_and(|m| m.len() > 0);
    debug!(path, needs_header, rows = records.len(), "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(needs_header) // IMPORTANT when appending
        .from_writer(file);

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}
