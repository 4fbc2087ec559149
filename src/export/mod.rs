//! Export - flat records rendered as CSV, plus JSON backups.
//!
//! Records are ordered string-keyed rows. The CSV header comes from the first
//! record's keys; later records contribute only the values for those keys.

/// Full JSON backup and restore
pub mod backup;
/// Builders turning repository data into export records
pub mod records;

pub use backup::{BACKUP_VERSION, Backup};
pub use records::{
    live_report_export, staff_feedback_export, staff_students_export, students_export,
};

use crate::errors::{Error, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

/// One exported row: ordered `(header, value)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportRecord {
    fields: Vec<(String, String)>,
}

impl ExportRecord {
    /// Empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field, builder style.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.fields.push((key.to_string(), value.to_string()));
        self
    }

    /// Value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Header names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }
}

/// Renders records as CSV with every field quoted.
///
/// Returns an empty string for no records. Keys missing from a later record
/// render as empty fields.
///
/// # Errors
/// Returns an error if the CSV writer fails.
pub fn to_csv(records: &[ExportRecord]) -> Result<String> {
    let Some(first) = records.first() else {
        return Ok(String::new());
    };
    let headers: Vec<&str> = first.keys().collect();

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(&headers)?;
    for record in records {
        writer.write_record(headers.iter().map(|h| record.get(h).unwrap_or("")))?;
    }

    let bytes = writer.into_inner().map_err(|e| Error::Storage {
        message: format!("Failed to flush CSV output: {e}"),
    })?;
    String::from_utf8(bytes).map_err(|e| Error::Storage {
        message: format!("CSV output is not UTF-8: {e}"),
    })
}

/// Writes records as CSV to `dir/filename`, creating `dir` if needed.
/// Nothing is written for an empty record list.
///
/// # Errors
/// Returns an error if the directory or file cannot be written.
pub fn write_csv(dir: &Path, filename: &str, records: &[ExportRecord]) -> Result<Option<PathBuf>> {
    if records.is_empty() {
        info!("Nothing to export for {}", filename);
        return Ok(None);
    }
    fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    fs::write(&path, to_csv(records)?)?;
    info!("Exported {} rows to {:?}", records.len(), path);
    Ok(Some(path))
}

/// `"{prefix}_{YYYY-MM-DD}.{extension}"`
#[must_use]
pub fn dated_filename(prefix: &str, date: chrono::NaiveDate, extension: &str) -> String {
    format!("{prefix}_{}.{extension}", date.format("%Y-%m-%d"))
}
