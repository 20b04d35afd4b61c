#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]

//! CSV export of extracted features.
//!
//! Files are UTF-8 with a leading byte-order mark so spreadsheet tools pick the
//! right encoding, comma-delimited, CRLF-terminated.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use csv::{Terminator, WriterBuilder};
use hanzi_core::FeatureRecord;
use thiserror::Error;
use tracing::info;

pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub const ALTERNATE_COLUMN: &str = "simplified_word";

const BASE_COLUMNS: [&str; 4] = ["word", "vector", "character_frequency", "incorrect_count"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Cannot create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;

/// Column names for `records`; `simplified_word` sits second when any record has one.
#[must_use]
pub fn header(records: &[FeatureRecord]) -> Vec<&'static str> {
    let mut columns = BASE_COLUMNS.to_vec();
    if has_alternate_forms(records) {
        columns.insert(1, ALTERNATE_COLUMN);
    }
    columns
}

fn has_alternate_forms(records: &[FeatureRecord]) -> bool {
    records.iter().any(|r| r.alternate_form.is_some())
}

fn row(record: &FeatureRecord, with_alternate: bool) -> Vec<String> {
    let mut fields = vec![
        record.word.clone(),
        format!("{:?}", record.vector),
        record.character_frequency.to_string(),
        record
            .incorrect_count
            .map(|c| c.to_string())
            .unwrap_or_default(),
    ];
    if with_alternate {
        fields.insert(1, record.alternate_form.clone().unwrap_or_default());
    }
    fields
}

/// Writes BOM, header and one row per record. Returns the number of data rows.
pub fn write_features<W: Write>(records: &[FeatureRecord], mut writer: W) -> Result<usize> {
    writer.write_all(UTF8_BOM)?;

    let mut csv = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(writer);

    let with_alternate = has_alternate_forms(records);
    csv.write_record(header(records))?;
    for record in records {
        csv.write_record(row(record, with_alternate))?;
    }
    csv.flush()?;

    Ok(records.len())
}

/// Creates or truncates `path` and writes `records` to it.
pub fn export_csv(records: &[FeatureRecord], path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    let rows = write_features(records, BufWriter::new(file))?;
    info!("Wrote {rows} rows to {}", path.display());
    Ok(rows)
}
