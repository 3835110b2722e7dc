//! Record source errors and their mapping into the application layer

use std::path::PathBuf;

use application::error::ApplicationError;
use thiserror::Error;

/// Reasons a record source cannot be loaded
#[derive(Debug, Error)]
pub enum RecordStoreError {
    /// File could not be opened
    #[error("Cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV is malformed (bad quoting, ragged rows, invalid UTF-8)
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A row's date cell cannot be parsed
    #[error("Invalid date {value:?} on line {line}")]
    InvalidDate { line: u64, value: String },

    /// Header present but no data rows
    #[error("Record source has no rows")]
    Empty,
}

impl From<RecordStoreError> for ApplicationError {
    fn from(err: RecordStoreError) -> Self {
        Self::Load(err.to_string())
    }
}
