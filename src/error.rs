use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FragKonError>;

/// Structural failures that abort a run. Window rejections and undefined
/// fractions are not errors and never surface here.
#[derive(Error, Debug)]
pub enum FragKonError {
    #[error("No input pileup given (use -i/--input)")]
    MissingInput,

    #[error("Invalid number of fields at line {line}: expected {expected}, got {actual}")]
    FieldCount {
        line: u64,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid {field} at line {line}: {value:?}")]
    InvalidField {
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to detect compression of {path}: {source}")]
    Decompress {
        path: PathBuf,
        #[source]
        source: niffler::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
