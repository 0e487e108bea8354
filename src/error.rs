//! Errors surfaced to callers of the parsing pipeline.
//!
//! Per-section extraction failures are not here: they are recovered inside the
//! parser and reported as [`SectionDiagnostic`](crate::parsers::types::SectionDiagnostic)s.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    /// No run section produced a complete record; nothing is written
    #[error("no complete run section found ({sections} sections scanned)")]
    EmptyDataset { sections: usize },

    /// A CSV file was read back but held only a header
    #[error("table contains no data rows")]
    EmptyTable,

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("unexpected table header: expected {expected:?}, found {found:?}")]
    Schema {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("output path {} is the input file", path.display())]
    SameInputOutput { path: PathBuf },

    /// Two logs in one batch map to the same table
    #[error("output path {} is already written by {}", path.display(), claimed_by.display())]
    DuplicateOutput { path: PathBuf, claimed_by: PathBuf },

    #[error("table is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl LogError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LogError::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LogError::Write {
            path: path.into(),
            source,
        }
    }
}
