//! Data loading error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that make the registration table unusable
///
/// All of these are fatal at startup; bad individual rows are dropped
/// and counted instead of raising.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Data file could not be opened or read
    #[error("Failed to read data file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV structure could not be decoded (e.g. unreadable header)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook could not be opened or its first sheet decoded
    #[error("Failed to read workbook {path:?}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// Workbook has no worksheet to read
    #[error("Workbook {0:?} contains no worksheets")]
    NoWorksheet(PathBuf),

    /// A required column is absent from the header row
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

/// Result type for data loading
pub type LoadResult<T> = Result<T, LoadError>;
