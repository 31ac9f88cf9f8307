//! Error types for record and calendar file handling.

use std::path::PathBuf;

/// Error type for all fallible operations in the kalendar_feasts crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FeastError {
    /// Returned when an input file does not exist.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when a file cannot be read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Returned when an input file is not valid UTF-8.
    #[error("could not decode {} as UTF-8", path.display())]
    Encoding {
        /// Offending file.
        path: PathBuf,
    },

    /// Wraps an error from the CSV reader or writer.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Wraps an error from JSON serialisation.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Returned when a required column is absent from the header row.
    #[error("required column '{column}' not found")]
    MissingColumn {
        /// Canonical column name.
        column: &'static str,
    },

    /// Returned when a month outside 1..=12 is requested.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The rejected month.
        month: u32,
    },

    /// Returned when a raw calendar file yields no feasts at all.
    #[error("no feast data parsed from {}", path.display())]
    NoFeasts {
        /// The parsed file.
        path: PathBuf,
    },
}
