//! Error types for the kalendar_config crate.

use std::path::PathBuf;

/// Error type for loading and validating configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Returned when the config file cannot be read.
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Returned when the TOML is malformed or has unknown fields.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Returned when the moon tolerance is outside (0, 0.125].
    #[error("moon.tolerance must be in (0, 0.125], got {tolerance}")]
    InvalidTolerance {
        /// The rejected tolerance.
        tolerance: f64,
    },

    /// Returned when the parser year is outside the supported range.
    #[error("parser.year must be in {min}..={max}, got {year}")]
    InvalidYear {
        /// The rejected year.
        year: i32,
        /// Smallest accepted year.
        min: i32,
        /// Largest accepted year.
        max: i32,
    },
}
