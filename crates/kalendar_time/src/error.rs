//! Error types for date parsing.

/// Errors from turning a text cell into a calendar date.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum TimeError {
    /// The text is not shaped like `YYYY-MM-DD`.
    #[error("malformed date '{input}': expected YYYY-MM-DD")]
    Malformed {
        /// The rejected text.
        input: String,
    },

    /// The text is well-formed but names no real day (e.g. `2025-02-30`).
    #[error("invalid calendar date '{input}'")]
    InvalidDate {
        /// The rejected text.
        input: String,
    },
}
