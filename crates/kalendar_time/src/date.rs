//! Strict ISO `YYYY-MM-DD` dates.

use chrono::NaiveDate;

use crate::error::TimeError;

/// Parse a `YYYY-MM-DD` cell into a calendar date.
///
/// Surrounding whitespace is ignored. The shape is checked before chrono
/// sees the value, so `2025-3-3` or `2025-03-03T00:00` are rejected rather
/// than leniently accepted.
pub fn parse_iso_date(input: &str) -> Result<NaiveDate, TimeError> {
    let s = input.trim();
    let bytes = s.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return Err(TimeError::Malformed {
            input: input.to_string(),
        });
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| TimeError::InvalidDate {
        input: input.to_string(),
    })
}
