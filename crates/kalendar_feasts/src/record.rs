//! One row of the feast calendar.

use chrono::NaiveDate;
use kalendar_fast::FastFlags;
use kalendar_time::{TimeError, parse_iso_date};
use serde::Serialize;

/// A calendar day and its feast, as stored in record files.
///
/// `date` stays a string so that rows with malformed dates survive a
/// round trip untouched; use [`FeastRecord::parsed_date`] to interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FeastRecord {
    pub date: String,
    pub feast_name: String,
    pub description: String,
    pub show_fish: bool,
    pub show_oil: bool,
    pub show_strict_fast: bool,
    /// Phase code; `-1` marks an unchanged day, `None` means not computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moon_phase: Option<i8>,
}

impl FeastRecord {
    pub fn new(date: impl Into<String>, feast_name: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            feast_name: feast_name.into(),
            ..Self::default()
        }
    }

    pub fn parsed_date(&self) -> Result<NaiveDate, TimeError> {
        parse_iso_date(&self.date)
    }

    pub fn flags(&self) -> FastFlags {
        FastFlags::new(self.show_fish, self.show_oil, self.show_strict_fast)
    }

    pub fn set_flags(&mut self, flags: FastFlags) {
        self.show_fish = flags.fish;
        self.show_oil = flags.oil;
        self.show_strict_fast = flags.strict_fast;
    }
}

/// Read a boolean cell leniently.
///
/// Case-insensitive and trimmed. Empty and the usual negatives are false;
/// any other non-empty text is true.
pub fn parse_flag(cell: &str) -> bool {
    let v = cell.trim().to_lowercase();
    !matches!(v.as_str(), "" | "false" | "0" | "no" | "n" | "не")
}

/// Render a boolean the way record files store it.
pub const fn format_flag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
