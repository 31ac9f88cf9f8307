//! Calendar date handling for the feast calendar tools.
//!
//! This crate provides:
//! - Strict `YYYY-MM-DD` parsing into [`chrono::NaiveDate`]
//! - Julian Date ↔ Gregorian calendar conversions
//! - Julian centuries since J2000.0 for the analytic lunar/solar series

pub mod date;
pub mod error;
pub mod julian;

pub use date::parse_iso_date;
pub use error::TimeError;
pub use julian::{
    DAYS_PER_CENTURY, J2000_JD, calendar_to_jd, date_to_jd, jd_to_calendar, jd_to_centuries,
};

/// An instant on the Julian Day scale.
///
/// Dates from the calendar are evaluated at 00:00 UTC. The analytic series
/// downstream treat the value as TT; the ~70 s difference is far below the
/// resolution of a daily phase classification.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Epoch {
    jd: f64,
}

impl Epoch {
    /// Create an epoch from a Julian Date.
    pub fn from_jd(jd: f64) -> Self {
        Self { jd }
    }

    /// Midnight UTC at the start of a calendar date.
    pub fn from_date(date: chrono::NaiveDate) -> Self {
        Self {
            jd: date_to_jd(date),
        }
    }

    /// Julian Date.
    pub fn as_jd(self) -> f64 {
        self.jd
    }

    /// Julian centuries since J2000.0.
    pub fn centuries(self) -> f64 {
        jd_to_centuries(self.jd)
    }

    /// Shift by a (possibly fractional) number of days.
    pub fn add_days(self, days: f64) -> Self {
        Self { jd: self.jd + days }
    }
}
