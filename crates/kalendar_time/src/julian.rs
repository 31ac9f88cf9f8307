//! Julian Date ↔ Gregorian calendar conversions.
//!
//! Meeus, *Astronomical Algorithms* (2nd ed.), Chapter 7. Proleptic
//! Gregorian throughout; the feast calendar never reaches the 1582 reform.

use chrono::{Datelike, NaiveDate};

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Days in a Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Convert a Gregorian calendar date to a Julian Date.
///
/// `day` may carry a fractional part (0.5 = noon).
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5
}

/// Convert a Julian Date back to `(year, month, fractional day)`.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let shifted = jd + 0.5;
    let z = shifted.floor();
    let f = shifted - z;

    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
    (year as i32, month as u32, day)
}

/// Julian Date at 00:00 of a calendar date.
pub fn date_to_jd(date: NaiveDate) -> f64 {
    calendar_to_jd(date.year(), date.month(), date.day() as f64)
}

/// Julian centuries elapsed since J2000.0.
pub fn jd_to_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}
