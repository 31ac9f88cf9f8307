//! Apparent geocentric ecliptic longitude of the Sun.
//!
//! Low-precision solar theory from Meeus, *Astronomical Algorithms*
//! (2nd ed.), Chapter 25: mean longitude plus equation of centre, corrected
//! for aberration and nutation. Accuracy ~0.01 deg.

use crate::fundamentals::{normalize_360, nutation_longitude_deg, sun_mean_longitude_deg};

/// Annual aberration in longitude, degrees.
const ABERRATION_DEG: f64 = -0.005_69;

/// Mean anomaly of the Sun, degrees. Meeus eq. 25.3.
fn sun_mean_anomaly_deg(t: f64) -> f64 {
    357.52911 + 35999.05029 * t - 0.0001537 * t * t
}

/// Equation of centre, degrees.
fn equation_of_centre_deg(t: f64) -> f64 {
    let m = sun_mean_anomaly_deg(t).to_radians();
    (1.914602 - 0.004817 * t - 0.000014 * t * t) * m.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
        + 0.000289 * (3.0 * m).sin()
}

/// True (geometric) longitude of the Sun, mean equinox of date, degrees [0, 360).
pub fn sun_true_longitude_deg(t: f64) -> f64 {
    normalize_360(sun_mean_longitude_deg(t) + equation_of_centre_deg(t))
}

/// Apparent longitude of the Sun, true equinox of date, degrees [0, 360).
///
/// `t` = Julian centuries since J2000.0.
pub fn sun_apparent_longitude_deg(t: f64) -> f64 {
    normalize_360(sun_true_longitude_deg(t) + ABERRATION_DEG + nutation_longitude_deg(t))
}
