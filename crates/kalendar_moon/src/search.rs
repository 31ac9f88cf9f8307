//! Sun-Moon elongation and new moon search.
//!
//! The elongation `moon_lon - sun_lon` grows monotonically through each
//! synodic month; a new moon is a zero crossing of its (-180, +180]
//! normalisation. Crossings are located by a mean-motion estimate followed
//! by bisection, the same coarse-then-refine approach used for conjunctions.

use kalendar_time::Epoch;
use tracing::debug;

use crate::error::MoonError;
use crate::fundamentals::{normalize_360, normalize_pm180};
use crate::moon::moon_apparent_longitude_deg;
use crate::sun::sun_apparent_longitude_deg;

/// Mean synodic month, days.
pub const MEAN_SYNODIC_MONTH_DAYS: f64 = 29.530_588_853;

/// Mean elongation rate, deg/day.
const MEAN_ELONGATION_RATE: f64 = 360.0 / MEAN_SYNODIC_MONTH_DAYS;

/// Half-width of the bisection bracket around the estimate, days.
const BRACKET_HALF_WIDTH_DAYS: f64 = 4.0;

/// Bracket width at which bisection stops, days (~0.1 s).
const CONVERGENCE_DAYS: f64 = 1e-6;

const MAX_ITERATIONS: u32 = 64;

/// Sun-Moon elongation in degrees [0, 360).
pub fn elongation_deg(epoch: Epoch) -> f64 {
    let t = epoch.centuries();
    normalize_360(moon_apparent_longitude_deg(t) - sun_apparent_longitude_deg(t))
}

/// Phase fraction in [0, 1): 0 = new, 0.25 = first quarter, 0.5 = full,
/// 0.75 = last quarter.
pub fn phase_fraction(epoch: Epoch) -> f64 {
    elongation_deg(epoch) / 360.0
}

fn signed_elongation(epoch: Epoch) -> f64 {
    normalize_pm180(elongation_deg(epoch))
}

/// A sign change that is a real crossing, not the ±180 wrap.
fn is_genuine_crossing(f_a: f64, f_b: f64) -> bool {
    f_a * f_b <= 0.0 && (f_a - f_b).abs() < 270.0
}

/// Locate the new moon within a few days of `guess`.
fn refine_new_moon(guess: Epoch) -> Result<Epoch, MoonError> {
    let mut a = guess.add_days(-BRACKET_HALF_WIDTH_DAYS);
    let mut b = guess.add_days(BRACKET_HALF_WIDTH_DAYS);
    let mut f_a = signed_elongation(a);
    let f_b = signed_elongation(b);
    if !is_genuine_crossing(f_a, f_b) {
        return Err(MoonError::NoBracket { jd: guess.as_jd() });
    }

    for _ in 0..MAX_ITERATIONS {
        if b.as_jd() - a.as_jd() < CONVERGENCE_DAYS {
            let found = Epoch::from_jd(0.5 * (a.as_jd() + b.as_jd()));
            debug!(jd = found.as_jd(), "new moon refined");
            return Ok(found);
        }
        let mid = Epoch::from_jd(0.5 * (a.as_jd() + b.as_jd()));
        let f_m = signed_elongation(mid);
        if f_a * f_m <= 0.0 {
            b = mid;
        } else {
            a = mid;
            f_a = f_m;
        }
    }
    Err(MoonError::NoConvergence { jd: guess.as_jd() })
}

/// Most recent new moon at or before `epoch`.
pub fn previous_new_moon(epoch: Epoch) -> Result<Epoch, MoonError> {
    let guess = epoch.add_days(-elongation_deg(epoch) / MEAN_ELONGATION_RATE);
    let mut found = refine_new_moon(guess)?;
    if found > epoch {
        found = refine_new_moon(found.add_days(-MEAN_SYNODIC_MONTH_DAYS))?;
    }
    Ok(found)
}

/// First new moon strictly after `epoch`.
pub fn next_new_moon(epoch: Epoch) -> Result<Epoch, MoonError> {
    let prev = previous_new_moon(epoch)?;
    let mut found = refine_new_moon(prev.add_days(MEAN_SYNODIC_MONTH_DAYS))?;
    if found <= epoch {
        found = refine_new_moon(found.add_days(MEAN_SYNODIC_MONTH_DAYS))?;
    }
    Ok(found)
}

/// Fraction of the current lunation elapsed at `epoch`, in [0, 1).
pub fn lunation_fraction(epoch: Epoch) -> Result<f64, MoonError> {
    let prev = previous_new_moon(epoch)?;
    let next = next_new_moon(epoch)?;
    let span = next.as_jd() - prev.as_jd();
    Ok((epoch.as_jd() - prev.as_jd()) / span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kalendar_time::calendar_to_jd;

    #[test]
    fn crossing_rejects_wrap() {
        assert!(is_genuine_crossing(-5.0, 5.0));
        assert!(!is_genuine_crossing(179.0, -179.0));
        assert!(!is_genuine_crossing(10.0, 20.0));
    }

    #[test]
    fn fraction_in_unit_interval() {
        for i in 0..60 {
            let epoch = Epoch::from_jd(2_460_676.5 + i as f64 * 0.7);
            let f = phase_fraction(epoch);
            assert!((0.0..1.0).contains(&f), "fraction {f}");
        }
    }

    #[test]
    fn new_moon_jan_2024() {
        // 2024-01-11 11:57 UTC
        let start = Epoch::from_jd(calendar_to_jd(2024, 1, 1.0));
        let nm = next_new_moon(start).unwrap();
        let expected = calendar_to_jd(2024, 1, 11.0 + 11.95 / 24.0);
        assert!(
            (nm.as_jd() - expected).abs() < 0.05,
            "got JD {}, expected {expected}",
            nm.as_jd()
        );
    }

    #[test]
    fn previous_is_not_after_epoch() {
        for i in 0..40 {
            let epoch = Epoch::from_jd(2_460_676.5 + i as f64 * 0.9);
            let prev = previous_new_moon(epoch).unwrap();
            let next = next_new_moon(epoch).unwrap();
            assert!(prev <= epoch && next > epoch);
            let span = next.as_jd() - prev.as_jd();
            assert!(span > 29.2 && span < 29.9, "span {span}");
        }
    }
}
