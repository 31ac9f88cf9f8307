//! Interchangeable moon phase strategies.
//!
//! | strategy | model | domain |
//! |---|---|---|
//! | [`EphemerisStrategy`] | analytic Sun/Moon longitudes, elongation windows | [`MajorPhase`] |
//! | [`ApproximationStrategy`] | closed-form day number, mean synodic age | [`OctantPhase`] |
//! | [`LunationStrategy`] | ephemeris new-moon search, synodic age | [`OctantPhase`] |

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use kalendar_time::Epoch;
use serde::{Deserialize, Serialize};

use crate::error::MoonError;
use crate::phase::{MajorPhase, OctantPhase, PhaseDomain, SYNODIC_MONTH_DAYS};
use crate::search::{lunation_fraction, phase_fraction};

/// Default tolerance around each cardinal point, in fraction units.
pub const DEFAULT_TOLERANCE: f64 = 0.1;

/// A date → phase code classifier.
pub trait MoonPhaseStrategy: Send + Sync {
    /// Short identifier, matches the [`PhaseAlgorithm`] spelling.
    fn name(&self) -> &'static str;

    /// The code domain this strategy produces.
    fn domain(&self) -> PhaseDomain;

    /// Phase code for a calendar date, evaluated at 00:00 UTC.
    fn phase_code(&self, date: NaiveDate) -> Result<i8, MoonError>;
}

/// Elongation-window classification into major phases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EphemerisStrategy {
    tolerance: f64,
}

impl Default for EphemerisStrategy {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl EphemerisStrategy {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Phase fraction ((moon_lon - sun_lon) mod 360) / 360 at 00:00 UTC.
    pub fn fraction(&self, date: NaiveDate) -> f64 {
        phase_fraction(Epoch::from_date(date))
    }

    pub fn major_phase(&self, date: NaiveDate) -> MajorPhase {
        MajorPhase::from_fraction(self.fraction(date), self.tolerance)
    }
}

impl MoonPhaseStrategy for EphemerisStrategy {
    fn name(&self) -> &'static str {
        "ephemeris"
    }

    fn domain(&self) -> PhaseDomain {
        PhaseDomain::Major
    }

    fn phase_code(&self, date: NaiveDate) -> Result<i8, MoonError> {
        Ok(self.major_phase(date).code())
    }
}

/// Epoch of the reference new moon for the closed-form approximation.
const APPROX_EPOCH: f64 = 2_451_550.1;

/// Mean synodic month used by the closed-form approximation, days.
const APPROX_SYNODIC_MONTH: f64 = 29.530_588_853;

/// Closed-form synodic age approximation.
///
/// The day number it builds is a Julian-Day-like count with a Gregorian
/// century correction; it runs 122.5 days ahead of the astronomical Julian
/// Date, which shifts ages by a constant ~4.4 days against true new moons.
/// Existing datasets were produced with this exact formula, so it is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApproximationStrategy;

impl ApproximationStrategy {
    /// Integer day number for a date.
    pub fn day_number(date: NaiveDate) -> f64 {
        let (mut y, mut m) = (date.year() as f64, date.month() as f64);
        if m < 3.0 {
            y -= 1.0;
            m += 12.0;
        }
        let k1 = (365.25 * (y + 4712.0)).trunc();
        let k2 = (30.6 * (m + 1.0)).trunc();
        let k3 = ((y / 100.0 + 49.0) * 0.75).trunc() - 38.0;
        k1 + k2 + date.day() as f64 + 59.0 - k3
    }

    /// Synodic age in days, [0, 29.53).
    pub fn synodic_age(date: NaiveDate) -> f64 {
        let mut ip = (Self::day_number(date) - APPROX_EPOCH) / APPROX_SYNODIC_MONTH;
        ip -= ip.trunc();
        if ip < 0.0 {
            ip += 1.0;
        }
        ip * SYNODIC_MONTH_DAYS
    }

    pub fn octant_phase(&self, date: NaiveDate) -> OctantPhase {
        OctantPhase::from_age_days(Self::synodic_age(date))
    }
}

impl MoonPhaseStrategy for ApproximationStrategy {
    fn name(&self) -> &'static str {
        "approximation"
    }

    fn domain(&self) -> PhaseDomain {
        PhaseDomain::Octant
    }

    fn phase_code(&self, date: NaiveDate) -> Result<i8, MoonError> {
        Ok(self.octant_phase(date).code())
    }
}

/// Synodic age measured between the surrounding ephemeris new moons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LunationStrategy;

impl LunationStrategy {
    /// Synodic age in days, scaled to a 29.53-day month.
    pub fn synodic_age(date: NaiveDate) -> Result<f64, MoonError> {
        Ok(lunation_fraction(Epoch::from_date(date))? * SYNODIC_MONTH_DAYS)
    }

    pub fn octant_phase(&self, date: NaiveDate) -> Result<OctantPhase, MoonError> {
        Ok(OctantPhase::from_age_days(Self::synodic_age(date)?))
    }
}

impl MoonPhaseStrategy for LunationStrategy {
    fn name(&self) -> &'static str {
        "lunation"
    }

    fn domain(&self) -> PhaseDomain {
        PhaseDomain::Octant
    }

    fn phase_code(&self, date: NaiveDate) -> Result<i8, MoonError> {
        Ok(self.octant_phase(date)?.code())
    }
}

/// Strategy selector used by configuration and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseAlgorithm {
    #[default]
    Ephemeris,
    Approximation,
    Lunation,
}

/// All algorithms in a stable order.
pub const ALL_ALGORITHMS: [PhaseAlgorithm; 3] = [
    PhaseAlgorithm::Ephemeris,
    PhaseAlgorithm::Approximation,
    PhaseAlgorithm::Lunation,
];

impl PhaseAlgorithm {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ephemeris => "ephemeris",
            Self::Approximation => "approximation",
            Self::Lunation => "lunation",
        }
    }

    pub const fn domain(self) -> PhaseDomain {
        match self {
            Self::Ephemeris => PhaseDomain::Major,
            Self::Approximation | Self::Lunation => PhaseDomain::Octant,
        }
    }

    /// Build the strategy. `tolerance` only affects [`EphemerisStrategy`].
    pub fn strategy(self, tolerance: f64) -> Box<dyn MoonPhaseStrategy> {
        match self {
            Self::Ephemeris => Box::new(EphemerisStrategy::new(tolerance)),
            Self::Approximation => Box::new(ApproximationStrategy),
            Self::Lunation => Box::new(LunationStrategy),
        }
    }
}

impl fmt::Display for PhaseAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PhaseAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_ALGORITHMS
            .iter()
            .copied()
            .find(|a| a.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("unknown phase algorithm '{s}' (ephemeris, approximation, lunation)")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_number_january_branch() {
        // y=2024, m=13 after the shift: 2460324 + 428 + 1 + 59 - 13
        assert_eq!(ApproximationStrategy::day_number(date(2025, 1, 1)), 2_460_799.0);
    }

    #[test]
    fn day_number_march() {
        // 2460689 + 122 + 3 + 59 - 13
        assert_eq!(ApproximationStrategy::day_number(date(2025, 3, 3)), 2_460_860.0);
    }

    #[test]
    fn approximation_known_ages() {
        let age = ApproximationStrategy::synodic_age(date(2025, 3, 3));
        assert!((age - 7.764).abs() < 0.01, "age = {age}");
        assert_eq!(
            ApproximationStrategy.octant_phase(date(2025, 3, 3)),
            OctantPhase::FirstQuarter
        );
    }

    #[test]
    fn approximation_age_in_range_before_epoch() {
        let age = ApproximationStrategy::synodic_age(date(1990, 6, 1));
        assert!((0.0..SYNODIC_MONTH_DAYS).contains(&age), "age = {age}");
    }

    #[test]
    fn algorithm_parse_and_display() {
        for a in ALL_ALGORITHMS {
            assert_eq!(a.to_string().parse::<PhaseAlgorithm>(), Ok(a));
        }
        assert_eq!("  Lunation ".parse::<PhaseAlgorithm>(), Ok(PhaseAlgorithm::Lunation));
        assert!("astropy".parse::<PhaseAlgorithm>().is_err());
    }

    #[test]
    fn strategy_reports_matching_domain() {
        for a in ALL_ALGORITHMS {
            let s = a.strategy(DEFAULT_TOLERANCE);
            assert_eq!(s.domain(), a.domain());
            assert_eq!(s.name(), a.name());
        }
    }

    #[test]
    fn ephemeris_tolerance_widens_windows() {
        let d = date(2025, 3, 3);
        let narrow = EphemerisStrategy::new(0.01).major_phase(d);
        let wide = EphemerisStrategy::new(0.125).major_phase(d);
        assert_eq!(narrow, MajorPhase::None);
        assert_ne!(wide, MajorPhase::None);
    }
}
