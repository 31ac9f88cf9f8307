//! Phase code domains.
//!
//! Two independent classifications exist: a 4-bucket "major phase" scheme
//! with a "no major phase" sentinel, and an 8-bucket octant scheme.

/// Major lunar phase on a given day (4 buckets plus "none").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MajorPhase {
    /// No major phase within the tolerance window.
    None = 0,
    New = 1,
    FirstQuarter = 2,
    Full = 3,
    LastQuarter = 4,
}

/// All major phase variants in code order.
pub const ALL_MAJOR_PHASES: [MajorPhase; 5] = [
    MajorPhase::None,
    MajorPhase::New,
    MajorPhase::FirstQuarter,
    MajorPhase::Full,
    MajorPhase::LastQuarter,
];

impl MajorPhase {
    /// Integer code written to the `moon_phase` column.
    pub const fn code(self) -> i8 {
        self as i8
    }

    /// Inverse of [`code`](Self::code).
    pub fn from_code(code: i8) -> Option<Self> {
        ALL_MAJOR_PHASES.iter().copied().find(|p| p.code() == code)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::New => "new",
            Self::FirstQuarter => "first quarter",
            Self::Full => "full",
            Self::LastQuarter => "last quarter",
        }
    }

    /// Bucket a phase fraction in [0, 1) using a window of `tolerance`
    /// around each cardinal point. Checks run new, first quarter, full,
    /// last quarter; the first matching window wins.
    pub fn from_fraction(fraction: f64, tolerance: f64) -> Self {
        if fraction.abs() < tolerance || (fraction - 1.0).abs() < tolerance {
            Self::New
        } else if (fraction - 0.25).abs() < tolerance {
            Self::FirstQuarter
        } else if (fraction - 0.5).abs() < tolerance {
            Self::Full
        } else if (fraction - 0.75).abs() < tolerance {
            Self::LastQuarter
        } else {
            Self::None
        }
    }
}

/// Synodic month length used to scale ages, days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.53;

/// Upper age bound (days, exclusive) of each octant, in octant order.
const OCTANT_UPPER_BOUNDS: [f64; 8] = [
    1.84566, 5.53699, 9.22831, 12.91963, 16.61096, 20.30228, 23.99361, 27.68493,
];

/// Octant lunar phase (8 buckets by synodic age).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OctantPhase {
    New = 0,
    WaxingCrescent = 1,
    FirstQuarter = 2,
    WaxingGibbous = 3,
    Full = 4,
    WaningGibbous = 5,
    LastQuarter = 6,
    WaningCrescent = 7,
}

/// All octant variants in code order.
pub const ALL_OCTANT_PHASES: [OctantPhase; 8] = [
    OctantPhase::New,
    OctantPhase::WaxingCrescent,
    OctantPhase::FirstQuarter,
    OctantPhase::WaxingGibbous,
    OctantPhase::Full,
    OctantPhase::WaningGibbous,
    OctantPhase::LastQuarter,
    OctantPhase::WaningCrescent,
];

impl OctantPhase {
    pub const fn code(self) -> i8 {
        self as i8
    }

    pub fn from_code(code: i8) -> Option<Self> {
        ALL_OCTANT_PHASES.iter().copied().find(|p| p.code() == code)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::WaxingCrescent => "waxing crescent",
            Self::FirstQuarter => "first quarter",
            Self::WaxingGibbous => "waxing gibbous",
            Self::Full => "full",
            Self::WaningGibbous => "waning gibbous",
            Self::LastQuarter => "last quarter",
            Self::WaningCrescent => "waning crescent",
        }
    }

    /// Bucket a synodic age in days. Ages past the last bound wrap to new.
    pub fn from_age_days(age: f64) -> Self {
        OCTANT_UPPER_BOUNDS
            .iter()
            .position(|&bound| age < bound)
            .map_or(Self::New, |i| ALL_OCTANT_PHASES[i])
    }
}

/// Which code domain a strategy produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseDomain {
    /// Codes 0..=4, see [`MajorPhase`].
    Major,
    /// Codes 0..=7, see [`OctantPhase`].
    Octant,
}

impl PhaseDomain {
    /// Whether `code` is a member of this domain.
    pub fn contains(self, code: i8) -> bool {
        match self {
            Self::Major => MajorPhase::from_code(code).is_some(),
            Self::Octant => OctantPhase::from_code(code).is_some(),
        }
    }

    /// Human-readable name for a code in this domain.
    pub fn describe(self, code: i8) -> &'static str {
        match self {
            Self::Major => MajorPhase::from_code(code).map_or("unknown", MajorPhase::name),
            Self::Octant => OctantPhase::from_code(code).map_or("unknown", OctantPhase::name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn major_codes_round_trip() {
        for p in ALL_MAJOR_PHASES {
            assert_eq!(MajorPhase::from_code(p.code()), Some(p));
        }
        assert_eq!(MajorPhase::from_code(5), None);
        assert_eq!(MajorPhase::from_code(-1), None);
    }

    #[test]
    fn major_windows() {
        assert_eq!(MajorPhase::from_fraction(0.02, 0.1), MajorPhase::New);
        assert_eq!(MajorPhase::from_fraction(0.95, 0.1), MajorPhase::New);
        assert_eq!(MajorPhase::from_fraction(0.3, 0.1), MajorPhase::FirstQuarter);
        assert_eq!(MajorPhase::from_fraction(0.41, 0.1), MajorPhase::Full);
        assert_eq!(MajorPhase::from_fraction(0.84, 0.1), MajorPhase::LastQuarter);
        assert_eq!(MajorPhase::from_fraction(0.125, 0.1), MajorPhase::None);
        assert_eq!(MajorPhase::from_fraction(0.625, 0.1), MajorPhase::None);
    }

    #[test]
    fn window_edge_is_exclusive() {
        assert_eq!(MajorPhase::from_fraction(0.375, 0.125), MajorPhase::None);
        assert_eq!(MajorPhase::from_fraction(0.125, 0.125), MajorPhase::None);
    }

    #[test]
    fn octant_boundaries() {
        assert_eq!(OctantPhase::from_age_days(0.0), OctantPhase::New);
        assert_eq!(OctantPhase::from_age_days(1.84566), OctantPhase::WaxingCrescent);
        assert_eq!(OctantPhase::from_age_days(7.0), OctantPhase::FirstQuarter);
        assert_eq!(OctantPhase::from_age_days(14.7), OctantPhase::Full);
        assert_eq!(OctantPhase::from_age_days(22.0), OctantPhase::LastQuarter);
        assert_eq!(OctantPhase::from_age_days(27.0), OctantPhase::WaningCrescent);
        assert_eq!(OctantPhase::from_age_days(27.68493), OctantPhase::New);
        assert_eq!(OctantPhase::from_age_days(29.4), OctantPhase::New);
    }

    #[test]
    fn domain_membership() {
        assert!(PhaseDomain::Major.contains(4));
        assert!(!PhaseDomain::Major.contains(7));
        assert!(PhaseDomain::Octant.contains(7));
        assert!(!PhaseDomain::Octant.contains(-1));
        assert_eq!(PhaseDomain::Octant.describe(4), "full");
    }
}
