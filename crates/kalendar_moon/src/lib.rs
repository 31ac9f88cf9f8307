//! Moon phase classification for calendar dates.
//!
//! This crate provides:
//! - Analytic apparent longitudes of the Sun and Moon (Meeus-style series)
//! - Sun-Moon elongation and new moon search
//! - Three interchangeable phase strategies behind [`MoonPhaseStrategy`]
//! - Transition marking that collapses runs of identical codes
//!
//! All implementations are clean-room, derived from IAU standards and
//! published astronomical formulas.

pub mod error;
pub mod fundamentals;
pub mod moon;
pub mod phase;
pub mod search;
pub mod strategy;
pub mod sun;
pub mod transitions;

pub use error::MoonError;
pub use moon::moon_apparent_longitude_deg;
pub use phase::{
    ALL_MAJOR_PHASES, ALL_OCTANT_PHASES, MajorPhase, OctantPhase, PhaseDomain, SYNODIC_MONTH_DAYS,
};
pub use search::{
    MEAN_SYNODIC_MONTH_DAYS, elongation_deg, lunation_fraction, next_new_moon, phase_fraction,
    previous_new_moon,
};
pub use strategy::{
    ALL_ALGORITHMS, ApproximationStrategy, DEFAULT_TOLERANCE, EphemerisStrategy, LunationStrategy,
    MoonPhaseStrategy, PhaseAlgorithm,
};
pub use sun::sun_apparent_longitude_deg;
pub use transitions::{TransitionMode, UNCHANGED, mark_transitions};
