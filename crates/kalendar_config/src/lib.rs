//! Configuration for the kalendar tools.
//!
//! All sections and fields are optional; unknown fields are rejected.
//!
//! ```toml
//! [moon]
//! algorithm = "ephemeris"
//! tolerance = 0.1
//! transitions = "last-of-run"
//!
//! [io]
//! delimiter = "auto"
//! quote_all = false
//!
//! [parser]
//! year = 2025
//! clean = false
//! apply_fasts = true
//! ```

pub mod error;

use std::fs;
use std::path::{Path, PathBuf};

use kalendar_feasts::{DEFAULT_YEAR, Delimiter};
use kalendar_moon::{DEFAULT_TOLERANCE, PhaseAlgorithm, TransitionMode};
use serde::Deserialize;
use tracing::debug;

pub use error::ConfigError;

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "kalendar.toml";

/// Largest accepted tolerance: the half-width of an octant in fraction units.
pub const MAX_TOLERANCE: f64 = 0.125;

/// Accepted range for the parser year (Gregorian, four-digit).
pub const YEAR_RANGE: (i32, i32) = (1583, 9999);

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KalendarConfig {
    /// Moon phase settings.
    #[serde(default)]
    pub moon: MoonConfig,

    /// Record file settings.
    #[serde(default)]
    pub io: IoConfig,

    /// Raw calendar parser settings.
    #[serde(default)]
    pub parser: ParserConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MoonConfig {
    #[serde(default)]
    pub algorithm: PhaseAlgorithm,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default)]
    pub transitions: TransitionMode,
}

impl Default for MoonConfig {
    fn default() -> Self {
        Self {
            algorithm: PhaseAlgorithm::default(),
            tolerance: default_tolerance(),
            transitions: TransitionMode::default(),
        }
    }
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    #[serde(default)]
    pub delimiter: Delimiter,
    #[serde(default)]
    pub quote_all: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParserConfig {
    #[serde(default = "default_year")]
    pub year: i32,
    #[serde(default)]
    pub clean: bool,
    #[serde(default = "default_true")]
    pub apply_fasts: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            year: default_year(),
            clean: false,
            apply_fasts: true,
        }
    }
}

fn default_year() -> i32 {
    DEFAULT_YEAR
}
fn default_true() -> bool {
    true
}

impl KalendarConfig {
    /// Parse and validate TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `path` if given, else `kalendar.toml` in `dir` if it exists,
    /// else the defaults.
    pub fn resolve(path: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let fallback: PathBuf = dir.join(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            Self::load(&fallback)
        } else {
            debug!("no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Check value ranges that the types alone do not enforce.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tolerance = self.moon.tolerance;
        if !(tolerance > 0.0 && tolerance <= MAX_TOLERANCE) {
            return Err(ConfigError::InvalidTolerance { tolerance });
        }
        let (min, max) = YEAR_RANGE;
        let year = self.parser.year;
        if !(min..=max).contains(&year) {
            return Err(ConfigError::InvalidYear { year, min, max });
        }
        Ok(())
    }
}
