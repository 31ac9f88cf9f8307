//! Collapse runs of identical per-date phase codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Code written for a date whose phase equals its neighbour's.
pub const UNCHANGED: i8 = -1;

/// Which member of a run of equal codes keeps its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionMode {
    /// Keep the last date of each run; the final element is always kept.
    #[default]
    LastOfRun,
    /// Keep the first date of each run; the first element is always kept.
    FirstOfRun,
    /// Emit every code as computed.
    Off,
}

const ALL_MODES: [TransitionMode; 3] = [
    TransitionMode::LastOfRun,
    TransitionMode::FirstOfRun,
    TransitionMode::Off,
];

impl TransitionMode {
    pub const fn name(self) -> &'static str {
        match self {
            Self::LastOfRun => "last-of-run",
            Self::FirstOfRun => "first-of-run",
            Self::Off => "off",
        }
    }
}

impl fmt::Display for TransitionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransitionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_MODES
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("unknown transition mode '{s}' (last-of-run, first-of-run, off)")
            })
    }
}

/// Replace repeated codes with [`UNCHANGED`].
///
/// `None` marks a date whose phase could not be computed. It is passed
/// through untouched and never joins a run, so its neighbours keep their
/// codes.
pub fn mark_transitions(codes: &[Option<i8>], mode: TransitionMode) -> Vec<Option<i8>> {
    let same = |a: Option<i8>, b: Option<i8>| matches!((a, b), (Some(x), Some(y)) if x == y);

    codes
        .iter()
        .enumerate()
        .map(|(i, &code)| {
            let neighbour = match mode {
                TransitionMode::Off => None,
                TransitionMode::LastOfRun => codes.get(i + 1).copied(),
                TransitionMode::FirstOfRun => i.checked_sub(1).map(|p| codes[p]),
            };
            match neighbour {
                Some(n) if same(code, n) => Some(UNCHANGED),
                _ => code,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(v: &[i8]) -> Vec<Option<i8>> {
        v.iter().copied().map(Some).collect()
    }

    #[test]
    fn keeps_last_of_each_run() {
        let out = mark_transitions(&some(&[0, 0, 1, 1, 1, 2]), TransitionMode::LastOfRun);
        assert_eq!(out, some(&[-1, 0, -1, -1, 1, 2]));
    }

    #[test]
    fn final_element_is_verbatim() {
        let out = mark_transitions(&some(&[3, 3, 3]), TransitionMode::LastOfRun);
        assert_eq!(out, some(&[-1, -1, 3]));
    }

    #[test]
    fn first_of_run() {
        let out = mark_transitions(&some(&[0, 0, 1, 1, 2]), TransitionMode::FirstOfRun);
        assert_eq!(out, some(&[0, -1, 1, -1, 2]));
    }

    #[test]
    fn off_is_identity() {
        let codes = some(&[4, 4, 4]);
        assert_eq!(mark_transitions(&codes, TransitionMode::Off), codes);
    }

    #[test]
    fn none_breaks_runs() {
        let codes = vec![Some(1), None, Some(1), Some(1)];
        let out = mark_transitions(&codes, TransitionMode::LastOfRun);
        assert_eq!(out, vec![Some(1), None, Some(-1), Some(1)]);
    }

    #[test]
    fn consecutive_nones_stay_none() {
        let out = mark_transitions(&[None, None], TransitionMode::LastOfRun);
        assert_eq!(out, vec![None, None]);
    }

    #[test]
    fn empty_and_single() {
        assert!(mark_transitions(&[], TransitionMode::LastOfRun).is_empty());
        assert_eq!(
            mark_transitions(&[Some(2)], TransitionMode::LastOfRun),
            vec![Some(2)]
        );
    }

    #[test]
    fn mode_parse() {
        assert_eq!("first-of-run".parse(), Ok(TransitionMode::FirstOfRun));
        assert_eq!("OFF".parse(), Ok(TransitionMode::Off));
        assert!("last".parse::<TransitionMode>().is_err());
    }
}
