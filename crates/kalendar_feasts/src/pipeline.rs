//! In-memory passes over loaded records: fasting flags, moon phases, and
//! the post-parse summary.

use std::fmt;

use kalendar_fast::{FastFlags, apply_rules};
use kalendar_moon::{MoonPhaseStrategy, TransitionMode, mark_transitions};
use tracing::{debug, info, warn};

use crate::record::FeastRecord;

/// Outcome of [`apply_fasts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FastReport {
    pub updated: usize,
    pub skipped: usize,
}

/// Recompute fasting flags for every record.
///
/// Flags start from all-false unless `keep_flags` is set, in which case the
/// rules are layered on top of what the record already carries. Records
/// whose date does not parse are left untouched.
pub fn apply_fasts(records: &mut [FeastRecord], keep_flags: bool) -> FastReport {
    let mut report = FastReport::default();
    for record in records.iter_mut() {
        let date = match record.parsed_date() {
            Ok(date) => date,
            Err(e) => {
                warn!(error = %e, "skipping fasting rules");
                report.skipped += 1;
                continue;
            }
        };
        let start = if keep_flags {
            record.flags()
        } else {
            FastFlags::NONE
        };
        let flags = apply_rules(date, &record.feast_name, start);
        debug!(%date, ?flags, "fasting flags");
        record.set_flags(flags);
        report.updated += 1;
    }
    info!(updated = report.updated, skipped = report.skipped, "applied fasting rules");
    report
}

/// Outcome of [`annotate_moon`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoonReport {
    pub computed: usize,
    pub failed: usize,
}

/// Sort records by date and fill `moon_phase` using `strategy`, then apply
/// the transition mode across the sequence of distinct dates.
///
/// Rows sharing a date get the same code, and a run is a run of days, not
/// of rows. Records whose date does not parse, or whose phase cannot be
/// computed, get `None`.
pub fn annotate_moon(
    records: &mut [FeastRecord],
    strategy: &dyn MoonPhaseStrategy,
    mode: TransitionMode,
) -> MoonReport {
    records.sort_by(|a, b| a.date.cmp(&b.date));

    let mut report = MoonReport::default();
    let mut rows_per_day = Vec::new();
    let mut codes: Vec<Option<i8>> = Vec::new();
    for day in records.chunk_by(|a, b| a.date == b.date) {
        let code = day[0]
            .parsed_date()
            .map_err(|e| e.to_string())
            .and_then(|date| strategy.phase_code(date).map_err(|e| e.to_string()));
        let code = match code {
            Ok(code) => {
                report.computed += day.len();
                Some(code)
            }
            Err(error) => {
                warn!(date = %day[0].date, %error, "no moon phase");
                report.failed += day.len();
                None
            }
        };
        rows_per_day.push(day.len());
        codes.push(code);
    }

    let mut rows = records.iter_mut();
    for (count, code) in rows_per_day.into_iter().zip(mark_transitions(&codes, mode)) {
        for record in rows.by_ref().take(count) {
            record.moon_phase = code;
        }
    }
    info!(
        strategy = strategy.name(),
        transitions = %mode,
        computed = report.computed,
        failed = report.failed,
        "annotated moon phases"
    );
    report
}

/// Counts reported after parsing a raw calendar.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Summary {
    pub total: usize,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
    /// Records flagged strict fast, as `(date, feast_name)`.
    pub strict_fast_days: Vec<(String, String)>,
    /// Records with the fish flag, which the weekly Wednesday/Friday rule sets.
    pub fish_days: usize,
}

impl Summary {
    pub fn of(records: &[FeastRecord]) -> Self {
        Self {
            total: records.len(),
            first_date: records.iter().map(|r| &r.date).min().cloned(),
            last_date: records.iter().map(|r| &r.date).max().cloned(),
            strict_fast_days: records
                .iter()
                .filter(|r| r.show_strict_fast)
                .map(|r| (r.date.clone(), r.feast_name.clone()))
                .collect(),
            fish_days: records.iter().filter(|r| r.show_fish).count(),
        }
    }

    /// Emit the summary at info level, one event per strict-fast day.
    pub fn log(&self) {
        if self.total == 0 {
            warn!("no feasts were parsed");
            return;
        }
        info!("{self}");
        for (date, name) in &self.strict_fast_days {
            let short: String = name.chars().take(50).collect();
            info!(%date, feast = %short, "strict fast day");
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} feasts, {} to {}, {} strict fast days, {} fish days",
            self.total,
            self.first_date.as_deref().unwrap_or("-"),
            self.last_date.as_deref().unwrap_or("-"),
            self.strict_fast_days.len(),
            self.fish_days
        )
    }
}
