//! Parser for the raw, line-oriented Bulgarian calendar text.
//!
//! The text lists each month by name, then each day as a line starting with
//! a two-digit day number (and the weekday), followed by one or more feast
//! lines for that day:
//!
//! ```text
//! Януари
//! 01 Сряда
//! Обрезание Господне. Св. Василий Велики
//! 02 Четвъртък
//! Св. Силвестър, папа Римски
//! ```

use std::path::Path;
use std::sync::LazyLock;

use chrono::NaiveDate;
use kalendar_fast::{FastFlags, apply_rules};
use regex::Regex;
use tracing::{debug, info, warn};

use crate::error::FeastError;
use crate::record::FeastRecord;
use crate::table::read_text_file;

/// Year assumed for raw calendar text.
pub const DEFAULT_YEAR: i32 = 2025;

/// Bulgarian month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "Януари",
    "Февруари",
    "Март",
    "Април",
    "Май",
    "Юни",
    "Юли",
    "Август",
    "Септември",
    "Октомври",
    "Ноември",
    "Декември",
];

/// Feast lines must be longer than this many characters.
const MIN_FEAST_CHARS: usize = 3;

static DAY_LINE: LazyLock<Regex> = LazyLock::new(|| compile(r"^(\d{2})\s+\S"));
static LEADING_DIGITS: LazyLock<Regex> = LazyLock::new(|| compile(r"^\d{2}"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| compile(r"\s+"));

/// Liturgical annotations removed in clean mode, applied in order.
static ANNOTATIONS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"†\s*",
        r"\*\s*",
        r"\([^)]*\)",
        r"\[[^\]]*\]",
        r"Гл\.\s*\d+.*$",
        r"утр\.\s*ев\..*$",
        r"лит\.\s*ев\..*$",
        r"ап\..*$",
        r"с\.\s*\d+.*$",
        r"стр\.\s*\d+.*$",
        r"т\.\s*\d+.*$",
        r"вечерта.*$",
        r"сутринта.*$",
    ]
    .iter()
    .map(|p| compile(&format!("(?i){p}")))
    .collect()
});

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Invalid regex pattern")
}

/// Month number (1..=12) for a line starting with a Bulgarian month name.
pub fn month_of_line(line: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|name| line.starts_with(name))
        .map(|i| i as u32 + 1)
}

/// Strip liturgical annotations and collapse whitespace.
pub fn clean_feast_name(content: &str) -> String {
    let mut cleaned = content.trim().to_string();
    for pattern in ANNOTATIONS.iter() {
        cleaned = pattern.replace_all(&cleaned, "").into_owned();
    }
    WHITESPACE.replace_all(&cleaned, " ").trim().to_string()
}

/// Converts raw calendar text into feast records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextParser {
    year: i32,
    clean: bool,
    apply_fasts: bool,
}

impl Default for TextParser {
    fn default() -> Self {
        Self {
            year: DEFAULT_YEAR,
            clean: false,
            apply_fasts: true,
        }
    }
}

impl TextParser {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            ..Self::default()
        }
    }

    /// Strip annotations from feast names.
    pub fn with_clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    /// Compute fasting flags while parsing.
    pub fn with_fasts(mut self, apply_fasts: bool) -> Self {
        self.apply_fasts = apply_fasts;
        self
    }

    /// Parse a raw calendar file. An input with no feasts is an error.
    pub fn parse_file(&self, path: &Path) -> Result<Vec<FeastRecord>, FeastError> {
        let text = read_text_file(path)?;
        let records = self.parse_str(&text);
        if records.is_empty() {
            return Err(FeastError::NoFeasts {
                path: path.to_path_buf(),
            });
        }
        info!(path = %path.display(), feasts = records.len(), "parsed raw calendar");
        Ok(records)
    }

    /// Parse raw calendar text.
    ///
    /// All feast lines of one day fold into a single record: the first line
    /// names the feast and the rest form the description.
    pub fn parse_str(&self, text: &str) -> Vec<FeastRecord> {
        let mut records = Vec::new();
        let mut month: Option<u32> = None;
        let mut day: Option<u32> = None;
        let mut lines: Vec<&str> = Vec::new();

        for line in text.lines().map(str::trim) {
            if line.is_empty() {
                continue;
            }

            if let Some(m) = month_of_line(line) {
                debug!(month = m, "month header");
                self.flush(month, day, &mut lines, &mut records);
                month = Some(m);
                day = None;
                continue;
            }

            let Some(m) = month else {
                continue;
            };

            if let Some(caps) = DAY_LINE.captures(line) {
                let next = caps[1].parse().ok();
                if next != day {
                    self.flush(Some(m), day, &mut lines, &mut records);
                }
                day = next;
                continue;
            }
            if LEADING_DIGITS.is_match(line) {
                continue;
            }

            if day.is_none() || line.chars().count() <= MIN_FEAST_CHARS {
                continue;
            }
            lines.push(line);
        }
        self.flush(month, day, &mut lines, &mut records);
        records
    }

    fn flush(
        &self,
        month: Option<u32>,
        day: Option<u32>,
        lines: &mut Vec<&str>,
        records: &mut Vec<FeastRecord>,
    ) {
        if let (Some(m), Some(d), false) = (month, day, lines.is_empty()) {
            records.push(self.record(m, d, lines));
        }
        lines.clear();
    }

    fn record(&self, month: u32, day: u32, lines: &[&str]) -> FeastRecord {
        let date = format!("{:04}-{month:02}-{day:02}", self.year);
        let tidy = |line: &str| {
            if self.clean {
                clean_feast_name(line)
            } else {
                line.to_string()
            }
        };
        let mut record = FeastRecord::new(date, tidy(lines[0]));
        record.description = lines[1..]
            .iter()
            .map(|&line| tidy(line))
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("; ");

        if self.apply_fasts {
            // Rules see every raw line so markers removed by cleaning still count.
            let raw = lines.join(" ");
            match NaiveDate::from_ymd_opt(self.year, month, day) {
                Some(date) => record.set_flags(apply_rules(date, &raw, FastFlags::NONE)),
                None => warn!(
                    date = %record.date,
                    "calendar day does not exist, flags left unset"
                ),
            }
        }
        record
    }
}
