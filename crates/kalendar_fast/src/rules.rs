//! Rule descriptors and the ordered rule table.
//!
//! A [`FastRuleSet`] is evaluated top to bottom. `Set` effects switch one
//! flag on, `Override` effects replace all three flags, and `Downgrade`
//! relaxes the fast by one level. Later rules win on conflict.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use tracing::trace;

use crate::flags::{FastFlag, FastFlags};

/// Feast-name marker: fish is permitted.
pub const FISH_PERMITTED_MARKER: &str = "Разрешава се риба";

/// Feast-name marker: no fasting at all.
pub const NO_FASTING_MARKER: &str = "Блажи се";

/// Feast-name marker: feast of a higher rank, relaxes the fast one level.
pub const DAGGER_MARKER: &str = "†";

/// A month/day pair resolved against the record's own year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    pub const fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }

    /// The date in `year`, or `None` if it does not exist (Feb 29).
    pub fn in_year(self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }

    pub fn matches(self, date: NaiveDate) -> bool {
        date.month() == self.month && date.day() == self.day
    }
}

/// When a rule fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulePredicate {
    /// The date falls on one of these weekdays.
    Weekdays(Vec<Weekday>),
    /// `start` through `start + days`, inclusive.
    Span { start: MonthDay, days: i64 },
    /// `start` through `end`, inclusive, within one year.
    Range { start: MonthDay, end: MonthDay },
    /// Exactly one of these days.
    Days(Vec<MonthDay>),
    /// The feast name contains this text.
    FeastContains(String),
}

impl RulePredicate {
    pub fn matches(&self, date: NaiveDate, feast_name: &str) -> bool {
        match self {
            Self::Weekdays(days) => days.contains(&date.weekday()),
            Self::Span { start, days } => start
                .in_year(date.year())
                .is_some_and(|from| from <= date && date <= from + Duration::days(*days)),
            Self::Range { start, end } => {
                match (start.in_year(date.year()), end.in_year(date.year())) {
                    (Some(from), Some(to)) => from <= date && date <= to,
                    _ => false,
                }
            }
            Self::Days(days) => days.iter().any(|d| d.matches(date)),
            Self::FeastContains(marker) => feast_name.contains(marker.as_str()),
        }
    }
}

/// What a rule does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleEffect {
    /// Switch one flag on.
    Set(FastFlag),
    /// Replace all three flags.
    Override(FastFlags),
    /// Relax the fast by one level.
    Downgrade,
}

impl RuleEffect {
    fn apply(self, flags: &mut FastFlags) {
        match self {
            Self::Set(flag) => flags.set(flag, true),
            Self::Override(replacement) => *flags = replacement,
            Self::Downgrade => flags.downgrade(),
        }
    }
}

/// A labelled predicate/effect pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastRule {
    pub label: &'static str,
    pub predicate: RulePredicate,
    pub effect: RuleEffect,
}

impl FastRule {
    pub fn new(label: &'static str, predicate: RulePredicate, effect: RuleEffect) -> Self {
        Self {
            label,
            predicate,
            effect,
        }
    }
}

/// An ordered list of rules.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FastRuleSet {
    rules: Vec<FastRule>,
}

impl FastRuleSet {
    pub fn new(rules: Vec<FastRule>) -> Self {
        Self { rules }
    }

    /// The Bulgarian Orthodox fasting table.
    pub fn standard() -> Self {
        use FastFlag::{Fish, Oil, StrictFast};
        use RuleEffect::{Downgrade, Override, Set};
        use RulePredicate::{Days, FeastContains, Range, Span, Weekdays};

        let md = MonthDay::new;
        Self::new(vec![
            FastRule::new(
                "wednesday-friday",
                Weekdays(vec![Weekday::Wed, Weekday::Fri]),
                Set(Fish),
            ),
            FastRule::new("great-lent", Span { start: md(3, 3), days: 49 }, Set(Oil)),
            FastRule::new("dormition-fast", Span { start: md(8, 1), days: 15 }, Set(Oil)),
            FastRule::new(
                "theophany-eve-beheading",
                Days(vec![md(1, 5), md(8, 29)]),
                Set(StrictFast),
            ),
            FastRule::new(
                "nativity-fast-opening",
                Days(vec![md(11, 15), md(11, 17), md(11, 18), md(11, 19)]),
                Set(Oil),
            ),
            FastRule::new("nativity-fast", Range { start: md(11, 15), end: md(12, 24) }, Set(Oil)),
            FastRule::new(
                "nativity-forefeast",
                Days(vec![md(12, 20), md(12, 21), md(12, 22), md(12, 23), md(12, 24)]),
                Set(Oil),
            ),
            FastRule::new("clean-week", Range { start: md(3, 3), end: md(3, 7) }, Set(StrictFast)),
            FastRule::new("holy-week", Range { start: md(4, 14), end: md(4, 16) }, Set(StrictFast)),
            FastRule::new("apostles-fast", Range { start: md(6, 15), end: md(6, 29) }, Set(Fish)),
            FastRule::new(
                "fish-permitted",
                FeastContains(FISH_PERMITTED_MARKER.to_string()),
                Override(FastFlags::new(true, false, false)),
            ),
            FastRule::new(
                "no-fasting",
                FeastContains(NO_FASTING_MARKER.to_string()),
                Override(FastFlags::NONE),
            ),
            FastRule::new("dagger", FeastContains(DAGGER_MARKER.to_string()), Downgrade),
        ])
    }

    pub fn rules(&self) -> &[FastRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate every rule in order on top of `flags`.
    pub fn apply(&self, date: NaiveDate, feast_name: &str, mut flags: FastFlags) -> FastFlags {
        for rule in &self.rules {
            if rule.predicate.matches(date, feast_name) {
                trace!(rule = rule.label, %date, "fast rule matched");
                rule.effect.apply(&mut flags);
            }
        }
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn standard_table_order() {
        let labels: Vec<_> = FastRuleSet::standard().rules().iter().map(|r| r.label).collect();
        assert_eq!(labels.len(), 13);
        assert_eq!(labels[0], "wednesday-friday");
        assert_eq!(labels[10], "fish-permitted");
        assert_eq!(labels[11], "no-fasting");
        assert_eq!(labels[12], "dagger");
    }

    #[test]
    fn span_is_inclusive_on_both_ends() {
        let p = RulePredicate::Span {
            start: MonthDay::new(3, 3),
            days: 49,
        };
        assert!(!p.matches(date(2025, 3, 2), ""));
        assert!(p.matches(date(2025, 3, 3), ""));
        assert!(p.matches(date(2025, 4, 21), ""));
        assert!(!p.matches(date(2025, 4, 22), ""));
    }

    #[test]
    fn dormition_span_ends_on_the_sixteenth() {
        let p = RulePredicate::Span {
            start: MonthDay::new(8, 1),
            days: 15,
        };
        assert!(p.matches(date(2025, 8, 16), ""));
        assert!(!p.matches(date(2025, 8, 17), ""));
    }

    #[test]
    fn range_uses_record_year() {
        let p = RulePredicate::Range {
            start: MonthDay::new(11, 15),
            end: MonthDay::new(12, 24),
        };
        assert!(p.matches(date(2031, 12, 1), ""));
        assert!(!p.matches(date(2031, 12, 25), ""));
    }

    #[test]
    fn leap_day_month_day_absent_in_common_year() {
        assert!(MonthDay::new(2, 29).in_year(2025).is_none());
        let p = RulePredicate::Range {
            start: MonthDay::new(2, 29),
            end: MonthDay::new(3, 1),
        };
        assert!(!p.matches(date(2025, 3, 1), ""));
        assert!(p.matches(date(2024, 3, 1), ""));
    }

    #[test]
    fn override_replaces_all_flags() {
        let set = FastRuleSet::new(vec![FastRule::new(
            "wipe",
            RulePredicate::FeastContains("x".into()),
            RuleEffect::Override(FastFlags::NONE),
        )]);
        let out = set.apply(date(2025, 1, 1), "x", FastFlags::new(true, true, true));
        assert_eq!(out, FastFlags::NONE);
    }

    #[test]
    fn empty_set_is_identity() {
        let set = FastRuleSet::default();
        assert!(set.is_empty());
        let flags = FastFlags::new(true, false, true);
        assert_eq!(set.apply(date(2025, 6, 18), "", flags), flags);
    }
}
