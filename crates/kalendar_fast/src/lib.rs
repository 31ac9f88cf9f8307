//! Fasting flags for the Bulgarian Orthodox calendar.
//!
//! This crate provides:
//! - [`FastFlags`], the fish/oil/strict-fast triple
//! - Rule descriptors ([`RulePredicate`], [`RuleEffect`]) and the ordered
//!   [`FastRuleSet::standard`] table
//! - [`apply_rules`], the standard table applied to one day

pub mod flags;
pub mod rules;

use std::sync::LazyLock;

use chrono::NaiveDate;

pub use flags::{FastFlag, FastFlags};
pub use rules::{
    DAGGER_MARKER, FISH_PERMITTED_MARKER, FastRule, FastRuleSet, MonthDay, NO_FASTING_MARKER,
    RuleEffect, RulePredicate,
};

static STANDARD_RULES: LazyLock<FastRuleSet> = LazyLock::new(FastRuleSet::standard);

/// Apply the standard table to one day, on top of `flags`.
///
/// Pass [`FastFlags::NONE`] to compute flags from scratch.
pub fn apply_rules(date: NaiveDate, feast_name: &str, flags: FastFlags) -> FastFlags {
    STANDARD_RULES.apply(date, feast_name, flags)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_tuesday_has_no_flags() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 7).unwrap();
        assert_eq!(apply_rules(d, "Събор на св. Йоан", FastFlags::NONE), FastFlags::NONE);
    }
}
