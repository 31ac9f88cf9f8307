//! Per-month JSON export of calendar records.

use chrono::Datelike;
use tracing::warn;

use crate::error::FeastError;
use crate::record::FeastRecord;

/// Records falling in `month` (1..=12), sorted by date.
///
/// Records whose date does not parse are skipped with a warning.
pub fn records_for_month(
    records: &[FeastRecord],
    month: u32,
) -> Result<Vec<&FeastRecord>, FeastError> {
    if !(1..=12).contains(&month) {
        return Err(FeastError::InvalidMonth { month });
    }
    let mut selected: Vec<&FeastRecord> = records
        .iter()
        .filter(|r| match r.parsed_date() {
            Ok(date) => date.month() == month,
            Err(e) => {
                warn!(error = %e, "skipping record in month export");
                false
            }
        })
        .collect();
    selected.sort_by(|a, b| a.date.cmp(&b.date));
    Ok(selected)
}

/// Pretty-printed JSON array of the records in `month`.
pub fn month_json(records: &[FeastRecord], month: u32) -> Result<String, FeastError> {
    let selected = records_for_month(records, month)?;
    Ok(serde_json::to_string_pretty(&selected)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<FeastRecord> {
        vec![
            FeastRecord::new("2025-02-02", "Сретение Господне"),
            FeastRecord::new("2025-01-06", "Богоявление"),
            FeastRecord::new("2025-01-01", "Васильовден"),
            FeastRecord::new("2025-1-15", "broken"),
        ]
    }

    #[test]
    fn filters_and_sorts() {
        let records = sample();
        let january = records_for_month(&records, 1).unwrap();
        let dates: Vec<_> = january.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["2025-01-01", "2025-01-06"]);
    }

    #[test]
    fn rejects_bad_month() {
        assert!(matches!(
            records_for_month(&sample(), 13),
            Err(FeastError::InvalidMonth { month: 13 })
        ));
        assert!(records_for_month(&sample(), 0).is_err());
    }

    #[test]
    fn json_shape() {
        let json = month_json(&sample(), 2).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["date"], "2025-02-02");
        assert_eq!(rows[0]["feast_name"], "Сретение Господне");
        assert_eq!(rows[0]["show_fish"], false);
        assert!(rows[0].get("moon_phase").is_none());
    }

    #[test]
    fn empty_month_is_empty_array() {
        assert_eq!(month_json(&sample(), 7).unwrap(), "[]");
    }
}
