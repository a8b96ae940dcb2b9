use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::entry::TrainingEntry;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PeriodHours {
    pub period: String,
    pub hours: f64,
}

/// `YYYY-W##`, where week 1 is Jan 1–7, week 2 is Jan 8–14 and so on.
///
/// This is an ordinal week (`ceil(day_of_year / 7)`), not an ISO-8601 week:
/// weeks never straddle a year boundary and the last one may be 1 or 2 days
/// long (week 53).
pub fn week_key(date: NaiveDate) -> String {
    let week = (date.ordinal() + 6) / 7;
    format!("{:04}-W{:02}", date.year(), week)
}

/// `YYYY-MM`.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Sums hours per period key. The output is sorted by key, which is
/// chronological because keys are fixed width and year-major.
pub fn hours_by<F>(entries: &[TrainingEntry], key: F) -> Vec<PeriodHours>
where
    F: Fn(NaiveDate) -> String,
{
    let mut buckets: BTreeMap<String, f64> = BTreeMap::new();
    for entry in entries {
        *buckets.entry(key(entry.date)).or_default() += entry.hours();
    }
    buckets
        .into_iter()
        .map(|(period, hours)| PeriodHours { period, hours })
        .collect()
}

pub fn weekly_hours(entries: &[TrainingEntry]) -> Vec<PeriodHours> {
    hours_by(entries, week_key)
}

pub fn monthly_hours(entries: &[TrainingEntry]) -> Vec<PeriodHours> {
    hours_by(entries, month_key)
}
