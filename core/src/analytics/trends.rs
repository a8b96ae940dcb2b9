use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::model::entry::TrainingEntry;

pub const DEFAULT_WINDOW_DAYS: i64 = 28;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RecentSession {
    pub date: NaiveDate,
    pub hours: f64,
    pub submissions_got: usize,
    pub submissions_received: usize,
}

/// Sessions dated on or after `today - window_days`, in input order.
///
/// A window reaching past the earliest representable date keeps every session.
pub fn recent_sessions(
    entries: &[TrainingEntry],
    today: NaiveDate,
    window_days: i64,
) -> Vec<RecentSession> {
    let cutoff = Duration::try_days(window_days).and_then(|w| today.checked_sub_signed(w));
    entries
        .iter()
        .filter(|e| cutoff.map_or(true, |cutoff| e.date >= cutoff))
        .map(|e| RecentSession {
            date: e.date,
            hours: e.hours(),
            submissions_got: e.submissions_got.len(),
            submissions_received: e.submissions_received.len(),
        })
        .collect()
}
