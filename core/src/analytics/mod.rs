//! Training statistics derived from a snapshot of entries.
//!
//! Everything here is a pure function of its inputs: no I/O, no clock reads
//! except in [`compute_now`], and the input slice is never reordered.

pub mod buckets;
pub mod chart;
pub mod frequency;
pub mod sides;
pub mod trends;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::model::category::Category;
use crate::model::entry::TrainingEntry;

use buckets::{monthly_hours, weekly_hours, PeriodHours};
use chart::{pie_segments, pie_slices, ChartFrame, PieSegment, PieSlice, GOT_COLOR, RECEIVED_COLOR};
use frequency::{FrequencyTable, RankedLabel};
use sides::{split_by_side, SidePolicy, SideSplit};
use trends::{recent_sessions, RecentSession, DEFAULT_WINDOW_DAYS};

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsOptions {
    pub side_policy: SidePolicy,
    /// Slices per category pie; the rest of the ranking is left out.
    pub pie_slices: usize,
    pub recent_window_days: i64,
    pub frame: ChartFrame,
}

impl Default for AnalyticsOptions {
    fn default() -> Self {
        Self {
            side_policy: SidePolicy::Compat,
            pie_slices: 6,
            recent_window_days: DEFAULT_WINDOW_DAYS,
            frame: ChartFrame::default(),
        }
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct Totals {
    pub total_hours: f64,
    pub total_sessions: usize,
    pub average_session_hours: f64,
    pub submissions_got: usize,
    pub submissions_received: usize,
    /// Got per received; equals `submissions_got` when nothing was received.
    pub submission_ratio: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CategoryStats {
    pub category: Category,
    pub frequencies: FrequencyTable,
    pub ranking: Vec<RankedLabel>,
    pub most_common: Option<RankedLabel>,
    /// Present for side-aware categories only.
    pub sides: Option<SideSplit>,
    pub pie: Vec<PieSegment>,
}

impl CategoryStats {
    pub fn top(&self, n: usize) -> &[RankedLabel] {
        &self.ranking[..n.min(self.ranking.len())]
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Analytics {
    pub totals: Totals,
    pub submissions_got: CategoryStats,
    pub submissions_received: CategoryStats,
    pub sweeps: CategoryStats,
    pub dominant_positions: CategoryStats,
    pub weekly_hours: Vec<PeriodHours>,
    pub monthly_hours: Vec<PeriodHours>,
    pub recent: Vec<RecentSession>,
    /// Two-slice ring: submissions got vs received.
    pub submission_balance: Vec<PieSegment>,
}

impl Analytics {
    pub fn category(&self, category: Category) -> &CategoryStats {
        match category {
            Category::SubmissionsGot => &self.submissions_got,
            Category::SubmissionsReceived => &self.submissions_received,
            Category::Sweeps => &self.sweeps,
            Category::DominantPositions => &self.dominant_positions,
        }
    }
}

pub fn compute_now(entries: &[TrainingEntry], options: &AnalyticsOptions) -> Analytics {
    compute(entries, Local::now().date_naive(), options)
}

/// Builds the full statistics for `entries`, with `today` anchoring the
/// recent-sessions window. Empty input yields zero totals and empty lists.
pub fn compute(entries: &[TrainingEntry], today: NaiveDate, options: &AnalyticsOptions) -> Analytics {
    let submissions_got = category_stats(entries, Category::SubmissionsGot, options);
    let submissions_received = category_stats(entries, Category::SubmissionsReceived, options);
    let sweeps = category_stats(entries, Category::Sweeps, options);
    let dominant_positions = category_stats(entries, Category::DominantPositions, options);

    let totals = totals(
        entries,
        submissions_got.frequencies.total(),
        submissions_received.frequencies.total(),
    );

    let balance = [
        PieSlice {
            label: "Submissions Got".to_string(),
            value: totals.submissions_got,
            color: GOT_COLOR,
        },
        PieSlice {
            label: "Submissions Received".to_string(),
            value: totals.submissions_received,
            color: RECEIVED_COLOR,
        },
    ];
    let submission_balance = if totals.submissions_got + totals.submissions_received == 0 {
        Vec::new()
    } else {
        pie_segments(&balance, options.frame)
    };

    Analytics {
        totals,
        submissions_got,
        submissions_received,
        sweeps,
        dominant_positions,
        weekly_hours: weekly_hours(entries),
        monthly_hours: monthly_hours(entries),
        recent: recent_sessions(entries, today, options.recent_window_days),
        submission_balance,
    }
}

fn totals(entries: &[TrainingEntry], got: usize, received: usize) -> Totals {
    let total_hours: f64 = entries.iter().map(TrainingEntry::hours).sum();
    let total_sessions = entries.len();
    let average_session_hours = if total_sessions == 0 {
        0.0
    } else {
        total_hours / total_sessions as f64
    };
    let submission_ratio = if received > 0 {
        got as f64 / received as f64
    } else {
        got as f64
    };

    Totals {
        total_hours,
        total_sessions,
        average_session_hours,
        submissions_got: got,
        submissions_received: received,
        submission_ratio,
    }
}

fn category_stats(
    entries: &[TrainingEntry],
    category: Category,
    options: &AnalyticsOptions,
) -> CategoryStats {
    let labels = move || entries.iter().flat_map(move |e| e.labels(category));

    let frequencies = FrequencyTable::from_labels(labels().map(|l| l.to_string()));
    let ranking = frequencies.ranked();
    let most_common = frequencies.most_common();
    let sides = category
        .is_side_aware()
        .then(|| split_by_side(labels(), options.side_policy));
    let pie = pie_segments(&pie_slices(&ranking, options.pie_slices), options.frame);

    CategoryStats {
        category,
        frequencies,
        ranking,
        most_common,
        sides,
        pie,
    }
}
