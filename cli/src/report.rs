use matlog_core::analytics::chart::PieSegment;
use matlog_core::analytics::frequency::RankedLabel;
use matlog_core::analytics::sides::SideSplit;
use matlog_core::catalog::{base_techniques, glossary_items, search_glossary, GlossaryItem};
use matlog_core::{Analytics, Category, TechniqueLabel, TrainingEntry};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use unicode_width::UnicodeWidthChar;

use crate::short_id;

const NOTES_WIDTH: usize = 30;

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Hours")]
    hours: String,
    #[tabled(rename = "Got")]
    got: String,
    #[tabled(rename = "Received")]
    received: String,
    #[tabled(rename = "Sweeps")]
    sweeps: String,
    #[tabled(rename = "Positions")]
    positions: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct RankRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Technique")]
    label: String,
    #[tabled(rename = "Count")]
    count: usize,
}

#[derive(Tabled)]
struct SideRow {
    #[tabled(rename = "Technique")]
    name: String,
    #[tabled(rename = "L")]
    left: usize,
    #[tabled(rename = "R")]
    right: usize,
}

#[derive(Tabled)]
struct StrictSideRow {
    #[tabled(rename = "Technique")]
    name: String,
    #[tabled(rename = "L")]
    left: usize,
    #[tabled(rename = "R")]
    right: usize,
    #[tabled(rename = "Unmarked")]
    unmarked: usize,
}

#[derive(Tabled)]
struct PeriodRow {
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Hours")]
    hours: String,
}

#[derive(Tabled)]
struct RecentRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Hours")]
    hours: String,
    #[tabled(rename = "Got")]
    got: usize,
    #[tabled(rename = "Received")]
    received: usize,
}

#[derive(Tabled)]
struct SegmentRow {
    #[tabled(rename = "Slice")]
    label: String,
    #[tabled(rename = "Value")]
    value: usize,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "Arc")]
    arc: String,
    #[tabled(rename = "Color")]
    color: &'static str,
}

#[derive(Tabled)]
struct GlossaryRow {
    #[tabled(rename = "Position")]
    section: &'static str,
    #[tabled(rename = "Group")]
    group: &'static str,
    #[tabled(rename = "Technique")]
    technique: &'static str,
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{}", table);
}

fn heading(title: &str) {
    println!("\n\x1b[1;36m{}\x1b[0m", title);
}

fn join_labels(labels: &[TechniqueLabel]) -> String {
    labels
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cuts `text` to `width` terminal columns, marking the cut with `…`.
fn truncate(text: &str, width: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= width {
        return text.to_string();
    }

    let budget = width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

fn format_hours(hours: f64) -> String {
    format!("{:.1}", hours)
}

pub fn show_entries(entries: &[TrainingEntry]) {
    if entries.is_empty() {
        println!("No sessions logged yet.");
        return;
    }

    let rows = entries
        .iter()
        .map(|e| EntryRow {
            id: short_id(&e.id).to_string(),
            date: e.date.format("%Y-%m-%d (%a)").to_string(),
            hours: format_hours(e.hours()),
            got: join_labels(&e.submissions_got),
            received: join_labels(&e.submissions_received),
            sweeps: join_labels(&e.sweeps),
            positions: join_labels(&e.dominant_positions),
            notes: truncate(&e.notes, NOTES_WIDTH),
        })
        .collect();
    print_table::<EntryRow>(rows);
}

pub fn show_entry_detail(entry: &TrainingEntry) {
    println!("  Hours: {}", format_hours(entry.hours()));
    for category in Category::ALL {
        let labels = entry.labels(category);
        if !labels.is_empty() {
            let joined: Vec<String> = labels.iter().map(|l| l.to_string()).collect();
            println!("  {}: {}", category.title(), joined.join(", "));
        }
    }
    if !entry.notes.is_empty() {
        println!("  Notes: {}", entry.notes);
    }
}

pub fn show_stats(analytics: &Analytics, top_n: usize) {
    let totals = &analytics.totals;
    if totals.total_sessions == 0 {
        println!("No sessions logged yet.");
        return;
    }

    heading("Overview");
    print_table(vec![
        MetricRow { metric: "Total hours", value: format_hours(totals.total_hours) },
        MetricRow { metric: "Sessions", value: totals.total_sessions.to_string() },
        MetricRow { metric: "Average session", value: format!("{}h", format_hours(totals.average_session_hours)) },
        MetricRow { metric: "Submissions got", value: totals.submissions_got.to_string() },
        MetricRow { metric: "Submissions received", value: totals.submissions_received.to_string() },
        MetricRow { metric: "Submission ratio", value: format!("{:.2}", totals.submission_ratio) },
    ]);

    for category in Category::ALL {
        let stats = analytics.category(category);
        heading(category.title());
        if stats.ranking.is_empty() {
            println!("Nothing logged.");
            continue;
        }
        if let Some(best) = &stats.most_common {
            println!("Most common: {} ({}x)", best.label, best.count);
        }
        print_ranking(stats.top(top_n));
        if let Some(sides) = &stats.sides {
            print_sides(sides);
        }
        print_segments(&stats.pie);
    }

    heading("Weekly Hours");
    print_periods(&analytics.weekly_hours);
    heading("Monthly Hours");
    print_periods(&analytics.monthly_hours);

    heading("Recent Sessions");
    if analytics.recent.is_empty() {
        println!("No sessions in the recent window.");
    } else {
        let rows = analytics
            .recent
            .iter()
            .map(|r| RecentRow {
                date: r.date.format("%Y-%m-%d").to_string(),
                hours: format_hours(r.hours),
                got: r.submissions_got,
                received: r.submissions_received,
            })
            .collect();
        print_table::<RecentRow>(rows);
    }

    if !analytics.submission_balance.is_empty() {
        heading("Submissions Got vs Received");
        print_segments(&analytics.submission_balance);
    }
}

fn print_ranking(ranking: &[RankedLabel]) {
    let rows = ranking
        .iter()
        .enumerate()
        .map(|(i, r)| RankRow {
            rank: i + 1,
            label: r.label.clone(),
            count: r.count,
        })
        .collect();
    print_table::<RankRow>(rows);
}

fn print_sides(sides: &SideSplit) {
    let totals = &sides.totals;
    let mut summary = format!("Left: {}  Right: {}", totals.left, totals.right);
    if totals.unmarked > 0 {
        summary.push_str(&format!("  Unmarked: {}", totals.unmarked));
    }
    if let Some(top) = &sides.top_left {
        summary.push_str(&format!("  Top left: {} ({}x)", top.label, top.count));
    }
    if let Some(top) = &sides.top_right {
        summary.push_str(&format!("  Top right: {} ({}x)", top.label, top.count));
    }
    println!("{}", summary);

    if totals.unmarked > 0 {
        let rows = sides
            .techniques
            .iter()
            .map(|t| StrictSideRow {
                name: t.name.clone(),
                left: t.counts.left,
                right: t.counts.right,
                unmarked: t.counts.unmarked,
            })
            .collect();
        print_table::<StrictSideRow>(rows);
    } else {
        let rows = sides
            .techniques
            .iter()
            .map(|t| SideRow {
                name: t.name.clone(),
                left: t.counts.left,
                right: t.counts.right,
            })
            .collect();
        print_table::<SideRow>(rows);
    }
}

fn print_segments(segments: &[PieSegment]) {
    let rows = segments
        .iter()
        .map(|s| SegmentRow {
            label: s.label.clone(),
            value: s.value,
            share: format!("{:.1}%", s.percent()),
            arc: format!("{:.1}° → {:.1}°", s.start_angle, s.end_angle),
            color: s.color,
        })
        .collect();
    print_table::<SegmentRow>(rows);
}

fn print_periods(periods: &[matlog_core::analytics::buckets::PeriodHours]) {
    let rows = periods
        .iter()
        .map(|p| PeriodRow {
            period: p.period.clone(),
            hours: format_hours(p.hours),
        })
        .collect();
    print_table::<PeriodRow>(rows);
}

pub fn show_techniques(search: Option<&str>) {
    let items: Vec<GlossaryItem> = match search {
        Some(term) => search_glossary(term),
        None => glossary_items().collect(),
    };

    if items.is_empty() {
        println!("No techniques match '{}'.", search.unwrap_or_default());
        return;
    }

    heading("Glossary");
    let rows = items
        .iter()
        .map(|item| GlossaryRow {
            section: item.section,
            group: item.group,
            technique: item.technique,
        })
        .collect();
    print_table::<GlossaryRow>(rows);

    if search.is_none() {
        for category in [Category::SubmissionsGot, Category::Sweeps, Category::DominantPositions] {
            let title = match category {
                Category::SubmissionsGot => "Submissions",
                _ => category.title(),
            };
            heading(&format!("{} (tag picker)", title));
            println!("{}", base_techniques(category).join(", "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_fits_width() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly ten", 11), "exactly ten");
        assert_eq!(truncate("a longer note here", 8), "a longe…");
        // Wide characters take two columns each
        assert_eq!(truncate("柔術の練習をした", 7), "柔術の…");
    }

    #[test]
    fn test_join_labels_keeps_side_markers() {
        let labels = vec![TechniqueLabel::parse("Armbar (L)"), TechniqueLabel::parse("Kimura")];
        assert_eq!(join_labels(&labels), "Armbar (L)\nKimura");
    }
}
