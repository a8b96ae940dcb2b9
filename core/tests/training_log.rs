use chrono::NaiveDate;
use matlog_core::analytics::sides::SidePolicy;
use matlog_core::{
    build_draft, compute, parse_args, AnalyticsOptions, AnalyticsService, Category, Config,
    EntryService, FileEntryRepository, TechniqueLabel, TrainingEntry,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn entry(date: NaiveDate, hours: &str, got: &[&str], received: &[&str], sweeps: &[&str]) -> TrainingEntry {
    let mut e = TrainingEntry::new(date, hours);
    e.submissions_got = got.iter().map(|l| TechniqueLabel::parse(l)).collect();
    e.submissions_received = received.iter().map(|l| TechniqueLabel::parse(l)).collect();
    e.sweeps = sweeps.iter().map(|l| TechniqueLabel::parse(l)).collect();
    e
}

fn sample_log() -> Vec<TrainingEntry> {
    vec![
        entry(ymd(2024, 3, 20), "1.5", &["Armbar (L)", "Kimura"], &["Triangle Choke (R)"], &["Scissor Sweep (R)"]),
        entry(ymd(2024, 1, 7), "abc", &["Kimura (R)"], &[], &["Flower Sweep"]),
        entry(ymd(2024, 1, 1), "2", &["Armbar (L)"], &["Kimura (L)", "Kimura (R)"], &[]),
        entry(ymd(2024, 2, 14), "", &[], &[], &["Scissor Sweep (R)", "Scissor Sweep (L)"]),
    ]
}

#[test]
fn totals_and_frequency_identities() {
    let entries = sample_log();
    let analytics = compute(&entries, ymd(2024, 3, 21), &AnalyticsOptions::default());

    assert_eq!(analytics.totals.total_sessions, 4);
    assert_eq!(analytics.totals.total_hours, 3.5);
    assert_eq!(analytics.totals.average_session_hours, 3.5 / 4.0);

    for category in Category::ALL {
        let occurrences: usize = entries.iter().map(|e| e.labels(category).len()).sum();
        let stats = analytics.category(category);
        assert_eq!(stats.frequencies.total(), occurrences);

        if let Some(sides) = &stats.sides {
            assert_eq!(sides.totals.left + sides.totals.right, occurrences);
            assert_eq!(sides.totals.unmarked, 0);
        }
    }
}

#[test]
fn strict_policy_keeps_unmarked_labels_apart() {
    let options = AnalyticsOptions {
        side_policy: SidePolicy::Strict,
        ..AnalyticsOptions::default()
    };
    let analytics = compute(&sample_log(), ymd(2024, 3, 21), &options);

    let got = analytics.submissions_got.sides.as_ref().unwrap();
    let kimura = got.technique("Kimura").unwrap();
    assert_eq!((kimura.left, kimura.right, kimura.unmarked), (0, 1, 1));
    assert_eq!(got.totals.left + got.totals.right + got.totals.unmarked, 4);
}

#[test]
fn time_buckets_are_sorted_by_period() {
    let analytics = compute(&sample_log(), ymd(2024, 3, 21), &AnalyticsOptions::default());

    let weeks: Vec<_> = analytics
        .weekly_hours
        .iter()
        .map(|w| (w.period.as_str(), w.hours))
        .collect();
    assert_eq!(
        weeks,
        vec![("2024-W01", 2.0), ("2024-W07", 0.0), ("2024-W12", 1.5)]
    );

    let months: Vec<_> = analytics
        .monthly_hours
        .iter()
        .map(|m| m.period.as_str())
        .collect();
    assert_eq!(months, vec!["2024-01", "2024-02", "2024-03"]);
}

#[test]
fn pie_segments_close_the_circle() {
    let analytics = compute(&sample_log(), ymd(2024, 3, 21), &AnalyticsOptions::default());

    for pie in [
        &analytics.submissions_got.pie,
        &analytics.sweeps.pie,
        &analytics.submission_balance,
    ] {
        let sweep: f64 = pie.iter().map(|s| s.sweep_angle).sum();
        assert!((sweep - 360.0).abs() < 1e-9);
        let first = pie.first().unwrap();
        let last = pie.last().unwrap();
        assert!((last.end_angle - (first.start_angle + 360.0)).abs() < 1e-9);
    }

    let balance = &analytics.submission_balance;
    assert_eq!(balance[0].value, 4);
    assert_eq!(balance[1].value, 3);
}

#[test]
fn recency_window_is_relative_to_today() {
    let entries = sample_log();
    let options = AnalyticsOptions::default();

    let march = compute(&entries, ymd(2024, 3, 21), &options);
    assert_eq!(march.recent.len(), 1);

    let january = compute(&entries, ymd(2024, 1, 10), &options);
    let dates: Vec<_> = january.recent.iter().map(|r| r.date).collect();
    // Future-dated sessions are within the window too
    assert_eq!(dates, vec![ymd(2024, 3, 20), ymd(2024, 1, 7), ymd(2024, 1, 1), ymd(2024, 2, 14)]);
}

#[test]
fn logged_sessions_flow_into_analytics() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = Config::load(Some(temp_dir.path().to_path_buf())).unwrap();
    config.ensure_dirs().unwrap();

    let today = ymd(2024, 1, 10);
    let entries = EntryService::new(FileEntryRepository::new(&config.data_dir).unwrap());
    for args in [
        vec!["date:2024-01-01", "hours:1.5", "got:Armbar (L)"],
        vec!["d:2024-01-08", "h:2", "got:Armbar (R)", "got:Armbar (L)", "rec:Kimura (R)", "good", "rolls"],
    ] {
        let args: Vec<String> = args.into_iter().map(String::from).collect();
        let draft = build_draft(&parse_args(&args), today).unwrap();
        entries.add_entry(draft).unwrap();
    }

    let stored = entries.list_entries().unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].date, ymd(2024, 1, 8));
    assert_eq!(stored[0].notes, "good rolls");

    let service = AnalyticsService::new(
        FileEntryRepository::new(&config.data_dir).unwrap(),
        config.settings.analytics_options(),
    );
    let analytics = service.analytics_on(today).unwrap();

    assert_eq!(analytics.totals.total_hours, 3.5);
    assert_eq!(analytics.totals.total_sessions, 2);
    let got = &analytics.submissions_got;
    assert_eq!(got.frequencies.count("Armbar (L)"), 2);
    assert_eq!(got.frequencies.count("Armbar (R)"), 1);
    let armbar = got.sides.as_ref().unwrap().technique("Armbar").unwrap();
    assert_eq!((armbar.left, armbar.right), (2, 1));
    assert_eq!(got.most_common.as_ref().unwrap().label, "Armbar (L)");
    assert_eq!(got.most_common.as_ref().unwrap().count, 2);
}
