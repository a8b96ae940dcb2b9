use std::{io, time::Duration};

use anyhow::{anyhow, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use matlog_core::analytics::chart::{ChartFrame, PieSegment};
use matlog_core::{Analytics, AnalyticsService, Category, CategoryStats, EntryRepository};
use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Points},
        Bar, BarChart, BarGroup, Block, BorderType, Borders, Gauge, Padding, Paragraph,
    },
};
use tracing::debug;

// --- THEME ---
struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    hours: Color,
    got: Color,
    received: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    text: Color::White,
    hours: Color::Blue,
    got: Color::Green,
    received: Color::Red,
};

const BAR_WIDTH: u16 = 5;
const BAR_GAP: u16 = 1;
/// Arc samples per degree of sweep.
const SAMPLES_PER_DEGREE: f64 = 1.0;

pub struct DashboardApp {
    pub analytics: Analytics,
    pub frame: ChartFrame,
    pub selected: usize,
    pub top_n: usize,
}

impl DashboardApp {
    pub fn new(analytics: Analytics, frame: ChartFrame, top_n: usize) -> Self {
        Self {
            analytics,
            frame,
            selected: 0,
            top_n,
        }
    }

    pub fn next_category(&mut self) {
        if self.selected < Category::ALL.len() - 1 {
            self.selected += 1;
        }
    }

    pub fn previous_category(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn category(&self) -> Category {
        Category::ALL[self.selected]
    }

    pub fn current_stats(&self) -> &CategoryStats {
        self.analytics.category(self.category())
    }
}

pub fn run<R: EntryRepository>(service: &AnalyticsService<R>, top_n: usize) -> Result<()> {
    let analytics = service.analytics()?;
    if analytics.totals.total_sessions == 0 {
        println!("No sessions logged yet. Add one with: matlog add hours:1.5");
        return Ok(());
    }

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = DashboardApp::new(analytics, service.options().frame, top_n);
    let res = run_app(&mut terminal, &mut app, service);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend, R: EntryRepository>(
    terminal: &mut Terminal<B>,
    app: &mut DashboardApp,
    service: &AnalyticsService<R>,
) -> Result<()> {
    loop {
        terminal
            .draw(|f| ui(f, app))
            .map_err(|e| anyhow!(e.to_string()))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Left | KeyCode::Char('h') => app.previous_category(),
                        KeyCode::Right | KeyCode::Char('l') => app.next_category(),
                        KeyCode::Char('r') => {
                            app.analytics = service.analytics()?;
                            debug!("Dashboard reloaded");
                        }
                        _ => {}
                    }
                }
            }
        }
    }
}

fn ui(frame: &mut Frame, app: &DashboardApp) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Content
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    draw_header(frame, app, main_layout[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60),
            Constraint::Length(1), // Gutter
            Constraint::Percentage(40),
        ])
        .split(main_layout[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(content_chunks[0]);
    draw_weekly_chart(frame, app, left[0]);
    draw_ranking(frame, app, left[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Summary
            Constraint::Min(6),    // Ring
            Constraint::Length(3), // Balance gauge
        ])
        .split(content_chunks[2]);
    draw_summary(frame, app, right[0]);
    draw_ring(frame, app, right[1]);
    draw_balance(frame, app, right[2]);

    let help = Line::from(vec![
        Span::styled("CATEGORY: ", Style::default().fg(THEME.muted)),
        Span::styled("←/→ ", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("RELOAD: ", Style::default().fg(THEME.muted)),
        Span::styled("r ", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("QUIT: ", Style::default().fg(THEME.muted)),
        Span::styled("q", Style::default().fg(THEME.text)),
    ]);
    let footer = Paragraph::new(help).alignment(Alignment::Center);
    frame.render_widget(footer, main_layout[2]);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME.muted))
        .title(title)
}

fn draw_header(frame: &mut Frame, app: &DashboardApp, area: Rect) {
    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20),
            Constraint::Min(1),
            Constraint::Length(36),
        ])
        .split(area);

    let app_title = Paragraph::new(Span::styled(
        "MATLOG",
        Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(app_title, header_layout[0]);

    let last = Category::ALL.len() - 1;
    let nav_text = Line::from(vec![
        Span::styled(
            " < ",
            Style::default().fg(if app.selected > 0 { THEME.text } else { THEME.muted }),
        ),
        Span::styled(
            format!(" {} ", app.category().title()),
            Style::default().fg(THEME.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " > ",
            Style::default().fg(if app.selected < last { THEME.text } else { THEME.muted }),
        ),
    ]);
    let nav = Paragraph::new(nav_text)
        .alignment(Alignment::Right)
        .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(nav, header_layout[2]);

    frame.render_widget(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(THEME.muted)),
        area,
    );
}

fn draw_weekly_chart(frame: &mut Frame, app: &DashboardApp, area: Rect) {
    let weeks = &app.analytics.weekly_hours;
    // Most recent weeks that fit in the panel
    let capacity = (area.width.saturating_sub(2) / (BAR_WIDTH + BAR_GAP)).max(1) as usize;
    let visible = &weeks[weeks.len().saturating_sub(capacity)..];

    let bars: Vec<Bar> = visible
        .iter()
        .map(|w| {
            let value = (w.hours * 10.0).round() as u64;
            Bar::default()
                .label(w.period.rsplit('-').next().unwrap_or(&w.period).to_string())
                .value(value)
                .style(Style::default().fg(THEME.hours))
                .text_value(if value > 0 { format!("{:.1}", w.hours) } else { String::new() })
        })
        .collect();

    let chart = BarChart::default()
        .block(panel(" Weekly Mat Hours "))
        .bar_width(BAR_WIDTH)
        .bar_gap(BAR_GAP)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

fn segment_color(segment: &PieSegment) -> Color {
    segment.color.parse().unwrap_or(THEME.text)
}

fn draw_ranking(frame: &mut Frame, app: &DashboardApp, area: Rect) {
    let stats = app.current_stats();
    let mut lines = Vec::new();

    for (i, ranked) in stats.top(app.top_n).iter().enumerate() {
        // Ranked labels line up with the pie segments they feed
        let marker = match stats.pie.get(i) {
            Some(segment) => Span::styled("■ ", Style::default().fg(segment_color(segment))),
            None => Span::raw("  "),
        };
        lines.push(Line::from(vec![
            marker,
            Span::styled(format!("{:<28}", ranked.label), Style::default().fg(THEME.text)),
            Span::styled(format!("{:>4}", ranked.count), Style::default().add_modifier(Modifier::BOLD)),
        ]));
    }

    if let Some(sides) = &stats.sides {
        lines.push(Line::from(""));
        let mut split = vec![
            Span::styled("L ", Style::default().fg(THEME.muted)),
            Span::styled(sides.totals.left.to_string(), Style::default().fg(THEME.text)),
            Span::styled("  R ", Style::default().fg(THEME.muted)),
            Span::styled(sides.totals.right.to_string(), Style::default().fg(THEME.text)),
        ];
        if sides.totals.unmarked > 0 {
            split.push(Span::styled("  ? ", Style::default().fg(THEME.muted)));
            split.push(Span::styled(sides.totals.unmarked.to_string(), Style::default().fg(THEME.text)));
        }
        lines.push(Line::from(split));
        if let Some(top) = &sides.top_left {
            lines.push(Line::from(format!("Best left:  {} ({}x)", top.label, top.count)));
        }
        if let Some(top) = &sides.top_right {
            lines.push(Line::from(format!("Best right: {} ({}x)", top.label, top.count)));
        }
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled("Nothing logged yet", Style::default().fg(THEME.muted))));
    }

    let title = format!(" Top {} ", app.top_n);
    frame.render_widget(Paragraph::new(lines).block(panel(&title)), area);
}

fn draw_summary(frame: &mut Frame, app: &DashboardApp, area: Rect) {
    let totals = &app.analytics.totals;
    let row = |label: &'static str, value: String, color: Color| {
        Line::from(vec![
            Span::styled(label, Style::default().fg(THEME.muted)),
            Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        ])
    };

    let info_text = vec![
        row("Hours:     ", format!("{:.1}", totals.total_hours), THEME.hours),
        row("Sessions:  ", totals.total_sessions.to_string(), THEME.text),
        row("Average:   ", format!("{:.1}h", totals.average_session_hours), THEME.text),
        row("Got:       ", totals.submissions_got.to_string(), THEME.got),
        row("Received:  ", totals.submissions_received.to_string(), THEME.received),
        row("Recent:    ", format!("{} sessions", app.analytics.recent.len()), THEME.text),
        row("Ratio:     ", format!("{:.2}", totals.submission_ratio), THEME.text),
    ];

    frame.render_widget(Paragraph::new(info_text).block(panel(" Summary ")), area);
}

/// Canvas coordinates tracing a segment's arc at `radius_offset` from the
/// ring's centre line. The canvas y axis points up, so y is mirrored.
pub fn arc_points(segment: &PieSegment, frame: ChartFrame, radius_offset: f64) -> Vec<(f64, f64)> {
    let ring = ChartFrame {
        radius: frame.radius + radius_offset,
        ..frame
    };
    let samples = (segment.sweep_angle * SAMPLES_PER_DEGREE).ceil().max(1.0) as usize;
    (0..=samples)
        .map(|i| {
            let angle = segment.start_angle + segment.sweep_angle * i as f64 / samples as f64;
            let p = ring.point_at(angle);
            (p.x, 2.0 * frame.cy - p.y)
        })
        .collect()
}

fn draw_ring(frame: &mut Frame, app: &DashboardApp, area: Rect) {
    let segments = &app.current_stats().pie;
    let chart_frame = app.frame;
    let stroke = (chart_frame.cx - chart_frame.radius).max(1.0);

    let canvas = Canvas::default()
        .block(panel(" Share "))
        .marker(Marker::Braille)
        .x_bounds([0.0, chart_frame.cx * 2.0])
        .y_bounds([0.0, chart_frame.cy * 2.0])
        .paint(move |ctx| {
            for segment in segments {
                let color = segment_color(segment);
                let mut offset = -stroke / 2.0;
                while offset <= stroke / 2.0 {
                    let coords = arc_points(segment, chart_frame, offset);
                    ctx.draw(&Points { coords: &coords, color });
                    offset += 1.0;
                }
            }
        });
    frame.render_widget(canvas, area);
}

fn draw_balance(frame: &mut Frame, app: &DashboardApp, area: Rect) {
    let totals = &app.analytics.totals;
    let logged = totals.submissions_got + totals.submissions_received;
    let ratio = if logged > 0 {
        totals.submissions_got as f64 / logged as f64
    } else {
        0.0
    };

    let gauge = Gauge::default()
        .block(panel(" Got vs Received "))
        .gauge_style(Style::default().fg(THEME.got).bg(THEME.received))
        .ratio(ratio)
        .label(format!("{:.1}% got", ratio * 100.0));
    frame.render_widget(gauge, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use matlog_core::{compute, AnalyticsOptions, TechniqueLabel, TrainingEntry};

    fn sample_app() -> DashboardApp {
        let mut entry = TrainingEntry::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), "1.5");
        entry.submissions_got = vec![TechniqueLabel::parse("Armbar (L)"), TechniqueLabel::parse("Kimura (R)")];
        let options = AnalyticsOptions::default();
        let analytics = compute(&[entry], NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), &options);
        DashboardApp::new(analytics, options.frame, 5)
    }

    #[test]
    fn test_category_navigation_is_clamped() {
        let mut app = sample_app();
        assert_eq!(app.category(), Category::SubmissionsGot);
        app.previous_category();
        assert_eq!(app.selected, 0);

        for _ in 0..10 {
            app.next_category();
        }
        assert_eq!(app.category(), Category::DominantPositions);
        assert!(app.current_stats().sides.is_none());
    }

    #[test]
    fn test_arc_points_follow_segment_geometry() {
        let app = sample_app();
        let segment = &app.current_stats().pie[0];
        let points = arc_points(segment, app.frame, 0.0);

        let (x, y) = points[0];
        assert!((x - segment.start.x).abs() < 1e-9);
        assert!((y - (2.0 * app.frame.cy - segment.start.y)).abs() < 1e-9);

        let (x, y) = *points.last().unwrap();
        assert!((x - segment.end.x).abs() < 1e-9);
        assert!((y - (2.0 * app.frame.cy - segment.end.y)).abs() < 1e-9);
        assert_eq!(points.len(), 181);
    }

    #[test]
    fn test_palette_colors_parse() {
        let app = sample_app();
        for segment in &app.current_stats().pie {
            assert_ne!(segment_color(segment), THEME.text);
        }
    }
}
