use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph, Sparkline};

use crate::app::App;
use crate::format::format_bytes;
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Min(1),
        ])
        .split(area);

    let gauges = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    render_memory_gauge(frame, gauges[0], app);
    render_cache_gauge(frame, gauges[1], app);

    let sparks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    render_memory_sparkline(frame, sparks[0], app);
    render_response_sparkline(frame, sparks[1], app);

    render_details(frame, rows[2], app);
}

fn bordered_block<'a>(title: String, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ))
}

fn render_memory_gauge(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let (ratio, label) = match &app.latest_memory {
        Some(mem) => (
            (mem.percent / 100.0).clamp(0.0, 1.0),
            format!(
                "{}/{} ({:.1}%)",
                format_bytes(mem.used),
                format_bytes(mem.total),
                mem.percent
            ),
        ),
        None => (0.0, "--".to_string()),
    };

    let gauge = Gauge::default()
        .block(bordered_block(" Memory Usage ".to_string(), theme))
        .gauge_style(
            Style::default()
                .fg(theme.gauge_filled)
                .bg(theme.gauge_unfilled),
        )
        .ratio(ratio)
        .label(label);
    frame.render_widget(gauge, area);
}

fn render_cache_gauge(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let (ratio, label) = match &app.latest_cache {
        Some(cache) => (
            cache.hit_ratio.clamp(0.0, 1.0),
            format!("Hit Ratio {:.1}%", cache.hit_ratio * 100.0),
        ),
        None => (0.0, "--".to_string()),
    };

    let gauge = Gauge::default()
        .block(bordered_block(" Cache Performance ".to_string(), theme))
        .gauge_style(
            Style::default()
                .fg(theme.gauge_filled)
                .bg(theme.gauge_unfilled),
        )
        .ratio(ratio)
        .label(label);
    frame.render_widget(gauge, area);
}

fn render_memory_sparkline(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let data: Vec<u64> = app
        .history
        .memory
        .iter()
        .map(|snap| snap.percent.clamp(0.0, 100.0) as u64)
        .collect();

    let sparkline = Sparkline::default()
        .block(bordered_block(" Memory % (60s) ".to_string(), theme))
        .data(&data)
        .max(100)
        .style(Style::default().fg(theme.sparkline_color));
    frame.render_widget(sparkline, area);
}

fn render_response_sparkline(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let data: Vec<u64> = app
        .history
        .performance
        .iter()
        .map(|snap| snap.response_time_ms.max(0.0) as u64)
        .collect();

    let sparkline = Sparkline::default()
        .block(bordered_block(" Response Time ms (60s) ".to_string(), theme))
        .data(&data)
        .style(Style::default().fg(theme.sparkline_color));
    frame.render_widget(sparkline, area);
}

fn render_details(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mut lines: Vec<Line> = Vec::new();

    if let Some(mem) = &app.latest_memory {
        lines.push(detail_line(
            "Memory",
            format!(
                "total {}  used {}  free {}  swap {:.1}%",
                format_bytes(mem.total),
                format_bytes(mem.used),
                format_bytes(mem.free),
                mem.swap_percent
            ),
            theme,
        ));
    }
    if let Some(cache) = &app.latest_cache {
        lines.push(detail_line(
            "Cache",
            format!(
                "hits {}  misses {}  access {:.3} ms  evictions {:.3}",
                cache.hits, cache.misses, cache.access_time_ms, cache.eviction_rate
            ),
            theme,
        ));
    }
    if let Some(perf) = &app.latest_perf {
        lines.push(detail_line(
            "Perf",
            format!(
                "throughput {:.0}/s  page faults {}  swap rate {:.2}",
                perf.throughput, perf.page_faults, perf.swap_rate
            ),
            theme,
        ));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            " Waiting for first poll...",
            Style::default().fg(theme.text_secondary),
        )));
    }

    let block = bordered_block(" Current ".to_string(), theme);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn detail_line<'a>(label: &'a str, value: String, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!(" {label:<7}"),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(value, Style::default().fg(theme.text_primary)),
    ])
}
