use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Row, Table};

use crate::app::App;
use crate::format::{format_bytes, format_clock};
use crate::ui::theme::Theme;

pub fn render_memory(frame: &mut Frame, area: Rect, app: &App) {
    let rows: Vec<(String, String)> = match &app.latest_memory {
        Some(mem) => vec![
            ("Total Memory".into(), format_bytes(mem.total)),
            ("Available Memory".into(), format_bytes(mem.available)),
            ("Used Memory".into(), format_bytes(mem.used)),
            ("Free Memory".into(), format_bytes(mem.free)),
            ("Memory Usage".into(), format!("{:.1}%", mem.percent)),
            ("Swap Total".into(), format_bytes(mem.swap_total)),
            ("Swap Used".into(), format_bytes(mem.swap_used)),
            ("Swap Free".into(), format_bytes(mem.swap_free)),
            ("Swap Usage".into(), format!("{:.1}%", mem.swap_percent)),
            ("Last Updated".into(), format_clock(mem.captured_at)),
        ],
        None => vec![("Memory".into(), "waiting for first poll".into())],
    };
    render_kv_table(frame, area, " Memory ", rows, &app.theme);
}

pub fn render_cache(frame: &mut Frame, area: Rect, app: &App) {
    let rows: Vec<(String, String)> = match &app.latest_cache {
        Some(cache) => vec![
            ("Cache Hits".into(), cache.hits.to_string()),
            ("Cache Misses".into(), cache.misses.to_string()),
            ("Hit Ratio".into(), format!("{:.1}%", cache.hit_ratio * 100.0)),
            ("Access Time".into(), format!("{:.3} ms", cache.access_time_ms)),
            ("Eviction Rate".into(), format!("{:.3}", cache.eviction_rate)),
            (
                "Write Back Rate".into(),
                format!("{:.3}", cache.write_back_rate),
            ),
            ("Last Updated".into(), format_clock(cache.captured_at)),
        ],
        None => vec![("Cache".into(), "waiting for first poll".into())],
    };
    render_kv_table(frame, area, " Cache ", rows, &app.theme);
}

fn render_kv_table(
    frame: &mut Frame,
    area: Rect,
    title: &'static str,
    rows: Vec<(String, String)>,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let table_rows: Vec<Row> = rows
        .into_iter()
        .map(|(metric, value)| {
            Row::new(vec![metric, value]).style(Style::default().fg(theme.text_primary))
        })
        .collect();

    let table = Table::new(
        table_rows,
        [Constraint::Percentage(50), Constraint::Percentage(50)],
    )
    .header(
        Row::new(vec!["Metric", "Value"]).style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
    )
    .block(block);

    frame.render_widget(table, area);
}
