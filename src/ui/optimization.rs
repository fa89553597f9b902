use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::app::App;
use crate::format::format_improvement;
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_memory_section(frame, sections[0], app);
    render_cache_section(frame, sections[1], app);
}

fn section_block<'a>(title: &'static str, theme: &Theme) -> Block<'a> {
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

fn render_memory_section(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let lines: Vec<Line> = match &app.memory_result {
        Some(result) => {
            let improvement = format_improvement(result.improvement_percent());
            vec![
                Line::from(Span::styled(
                    format!(
                        " Memory usage reduced from {:.1}% to {:.1}% (Improvement: {improvement})",
                        result.before.percent, result.after.percent
                    ),
                    Style::default().fg(theme.text_primary),
                )),
                outcome_line(result.success, &result.message, theme),
            ]
        }
        None => vec![pending_line(app.memory_in_flight, theme)],
    };
    frame.render_widget(
        Paragraph::new(lines).block(section_block(" Memory Optimization ", theme)),
        area,
    );
}

fn render_cache_section(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let lines: Vec<Line> = match &app.cache_result {
        Some(result) => {
            let improvement = format_improvement(result.improvement_percent());
            vec![
                Line::from(Span::styled(
                    format!(
                        " Cache hit ratio improved from {:.1}% to {:.1}% (Improvement: {improvement})",
                        result.before.hit_ratio * 100.0,
                        result.after.hit_ratio * 100.0
                    ),
                    Style::default().fg(theme.text_primary),
                )),
                outcome_line(result.success, &result.message, theme),
            ]
        }
        None => vec![pending_line(app.cache_in_flight, theme)],
    };
    frame.render_widget(
        Paragraph::new(lines).block(section_block(" Cache Optimization ", theme)),
        area,
    );
}

fn pending_line<'a>(in_flight: bool, theme: &Theme) -> Line<'a> {
    let text = if in_flight {
        " Optimizing..."
    } else {
        " No optimization performed yet"
    };
    Line::from(Span::styled(
        text,
        Style::default().fg(theme.text_secondary),
    ))
}

fn outcome_line<'a>(success: bool, message: &str, theme: &Theme) -> Line<'a> {
    let (prefix, color) = if success {
        ("OK", theme.status_ok)
    } else {
        ("WARN", theme.status_warn)
    };
    Line::from(vec![
        Span::styled(
            format!(" {prefix} "),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(message.to_string(), Style::default().fg(theme.text_primary)),
    ])
}
