use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::format::truncate_unicode;
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    status_message: Option<&(String, std::time::Instant)>,
    any_in_flight: bool,
    theme: &Theme,
) {
    let bg_style = Style::default().bg(theme.statusbar_bg);

    // Status message takes priority
    if let Some((msg, _)) = status_message {
        let color = if msg.starts_with("Error") || msg.contains("failed") {
            theme.status_err
        } else if msg.contains("already running") {
            theme.status_warn
        } else {
            theme.status_ok
        };
        let msg = truncate_unicode(msg, area.width.saturating_sub(1) as usize);
        let line = Line::from(Span::styled(
            format!(" {msg}"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line).style(bg_style), area);
        return;
    }

    let mut spans = Vec::new();
    spans.extend(pill_spans("q", "Quit", theme));
    spans.extend(pill_spans("m", "Opt Mem", theme));
    spans.extend(pill_spans("c", "Opt Cache", theme));
    spans.extend(pill_spans("Tab", "Next", theme));
    spans.extend(pill_spans("r", "Refresh", theme));
    spans.extend(pill_spans("?", "Help", theme));
    if any_in_flight {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            " optimizing… ",
            Style::default()
                .fg(theme.status_warn)
                .add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}

fn pill_spans<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {desc}"),
            Style::default().fg(theme.pill_desc_fg).bg(theme.surface_bg),
        ),
    ]
}
