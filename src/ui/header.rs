use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};

use crate::app::Tab;
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, active: Tab, elevated: bool, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut title_spans = vec![Span::styled(
        " memtune ",
        Style::default()
            .fg(theme.header_accent_fg)
            .bg(theme.header_accent_bg)
            .add_modifier(Modifier::BOLD),
    )];
    if !elevated {
        title_spans.push(Span::raw("  "));
        title_spans.push(Span::styled(
            "limited (not elevated)",
            Style::default().fg(theme.status_warn),
        ));
    }

    // Title line on top, tab bar below
    let title_area = Rect { height: 1, ..inner };
    let tabs_area = Rect {
        y: inner.y + 1,
        height: inner.height.saturating_sub(1),
        ..inner
    };

    frame.render_widget(Paragraph::new(Line::from(title_spans)), title_area);

    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| Line::from(format!(" {} ", tab.label())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(active.index())
        .style(Style::default().fg(theme.tab_inactive))
        .highlight_style(
            Style::default()
                .fg(theme.tab_active)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, tabs_area);
}
