pub mod dashboard;
pub mod header;
pub mod help;
pub mod optimization;
pub mod statusbar;
pub mod tables;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::{App, Tab};
use crate::task::ResourceKind;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    header::render(frame, chunks[0], app.tab, app.elevated, &app.theme);

    match app.tab {
        Tab::Dashboard => dashboard::render(frame, chunks[1], app),
        Tab::Memory => tables::render_memory(frame, chunks[1], app),
        Tab::Cache => tables::render_cache(frame, chunks[1], app),
        Tab::Optimization => optimization::render(frame, chunks[1], app),
    }

    let any_in_flight =
        app.in_flight(ResourceKind::Memory) || app.in_flight(ResourceKind::Cache);
    statusbar::render(
        frame,
        chunks[2],
        app.status_message.as_ref(),
        any_in_flight,
        &app.theme,
    );

    // Help overlay — rendered last to appear on top
    if app.show_help() {
        help::render(frame, frame.area(), &app.help_entries(), &app.theme);
    }
}

#[cfg(test)]
mod tests;
