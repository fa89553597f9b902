use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use std::time::SystemTime;

use crate::app::Tab;
use crate::stats::snapshot::{CacheSnapshot, MemorySnapshot};
use crate::task::OptimizationResult;
use crate::ui::theme::{ColorSupport, Theme};
use crate::ui::{header, statusbar};

fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            let cell = buf.cell((x, y)).unwrap();
            out.push_str(cell.symbol());
        }
        if y + 1 < area.height {
            out.push('\n');
        }
    }
    out
}

fn render_to_string<F>(width: u16, height: u16, draw: F) -> String
where
    F: FnOnce(&mut ratatui::Frame),
{
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(draw).unwrap();
    let buf = terminal.backend().buffer();
    buffer_to_string(buf)
}

fn make_theme() -> Theme {
    Theme::from_config("vivid", ColorSupport::Truecolor)
}

#[test]
fn header_shows_tabs_and_elevation_warning() {
    let output = render_to_string(80, 4, |frame| {
        header::render(
            frame,
            Rect::new(0, 0, 80, 4),
            Tab::Cache,
            false,
            &make_theme(),
        );
    });

    assert!(output.contains("memtune"));
    assert!(output.contains("Dashboard"));
    assert!(output.contains("Cache"));
    assert!(output.contains("not elevated"));
}

#[test]
fn header_hides_warning_when_elevated() {
    let output = render_to_string(80, 4, |frame| {
        header::render(
            frame,
            Rect::new(0, 0, 80, 4),
            Tab::Dashboard,
            true,
            &make_theme(),
        );
    });

    assert!(!output.contains("not elevated"));
}

#[test]
fn statusbar_renders_pills_without_message() {
    let output = render_to_string(80, 1, |frame| {
        statusbar::render(frame, Rect::new(0, 0, 80, 1), None, false, &make_theme());
    });

    assert!(output.contains("Quit"));
    assert!(output.contains("Opt Mem"));
    assert!(!output.contains("optimizing"));
}

#[test]
fn statusbar_message_takes_priority() {
    let status = ("Optimizing memory...".to_string(), std::time::Instant::now());
    let output = render_to_string(80, 1, |frame| {
        statusbar::render(
            frame,
            Rect::new(0, 0, 80, 1),
            Some(&status),
            true,
            &make_theme(),
        );
    });

    assert!(output.contains("Optimizing memory..."));
    assert!(!output.contains("Quit"));
}

#[test]
fn improvement_lines_render_expected_text() {
    fn memory_snapshot(percent: f64) -> MemorySnapshot {
        MemorySnapshot {
            total: 1000,
            available: 400,
            used: 600,
            free: 400,
            percent,
            swap_total: 0,
            swap_used: 0,
            swap_free: 0,
            swap_percent: 0.0,
            captured_at: SystemTime::UNIX_EPOCH,
        }
    }
    fn cache_snapshot(hit_ratio: f64) -> CacheSnapshot {
        CacheSnapshot {
            hits: 50,
            misses: 50,
            hit_ratio,
            access_time_ms: 1.0,
            eviction_rate: 0.1,
            write_back_rate: 0.05,
            captured_at: SystemTime::UNIX_EPOCH,
        }
    }

    let memory_result = OptimizationResult {
        success: true,
        message: "ok".to_string(),
        before: memory_snapshot(60.0),
        after: memory_snapshot(54.0),
    };
    let improvement = memory_result.improvement_percent().unwrap();
    assert!((improvement - 10.0).abs() < 1e-9);

    // Zero before → undefined improvement, shown as N/A
    let undefined = OptimizationResult {
        success: true,
        message: "ok".to_string(),
        before: memory_snapshot(0.0),
        after: memory_snapshot(0.0),
    };
    assert_eq!(
        crate::format::format_improvement(undefined.improvement_percent()),
        "N/A"
    );

    let cache_result = OptimizationResult {
        success: true,
        message: "ok".to_string(),
        before: cache_snapshot(0.50),
        after: cache_snapshot(0.575),
    };
    assert!((cache_result.improvement_percent().unwrap() - 15.0).abs() < 1e-9);
}
