pub mod alert;
pub mod chart;
pub mod gauge;
pub mod header;
pub mod help;
pub mod process_table;
pub mod statusbar;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};

use crate::app::Dashboard;
use crate::bridge::MetricsBackend;

pub fn draw<B: MetricsBackend>(frame: &mut Frame, app: &mut Dashboard<B>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(12),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let status = header::FetchStatus {
        fetching: app.is_fetching(),
        stale: app.is_stale(),
    };
    header::render(frame, chunks[0], &app.view, &app.theme, status);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ])
        .split(chunks[1]);
    chart::render(frame, charts[0], &app.view.cpu_chart, &app.theme);
    gauge::render(frame, charts[1], &app.view.cpu_gauge, app.theme.cpu_accent, &app.theme);
    gauge::render(frame, charts[2], &app.view.mem_gauge, app.theme.mem_accent, &app.theme);

    app.table_hit = process_table::render(
        frame,
        chunks[2],
        &app.view.proc_table,
        &mut app.table_state,
        &app.theme,
    );

    statusbar::render(
        frame,
        chunks[3],
        app.input_mode,
        &app.pid_input,
        &app.keybinds,
        &app.theme,
    );

    // Overlays last so they sit on top; an alert wins over help
    if app.show_help() {
        help::render(frame, frame.area(), &app.help_entries(), &app.theme);
    }
    if let Some(alert) = &app.alert {
        alert::render(frame, frame.area(), alert, &app.theme);
    }
}

pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [vert] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [horiz] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(vert);
    horiz
}
