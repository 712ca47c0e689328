use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

use crate::ui::theme::Theme;
use crate::view::{DashboardView, PercentBar};

/// Which data-freshness markers to show next to the uptime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStatus {
    pub fetching: bool,
    pub stale: bool,
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    view: &DashboardView,
    theme: &Theme,
    status: FetchStatus,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(35),
            Constraint::Percentage(35),
        ])
        .split(area);

    render_branding(frame, chunks[0], &view.uptime_text, theme, status);
    render_bar(frame, chunks[1], " CPU ", &view.cpu_bar, theme.cpu_accent, theme);
    render_bar(frame, chunks[2], " MEM ", &view.mem_bar, theme.mem_accent, theme);
}

fn render_branding(
    frame: &mut Frame,
    area: Rect,
    uptime: &str,
    theme: &Theme,
    status: FetchStatus,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut spans = vec![
        Span::styled(
            " sysdash ",
            Style::default()
                .fg(theme.header_accent_fg)
                .bg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Uptime ", Style::default().fg(theme.text_secondary)),
        Span::styled(
            uptime.to_string(),
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if status.fetching {
        spans.push(Span::styled(" \u{2022}", Style::default().fg(theme.cpu_accent)));
    }
    if status.stale {
        spans.push(Span::styled(
            " stale",
            Style::default()
                .fg(theme.status_err)
                .add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn render_bar(
    frame: &mut Frame,
    area: Rect,
    title: &'static str,
    bar: &PercentBar,
    fill: Color,
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

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(fill).bg(theme.gauge_track))
        .ratio(bar.ratio().clamp(0.0, 1.0))
        .label(bar.text.clone());

    frame.render_widget(gauge, area);
}
