use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use super::centered_rect;
use crate::app::{Alert, AlertKind};
use crate::ui::theme::Theme;

const DISMISS_HINT: &str = "Enter to dismiss";

/// Modal box over everything else.
pub fn render(frame: &mut Frame, area: Rect, alert: &Alert, theme: &Theme) {
    let (title, accent) = match alert.kind {
        AlertKind::Error => (" Error ", theme.status_err),
        AlertKind::Info => (" Notice ", theme.status_ok),
    };

    let content_width = alert.message.width().max(DISMISS_HINT.len()) as u16 + 4;
    let width = content_width.clamp(24, 60).min(area.width);
    let text_width = width.saturating_sub(2).max(1);
    let message_lines = (alert.message.width() as u16).div_ceil(text_width).max(1);
    // borders + message + blank + hint
    let height = (message_lines + 4).min(area.height);

    let overlay = centered_rect(width, height, area);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(accent))
        .title(Span::styled(
            title,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ));

    let lines = vec![
        Line::from(Span::styled(
            alert.message.clone(),
            Style::default().fg(theme.text_primary),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            DISMISS_HINT,
            Style::default().fg(theme.text_secondary),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().bg(theme.surface_bg));
    frame.render_widget(paragraph, overlay);
}
