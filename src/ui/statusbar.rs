use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{InputMode, ResolvedKeybinds, key_label};
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    input_mode: InputMode,
    pid_input: &str,
    keybinds: &ResolvedKeybinds,
    theme: &Theme,
) {
    let bg_style = Style::default().bg(theme.statusbar_bg);

    let line = match input_mode {
        InputMode::PidEntry => {
            let mut spans = vec![
                Span::styled(
                    " PID ",
                    Style::default()
                        .fg(theme.pill_key_fg)
                        .bg(theme.pill_key_bg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" {pid_input}"),
                    Style::default().fg(theme.text_primary),
                ),
                Span::styled("\u{2588}", Style::default().fg(theme.pill_key_bg)),
            ];
            spans.extend(pill_spans("Enter".to_string(), "Kill", theme));
            spans.extend(pill_spans("Esc".to_string(), "Cancel", theme));
            Line::from(spans)
        }
        InputMode::Help => {
            let mut spans = Vec::new();
            spans.extend(pill_spans(key_label(keybinds.help), "Close", theme));
            spans.extend(pill_spans("Esc".to_string(), "Close", theme));
            Line::from(spans)
        }
        InputMode::Normal => {
            let mut spans = Vec::new();
            spans.extend(pill_spans(key_label(keybinds.quit), "Quit", theme));
            spans.extend(pill_spans(key_label(keybinds.kill), "Kill", theme));
            spans.extend(pill_spans(key_label(keybinds.pid_input), "PID", theme));
            spans.extend(pill_spans(key_label(keybinds.refresh), "Refresh", theme));
            spans.extend(pill_spans(key_label(keybinds.cycle_theme), "Theme", theme));
            spans.extend(pill_spans(key_label(keybinds.help), "Help", theme));
            spans.extend(pill_spans("\u{2191}\u{2193}".to_string(), "Select", theme));
            Line::from(spans)
        }
    };

    frame.render_widget(Paragraph::new(line).style(bg_style), area);
}

fn pill_spans(key: String, desc: &str, theme: &Theme) -> Vec<Span<'static>> {
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
