use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table, TableState};

use crate::app::TableHitArea;
use crate::format::truncate_unicode;
use crate::ui::theme::Theme;
use crate::view::ProcessTable;

/// PID, name, CPU, MEM, kill control.
const COLUMN_WIDTHS: [Constraint; 5] = [
    Constraint::Length(7),
    Constraint::Fill(1),
    Constraint::Length(8),
    Constraint::Length(8),
    Constraint::Length(6),
];
const COLUMN_SPACING: u16 = 1;
const KILL_LABEL: &str = "[Kill]";

/// Draws the table and returns where its rows landed on screen, or `None`
/// when there is no room for any row.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    table: &ProcessTable,
    state: &mut TableState,
    theme: &Theme,
) -> Option<TableHitArea> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            format!(" Processes ({}) ", table.len()),
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);

    let header_style = Style::default()
        .fg(theme.text_secondary)
        .add_modifier(Modifier::BOLD);
    let header = Row::new(["PID", "Name", "CPU %", "MEM %", ""]).style(header_style);

    let columns = Layout::horizontal(COLUMN_WIDTHS)
        .spacing(COLUMN_SPACING)
        .split(inner);
    let name_width = columns[1].width as usize;

    let text_style = Style::default().fg(theme.text_primary);
    let kill_style = Style::default()
        .fg(theme.kill_button)
        .add_modifier(Modifier::BOLD);
    let rows: Vec<Row> = table
        .rows()
        .iter()
        .map(|row| {
            Row::new([
                Cell::from(row.pid.to_string()),
                Cell::from(truncate_unicode(&row.name, name_width)),
                Cell::from(row.cpu.clone()),
                Cell::from(row.mem.clone()),
                Cell::from(Span::styled(KILL_LABEL, kill_style)),
            ])
            .style(text_style)
        })
        .collect();

    let widget = Table::new(rows, COLUMN_WIDTHS)
        .header(header)
        .block(block)
        .column_spacing(COLUMN_SPACING)
        .row_highlight_style(
            Style::default()
                .bg(theme.selection_bg)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(widget, area, state);

    // Header takes the first inner line
    if inner.height < 2 || inner.width == 0 {
        return None;
    }
    let body = Rect {
        y: inner.y + 1,
        height: inner.height - 1,
        ..inner
    };
    let kill = columns[4];
    Some(TableHitArea {
        body,
        kill_columns: kill.x..kill.x + kill.width,
    })
}
