use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType};

use crate::ui::theme::Theme;
use crate::view::LineChart;

pub fn render(frame: &mut Frame, area: Rect, chart: &LineChart, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " CPU history ",
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let dataset = Dataset::default()
        .name(chart.label)
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme.cpu_accent))
        .data(&chart.points);

    // Fixed x range so the line scrolls left as the history fills
    let x_max = chart.slots.saturating_sub(1).max(1) as f64;
    let x_axis = Axis::default()
        .style(Style::default().fg(theme.axis))
        .bounds([0.0, x_max]);
    let y_axis = Axis::default()
        .style(Style::default().fg(theme.axis))
        .bounds(chart.y_bounds)
        .labels(["0", "50", "100"]);

    let widget = Chart::new(vec![dataset])
        .block(block)
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(widget, area);
}
