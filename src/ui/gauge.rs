//! Radial two-segment gauge drawn with braille dots.
//!
//! The filled segment starts at twelve o'clock and runs clockwise; the rest
//! of the ring is drawn in the track colour. Canvas x bounds follow the
//! area's aspect ratio so the ring stays round on screen.

use std::f64::consts::{FRAC_PI_2, TAU};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::{Block, BorderType, Borders};

use crate::format::format_percent;
use crate::ui::theme::Theme;
use crate::view::Doughnut;

/// Dots for a ring of unit outer radius, split into (filled, track).
///
/// `fraction` is the filled share in `[0, 1]`, `cutout` the hole radius as a
/// share of the outer radius, `dot` the spacing between neighbouring dots.
pub fn ring_points(fraction: f64, cutout: f64, dot: f64) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let fraction = fraction.clamp(0.0, 1.0);
    let dot = dot.max(0.01);
    let steps = (TAU / dot).ceil() as usize;
    let mut filled = Vec::new();
    let mut track = Vec::new();

    let mut r = cutout.clamp(0.0, 1.0);
    while r <= 1.0 + f64::EPSILON {
        for i in 0..steps {
            let t = i as f64 / steps as f64;
            let angle = FRAC_PI_2 - t * TAU;
            let point = (r * angle.cos(), r * angle.sin());
            if t < fraction {
                filled.push(point);
            } else {
                track.push(point);
            }
        }
        r += dot;
    }
    (filled, track)
}

pub fn render(frame: &mut Frame, area: Rect, gauge: &Doughnut, fill: Color, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            format!(" {} ", gauge.label),
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    if inner.width == 0 || inner.height == 0 {
        frame.render_widget(block, area);
        return;
    }

    // Braille cells are 2x4 dots and roughly twice as tall as wide, so dots
    // are close to square.
    let aspect = (inner.width as f64 * 2.0) / (inner.height as f64 * 4.0);
    let dot = 2.0 / (inner.height as f64 * 4.0);
    let (filled, track) = ring_points(gauge.value() / 100.0, gauge.cutout, dot);

    let label = format_percent(gauge.value());
    let cell_width = 2.0 * aspect / inner.width as f64;
    let label_x = -(label.len() as f64 / 2.0) * cell_width;
    let track_color = theme.gauge_track;
    let label_style = Style::default()
        .fg(theme.text_primary)
        .add_modifier(Modifier::BOLD);

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([-aspect, aspect])
        .y_bounds([-1.0, 1.0])
        .paint(move |ctx| {
            ctx.draw(&Points {
                coords: &track,
                color: track_color,
            });
            ctx.draw(&Points {
                coords: &filled,
                color: fill,
            });
            ctx.print(
                label_x,
                0.0,
                Line::from(Span::styled(label.clone(), label_style)),
            );
        });

    frame.render_widget(canvas, area);
}
