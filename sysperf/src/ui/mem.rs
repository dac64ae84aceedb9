//! RAM line chart with the latest value printed above the last point.

use ratatui::{
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as Segment},
        Block, Borders,
    },
};

use crate::history::RollingSeries;
use crate::types::MemoryReading;
use crate::ui::theme::{title_style, RAM_LINE};
use crate::ui::util::human;

pub const Y_MAX: f64 = 120.0;
/// Room right of the newest point for its label.
pub const X_MARGIN: f64 = 10.0;

/// Plot height for a reading. Readings outside [0,120] are pinned to the
/// chart edge; the stored value is left alone.
pub fn plot_y(v: f64) -> f64 {
    v.clamp(0.0, Y_MAX)
}

pub fn x_bounds(series: &RollingSeries) -> [f64; 2] {
    let (first, last) = series.x_range();
    [first as f64 - 1.0, last as f64 + X_MARGIN]
}

pub fn draw_mem(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    series: &RollingSeries,
    last: Option<MemoryReading>,
) {
    let title = match last {
        Some(r) => format!("RAM ({} / {})", human(r.used), human(r.total)),
        None => "RAM".into(),
    };
    let points = series.points();
    let note = format!("{}%", series.latest());

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title, title_style())),
        )
        .marker(Marker::Braille)
        .x_bounds(x_bounds(series))
        .y_bounds([0.0, Y_MAX])
        .paint(move |ctx| {
            for w in points.windows(2) {
                ctx.draw(&Segment::new(
                    w[0].0,
                    plot_y(w[0].1),
                    w[1].0,
                    plot_y(w[1].1),
                    RAM_LINE,
                ));
            }
            if let Some(&(x, y)) = points.last() {
                ctx.print(
                    x,
                    plot_y(y + 2.0),
                    Line::styled(note.clone(), Style::default().fg(RAM_LINE)),
                );
            }
        });
    f.render_widget(canvas, area);
}
