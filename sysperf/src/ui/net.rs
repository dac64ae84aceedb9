//! Network upload/download line chart.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Style, Stylize},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition},
};

use crate::history::RollingSeries;
use crate::types::NetRates;
use crate::ui::mem::X_MARGIN;
use crate::ui::theme::{title_style, AXIS, DOWNLOAD, UPLOAD};

/// Top of the Y axis: 20% headroom over the visible peak, never below 0.1 Mbps.
pub fn y_top(upload: &RollingSeries, download: &RollingSeries) -> f64 {
    (upload.peak().max(download.peak()) * 1.2).max(0.1)
}

pub fn draw_net(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    upload: &RollingSeries,
    download: &RollingSeries,
    now: NetRates,
    peak: NetRates,
) {
    let up = upload.points();
    let down = download.points();
    let (first, last) = upload.x_range();
    let top = y_top(upload, download);

    let title = format!(
        "Network | up: {:.3} (peak {:.3}) | down: {:.3} (peak {:.3})",
        now.upload_mbps, peak.upload_mbps, now.download_mbps, peak.download_mbps
    );

    let datasets = vec![
        Dataset::default()
            .name("Upload")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(UPLOAD))
            .data(&up),
        Dataset::default()
            .name("Download")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(DOWNLOAD))
            .data(&down),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title, title_style())),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(AXIS))
                .bounds([first as f64 - 1.0, last as f64 + X_MARGIN]),
        )
        .y_axis(
            Axis::default()
                .title("Mbps".fg(AXIS))
                .style(Style::default().fg(AXIS))
                .bounds([0.0, top])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{:.3}", top / 2.0)),
                    Span::raw(format!("{top:.3}")),
                ]),
        )
        .legend_position(Some(LegendPosition::TopLeft))
        .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)));
    f.render_widget(chart, area);
}
