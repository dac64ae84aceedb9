//! Per-core usage bar chart.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders},
};

use crate::ui::theme::{rainbow, title_style};
use crate::ui::util::fit_label;

/// Bars are drawn in tenths of a percent against this ceiling (120%).
const BAR_MAX: u64 = 1200;

fn bar_value(pct: f64) -> u64 {
    (pct * 10.0).round().clamp(0.0, BAR_MAX as f64) as u64
}

/// `(bar_width, gap)` spreading `slots` bars over `inner_width` columns.
pub fn bar_geometry(inner_width: u16, slots: usize) -> (u16, u16) {
    let per = (inner_width as usize / slots.max(1)).max(1) as u16;
    if per >= 3 {
        (per - 1, 1)
    } else {
        (per, 0)
    }
}

/// `labels` carries a blank entry at each end; `usage` has one value per core.
pub fn draw_per_core_bars(f: &mut ratatui::Frame<'_>, area: Rect, labels: &[String], usage: &[f64]) {
    let inner_width = area.width.saturating_sub(2);
    let (bar_width, gap) = bar_geometry(inner_width, labels.len());

    let bars: Vec<Bar> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            // slot 0 and the last slot are padding
            let pct = i.checked_sub(1).and_then(|c| usage.get(c)).copied();
            match pct {
                Some(pct) => {
                    let color = rainbow(pct);
                    Bar::default()
                        .value(bar_value(pct))
                        .text_value(format!("{pct:.1}%"))
                        .label(Line::from(fit_label(label, bar_width as usize).to_string()))
                        .style(Style::default().fg(color))
                        .value_style(Style::default().fg(Color::Black).bg(color))
                }
                None => Bar::default().value(0).text_value(String::new()),
            }
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled("CPU", title_style())),
        )
        .bar_width(bar_width)
        .bar_gap(gap)
        .max(BAR_MAX)
        .data(BarGroup::default().bars(&bars));
    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_scale_to_tenths_and_cap_at_ceiling() {
        assert_eq!(bar_value(12.34), 123);
        assert_eq!(bar_value(-3.0), 0);
        assert_eq!(bar_value(500.0), BAR_MAX);
    }

    #[test]
    fn geometry_fills_width() {
        assert_eq!(bar_geometry(100, 10), (9, 1));
        assert_eq!(bar_geometry(20, 10), (2, 0));
        assert_eq!(bar_geometry(5, 10), (1, 0));
    }
}
