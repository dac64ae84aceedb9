//! Top line: title, refresh interval, last refresh time.

use std::time::Duration;

use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

pub struct HeaderInfo {
    pub interval: Duration,
    pub last_refresh: Option<DateTime<Local>>,
    pub paused: bool,
}

pub fn header_text(h: &HeaderInfo) -> String {
    let when = h
        .last_refresh
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".into());
    let state = if h.paused { " [paused]" } else { "" };
    format!(
        "every {:.1}s | updated {when}{state}  (p: pause, q: quit)",
        h.interval.as_secs_f64()
    )
}

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, h: &HeaderInfo) {
    let line = Line::from(vec![
        Span::styled(
            "SYSTEM PERFORMANCE",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::raw(header_text(h)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
