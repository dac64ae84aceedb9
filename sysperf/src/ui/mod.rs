//! UI module root: layout plus one drawing function per panel.

pub mod cpu;
pub mod header;
pub mod mem;
pub mod net;
pub mod theme;
pub mod util;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::monitor::Slot;

/// Screen regions: title line, two charts on top, per-core bars below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panels {
    pub header: Rect,
    pub top_left: Rect,
    pub top_right: Rect,
    pub bottom: Rect,
}

impl Panels {
    pub fn area(&self, slot: Slot) -> Rect {
        match slot {
            Slot::TopLeft => self.top_left,
            Slot::TopRight => self.top_right,
            Slot::Bottom => self.bottom,
        }
    }
}

pub fn layout(area: Rect) -> Panels {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),   // header
            Constraint::Ratio(1, 2), // memory + network
            Constraint::Min(6),      // per-core bars
        ])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    Panels {
        header: rows[0],
        top_left: top[0],
        top_right: top[1],
        bottom: rows[2],
    }
}
