//! The three sampler + chart pairs.

pub mod cpu;
pub mod memory;
pub mod network;

use ratatui::{layout::Rect, Frame};

pub use cpu::CpuMonitor;
pub use memory::MemoryMonitor;
pub use network::NetworkMonitor;

/// Dashboard region a monitor renders into. Chosen at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    TopLeft,
    TopRight,
    Bottom,
}

pub trait Monitor {
    fn name(&self) -> &'static str;
    fn slot(&self) -> Slot;
    /// Sample the source once and push into the rolling window. Never fails;
    /// a bad read degrades this frame only.
    fn refresh(&mut self);
    fn draw(&self, f: &mut Frame<'_>, area: Rect);
}
