use ratatui::{layout::Rect, Frame};
use tracing::warn;

use super::{Monitor, Slot};
use crate::history::RollingSeries;
use crate::sampler::MemorySource;
use crate::types::MemoryReading;

pub struct MemoryMonitor<S> {
    source: S,
    series: RollingSeries,
    last: Option<MemoryReading>,
    slot: Slot,
}

impl<S: MemorySource> MemoryMonitor<S> {
    pub fn new(source: S, capacity: usize, slot: Slot) -> Self {
        Self {
            source,
            series: RollingSeries::new(capacity),
            last: None,
            slot,
        }
    }

    pub fn series(&self) -> &RollingSeries {
        &self.series
    }

    pub fn last_reading(&self) -> Option<MemoryReading> {
        self.last
    }
}

impl<S: MemorySource> Monitor for MemoryMonitor<S> {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn slot(&self) -> Slot {
        self.slot
    }

    fn refresh(&mut self) {
        match self.source.read() {
            Ok(r) => {
                self.last = Some(r);
                self.series.push(r.percent());
            }
            Err(e) => {
                warn!("memory read failed, repeating last value: {e}");
                self.series.push(self.series.latest());
            }
        }
    }

    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        crate::ui::mem::draw_mem(f, area, &self.series, self.last);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::SampleError;

    struct Scripted(Vec<Result<MemoryReading, SampleError>>);

    impl MemorySource for Scripted {
        fn read(&mut self) -> Result<MemoryReading, SampleError> {
            self.0.remove(0)
        }
    }

    fn gib(used: u64, total: u64) -> MemoryReading {
        MemoryReading {
            used: used << 30,
            total: total << 30,
        }
    }

    #[test]
    fn pushes_percent_used() {
        let mut m = MemoryMonitor::new(Scripted(vec![Ok(gib(4, 16))]), 100, Slot::TopLeft);
        m.refresh();
        assert_eq!(m.series().latest(), 25.0);
        assert_eq!(m.series().len(), 100);
        assert_eq!(m.last_reading(), Some(gib(4, 16)));
    }

    #[test]
    fn failed_read_repeats_last_value() {
        let src = Scripted(vec![
            Ok(gib(8, 16)),
            Err(SampleError::Unavailable("memory")),
        ]);
        let mut m = MemoryMonitor::new(src, 10, Slot::TopLeft);
        m.refresh();
        m.refresh();
        let snap = m.series().snapshot();
        assert_eq!(&snap[8..], &[50.0, 50.0]);
        assert_eq!(m.series().x_range(), (2, 11));
    }
}
