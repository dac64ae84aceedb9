use ratatui::{layout::Rect, Frame};
use tracing::{debug, warn};

use super::{Monitor, Slot};
use crate::sampler::CpuSource;

/// Axis labels: one per core, with a blank entry at each end for spacing.
pub fn core_labels(cores: usize) -> Vec<String> {
    let mut labels = Vec::with_capacity(cores + 2);
    labels.push(String::new());
    labels.extend((1..=cores).map(|i| format!("Core {i}")));
    labels.push(String::new());
    labels
}

pub struct CpuMonitor<S> {
    source: S,
    labels: Vec<String>,
    usage: Vec<f64>,
    slot: Slot,
}

impl<S: CpuSource> CpuMonitor<S> {
    pub fn new(source: S, slot: Slot) -> Self {
        let cores = source.core_count();
        Self {
            source,
            labels: core_labels(cores),
            usage: vec![0.0; cores],
            slot,
        }
    }

    pub fn core_count(&self) -> usize {
        self.usage.len()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn usage(&self) -> &[f64] {
        &self.usage
    }

    /// `(label, percent)` for every core, in core order.
    pub fn bars(&self) -> Vec<(&str, f64)> {
        self.labels[1..=self.usage.len()]
            .iter()
            .map(String::as_str)
            .zip(self.usage.iter().copied())
            .collect()
    }
}

impl<S: CpuSource> Monitor for CpuMonitor<S> {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn slot(&self) -> Slot {
        self.slot
    }

    fn refresh(&mut self) {
        match self.source.read() {
            Ok(mut sample) => {
                let cores = self.usage.len();
                if sample.len() != cores {
                    debug!(got = sample.len(), cores, "per-core sample size mismatch");
                    sample.resize(cores, 0.0);
                }
                self.usage = sample;
            }
            Err(e) => warn!("cpu read failed, keeping previous sample: {e}"),
        }
    }

    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        crate::ui::cpu::draw_per_core_bars(f, area, &self.labels, &self.usage);
    }
}
