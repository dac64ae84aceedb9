//! Bounded history buffers for charts.

use std::collections::VecDeque;

pub fn push_capped<T>(dq: &mut VecDeque<T>, v: T, cap: usize) {
    if dq.len() == cap {
        dq.pop_front();
    }
    dq.push_back(v);
}

/// Fixed-capacity window of recent samples.
///
/// The window is seeded with `capacity` zeros, so its length never changes:
/// every [`push`](Self::push) evicts the oldest sample. Each sample also has a
/// synthetic X coordinate; the oldest one starts at 0 and the whole window
/// slides right by one per push.
#[derive(Debug, Clone)]
pub struct RollingSeries {
    samples: VecDeque<f64>,
    cap: usize,
    // X of the oldest sample
    x_start: u64,
}

impl RollingSeries {
    pub fn new(cap: usize) -> Self {
        let cap = cap.max(1);
        let mut samples = VecDeque::with_capacity(cap);
        samples.resize(cap, 0.0);
        Self {
            samples,
            cap,
            x_start: 0,
        }
    }

    pub fn push(&mut self, v: f64) {
        push_capped(&mut self.samples, v, self.cap);
        self.x_start += 1;
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn latest(&self) -> f64 {
        self.samples.back().copied().unwrap_or(0.0)
    }

    pub fn peak(&self) -> f64 {
        self.samples.iter().copied().fold(0.0, f64::max)
    }

    /// Samples oldest first.
    pub fn snapshot(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }

    /// `(x, y)` pairs ready for plotting.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .enumerate()
            .map(|(i, &v)| ((self.x_start + i as u64) as f64, v))
            .collect()
    }

    /// X of the oldest and newest sample.
    pub fn x_range(&self) -> (u64, u64) {
        (self.x_start, self.x_start + self.cap as u64 - 1)
    }
}
