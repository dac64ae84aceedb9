//! Readings produced by the samplers.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryReading {
    pub used: u64,
    pub total: u64,
}

impl MemoryReading {
    /// Percent of memory in use, 0 when the total is unknown.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let pct = self.used as f64 / self.total as f64 * 100.0;
        (pct * 10.0).round() / 10.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetTotals {
    // cumulative totals over all interfaces; the monitor diffs to get rates
    pub sent: u64,
    pub received: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NetRates {
    pub upload_mbps: f64,
    pub download_mbps: f64,
}
