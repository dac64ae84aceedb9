use std::time::{Duration, Instant};

use ratatui::{layout::Rect, Frame};
use tracing::{debug, warn};

use super::{Monitor, Slot};
use crate::history::RollingSeries;
use crate::sampler::NetworkSource;
use crate::types::{NetRates, NetTotals};

/// Ticks closer together than this are skipped instead of dividing by ~0.
pub const MIN_ELAPSED: Duration = Duration::from_millis(1);

/// Byte-counter delta over `elapsed_secs` in Mbps, rounded to 3 decimals.
///
/// Returns `None` when the elapsed time is below [`MIN_ELAPSED`]. A counter
/// that went backwards (interface reset, wrap) yields 0 rather than a
/// negative rate.
pub fn rate_mbps(before: u64, after: u64, elapsed_secs: f64) -> Option<f64> {
    if elapsed_secs.is_nan() || elapsed_secs < MIN_ELAPSED.as_secs_f64() {
        return None;
    }
    let bytes_per_sec = after.saturating_sub(before) as f64 / elapsed_secs;
    Some((bytes_per_sec / 1e6 * 1000.0).round() / 1000.0)
}

#[derive(Clone, Copy)]
struct Snapshot {
    at: Instant,
    totals: NetTotals,
}

pub struct NetworkMonitor<S> {
    source: S,
    upload: RollingSeries,
    download: RollingSeries,
    prev: Option<Snapshot>,
    peak: NetRates,
    slot: Slot,
}

impl<S: NetworkSource> NetworkMonitor<S> {
    /// Takes the baseline snapshot immediately, so the first tick already
    /// has something to diff against.
    pub fn new(source: S, capacity: usize, slot: Slot) -> Self {
        Self::new_at(source, capacity, slot, Instant::now())
    }

    pub fn new_at(mut source: S, capacity: usize, slot: Slot, now: Instant) -> Self {
        let prev = match source.read() {
            Ok(totals) => Some(Snapshot { at: now, totals }),
            Err(e) => {
                warn!("initial network read failed: {e}");
                None
            }
        };
        Self {
            source,
            upload: RollingSeries::new(capacity),
            download: RollingSeries::new(capacity),
            prev,
            peak: NetRates::default(),
            slot,
        }
    }

    pub fn upload(&self) -> &RollingSeries {
        &self.upload
    }

    pub fn download(&self) -> &RollingSeries {
        &self.download
    }

    pub fn current(&self) -> NetRates {
        NetRates {
            upload_mbps: self.upload.latest(),
            download_mbps: self.download.latest(),
        }
    }

    pub fn peak(&self) -> NetRates {
        self.peak
    }

    /// One tick measured against `now`. Returns whether a sample was pushed.
    pub fn refresh_at(&mut self, now: Instant) -> bool {
        let totals = match self.source.read() {
            Ok(t) => t,
            Err(e) => {
                warn!("network read failed: {e}");
                self.push(NetRates::default());
                return true;
            }
        };
        let Some(prev) = self.prev else {
            // no baseline yet: this read becomes one
            self.prev = Some(Snapshot { at: now, totals });
            self.push(NetRates::default());
            return true;
        };
        let dt = now.saturating_duration_since(prev.at).as_secs_f64();
        let rates = match (
            rate_mbps(prev.totals.sent, totals.sent, dt),
            rate_mbps(prev.totals.received, totals.received, dt),
        ) {
            (Some(up), Some(down)) => NetRates {
                upload_mbps: up,
                download_mbps: down,
            },
            _ => {
                debug!(dt, "tick too close to previous, skipping");
                return false;
            }
        };
        self.prev = Some(Snapshot { at: now, totals });
        self.push(rates);
        true
    }

    fn push(&mut self, r: NetRates) {
        self.upload.push(r.upload_mbps);
        self.download.push(r.download_mbps);
        self.peak.upload_mbps = self.peak.upload_mbps.max(r.upload_mbps);
        self.peak.download_mbps = self.peak.download_mbps.max(r.download_mbps);
    }
}

impl<S: NetworkSource> Monitor for NetworkMonitor<S> {
    fn name(&self) -> &'static str {
        "network"
    }

    fn slot(&self) -> Slot {
        self.slot
    }

    fn refresh(&mut self) {
        self.refresh_at(Instant::now());
    }

    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        crate::ui::net::draw_net(f, area, &self.upload, &self.download, self.current(), self.peak);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::SampleError;
    use std::collections::VecDeque;

    struct Counters(VecDeque<NetTotals>);

    impl NetworkSource for Counters {
        fn read(&mut self) -> Result<NetTotals, SampleError> {
            self.0.pop_front().ok_or(SampleError::Unavailable("network"))
        }
    }

    fn totals(sent: u64, received: u64) -> NetTotals {
        NetTotals { sent, received }
    }

    #[test]
    fn one_megabyte_per_second_is_one_mbps() {
        assert_eq!(rate_mbps(1_000_000, 2_000_000, 1.0), Some(1.0));
    }

    #[test]
    fn rounds_to_three_decimals() {
        assert_eq!(rate_mbps(0, 1_234_567, 1.0), Some(1.235));
        assert_eq!(rate_mbps(0, 1_000, 3.0), Some(0.0));
    }

    #[test]
    fn zero_elapsed_is_skipped() {
        assert_eq!(rate_mbps(0, 5_000_000, 0.0), None);
        assert_eq!(rate_mbps(0, 5_000_000, f64::NAN), None);
    }

    #[test]
    fn counter_reset_clamps_to_zero() {
        assert_eq!(rate_mbps(9_000_000, 100, 1.5), Some(0.0));
    }

    #[test]
    fn refresh_diffs_against_previous_snapshot() {
        let t0 = Instant::now();
        let src = Counters(VecDeque::from(vec![
            totals(1_000_000, 0),
            totals(2_000_000, 3_000_000),
            totals(2_500_000, 3_000_000),
        ]));
        let mut m = NetworkMonitor::new_at(src, 100, Slot::TopRight, t0);
        assert!(m.refresh_at(t0 + Duration::from_secs(1)));
        assert_eq!(m.upload().latest(), 1.0);
        assert_eq!(m.download().latest(), 3.0);
        assert!(m.refresh_at(t0 + Duration::from_millis(1500)));
        assert_eq!(m.upload().latest(), 1.0);
        assert_eq!(m.download().latest(), 0.0);
        assert_eq!(m.peak().download_mbps, 3.0);
        assert_eq!(m.upload().len(), 100);
    }

    #[test]
    fn same_instant_tick_skips_and_keeps_baseline() {
        let t0 = Instant::now();
        let src = Counters(VecDeque::from(vec![
            totals(0, 0),
            totals(500_000, 0),
            totals(2_000_000, 0),
        ]));
        let mut m = NetworkMonitor::new_at(src, 10, Slot::TopRight, t0);
        assert!(!m.refresh_at(t0));
        assert_eq!(m.upload().x_range(), (0, 9));
        // baseline still t0, so the 2 MB are spread over the full 2 s
        assert!(m.refresh_at(t0 + Duration::from_secs(2)));
        assert_eq!(m.upload().latest(), 1.0);
    }

    #[test]
    fn read_failure_pushes_zero() {
        let t0 = Instant::now();
        let src = Counters(VecDeque::from(vec![totals(0, 0)]));
        let mut m = NetworkMonitor::new_at(src, 10, Slot::TopRight, t0);
        assert!(m.refresh_at(t0 + Duration::from_secs(1)));
        assert_eq!(m.current(), NetRates::default());
        assert_eq!(m.download().x_range(), (1, 10));
    }
}
