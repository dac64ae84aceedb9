//! Metric sources backed by sysinfo.
//!
//! Each monitor owns exactly one source. The traits are the seam tests use to
//! feed synthetic readings.

use std::time::Duration;

use sysinfo::{CpuRefreshKind, MemoryRefreshKind, Networks, RefreshKind, System};
use thiserror::Error;
use tracing::debug;

use crate::types::{MemoryReading, NetTotals};

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("{0} counters unavailable")]
    Unavailable(&'static str),
    #[error("sampler panicked while refreshing {0}")]
    Panicked(&'static str),
}

pub trait MemorySource {
    fn read(&mut self) -> Result<MemoryReading, SampleError>;
}

pub trait NetworkSource {
    fn read(&mut self) -> Result<NetTotals, SampleError>;
}

pub trait CpuSource {
    /// Logical core count, fixed for the life of the process.
    fn core_count(&self) -> usize;
    /// Per-core usage in percent, one entry per logical core.
    fn read(&mut self) -> Result<Vec<f64>, SampleError>;
}

impl<S: MemorySource + ?Sized> MemorySource for Box<S> {
    fn read(&mut self) -> Result<MemoryReading, SampleError> {
        (**self).read()
    }
}

impl<S: NetworkSource + ?Sized> NetworkSource for Box<S> {
    fn read(&mut self) -> Result<NetTotals, SampleError> {
        (**self).read()
    }
}

impl<S: CpuSource + ?Sized> CpuSource for Box<S> {
    fn core_count(&self) -> usize {
        (**self).core_count()
    }
    fn read(&mut self) -> Result<Vec<f64>, SampleError> {
        (**self).read()
    }
}

// sysinfo occasionally panics on odd /proc contents; treat that as a failed read.
fn guarded<T>(what: &'static str, f: impl FnOnce() -> T) -> Result<T, SampleError> {
    std::panic::catch_unwind(std::panic::AssertUnwindSafe(f))
        .map_err(|_| SampleError::Panicked(what))
}

pub struct SysMemory {
    sys: System,
}

impl SysMemory {
    pub fn new() -> Self {
        let sys = System::new_with_specifics(
            RefreshKind::nothing().with_memory(MemoryRefreshKind::nothing().with_ram()),
        );
        Self { sys }
    }
}

impl Default for SysMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySource for SysMemory {
    fn read(&mut self) -> Result<MemoryReading, SampleError> {
        let sys = &mut self.sys;
        guarded("memory", || {
            sys.refresh_memory_specifics(MemoryRefreshKind::nothing().with_ram())
        })?;
        let total = self.sys.total_memory();
        if total == 0 {
            return Err(SampleError::Unavailable("memory"));
        }
        let used = total.saturating_sub(self.sys.available_memory());
        Ok(MemoryReading { used, total })
    }
}

pub struct SysNetwork {
    nets: Networks,
}

impl SysNetwork {
    pub fn new() -> Self {
        Self {
            nets: Networks::new_with_refreshed_list(),
        }
    }
}

impl Default for SysNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkSource for SysNetwork {
    fn read(&mut self) -> Result<NetTotals, SampleError> {
        let nets = &mut self.nets;
        // true: drop interfaces that went away so their totals stop counting
        guarded("network", || nets.refresh(true))?;
        let totals = self
            .nets
            .iter()
            .fold(NetTotals { sent: 0, received: 0 }, |acc, (_, data)| NetTotals {
                sent: acc.sent.saturating_add(data.total_transmitted()),
                received: acc.received.saturating_add(data.total_received()),
            });
        Ok(totals)
    }
}

/// How long a CPU read really blocks: sysinfo needs at least
/// `MINIMUM_CPU_UPDATE_INTERVAL` between refreshes for a usable reading.
pub fn effective_cpu_window(window: Duration) -> Duration {
    window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL)
}

pub struct SysCpu {
    sys: System,
    cores: usize,
    window: Duration,
}

impl SysCpu {
    /// `window` is how long each read blocks to average out jitter.
    pub fn new(window: Duration) -> Self {
        let sys = System::new_with_specifics(
            RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing().with_cpu_usage()),
        );
        let cores = match sys.cpus().len() {
            0 => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            n => n,
        };
        debug!(cores, "detected logical cores");
        Self { sys, cores, window }
    }
}

impl CpuSource for SysCpu {
    fn core_count(&self) -> usize {
        self.cores
    }

    fn read(&mut self) -> Result<Vec<f64>, SampleError> {
        let window = effective_cpu_window(self.window);
        let sys = &mut self.sys;
        guarded("cpu", || {
            sys.refresh_cpu_usage();
            std::thread::sleep(window);
            sys.refresh_cpu_usage();
        })?;
        let usage: Vec<f64> = self
            .sys
            .cpus()
            .iter()
            .map(|c| ((c.cpu_usage() as f64) * 10.0).round() / 10.0)
            .collect();
        if usage.is_empty() {
            return Err(SampleError::Unavailable("cpu"));
        }
        Ok(usage)
    }
}
