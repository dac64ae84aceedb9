//! Settings: load/save a small JSON file with the tick interval and window sizes.
//! Stored under XDG config dir: $XDG_CONFIG_HOME/sysperf/config.json (fallback ~/.config/sysperf/config.json)

use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;
use tracing::warn;

use crate::sampler::effective_cpu_window;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Shared refresh tick.
    pub interval_ms: u64,
    /// Samples kept per rolling series.
    pub capacity: usize,
    /// How long each CPU read blocks to average jitter.
    pub cpu_window_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interval_ms: 1500,
            capacity: 100,
            cpu_window_ms: 100,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("interval must be greater than 0 ms")]
    ZeroInterval,
    #[error("capacity must be at least 2 samples (got {0})")]
    CapacityTooSmall(usize),
    #[error("cpu window ({window} ms) must be shorter than the interval ({interval} ms)")]
    CpuWindowTooLong { window: u64, interval: u64 },
}

impl Settings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn cpu_window(&self) -> Duration {
        Duration::from_millis(self.cpu_window_ms)
    }

    /// The configured window raised to the minimum the sampler will block for.
    pub fn effective_cpu_window(&self) -> Duration {
        effective_cpu_window(self.cpu_window())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.capacity < 2 {
            return Err(ConfigError::CapacityTooSmall(self.capacity));
        }
        // all monitors share one thread; the cpu read must not eat the whole tick
        let window = self.effective_cpu_window();
        if window >= self.interval() {
            return Err(ConfigError::CpuWindowTooLong {
                window: window.as_millis() as u64,
                interval: self.interval_ms,
            });
        }
        Ok(())
    }
}

/// Command-line values layered over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub interval_ms: Option<u64>,
    pub capacity: Option<usize>,
    pub cpu_window_ms: Option<u64>,
}

impl SettingsOverrides {
    pub fn apply(self, mut s: Settings) -> Settings {
        if let Some(v) = self.interval_ms {
            s.interval_ms = v;
        }
        if let Some(v) = self.capacity {
            s.capacity = v;
        }
        if let Some(v) = self.cpu_window_ms {
            s.cpu_window_ms = v;
        }
        s
    }
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("sysperf")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sysperf")
    }
}

pub fn settings_path() -> PathBuf {
    config_dir().join("config.json")
}

pub fn log_path() -> PathBuf {
    config_dir().join("sysperf.log")
}

/// Missing file means defaults; a broken one is logged and also means defaults.
pub fn load_settings_from(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
            warn!("ignoring malformed {}: {e}", path.display());
            Settings::default()
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Settings::default(),
        Err(e) => {
            warn!("cannot read {}: {e}", path.display());
            Settings::default()
        }
    }
}

pub fn save_settings_to(path: &Path, s: &Settings) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(s).map_err(io::Error::other)?;
    fs::write(path, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let s = Settings::default();
        assert_eq!(s.interval(), Duration::from_millis(1500));
        assert_eq!(s.capacity, 100);
        assert_eq!(s.validate(), Ok(()));
    }

    #[test]
    fn validation_rejects_bad_values() {
        let bad = |o: SettingsOverrides| o.apply(Settings::default()).validate();
        assert_eq!(
            bad(SettingsOverrides {
                interval_ms: Some(0),
                ..Default::default()
            }),
            Err(ConfigError::ZeroInterval)
        );
        assert_eq!(
            bad(SettingsOverrides {
                capacity: Some(1),
                ..Default::default()
            }),
            Err(ConfigError::CapacityTooSmall(1))
        );
        assert_eq!(
            bad(SettingsOverrides {
                interval_ms: Some(100),
                ..Default::default()
            }),
            Err(ConfigError::CpuWindowTooLong {
                window: Settings::default().effective_cpu_window().as_millis() as u64,
                interval: 100
            })
        );
    }

    #[test]
    fn cpu_window_checked_at_its_effective_length() {
        let s = Settings {
            interval_ms: 150,
            capacity: 100,
            cpu_window_ms: 100,
        };
        let window = s.effective_cpu_window();
        assert!(window >= s.cpu_window());
        assert!(
            s.validate().is_err() || window < s.interval(),
            "cpu read blocks {window:?}, longer than the {:?} tick",
            s.interval()
        );

        // an interval equal to the effective window is always rejected
        let tight = Settings {
            interval_ms: window.as_millis() as u64,
            ..s
        };
        assert!(matches!(
            tight.validate(),
            Err(ConfigError::CpuWindowTooLong { .. })
        ));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn sysinfo_minimum_applies_on_linux() {
        let s = Settings {
            interval_ms: 150,
            capacity: 100,
            cpu_window_ms: 100,
        };
        assert_eq!(s.effective_cpu_window(), sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        assert!(s.validate().is_err());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("config.json");
        fs::write(&path, r#"{ "interval_ms": 500 }"#).unwrap();
        let s = load_settings_from(&path);
        assert_eq!(s.interval_ms, 500);
        assert_eq!(s.capacity, 100);
    }

    #[test]
    fn missing_or_malformed_file_gives_defaults() {
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("config.json");
        assert_eq!(load_settings_from(&path), Settings::default());
        fs::write(&path, "not json").unwrap();
        assert_eq!(load_settings_from(&path), Settings::default());
    }

    #[test]
    fn save_then_load() {
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("nested").join("config.json");
        let s = SettingsOverrides {
            capacity: Some(60),
            ..Default::default()
        }
        .apply(Settings::default());
        save_settings_to(&path, &s).unwrap();
        assert_eq!(load_settings_from(&path), s);
    }
}
