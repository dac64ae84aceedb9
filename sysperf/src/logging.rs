//! tracing setup. The interactive UI owns the terminal, so logs go to a file.
//!
//! The file target creates its parent directory (the config dir) on every
//! interactive run, whether or not settings are ever saved there.

use std::{fs, path::PathBuf, sync::Mutex};

use tracing_subscriber::EnvFilter;

pub enum LogTarget {
    File(PathBuf),
    Stderr,
}

/// RUST_LOG controls verbosity (default: info). Safe to call more than once;
/// later calls are ignored.
pub fn init(target: LogTarget) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let _ = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            match fs::OpenOptions::new().create(true).append(true).open(&path) {
                Ok(file) => builder
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init(),
                // nowhere to write: keep the UI clean and drop the logs
                Err(_) => builder.with_writer(std::io::sink).try_init(),
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_target_creates_missing_config_dir() {
        let td = tempfile::tempdir().unwrap();
        let dir = td.path().join("sysperf");
        let path = dir.join("sysperf.log");
        assert!(!dir.exists());
        init(LogTarget::File(path.clone()));
        assert!(dir.is_dir());
        assert!(path.is_file());
    }
}
