//! Live memory, network and per-core CPU charts in the terminal.

pub mod app;
pub mod config;
pub mod history;
pub mod logging;
pub mod monitor;
pub mod sampler;
pub mod scheduler;
pub mod types;
pub mod ui;
