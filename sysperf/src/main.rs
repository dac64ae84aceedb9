//! Entry point for the sysperf TUI. Parses args, resolves settings and runs the App.

use std::env;

use anyhow::Context;
use sysperf::app::App;
use sysperf::config::{
    load_settings_from, log_path, save_settings_to, settings_path, SettingsOverrides,
};
use sysperf::logging::{self, LogTarget};
use tracing::info;

const USAGE: &str =
    "[--interval MS|-i MS] [--capacity N|-c N] [--cpu-window MS] [--save] [--dry-run]";

struct ParsedArgs {
    overrides: SettingsOverrides,
    save: bool,
    dry_run: bool,
}

enum ArgError {
    Help(String),
    Invalid(String),
}

fn parse_num<T: std::str::FromStr>(flag: &str, v: Option<String>) -> Result<T, String> {
    let v = v.ok_or_else(|| format!("{flag} needs a value"))?;
    v.parse()
        .map_err(|_| format!("{flag}: '{v}' is not a valid number"))
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, ArgError> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "sysperf".into());
    let usage = format!("Usage: {prog} {USAGE}");
    let invalid = |msg: String| ArgError::Invalid(format!("{msg}\n{usage}"));

    let mut overrides = SettingsOverrides::default();
    let mut save = false; // --save
    let mut dry_run = false; // --dry-run

    while let Some(arg) = it.next() {
        // --flag=value
        let (flag, inline) = match arg.split_once('=') {
            Some((f, v)) if f.starts_with("--") => (f.to_string(), Some(v.to_string())),
            _ => (arg.clone(), None),
        };
        let value = |it: &mut I::IntoIter| inline.clone().or_else(|| it.next());
        match flag.as_str() {
            "-h" | "--help" => return Err(ArgError::Help(usage.clone())),
            "--interval" | "-i" => {
                overrides.interval_ms = Some(parse_num(&flag, value(&mut it)).map_err(invalid)?);
            }
            "--capacity" | "-c" => {
                overrides.capacity = Some(parse_num(&flag, value(&mut it)).map_err(invalid)?);
            }
            "--cpu-window" => {
                overrides.cpu_window_ms =
                    Some(parse_num(&flag, value(&mut it)).map_err(invalid)?);
            }
            "--save" => save = true,
            "--dry-run" => dry_run = true,
            _ => return Err(invalid(format!("Unexpected argument '{arg}'."))),
        }
    }
    Ok(ParsedArgs {
        overrides,
        save,
        dry_run,
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let parsed = match parse_args(env::args()) {
        Ok(v) => v,
        Err(ArgError::Help(msg)) => {
            println!("{msg}");
            return Ok(());
        }
        Err(ArgError::Invalid(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };

    logging::init(if parsed.dry_run {
        LogTarget::Stderr
    } else {
        LogTarget::File(log_path())
    });

    let path = settings_path();
    let settings = parsed.overrides.apply(load_settings_from(&path));
    if let Err(e) = settings.validate() {
        eprintln!("invalid settings: {e}");
        std::process::exit(2);
    }

    if parsed.save {
        save_settings_to(&path, &settings)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("saved settings to {}", path.display());
    }

    if parsed.dry_run {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    info!("sysperf v{} starting", env!("CARGO_PKG_VERSION"));
    let mut app = App::new(&settings);
    tokio::select! {
        res = app.run() => res,
        _ = tokio::signal::ctrl_c() => Ok(()),
    }
}
