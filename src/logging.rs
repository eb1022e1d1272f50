//! Tracing setup
//!
//! CLI mode logs to stderr. The TUI owns the terminal, so it logs to
//! `<cache dir>/movierec/movierec.log` instead. `RUST_LOG` overrides the
//! default filter in both modes.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Log to stderr: warnings by default, info with `--verbose`
pub fn init_cli(verbose: bool) {
    let default = if verbose { "movierec=info" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(default))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

/// Log file used by the interactive session
pub fn log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join("movierec").join("movierec.log"))
}

/// Log to the cache-dir log file; returns the path when logging is active
pub fn init_tui() -> Option<PathBuf> {
    let path = log_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok()?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;

    tracing_subscriber::fmt()
        .with_env_filter(filter("movierec=info"))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .ok()?;

    Some(path)
}
