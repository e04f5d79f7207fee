use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter (e.g. `pantry=debug`)
pub const LOG_ENV: &str = "PANTRY_LOG";

/// Where log lines go
#[derive(Debug, Clone)]
pub enum LogTarget {
    /// CLI: stderr, next to the `error:` lines
    Stderr,
    /// TUI: append to a file so the alternate screen stays clean
    File(PathBuf),
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(target: LogTarget) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    match target {
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            // No log file, no logging: the TUI must not write to the terminal
            let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
                return;
            };
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
    }
}
