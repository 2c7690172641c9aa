use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing::{info, warn};
use tracing_subscriber::{
    prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

const DEFAULT_FILTER: &str = "wordsearch=info";

/// Send tracing output to `path`. The terminal is owned by the TUI, so logs
/// never go to stdout/stderr. `RUST_LOG` overrides the default filter.
///
/// Failure to open the log file (or a second initialisation) is not fatal;
/// the game just runs without logs.
pub fn init_tracing(path: &Path) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(_) => return,
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .unwrap_or_default();

    let result = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .try_init();

    match result {
        Ok(()) => info!(path = %path.display(), "logging initialised"),
        Err(e) => warn!(error = %e, "tracing already initialised"),
    }
}
