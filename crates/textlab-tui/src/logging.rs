//! Tracing subscriber setup.
//!
//! The full-screen front end owns the terminal, so it only logs when a file
//! is configured. The plain front end logs to stderr unless a file is given.

use std::{fs::File, io, path::Path, sync::Mutex};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::RuntimeConfig;

/// Filter from `RUST_LOG`, falling back to `default_level`.
pub fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install the global subscriber for `config`.
///
/// # Errors
///
/// Returns an error if the log file cannot be created.
pub fn init(config: &RuntimeConfig) -> io::Result<()> {
    let filter = filter(&config.log_level);

    match (&config.log_file, config.plain) {
        (Some(path), _) => {
            let writer = Mutex::new(open(path)?);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            tracing_subscriber::registry().with(layer).with(filter).init();
        },
        (None, true) => {
            let layer = fmt::layer().with_writer(io::stderr);
            tracing_subscriber::registry().with(layer).with(filter).init();
        },
        (None, false) => {},
    }
    Ok(())
}

fn open(path: &Path) -> io::Result<File> {
    File::options().create(true).append(true).open(path)
}
