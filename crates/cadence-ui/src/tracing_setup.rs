//! Tracing bootstrap for the client shell.

use std::fs::OpenOptions;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Install the global subscriber: fmt output filtered by `RUST_LOG`
/// (defaulting to `info`), plus an optional append-mode debug log file when
/// `CADENCE_LOG_FILE` is set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = std::env::var("CADENCE_LOG_FILE").ok().and_then(|path| {
        let file = OpenOptions::new().create(true).append(true).open(&path);
        match file {
            Ok(file) => Some(
                fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_filter(LevelFilter::DEBUG),
            ),
            Err(err) => {
                eprintln!("failed to open log file {path}: {err}");
                None
            }
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_filter(filter))
        .with(file_layer)
        .init();
}
