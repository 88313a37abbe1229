//! Logging utilities

use std::path::PathBuf;

use color_eyre::eyre::{Result, WrapErr};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    self, filter::EnvFilter, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt, Layer,
};

use super::paths::{get_data_dir, LOG_ENV, LOG_FILE};

/// Directive used when neither `RUST_LOG` nor `TABDASH_LOGLEVEL` is set.
/// HTTP internals are noisy at info.
pub fn default_filter() -> String {
    format!(
        "{}=info,reqwest=warn,hyper=warn,hyper_util=warn",
        env!("CARGO_CRATE_NAME")
    )
}

fn resolve_filter(rust_log: Option<String>, app_level: Option<String>) -> String {
    rust_log
        .or(app_level)
        .filter(|directive| !directive.trim().is_empty())
        .unwrap_or_else(default_filter)
}

pub fn log_path() -> PathBuf {
    get_data_dir().join(LOG_FILE.as_str())
}

/// Route `log` and `tracing` output to `<data dir>/tabdash.log`. Stdout
/// belongs to the terminal UI, so nothing is written there.
pub fn initialize_logging() -> Result<()> {
    let directory = get_data_dir();
    std::fs::create_dir_all(&directory)
        .wrap_err_with(|| format!("failed to create {}", directory.display()))?;
    let path = log_path();
    let log_file = std::fs::File::create(&path)
        .wrap_err_with(|| format!("failed to create {}", path.display()))?;

    let directive = resolve_filter(
        std::env::var("RUST_LOG").ok(),
        std::env::var(LOG_ENV.as_str()).ok(),
    );
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        eprintln!("Invalid log filter {directive:?} ({e}), using defaults");
        EnvFilter::new(default_filter())
    });

    let file_subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(filter);
    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .init();
    Ok(())
}
