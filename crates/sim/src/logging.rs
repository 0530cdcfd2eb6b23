//! Diagnostics setup: warnings to stderr, everything the filter allows to a file.

use anyhow::{Context, Result};
use battle_runtime::RuntimeConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::dirs;

/// Installs the global subscriber. Keep the returned guard alive until exit so
/// buffered file output is flushed.
pub fn setup_logging(config: &RuntimeConfig) -> Result<WorkerGuard> {
    let log_dir = dirs::log_dir(config.log_dir.as_deref());
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender =
        tracing_appender::rolling::never(&log_dir, format!("{}.log", config.run_id));
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer().with_writer(non_blocking_file).with_ansi(false);
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(LevelFilter::WARN);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    tracing::info!("Logging initialized: run={}", config.run_id);
    tracing::info!("Log file: {}/{}.log", log_dir.display(), config.run_id);
    Ok(guard)
}
