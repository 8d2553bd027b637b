//! # Logging Setup
//!
//! Installs the global tracing subscriber: an `EnvFilter` (`RUST_LOG` wins over the
//! built-in default), an optional console layer and a plain-text file layer.
//! The previous session's log file is removed first.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::domain::config::LoggingConfig;

pub const DEFAULT_FILTER: &str = "info,serenity=warn,tracing::span=warn,hyper=warn";

/// Path of the log file for `tool`, e.g. `data/aura.log`.
pub fn log_path(config: &LoggingConfig, tool: &str) -> PathBuf {
    let file = config
        .file
        .clone()
        .unwrap_or_else(|| format!("{tool}.log"));
    Path::new(&config.directory).join(file)
}

/// Keep the returned guard alive for the life of the process, or buffered lines are lost.
pub fn init_tracing(config: &LoggingConfig, tool: &str) -> Result<WorkerGuard> {
    let path = log_path(config, tool);
    let directory = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .context("Log file name is empty")?
        .to_owned();

    fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create log directory {}", directory.display()))?;

    // Clear previous session log
    if path.exists() {
        let _ = fs::remove_file(&path);
    }

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);

    let console_layer = config
        .console
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stdout));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}
