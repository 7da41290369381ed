// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Unified logging initialization for faultnet
//!
//! Console output always; with the `file-logging` feature and a configured
//! `log_dir`, a combined JSON log in a timestamped run folder.

use anyhow::{Context, Result};
use chrono::{NaiveDateTime, Utc};
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{LogFormat, LogOutputConfig};

const RUN_PREFIX: &str = "run_";
const RUN_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Logging initialization result
///
/// Dropping the guard flushes buffered file output.
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Run folder receiving file logs, if file logging is active
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

/// Initialize the global subscriber
///
/// Creates, when file logging is enabled:
/// ```text
/// <log_dir>/
///   └── run_20250101_120000/
///       └── faultnet.log (JSON, all crates)
/// ```
///
/// # Errors
///
/// Fails if the run folder cannot be created or a global subscriber is already set.
pub fn init_logging(debug_flags: &CrateDebugFlags, config: &LogOutputConfig) -> Result<LoggingGuard> {
    let filter = debug_flags.to_filter_string();
    let mut layers: Vec<BoxedLayer> = Vec::new();

    let console_layer: BoxedLayer = match config.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_filter(EnvFilter::new(&filter))
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_filter(EnvFilter::new(&filter))
            .boxed(),
    };
    layers.push(console_layer);

    #[cfg(feature = "file-logging")]
    let (file_guards, log_dir) = match &config.log_dir {
        Some(base_log_dir) => {
            let run_folder = prepare_run_folder(base_log_dir, config.retention_runs)?;

            let appender = tracing_appender::rolling::never(&run_folder, "faultnet.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .json()
                .with_filter(EnvFilter::new(&filter))
                .boxed();
            layers.push(file_layer);
            (vec![guard], Some(run_folder))
        }
        None => (Vec::new(), None),
    };

    #[cfg(not(feature = "file-logging"))]
    let log_dir: Option<PathBuf> = None;

    Registry::default()
        .with(layers)
        .try_init()
        .context("Failed to install global tracing subscriber")?;

    Ok(LoggingGuard {
        #[cfg(feature = "file-logging")]
        _file_guards: file_guards,
        log_dir,
    })
}

/// Initialize console logging with default settings
pub fn init_logging_default(debug_flags: &CrateDebugFlags) -> Result<LoggingGuard> {
    init_logging(debug_flags, &LogOutputConfig::default())
}

/// Create `<base>/run_<timestamp>`
pub fn create_run_folder(base_log_dir: &Path) -> Result<PathBuf> {
    let timestamp = Utc::now().format(RUN_TIMESTAMP_FORMAT);
    let run_folder = base_log_dir.join(format!("{}{}", RUN_PREFIX, timestamp));
    std::fs::create_dir_all(&run_folder)
        .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;
    Ok(run_folder)
}

/// Create this run's folder and prune older runs down to `retention_runs`.
///
/// Retention is clamped to one so the new folder always survives.
pub fn prepare_run_folder(base_log_dir: &Path, retention_runs: usize) -> Result<PathBuf> {
    let run_folder = create_run_folder(base_log_dir)?;
    cleanup_old_runs(base_log_dir, retention_runs.max(1))?;
    Ok(run_folder)
}

/// Keep only the `retention_runs` most recent run folders; returns how many were removed.
///
/// Entries whose name is not a run timestamp are left alone.
pub fn cleanup_old_runs(base_log_dir: &Path, retention_runs: usize) -> Result<usize> {
    if !base_log_dir.exists() {
        return Ok(0);
    }

    let mut runs: Vec<(PathBuf, NaiveDateTime)> = Vec::new();
    for entry in std::fs::read_dir(base_log_dir)
        .with_context(|| format!("Failed to read log directory: {}", base_log_dir.display()))?
    {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let timestamp = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_prefix(RUN_PREFIX))
            .and_then(|ts| NaiveDateTime::parse_from_str(ts, RUN_TIMESTAMP_FORMAT).ok());
        if let Some(ts) = timestamp {
            runs.push((path, ts));
        }
    }

    if runs.len() <= retention_runs {
        return Ok(0);
    }

    // Oldest first
    runs.sort_by_key(|(_, ts)| *ts);
    let to_remove = runs.len() - retention_runs;
    for (path, _) in runs.iter().take(to_remove) {
        std::fs::remove_dir_all(path)
            .with_context(|| format!("Failed to remove old log directory: {}", path.display()))?;
    }
    Ok(to_remove)
}
