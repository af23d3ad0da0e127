// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization
//!
//! Console output is always on. With the `file-logging` feature and a
//! `file_dir`, a timestamped run folder receives a combined JSON log:
//! ```text
//! ./logs/
//!   └── run_20250101_120000/
//!       └── socsim.log
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
#[cfg(feature = "file-logging")]
use std::path::Path;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{LogFormat, LoggingSettings};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps background log writers alive; flushes on drop
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
    started_at: DateTime<Utc>,
}

impl LoggingGuard {
    /// Run folder receiving log files, if file logging is active
    pub fn log_dir(&self) -> Option<&PathBuf> {
        self.log_dir.as_ref()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

/// Filter directive for the given flags and settings
pub fn filter_directives(debug_flags: &CrateDebugFlags, settings: &LoggingSettings) -> String {
    debug_flags.to_filter_string(&settings.level)
}

/// Install the global tracing subscriber
///
/// # Errors
/// Fails if the filter is malformed, the log directory cannot be created,
/// or a global subscriber is already installed.
pub fn init_logging(debug_flags: &CrateDebugFlags, settings: &LoggingSettings) -> Result<LoggingGuard> {
    let directives = filter_directives(debug_flags, settings);
    let env_filter = EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid log filter: {}", directives))?;

    let mut layers: Vec<BoxedLayer> = Vec::new();

    let console_layer: BoxedLayer = match settings.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_filter(env_filter)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_filter(env_filter)
            .boxed(),
    };
    layers.push(console_layer);

    #[cfg(feature = "file-logging")]
    let (file_guards, log_dir) = match &settings.file_dir {
        Some(base) => {
            let (layer, guard, run_folder) = file_layer(base, &directives, settings.retention_runs)?;
            layers.push(layer);
            (vec![guard], Some(run_folder))
        }
        None => (Vec::new(), None),
    };
    #[cfg(not(feature = "file-logging"))]
    let log_dir: Option<PathBuf> = None;
    #[cfg(not(feature = "file-logging"))]
    let file_dir_ignored = settings.file_dir.is_some();
    #[cfg(feature = "file-logging")]
    let file_dir_ignored = false;

    Registry::default()
        .with(layers)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    if file_dir_ignored {
        tracing::warn!("file_dir is set but file logging is not compiled in; logging to console only");
    }

    Ok(LoggingGuard {
        #[cfg(feature = "file-logging")]
        _file_guards: file_guards,
        log_dir,
        started_at: Utc::now(),
    })
}

#[cfg(feature = "file-logging")]
fn file_layer(
    base: &Path,
    directives: &str,
    retention_runs: usize,
) -> Result<(BoxedLayer, tracing_appender::non_blocking::WorkerGuard, PathBuf)> {
    let run_folder = base.join(format!("run_{}", Utc::now().format("%Y%m%d_%H%M%S")));
    std::fs::create_dir_all(&run_folder)
        .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;
    cleanup_old_runs(base, retention_runs)?;

    let appender = tracing_appender::rolling::daily(&run_folder, "socsim.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .with_filter(EnvFilter::try_new(directives)?)
        .boxed();

    Ok((layer, guard, run_folder))
}

/// Delete all but the newest `retention_runs` run folders
#[cfg(feature = "file-logging")]
fn cleanup_old_runs(base: &Path, retention_runs: usize) -> Result<()> {
    let mut runs: Vec<(PathBuf, chrono::NaiveDateTime)> = Vec::new();
    for entry in std::fs::read_dir(base)? {
        let path = entry?.path();
        let stamp = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_prefix("run_"))
            .and_then(|s| chrono::NaiveDateTime::parse_from_str(s, "%Y%m%d_%H%M%S").ok());
        if let (true, Some(stamp)) = (path.is_dir(), stamp) {
            runs.push((path, stamp));
        }
    }

    runs.sort_by_key(|(_, stamp)| *stamp);
    let excess = runs.len().saturating_sub(retention_runs.max(1));
    for (path, _) in runs.into_iter().take(excess) {
        if let Err(e) = std::fs::remove_dir_all(&path) {
            eprintln!("Warning: Failed to remove old log directory {}: {}", path.display(), e);
        }
    }
    Ok(())
}
