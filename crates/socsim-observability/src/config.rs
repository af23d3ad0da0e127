//! Observability configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Console/file log format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Base level (trace, debug, info, warn, error)
    pub level: String,

    /// Console format
    pub format: LogFormat,

    /// Directory for rolling log files; requires the `file-logging` feature
    pub file_dir: Option<PathBuf>,

    /// Number of past run folders kept under `file_dir`
    pub retention_runs: usize,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            file_dir: None,
            retention_runs: 10,
        }
    }
}
