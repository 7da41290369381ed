// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging output configuration types

use crate::ObservabilityError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Where and how log output is written
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogOutputConfig {
    /// Console format
    pub format: LogFormat,

    /// Base directory for run folders; `None` disables file output
    pub log_dir: Option<PathBuf>,

    /// Keep N most recent run folders (at least the current one is always kept)
    pub retention_runs: usize,
}

/// Log format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ObservabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(ObservabilityError::UnknownFormat(s.to_string())),
        }
    }
}

impl Default for LogOutputConfig {
    fn default() -> Self {
        LogOutputConfig {
            format: LogFormat::Text,
            log_dir: None,
            retention_runs: 10,
        }
    }
}
