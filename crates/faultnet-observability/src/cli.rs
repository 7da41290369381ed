// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! CLI argument parsing for per-crate debug flags
//!
//! Supports flags like `--debug-faultnet-connectivity` to raise one crate to
//! debug level, and `--debug-all`.

use std::collections::HashMap;
use std::env;

use crate::{ObservabilityError, KNOWN_CRATES};

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Parse debug flags from command-line arguments
///
/// # Example
/// ```rust
/// use faultnet_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_args(vec!["--debug-faultnet-connectivity".to_string()]);
/// assert!(flags.is_enabled("faultnet-connectivity"));
/// ```
#[derive(Debug, Clone)]
pub struct CrateDebugFlags {
    pub enabled_crates: HashMap<String, bool>,
    base_level: String,
}

impl Default for CrateDebugFlags {
    fn default() -> Self {
        Self {
            enabled_crates: HashMap::new(),
            base_level: "info".to_string(),
        }
    }
}

impl CrateDebugFlags {
    /// Parse debug flags from command-line arguments
    ///
    /// Looks for arguments matching `--debug-{crate-name}` pattern.
    /// Also supports `--debug-all` to enable all crates.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = CrateDebugFlags::default();
        for arg in args {
            if arg == "--debug-all" {
                flags.enable_all();
                continue;
            }
            if let Some(crate_name) = arg.strip_prefix("--debug-") {
                flags.enabled_crates.insert(crate_name.to_string(), true);
            }
        }
        flags
    }

    /// Level applied to crates without a debug flag (default `info`)
    pub fn with_base_level(mut self, level: &str) -> Result<Self, ObservabilityError> {
        let level = level.to_lowercase();
        if !LEVELS.contains(&level.as_str()) {
            return Err(ObservabilityError::UnknownLevel(level));
        }
        self.base_level = level;
        Ok(self)
    }

    pub fn enable_all(&mut self) {
        for crate_name in KNOWN_CRATES {
            self.enabled_crates.insert(crate_name.to_string(), true);
        }
    }

    /// Check if debug is enabled for a specific crate
    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains_key(crate_name)
    }

    pub fn enabled_crates(&self) -> Vec<&String> {
        self.enabled_crates.keys().collect()
    }

    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// Returns `tracing::Level::DEBUG` if enabled, `tracing::Level::INFO` otherwise.
    pub fn log_level(&self, crate_name: &str) -> tracing::Level {
        if self.is_enabled(crate_name) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Create a tracing filter from debug flags
    ///
    /// Returns a filter string that can be used with `EnvFilter`, e.g.
    /// `"faultnet_connectivity=debug,info"`. Targets are module paths, so crate
    /// names are written with underscores. Entries are sorted for a stable string.
    pub fn to_filter_string(&self) -> String {
        let mut filters: Vec<String> = self
            .enabled_crates
            .keys()
            .map(|crate_name| format!("{}=debug", crate_name.replace('-', "_")))
            .collect();
        filters.sort();
        filters.push(self.base_level.clone());
        filters.join(",")
    }
}

/// Parse debug flags from process arguments and the environment
///
/// Checks both command-line arguments and the `FAULTNET_DEBUG` environment variable.
/// Environment variable format: comma-separated crate names, e.g.
/// `"faultnet-connectivity,faultnet-config"`, or `all`.
pub fn parse_debug_flags() -> CrateDebugFlags {
    let mut flags = CrateDebugFlags::from_args(env::args());
    if let Ok(env_var) = env::var("FAULTNET_DEBUG") {
        apply_debug_env(&mut flags, &env_var);
    }
    flags
}

fn apply_debug_env(flags: &mut CrateDebugFlags, value: &str) {
    if value == "all" {
        flags.enable_all();
        return;
    }
    for crate_name in value.split(',') {
        let crate_name = crate_name.trim();
        if !crate_name.is_empty() {
            flags.enabled_crates.insert(crate_name.to_string(), true);
        }
    }
}

/// Generate help text for debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug-all                    Enable debug logging for all crates
  --debug-{{crate-name}}          Enable debug logging for specific crate

Available crates:
  {}

Environment Variable:
  FAULTNET_DEBUG={{crate-name}}[,{{crate-name}}]  Enable debug for crates (comma-separated)
  FAULTNET_DEBUG=all                               Enable debug for all crates

Examples:
  --debug-faultnet-connectivity
  FAULTNET_DEBUG=faultnet-connectivity,faultnet-config
"#,
        KNOWN_CRATES.join(", ")
    )
}
