// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Configuration is resolved in three tiers:
//! 1. TOML file (base values)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, FaultnetConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "faultnet.toml";

/// Find the faultnet configuration file
///
/// Search order:
/// 1. `FAULTNET_CONFIG_PATH` environment variable
/// 2. Current working directory: `./faultnet.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("FAULTNET_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by FAULTNET_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        let mut current = cwd.as_path();
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent;
                }
                None => break,
            }
        }
    }

    if let Some(found) = search_paths.iter().find(|p| p.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "faultnet configuration file '{}' not found in any of these locations:\n{}\n\nSet FAULTNET_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found or contains invalid TOML
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<FaultnetConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: FaultnetConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `FAULTNET_MAX_JUMP_DIST` -> `connection.max_jump_dist`
/// - `FAULTNET_SELECTOR_EQUIV_DISTANCE` -> every `best_scalar` in `connection.selector`
/// - `FAULTNET_MAX_THREADS` -> `resources.max_threads`
/// - `FAULTNET_LOG_LEVEL` -> `logging.level`
/// - `FAULTNET_LOG_FORMAT` -> `logging.format`
///
/// Values that fail to parse are ignored.
pub fn apply_environment_overrides(config: &mut FaultnetConfig) {
    if let Ok(value) = env::var("FAULTNET_MAX_JUMP_DIST") {
        if let Ok(dist) = value.parse::<f64>() {
            config.connection.max_jump_dist = dist;
        }
    }
    if let Ok(value) = env::var("FAULTNET_SELECTOR_EQUIV_DISTANCE") {
        if let Ok(equiv) = value.parse::<f64>() {
            config.connection.selector.set_equiv_distance(equiv);
        }
    }
    if let Ok(value) = env::var("FAULTNET_MAX_THREADS") {
        if let Ok(threads) = value.parse::<usize>() {
            config.resources.max_threads = threads;
        }
    }
    if let Ok(value) = env::var("FAULTNET_LOG_LEVEL") {
        config.logging.level = value;
    }
    if let Ok(value) = env::var("FAULTNET_LOG_FORMAT") {
        config.logging.format = value;
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"max_jump_dist": "3.0", "max_threads": "8"}`)
pub fn apply_cli_overrides(config: &mut FaultnetConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("max_jump_dist") {
        if let Ok(dist) = value.parse::<f64>() {
            config.connection.max_jump_dist = dist;
        }
    }
    if let Some(value) = cli_args.get("max_threads") {
        if let Ok(threads) = value.parse::<usize>() {
            config.resources.max_threads = threads;
        }
    }
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
}
