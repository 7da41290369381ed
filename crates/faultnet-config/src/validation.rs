// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Checks that distances are usable, the selector chain is well formed and
//! diagnostics reference real parent pairs.

use crate::{ConfigError, ConfigResult, FaultnetConfig, SelectorConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["text", "json"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    InvalidDistance { field: String, value: f64 },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDistance { field, value } => {
                write!(
                    f,
                    "{} = {} must be a finite, non-negative distance",
                    field, value
                )
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// All violations are collected and reported together.
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` with details if validation fails
pub fn validate_config(config: &FaultnetConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_connection(config, &mut errors);
    validate_diagnostics(config, &mut errors);
    validate_logging(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn is_valid_distance(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn validate_connection(config: &FaultnetConfig, errors: &mut Vec<ConfigValidationError>) {
    let max_jump_dist = config.connection.max_jump_dist;
    if !is_valid_distance(max_jump_dist) {
        errors.push(ConfigValidationError::InvalidDistance {
            field: "connection.max_jump_dist".to_string(),
            value: max_jump_dist,
        });
    }

    for selector in config.connection.selector.chain() {
        if let SelectorConfig::BestScalar { equiv_distance } = selector {
            if !is_valid_distance(*equiv_distance) {
                errors.push(ConfigValidationError::InvalidDistance {
                    field: "connection.selector.equiv_distance".to_string(),
                    value: *equiv_distance,
                });
            }
        }
    }
}

fn validate_diagnostics(config: &FaultnetConfig, errors: &mut Vec<ConfigValidationError>) {
    for [a, b] in &config.diagnostics.debug_parent_pairs {
        if a == b {
            errors.push(ConfigValidationError::InvalidValue {
                field: "diagnostics.debug_parent_pairs".to_string(),
                reason: format!("parent {} is paired with itself", a),
            });
        }
    }
}

fn validate_logging(config: &FaultnetConfig, errors: &mut Vec<ConfigValidationError>) {
    let level = config.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!(
                "'{}' is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }
    let format = config.logging.format.to_lowercase();
    if !LOG_FORMATS.contains(&format.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.format".to_string(),
            reason: format!(
                "'{}' is not one of {}",
                config.logging.format,
                LOG_FORMATS.join(", ")
            ),
        });
    }
    if config.logging.retention_runs == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.retention_runs".to_string(),
            reason: "must keep at least the current run".to_string(),
        });
    }
}
