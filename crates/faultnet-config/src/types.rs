// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `faultnet.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default maximum jump distance between clusters (km)
pub const DEFAULT_MAX_JUMP_DIST: f64 = 5.0;

/// Default distance band (km) within which candidates compete on scalar value
pub const DEFAULT_EQUIV_DISTANCE: f64 = 2.0;

/// Upper bound on auto-detected worker threads
pub const MAX_AUTO_THREADS: usize = 31;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FaultnetConfig {
    pub connection: ConnectionConfig,
    pub resources: ResourcesConfig,
    pub diagnostics: DiagnosticsConfig,
    pub logging: LoggingConfig,
}

/// Cluster connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Maximum distance (km) between two sections for them to be a candidate jump
    pub max_jump_dist: f64,
    pub selector: SelectorConfig,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            max_jump_dist: DEFAULT_MAX_JUMP_DIST,
            selector: SelectorConfig::default(),
        }
    }
}

/// Jump selector chain
///
/// ```toml
/// [connection.selector]
/// type = "passes_minimize_failed"
///
/// [connection.selector.fallback]
/// type = "best_scalar"
/// equiv_distance = 2.0
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectorConfig {
    MinDistance,
    BestScalar {
        #[serde(default = "default_equiv_distance")]
        equiv_distance: f64,
    },
    AnyPassMinDistance {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fallback: Option<Box<SelectorConfig>>,
    },
    PassesMinimizeFailed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fallback: Option<Box<SelectorConfig>>,
    },
}

fn default_equiv_distance() -> f64 {
    DEFAULT_EQUIV_DISTANCE
}

impl Default for SelectorConfig {
    fn default() -> Self {
        SelectorConfig::PassesMinimizeFailed {
            fallback: Some(Box::new(SelectorConfig::BestScalar {
                equiv_distance: DEFAULT_EQUIV_DISTANCE,
            })),
        }
    }
}

impl SelectorConfig {
    /// Overwrite the equivalence distance of every `BestScalar` in the chain
    pub fn set_equiv_distance(&mut self, value: f64) {
        match self {
            SelectorConfig::MinDistance => {}
            SelectorConfig::BestScalar { equiv_distance } => *equiv_distance = value,
            SelectorConfig::AnyPassMinDistance { fallback }
            | SelectorConfig::PassesMinimizeFailed { fallback } => {
                if let Some(inner) = fallback {
                    inner.set_equiv_distance(value);
                }
            }
        }
    }

    /// Selectors in the chain, outermost first
    pub fn chain(&self) -> Vec<&SelectorConfig> {
        let mut chain = vec![self];
        let mut current = self;
        while let SelectorConfig::AnyPassMinDistance {
            fallback: Some(inner),
        }
        | SelectorConfig::PassesMinimizeFailed {
            fallback: Some(inner),
        } = current
        {
            chain.push(inner.as_ref());
            current = inner.as_ref();
        }
        chain
    }
}

/// Compute resource limits
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ResourcesConfig {
    /// Worker threads for cluster pair evaluation (0 = auto-detect)
    pub max_threads: usize,
}

impl ResourcesConfig {
    /// Effective worker count: `max_threads`, or `max(1, min(31, cores - 2))` when 0
    pub fn resolve_thread_count(&self) -> usize {
        if self.max_threads > 0 {
            return self.max_threads;
        }
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        cores.saturating_sub(2).clamp(1, MAX_AUTO_THREADS)
    }
}

/// Per-pair diagnostic tracing
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Parent id pairs whose connection search is traced at debug level (order-insensitive)
    pub debug_parent_pairs: Vec<[u32; 2]>,
    /// Trace every pair
    pub trace_all_pairs: bool,
}

/// Logging settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Console format: `text` or `json`
    pub format: String,
    /// Base directory for per-run log folders (file logging builds only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
    /// Number of run folders to keep
    pub retention_runs: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            log_dir: None,
            retention_runs: 10,
        }
    }
}
