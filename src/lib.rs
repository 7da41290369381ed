// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # faultnet
//!
//! Decides which fault subsection clusters connect into multi-fault ruptures, and
//! through which jump point.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use faultnet::prelude::*;
//! use std::sync::Arc;
//!
//! # fn filters() -> Vec<Arc<dyn PlausibilityFilter>> { unimplemented!() }
//! # fn sections() -> Vec<Arc<FaultSection>> { unimplemented!() }
//! let config = faultnet::config::load_config(None, None)?;
//! let _guard = faultnet::init_logging(&config)?;
//!
//! let connected = faultnet::connect_network(
//!     &config,
//!     &sections(),
//!     Arc::new(SectionDistanceCache::new()),
//!     filters(),
//! )?;
//! println!("{} connections", faultnet::connectivity::unique_undirected_jumps(&connected).len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Feature Flags
//!
//! - **`parallel`** (default): evaluate cluster pairs on a rayon worker pool
//! - **`file-logging`**: JSON log files in timestamped run folders
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: faultnet-config, faultnet-observability    │
//! │  (TOML + overrides, logging)                            │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Algorithms: faultnet-connectivity                      │
//! │  (candidates, plausibility, jump selection)             │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

use std::sync::Arc;

pub use faultnet_config as config;
pub use faultnet_connectivity as connectivity;
pub use faultnet_observability as observability;

use faultnet_config::{validate_config, FaultnetConfig};
use faultnet_connectivity::{
    build_clusters, connect_clusters, ConnectivityResult, FaultSection, FaultSubsectionCluster,
    PlausibilityFilter, PlausibleConnectionStrategy, SectionDistanceProvider,
};
use faultnet_observability::{parse_debug_flags, LogOutputConfig, LoggingGuard};
use tracing::info;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use faultnet_config::{FaultnetConfig, SelectorConfig};
    pub use faultnet_connectivity::{
        CandidateJump, ClusterConnectionStrategy, ClusterRupture, ConnectivityError,
        ConnectivityResult, FaultSection, FaultSubsectionCluster, Jump, JumpSelector,
        PlausibilityFilter, PlausibilityResult, PlausibleConnectionStrategy,
        PrecomputedConnectionStrategy, ScalarRange, ScalarValuePlausibilityFilter,
        SectionDistanceCache, SectionDistanceProvider, TracePoint,
    };
    pub use faultnet_observability::{CrateDebugFlags, LogFormat, LogOutputConfig};
}

/// Output settings from the `[logging]` section.
pub fn log_output(config: &FaultnetConfig) -> anyhow::Result<LogOutputConfig> {
    Ok(LogOutputConfig {
        format: config.logging.format.parse()?,
        log_dir: config.logging.log_dir.clone(),
        retention_runs: config.logging.retention_runs,
    })
}

/// Install the global subscriber: `logging.level` as the base level, raised per crate
/// by `--debug-<crate>` arguments and `FAULTNET_DEBUG`; output per `[logging]`.
pub fn init_logging(config: &FaultnetConfig) -> anyhow::Result<LoggingGuard> {
    let flags = parse_debug_flags().with_base_level(&config.logging.level)?;
    faultnet_observability::init_logging(&flags, &log_output(config)?)
}

/// Validate `config` and build the plausible connection strategy it describes.
pub fn plausible_strategy(
    config: &FaultnetConfig,
    distances: Arc<dyn SectionDistanceProvider>,
    filters: Vec<Arc<dyn PlausibilityFilter>>,
) -> ConnectivityResult<PlausibleConnectionStrategy> {
    validate_config(config)?;
    PlausibleConnectionStrategy::from_config(
        &config.connection,
        &config.diagnostics,
        distances,
        filters,
    )
}

/// Group `sections` into clusters and connect every cluster pair.
///
/// Returns one cluster per parent run, in input order, carrying its outgoing jumps.
pub fn connect_network(
    config: &FaultnetConfig,
    sections: &[Arc<FaultSection>],
    distances: Arc<dyn SectionDistanceProvider>,
    filters: Vec<Arc<dyn PlausibilityFilter>>,
) -> ConnectivityResult<Vec<FaultSubsectionCluster>> {
    let strategy = plausible_strategy(config, distances, filters)?;
    let clusters = build_clusters(sections)?;
    let threads = config.resources.resolve_thread_count();
    info!(
        "Connecting {} sections in {} clusters ({})",
        sections.len(),
        clusters.len(),
        strategy.selector().name()
    );
    connect_clusters(&strategy, &clusters, threads)
}
