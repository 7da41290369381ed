// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Core types for connectivity operations.
*/

/// Stable fault subsection identifier
pub type SectionId = u32;

/// Identifier of the parent fault a subsection belongs to
pub type ParentId = u32;

/// Result type for connectivity operations
pub type ConnectivityResult<T> = Result<T, ConnectivityError>;

/// Errors that can occur while building or querying cluster connections
#[derive(Debug, thiserror::Error)]
pub enum ConnectivityError {
    #[error("At least one plausibility filter is required")]
    NoFilters,

    #[error("Invalid maximum jump distance: {0} (must be finite and >= 0)")]
    InvalidMaxJumpDistance(f64),

    #[error("Empty cluster: {0}")]
    EmptyCluster(String),

    #[error("Cluster mixes parents: expected {expected}, found {found}")]
    MixedParents { expected: ParentId, found: ParentId },

    #[error("Invalid jump: {0}")]
    InvalidJump(String),

    #[error("Connections already computed: {0}")]
    AlreadyComputed(String),

    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<faultnet_config::ConfigError> for ConnectivityError {
    fn from(err: faultnet_config::ConfigError) -> Self {
        ConnectivityError::Config(err.to_string())
    }
}

#[cfg(feature = "parallel")]
impl From<rayon::ThreadPoolBuildError> for ConnectivityError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        ConnectivityError::ThreadPool(err.to_string())
    }
}
