// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # faultnet-observability
//!
//! Logging initialisation for faultnet binaries and tests, with per-crate debug
//! flag support.
//!
//! ## Features
//! - `file-logging`: JSON log files in a timestamped run folder (desktop only)

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

pub use cli::*;
pub use config::*;
pub use init::*;

/// Known faultnet crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "faultnet",
    "faultnet-config",
    "faultnet-connectivity",
    "faultnet-observability",
];

/// Observability errors
#[derive(Debug, thiserror::Error)]
pub enum ObservabilityError {
    #[error("Unknown log level: {0}")]
    UnknownLevel(String),

    #[error("Unknown log format: {0}")]
    UnknownFormat(String),
}
