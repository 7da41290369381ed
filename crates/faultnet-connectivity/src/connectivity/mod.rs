// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Cluster connection discovery and selection.

This module finds candidate jump points between two clusters, evaluates them
against plausibility filters and selects the best one.
*/

pub mod candidate;
pub mod graph;
pub mod plausible;
pub mod precomputed;
pub mod selectors;
pub mod strands;
pub mod strategy;

pub use candidate::{collect_candidates, find_scalar_filter, CandidateEvaluator, CandidateJump};
pub use graph::{build_clusters, connect_clusters, unique_undirected_jumps};
pub use plausible::{DiagnosticPairs, PlausibleConnectionStrategy};
pub use precomputed::PrecomputedConnectionStrategy;
pub use selectors::{
    default_selector, min_distance, selector_from_config, AnyPassMinDistSelector,
    BestScalarSelector, JumpSelector, MinDistanceSelector, PassesMinimizeFailedSelector,
    DEFAULT_EQUIV_DISTANCE,
};
pub use strands::strands_at;
pub use strategy::ClusterConnectionStrategy;
