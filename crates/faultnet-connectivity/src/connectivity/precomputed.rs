// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Replays connectivity that was computed earlier.
*/

use super::strategy::ClusterConnectionStrategy;
use crate::models::{FaultSubsectionCluster, Jump};
use crate::types::{ConnectivityError, ConnectivityResult, ParentId};
use ahash::AHashSet;
use std::sync::Arc;
use tracing::warn;

/// Connection strategy over an already-connected cluster graph.
///
/// Connections are fixed at construction; asking it to compute new ones is a
/// programming error.
pub struct PrecomputedConnectionStrategy {
    name: String,
    max_jump_dist: f64,
    clusters: Vec<Arc<FaultSubsectionCluster>>,
    connected_parents: AHashSet<(ParentId, ParentId)>,
}

impl PrecomputedConnectionStrategy {
    pub fn new(
        name: impl Into<String>,
        clusters: Vec<FaultSubsectionCluster>,
        max_jump_dist: f64,
    ) -> Self {
        let mut connected_parents = AHashSet::new();
        for cluster in &clusters {
            for jump in cluster.connections() {
                connected_parents.insert(parent_key(
                    cluster.parent_id(),
                    jump.to_cluster.parent_id(),
                ));
            }
        }
        if connected_parents.is_empty() {
            warn!("No connections detected in precomputed cluster graph");
        }
        Self {
            name: name.into(),
            max_jump_dist,
            clusters: clusters.into_iter().map(Arc::new).collect(),
            connected_parents,
        }
    }

    pub fn clusters(&self) -> &[Arc<FaultSubsectionCluster>] {
        &self.clusters
    }

    /// True if either parent has a connection to the other
    pub fn are_parents_connected(&self, a: ParentId, b: ParentId) -> bool {
        self.connected_parents.contains(&parent_key(a, b))
    }

    /// Number of distinct connected parent pairs
    pub fn connected_parent_count(&self) -> usize {
        self.connected_parents.len()
    }
}

fn parent_key(a: ParentId, b: ParentId) -> (ParentId, ParentId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl ClusterConnectionStrategy for PrecomputedConnectionStrategy {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn max_jump_dist(&self) -> f64 {
        self.max_jump_dist
    }

    fn build_possible_connections(
        &self,
        from: &Arc<FaultSubsectionCluster>,
        to: &Arc<FaultSubsectionCluster>,
    ) -> ConnectivityResult<Option<Jump>> {
        Err(ConnectivityError::AlreadyComputed(format!(
            "{} cannot build {} -> {}: connections were fixed at construction",
            self.name, from, to
        )))
    }
}
