// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Cluster graph assembly: groups sections into clusters and connects every cluster
pair through a [`ClusterConnectionStrategy`].

Pairs are independent, so they are evaluated on a bounded worker pool (with the
`parallel` feature). Output order follows input cluster order regardless of
scheduling.
*/

use super::strategy::ClusterConnectionStrategy;
use crate::models::{FaultSection, FaultSubsectionCluster, Jump};
use crate::types::ConnectivityResult;
use ahash::AHashSet;
use std::sync::Arc;
use tracing::info;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Split an ordered section list into clusters of consecutive sections sharing a parent.
pub fn build_clusters(
    sections: &[Arc<FaultSection>],
) -> ConnectivityResult<Vec<Arc<FaultSubsectionCluster>>> {
    let mut clusters = Vec::new();
    let mut start = 0;
    for idx in 1..=sections.len() {
        if idx == sections.len() || sections[idx].parent_id != sections[start].parent_id {
            if start < idx {
                clusters.push(Arc::new(FaultSubsectionCluster::from_slice(
                    &sections[start..idx],
                )?));
            }
            start = idx;
        }
    }
    Ok(clusters)
}

/// Outgoing connections of `clusters[from_idx]`, in target cluster order
fn connections_from(
    strategy: &dyn ClusterConnectionStrategy,
    clusters: &[Arc<FaultSubsectionCluster>],
    from_idx: usize,
) -> ConnectivityResult<Vec<Jump>> {
    let from = &clusters[from_idx];
    let mut jumps = Vec::new();
    for (to_idx, to) in clusters.iter().enumerate() {
        if to_idx == from_idx || to.parent_id() == from.parent_id() {
            continue;
        }
        if let Some(jump) = strategy.build_possible_connections(from, to)? {
            jumps.push(jump);
        }
    }
    Ok(jumps)
}

/// Connect every ordered pair of clusters with distinct parents.
///
/// Returns one cluster per input cluster (same order) carrying its outgoing jumps.
/// `threads` bounds the worker pool; `0` uses the pool default.
pub fn connect_clusters(
    strategy: &dyn ClusterConnectionStrategy,
    clusters: &[Arc<FaultSubsectionCluster>],
    threads: usize,
) -> ConnectivityResult<Vec<FaultSubsectionCluster>> {
    info!(
        "Building connections for {} clusters with {} (threads: {})",
        clusters.len(),
        strategy.name(),
        threads
    );

    #[cfg(feature = "parallel")]
    let all_jumps: Vec<Vec<Jump>> = {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
        pool.install(|| {
            (0..clusters.len())
                .into_par_iter()
                .map(|idx| connections_from(strategy, clusters, idx))
                .collect::<ConnectivityResult<Vec<_>>>()
        })?
    };

    #[cfg(not(feature = "parallel"))]
    let all_jumps: Vec<Vec<Jump>> = {
        let _ = threads;
        (0..clusters.len())
            .map(|idx| connections_from(strategy, clusters, idx))
            .collect::<ConnectivityResult<Vec<_>>>()?
    };

    let connected: Vec<FaultSubsectionCluster> = clusters
        .iter()
        .zip(all_jumps)
        .map(|(cluster, jumps)| cluster.as_ref().clone().with_connections(jumps))
        .collect();
    let total: usize = connected.iter().map(|c| c.connections().len()).sum();
    info!("Built {} connections", total);
    Ok(connected)
}

/// Jumps with `from_section < to_section`, one per undirected connection.
pub fn unique_undirected_jumps(clusters: &[FaultSubsectionCluster]) -> AHashSet<Jump> {
    clusters
        .iter()
        .flat_map(|c| c.connections().iter())
        .filter(|j| j.from_section.section_id < j.to_section.section_id)
        .cloned()
        .collect()
}
