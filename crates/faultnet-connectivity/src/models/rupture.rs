// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Linear rupture paths evaluated by plausibility filters.
*/

use super::cluster::FaultSubsectionCluster;
use super::jump::Jump;
use crate::types::{ConnectivityError, ConnectivityResult};
use std::fmt;
use std::sync::Arc;

/// An ordered path of clusters joined by jumps.
///
/// `clusters[k]` and `clusters[k + 1]` are joined by `jumps[k]`. Every operation
/// returns a new rupture and leaves its inputs untouched.
#[derive(Debug, Clone)]
pub struct ClusterRupture {
    clusters: Vec<Arc<FaultSubsectionCluster>>,
    jumps: Vec<Jump>,
}

impl ClusterRupture {
    /// Single-cluster rupture
    pub fn new(cluster: Arc<FaultSubsectionCluster>) -> Self {
        Self {
            clusters: vec![cluster],
            jumps: Vec::new(),
        }
    }

    /// Extend the rupture through `jump`, appending its destination cluster.
    ///
    /// # Errors
    /// `InvalidJump` if the jump does not leave from the last cluster, or if its
    /// destination section is already part of the rupture.
    pub fn take(&self, jump: &Jump) -> ConnectivityResult<Self> {
        let last = self.last_cluster();
        if !last.contains(jump.from_section.section_id) {
            return Err(ConnectivityError::InvalidJump(format!(
                "jump {} does not leave from the last cluster {} of rupture {}",
                jump, last, self
            )));
        }
        if self
            .clusters
            .iter()
            .any(|c| c.contains(jump.to_section.section_id))
        {
            return Err(ConnectivityError::InvalidJump(format!(
                "jump {} re-enters rupture {}",
                jump, self
            )));
        }
        let mut clusters = self.clusters.clone();
        clusters.push(Arc::clone(&jump.to_cluster));
        let mut jumps = self.jumps.clone();
        jumps.push(jump.clone());
        Ok(Self { clusters, jumps })
    }

    /// The same path traversed from its last section to its first.
    pub fn reversed(&self) -> Self {
        let clusters: Vec<Arc<FaultSubsectionCluster>> = self
            .clusters
            .iter()
            .rev()
            .map(|c| Arc::new(c.reversed()))
            .collect();
        // jump k joined original clusters (k, k+1); reversed it joins (n-2-k, n-1-k)
        let n = self.clusters.len();
        let jumps = self
            .jumps
            .iter()
            .enumerate()
            .rev()
            .map(|(k, jump)| {
                Jump::new(
                    Arc::clone(&jump.to_section),
                    Arc::clone(&clusters[n - 2 - k]),
                    Arc::clone(&jump.from_section),
                    Arc::clone(&clusters[n - 1 - k]),
                    jump.distance,
                )
            })
            .collect();
        Self { clusters, jumps }
    }

    pub fn clusters(&self) -> &[Arc<FaultSubsectionCluster>] {
        &self.clusters
    }

    pub fn jumps(&self) -> &[Jump] {
        &self.jumps
    }

    pub fn first_cluster(&self) -> &Arc<FaultSubsectionCluster> {
        &self.clusters[0]
    }

    pub fn last_cluster(&self) -> &Arc<FaultSubsectionCluster> {
        &self.clusters[self.clusters.len() - 1]
    }

    /// Total number of subsections along the path
    pub fn section_count(&self) -> usize {
        self.clusters.iter().map(|c| c.len()).sum()
    }
}

impl fmt::Display for ClusterRupture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, cluster) in self.clusters.iter().enumerate() {
            if k > 0 {
                write!(f, " => ")?;
            }
            write!(f, "{}", cluster)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FaultSection;

    fn cluster(parent: u32, ids: &[u32]) -> Arc<FaultSubsectionCluster> {
        let sections = ids
            .iter()
            .map(|&id| Arc::new(FaultSection::new(id, parent, "f", vec![])))
            .collect();
        Arc::new(FaultSubsectionCluster::new(sections).unwrap())
    }

    fn jump(from: &Arc<FaultSubsectionCluster>, to: &Arc<FaultSubsectionCluster>) -> Jump {
        Jump::new(
            Arc::clone(from.last_section()),
            Arc::clone(from),
            Arc::clone(to.first_section()),
            Arc::clone(to),
            2.0,
        )
    }

    #[test]
    fn test_take_appends_without_mutating() {
        let a = cluster(1, &[0, 1]);
        let b = cluster(2, &[5, 6]);
        let start = ClusterRupture::new(Arc::clone(&a));
        let extended = start.take(&jump(&a, &b)).unwrap();
        assert_eq!(start.clusters().len(), 1);
        assert_eq!(extended.clusters().len(), 2);
        assert_eq!(extended.jumps().len(), 1);
        assert_eq!(extended.section_count(), 4);
        assert_eq!(extended.to_string(), "[1:0,1] => [2:5,6]");
    }

    #[test]
    fn test_take_rejects_jump_from_elsewhere() {
        let a = cluster(1, &[0, 1]);
        let b = cluster(2, &[5, 6]);
        let c = cluster(3, &[8]);
        let rupture = ClusterRupture::new(Arc::clone(&a));
        assert!(matches!(
            rupture.take(&jump(&b, &c)),
            Err(ConnectivityError::InvalidJump(_))
        ));
    }

    #[test]
    fn test_reversed_three_cluster_path() {
        let a = cluster(1, &[0, 1]);
        let b = cluster(2, &[5, 6]);
        let c = cluster(3, &[8, 9]);
        let rupture = ClusterRupture::new(Arc::clone(&a))
            .take(&jump(&a, &b))
            .unwrap()
            .take(&jump(&b, &c))
            .unwrap();
        let reversed = rupture.reversed();
        assert_eq!(reversed.to_string(), "[3:9,8] => [2:6,5] => [1:1,0]");
        assert_eq!(reversed.jumps()[0].section_ids(), (8, 6));
        assert_eq!(reversed.jumps()[1].section_ids(), (5, 1));
        assert!(reversed.jumps()[0].from_cluster.contains(8));
        assert!(reversed.jumps()[1].to_cluster.contains(1));
        // untouched
        assert_eq!(rupture.to_string(), "[1:0,1] => [2:5,6] => [3:8,9]");
    }
}
