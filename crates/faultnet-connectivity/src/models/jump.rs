// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Directed connections between clusters.
*/

use super::cluster::FaultSubsectionCluster;
use super::section::FaultSection;
use crate::types::SectionId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A directed edge from one section of a cluster to one section of another cluster.
///
/// The clusters record the orientation/span the jump was taken with. Equality and
/// hashing only look at the `(from_section, to_section)` id pair, so the same jump
/// point seen through different cluster spans compares equal.
#[derive(Debug, Clone)]
pub struct Jump {
    pub from_section: Arc<FaultSection>,
    pub from_cluster: Arc<FaultSubsectionCluster>,
    pub to_section: Arc<FaultSection>,
    pub to_cluster: Arc<FaultSubsectionCluster>,
    pub distance: f64,
}

impl Jump {
    pub fn new(
        from_section: Arc<FaultSection>,
        from_cluster: Arc<FaultSubsectionCluster>,
        to_section: Arc<FaultSection>,
        to_cluster: Arc<FaultSubsectionCluster>,
        distance: f64,
    ) -> Self {
        debug_assert!(from_cluster.contains(from_section.section_id));
        debug_assert!(to_cluster.contains(to_section.section_id));
        Self {
            from_section,
            from_cluster,
            to_section,
            to_cluster,
            distance,
        }
    }

    /// The same connection traversed in the opposite direction
    pub fn reverse(&self) -> Self {
        Self {
            from_section: Arc::clone(&self.to_section),
            from_cluster: Arc::clone(&self.to_cluster),
            to_section: Arc::clone(&self.from_section),
            to_cluster: Arc::clone(&self.from_cluster),
            distance: self.distance,
        }
    }

    /// `(from, to)` section id pair
    pub fn section_ids(&self) -> (SectionId, SectionId) {
        (self.from_section.section_id, self.to_section.section_id)
    }
}

impl PartialEq for Jump {
    fn eq(&self, other: &Self) -> bool {
        self.section_ids() == other.section_ids()
    }
}

impl Eq for Jump {}

impl Hash for Jump {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.section_ids().hash(state);
    }
}

impl fmt::Display for Jump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]=>{}[{}]",
            self.from_cluster.parent_id(),
            self.from_section.section_id,
            self.to_cluster.parent_id(),
            self.to_section.section_id
        )
    }
}
