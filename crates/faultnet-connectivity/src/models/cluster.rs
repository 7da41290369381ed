// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Ordered runs of subsections on a single parent fault.
*/

use super::jump::Jump;
use super::section::FaultSection;
use crate::types::{ConnectivityError, ConnectivityResult, ParentId, SectionId};
use std::fmt;
use std::sync::Arc;

/// An ordered, non-empty sequence of subsections belonging to one parent fault.
///
/// Clusters are never mutated once shared: orientation changes go through
/// [`FaultSubsectionCluster::reversed`], which allocates a new cluster.
#[derive(Debug, Clone)]
pub struct FaultSubsectionCluster {
    parent_id: ParentId,
    sections: Vec<Arc<FaultSection>>,
    connections: Vec<Jump>,
}

impl FaultSubsectionCluster {
    /// Build a cluster from an ordered section run.
    ///
    /// # Errors
    /// `EmptyCluster` if `sections` is empty, `MixedParents` if the sections do not share a parent.
    pub fn new(sections: Vec<Arc<FaultSection>>) -> ConnectivityResult<Self> {
        let first = sections.first().ok_or_else(|| {
            ConnectivityError::EmptyCluster("cluster requires at least one section".to_string())
        })?;
        let parent_id = first.parent_id;
        if let Some(other) = sections.iter().find(|s| s.parent_id != parent_id) {
            return Err(ConnectivityError::MixedParents {
                expected: parent_id,
                found: other.parent_id,
            });
        }
        Ok(Self {
            parent_id,
            sections,
            connections: Vec::new(),
        })
    }

    /// Build a cluster from a borrowed section run
    pub fn from_slice(sections: &[Arc<FaultSection>]) -> ConnectivityResult<Self> {
        Self::new(sections.to_vec())
    }

    /// Replace the outgoing connections
    pub fn with_connections(mut self, connections: Vec<Jump>) -> Self {
        self.connections = connections;
        self
    }

    pub fn parent_id(&self) -> ParentId {
        self.parent_id
    }

    pub fn sections(&self) -> &[Arc<FaultSection>] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn first_section(&self) -> &Arc<FaultSection> {
        &self.sections[0]
    }

    pub fn last_section(&self) -> &Arc<FaultSection> {
        &self.sections[self.sections.len() - 1]
    }

    /// True if `index` is the first or last position of the cluster
    pub fn is_endpoint(&self, index: usize) -> bool {
        index == 0 || index + 1 == self.sections.len()
    }

    pub fn contains(&self, section_id: SectionId) -> bool {
        self.sections.iter().any(|s| s.section_id == section_id)
    }

    pub fn connections(&self) -> &[Jump] {
        &self.connections
    }

    /// Add an outgoing connection
    ///
    /// # Errors
    /// `InvalidJump` if the jump does not leave from a section of this cluster.
    pub fn add_connection(&mut self, jump: Jump) -> ConnectivityResult<()> {
        if !self.contains(jump.from_section.section_id) {
            return Err(ConnectivityError::InvalidJump(format!(
                "jump {} does not start in cluster {}",
                jump, self
            )));
        }
        self.connections.push(jump);
        Ok(())
    }

    /// Same sections in reverse order, connections preserved
    pub fn reversed(&self) -> Self {
        let mut sections = self.sections.clone();
        sections.reverse();
        Self {
            parent_id: self.parent_id,
            sections,
            connections: self.connections.clone(),
        }
    }
}

impl fmt::Display for FaultSubsectionCluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids = self
            .sections
            .iter()
            .map(|s| s.section_id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "[{}:{}]", self.parent_id, ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections(parent: ParentId, ids: &[SectionId]) -> Vec<Arc<FaultSection>> {
        ids.iter()
            .map(|&id| Arc::new(FaultSection::new(id, parent, format!("fault {}", parent), vec![])))
            .collect()
    }

    #[test]
    fn test_empty_cluster_rejected() {
        let result = FaultSubsectionCluster::new(vec![]);
        assert!(matches!(result, Err(ConnectivityError::EmptyCluster(_))));
    }

    #[test]
    fn test_mixed_parents_rejected() {
        let mut secs = sections(1, &[0, 1]);
        secs.extend(sections(2, &[2]));
        let result = FaultSubsectionCluster::new(secs);
        assert!(matches!(
            result,
            Err(ConnectivityError::MixedParents {
                expected: 1,
                found: 2
            })
        ));
    }

    #[test]
    fn test_reversed_does_not_touch_original() {
        let cluster = FaultSubsectionCluster::new(sections(4, &[10, 11, 12])).unwrap();
        let reversed = cluster.reversed();
        assert_eq!(reversed.first_section().section_id, 12);
        assert_eq!(reversed.last_section().section_id, 10);
        assert_eq!(cluster.first_section().section_id, 10);
        assert_eq!(reversed.parent_id(), 4);
        assert_eq!(cluster.to_string(), "[4:10,11,12]");
        assert_eq!(reversed.to_string(), "[4:12,11,10]");
    }

    #[test]
    fn test_endpoints() {
        let cluster = FaultSubsectionCluster::new(sections(4, &[10, 11, 12])).unwrap();
        assert!(cluster.is_endpoint(0));
        assert!(!cluster.is_endpoint(1));
        assert!(cluster.is_endpoint(2));

        let single = FaultSubsectionCluster::new(sections(5, &[20])).unwrap();
        assert!(single.is_endpoint(0));
    }
}
