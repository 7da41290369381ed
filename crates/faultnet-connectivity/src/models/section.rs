// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Fault subsection geometry.
*/

use crate::types::{ParentId, SectionId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on a fault trace, in kilometres (`depth` positive down).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TracePoint {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
}

impl TracePoint {
    pub fn new(x: f64, y: f64, depth: f64) -> Self {
        Self { x, y, depth }
    }

    /// Straight-line distance in km
    pub fn distance_to(&self, other: &TracePoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.depth - other.depth;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// A discretized fault patch.
///
/// Sections are shared read-only between clusters, jumps and ruptures (behind `Arc`),
/// and identity is the section id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaultSection {
    pub section_id: SectionId,
    pub parent_id: ParentId,
    pub name: String,
    pub trace: Vec<TracePoint>,
}

impl FaultSection {
    pub fn new(
        section_id: SectionId,
        parent_id: ParentId,
        name: impl Into<String>,
        trace: Vec<TracePoint>,
    ) -> Self {
        Self {
            section_id,
            parent_id,
            name: name.into(),
            trace,
        }
    }

    /// Minimum distance between any two trace points of the two sections.
    ///
    /// Returns `f64::INFINITY` when either trace is empty.
    pub fn min_trace_distance(&self, other: &FaultSection) -> f64 {
        let mut min = f64::INFINITY;
        for a in &self.trace {
            for b in &other.trace {
                let d = a.distance_to(b);
                if d < min {
                    min = d;
                }
            }
        }
        min
    }
}

impl PartialEq for FaultSection {
    fn eq(&self, other: &Self) -> bool {
        self.section_id == other.section_id
    }
}

impl Eq for FaultSection {}

impl std::hash::Hash for FaultSection {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.section_id.hash(state);
    }
}

impl fmt::Display for FaultSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.section_id)
    }
}
