// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Section-to-section distance providers.
*/

use crate::models::FaultSection;
use crate::types::SectionId;
use ahash::AHashMap;
use parking_lot::RwLock;

/// Deterministic distance (km) between two sections.
///
/// Shared by all workers building connections concurrently.
pub trait SectionDistanceProvider: Send + Sync {
    fn distance(&self, a: &FaultSection, b: &FaultSection) -> f64;
}

impl<F> SectionDistanceProvider for F
where
    F: Fn(&FaultSection, &FaultSection) -> f64 + Send + Sync,
{
    fn distance(&self, a: &FaultSection, b: &FaultSection) -> f64 {
        self(a, b)
    }
}

/// Memoizing provider over minimum trace-point distance.
///
/// Misses are computed outside the lock and inserted with first-writer-wins, so
/// concurrent misses on the same pair are harmless.
#[derive(Debug, Default)]
pub struct SectionDistanceCache {
    cache: RwLock<AHashMap<(SectionId, SectionId), f64>>,
}

impl SectionDistanceCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(a: &FaultSection, b: &FaultSection) -> (SectionId, SectionId) {
        if a.section_id <= b.section_id {
            (a.section_id, b.section_id)
        } else {
            (b.section_id, a.section_id)
        }
    }

    /// Number of memoized pairs
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }
}

impl SectionDistanceProvider for SectionDistanceCache {
    fn distance(&self, a: &FaultSection, b: &FaultSection) -> f64 {
        let key = Self::key(a, b);
        if let Some(&dist) = self.cache.read().get(&key) {
            return dist;
        }
        let dist = a.min_trace_distance(b);
        *self.cache.write().entry(key).or_insert(dist)
    }
}
