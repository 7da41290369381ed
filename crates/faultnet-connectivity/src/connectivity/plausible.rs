// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Plausibility-driven connection strategy.

Uses one or more plausibility filters to pick the best jumping point between each
pair of clusters. Every section pair within the maximum jump distance becomes a
candidate; the configured [`JumpSelector`] chooses among them. The default selector
takes the candidate that has at least one passing direction and the fewest failing
directions (favouring end-to-end connections), breaking ties by scalar value for
candidates within 2 km of each other and then by distance.
*/

use super::candidate::{collect_candidates, find_scalar_filter, CandidateEvaluator, CandidateJump};
use super::selectors::{default_selector, selector_from_config, JumpSelector};
use super::strategy::{format_distance, ClusterConnectionStrategy};
use crate::distance::SectionDistanceProvider;
use crate::models::{FaultSubsectionCluster, Jump};
use crate::plausibility::{PlausibilityFilter, ScalarRange};
use crate::types::{ConnectivityError, ConnectivityResult, ParentId};
use ahash::AHashSet;
use faultnet_config::{ConnectionConfig, DiagnosticsConfig};
use std::sync::Arc;
use tracing::debug;

/// Parent pairs whose connection building is traced at debug level.
///
/// Matching is symmetric: `(a, b)` also traces `b -> a`.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticPairs {
    pairs: AHashSet<(ParentId, ParentId)>,
    all: bool,
}

impl DiagnosticPairs {
    pub fn none() -> Self {
        Self::default()
    }

    /// Trace every pair
    pub fn all() -> Self {
        Self {
            pairs: AHashSet::new(),
            all: true,
        }
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (ParentId, ParentId)>,
    {
        let pairs = pairs
            .into_iter()
            .map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
            .collect();
        Self { pairs, all: false }
    }

    pub fn from_config(config: &DiagnosticsConfig) -> Self {
        if config.trace_all_pairs {
            return Self::all();
        }
        Self::from_pairs(config.debug_parent_pairs.iter().map(|p| (p[0], p[1])))
    }

    pub fn matches(&self, a: ParentId, b: ParentId) -> bool {
        if self.all {
            return true;
        }
        let key = if a <= b { (a, b) } else { (b, a) };
        self.pairs.contains(&key)
    }
}

/// Connection builder driven by plausibility filters and a jump selector.
pub struct PlausibleConnectionStrategy {
    distances: Arc<dyn SectionDistanceProvider>,
    max_jump_dist: f64,
    selector: Box<dyn JumpSelector>,
    filters: Vec<Arc<dyn PlausibilityFilter>>,
    scalar_filter: Option<(usize, ScalarRange)>,
    diagnostics: DiagnosticPairs,
}

impl PlausibleConnectionStrategy {
    /// Strategy with the default selector.
    ///
    /// # Errors
    /// `NoFilters` for an empty filter list, `InvalidMaxJumpDistance` for a negative or
    /// non-finite distance.
    pub fn new(
        distances: Arc<dyn SectionDistanceProvider>,
        max_jump_dist: f64,
        filters: Vec<Arc<dyn PlausibilityFilter>>,
    ) -> ConnectivityResult<Self> {
        Self::with_selector(distances, max_jump_dist, default_selector(), filters)
    }

    pub fn with_selector(
        distances: Arc<dyn SectionDistanceProvider>,
        max_jump_dist: f64,
        selector: Box<dyn JumpSelector>,
        filters: Vec<Arc<dyn PlausibilityFilter>>,
    ) -> ConnectivityResult<Self> {
        if filters.is_empty() {
            return Err(ConnectivityError::NoFilters);
        }
        if !max_jump_dist.is_finite() || max_jump_dist < 0.0 {
            return Err(ConnectivityError::InvalidMaxJumpDistance(max_jump_dist));
        }
        let scalar_filter = find_scalar_filter(&filters);
        Ok(Self {
            distances,
            max_jump_dist,
            selector,
            filters,
            scalar_filter,
            diagnostics: DiagnosticPairs::none(),
        })
    }

    /// Strategy configured from the `connection` and `diagnostics` config sections
    pub fn from_config(
        connection: &ConnectionConfig,
        diagnostics: &DiagnosticsConfig,
        distances: Arc<dyn SectionDistanceProvider>,
        filters: Vec<Arc<dyn PlausibilityFilter>>,
    ) -> ConnectivityResult<Self> {
        Ok(Self::with_selector(
            distances,
            connection.max_jump_dist,
            selector_from_config(&connection.selector),
            filters,
        )?
        .with_diagnostics(DiagnosticPairs::from_config(diagnostics)))
    }

    pub fn with_diagnostics(mut self, diagnostics: DiagnosticPairs) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn max_jump_dist(&self) -> f64 {
        self.max_jump_dist
    }

    pub fn filters(&self) -> &[Arc<dyn PlausibilityFilter>] {
        &self.filters
    }

    pub fn selector(&self) -> &dyn JumpSelector {
        self.selector.as_ref()
    }

    /// Acceptable range of the tie-break scalar filter, if one is configured
    pub fn scalar_range(&self) -> Option<&ScalarRange> {
        self.scalar_filter.as_ref().map(|(_, range)| range)
    }

    /// Position of the tie-break scalar filter in the filter list
    pub fn scalar_filter_index(&self) -> Option<usize> {
        self.scalar_filter.as_ref().map(|(idx, _)| *idx)
    }

    pub fn name(&self) -> String {
        let dist = format_distance(self.max_jump_dist);
        if self.filters.len() == 1 {
            format!("{} Plausible: maxDist={} km", self.filters[0].name(), dist)
        } else {
            format!(
                "Plausible ({} filters): maxDist={} km",
                self.filters.len(),
                dist
            )
        }
    }

    fn is_traced(&self, from: &FaultSubsectionCluster, to: &FaultSubsectionCluster) -> bool {
        self.diagnostics.matches(from.parent_id(), to.parent_id())
    }

    /// Every candidate jump point between `from` and `to`, in (from, to) section order.
    pub fn candidates(
        &self,
        from: &Arc<FaultSubsectionCluster>,
        to: &Arc<FaultSubsectionCluster>,
    ) -> ConnectivityResult<Vec<CandidateJump>> {
        let evaluator = CandidateEvaluator::new(&self.filters, self.scalar_filter);
        collect_candidates(
            &evaluator,
            self.distances.as_ref(),
            self.max_jump_dist,
            from,
            to,
            self.is_traced(from, to),
        )
    }

    /// The best jump from `from` to `to`, or `None` when nothing is in range or the
    /// selector finds no viable candidate.
    pub fn build_connection(
        &self,
        from: &Arc<FaultSubsectionCluster>,
        to: &Arc<FaultSubsectionCluster>,
    ) -> ConnectivityResult<Option<Jump>> {
        let debug = self.is_traced(from, to);
        let candidates = self.candidates(from, to)?;
        if candidates.is_empty() {
            return Ok(None);
        }
        let refs: Vec<&CandidateJump> = candidates.iter().collect();
        if debug {
            let mut sorted = refs.clone();
            sorted.sort_by(|a, b| a.distance.total_cmp(&b.distance));
            debug!("All candidates (distance sorted)");
            for candidate in &sorted {
                debug!("\t{}", candidate);
            }
        }
        let best = self.selector.select(&refs, self.scalar_range(), debug);
        if debug {
            match best {
                Some(candidate) => debug!("Final candidate: {}", candidate),
                None => debug!("Final candidate: none"),
            }
        }
        Ok(best.map(|candidate| {
            Jump::new(
                Arc::clone(&candidate.from_section),
                Arc::clone(from),
                Arc::clone(&candidate.to_section),
                Arc::clone(to),
                candidate.distance,
            )
        }))
    }
}

impl ClusterConnectionStrategy for PlausibleConnectionStrategy {
    fn name(&self) -> String {
        PlausibleConnectionStrategy::name(self)
    }

    fn max_jump_dist(&self) -> f64 {
        self.max_jump_dist
    }

    fn build_possible_connections(
        &self,
        from: &Arc<FaultSubsectionCluster>,
        to: &Arc<FaultSubsectionCluster>,
    ) -> ConnectivityResult<Option<Jump>> {
        self.build_connection(from, to)
    }
}
