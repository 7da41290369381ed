// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Candidate jump evaluation.

For one jump point (a from section and a to section within range), every
combination of from/to strands is assembled into a trial rupture and run through
the filter chain, forward and (for directional filters) backward. The outcomes are
summarised in a [`CandidateJump`] that selectors rank.
*/

use super::strands::strands_at;
use crate::distance::SectionDistanceProvider;
use crate::models::{ClusterRupture, FaultSection, FaultSubsectionCluster, Jump};
use crate::plausibility::{
    PlausibilityFilter, PlausibilityResult, ScalarRange, ScalarValuePlausibilityFilter,
};
use crate::types::ConnectivityResult;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Summary of every strand-combination variant of one jump point.
#[derive(Debug, Clone)]
pub struct CandidateJump {
    pub from_cluster: Arc<FaultSubsectionCluster>,
    pub from_section: Arc<FaultSection>,
    /// `from_section` is the first or last section of `from_cluster`
    pub from_end: bool,
    pub to_cluster: Arc<FaultSubsectionCluster>,
    pub to_section: Arc<FaultSection>,
    /// `to_section` is the first or last section of `to_cluster`
    pub to_end: bool,
    pub distance: f64,
    pub allowed_jumps: Vec<Jump>,
    pub failed_jumps: Vec<Jump>,
    /// Scalar per passing variant; `None` when no scalar filter is configured
    pub jump_scalars: Option<Vec<(Jump, f64)>>,
    pub best_scalar: Option<f64>,
}

impl CandidateJump {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        from_cluster: Arc<FaultSubsectionCluster>,
        from_section: Arc<FaultSection>,
        from_end: bool,
        to_cluster: Arc<FaultSubsectionCluster>,
        to_section: Arc<FaultSection>,
        to_end: bool,
        distance: f64,
        allowed_jumps: Vec<Jump>,
        failed_jumps: Vec<Jump>,
        jump_scalars: Option<Vec<(Jump, f64)>>,
        best_scalar: Option<f64>,
    ) -> Self {
        Self {
            from_cluster,
            from_section,
            from_end,
            to_cluster,
            to_section,
            to_end,
            distance,
            allowed_jumps,
            failed_jumps,
            jump_scalars,
            best_scalar,
        }
    }

    /// Number of orientation variants tried
    pub fn total_jumps(&self) -> usize {
        self.allowed_jumps.len() + self.failed_jumps.len()
    }

    pub fn has_allowed(&self) -> bool {
        !self.allowed_jumps.is_empty()
    }
}

impl fmt::Display for CandidateJump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.from_section.section_id)?;
        if self.from_end {
            write!(f, "[end]")?;
        }
        write!(f, "->{}", self.to_section.section_id)?;
        if self.to_end {
            write!(f, "[end]")?;
        }
        write!(
            f,
            ": dist={}\t{}/{} pass",
            self.distance as f32,
            self.allowed_jumps.len(),
            self.total_jumps()
        )?;
        if let Some(scalar) = self.best_scalar {
            write!(f, "\tbestScalar: {}", scalar as f32)?;
        }
        Ok(())
    }
}

/// First filter, in configured order, that is a scalar filter with an acceptable range.
pub fn find_scalar_filter(
    filters: &[Arc<dyn PlausibilityFilter>],
) -> Option<(usize, ScalarRange)> {
    filters.iter().enumerate().find_map(|(idx, filter)| {
        filter
            .as_scalar()
            .and_then(|scalar| scalar.acceptable_range())
            .map(|range| (idx, range))
    })
}

struct ScalarSource<'a> {
    filter: &'a dyn ScalarValuePlausibilityFilter,
    range: ScalarRange,
}

/// Evaluates jump points of a cluster pair against a filter chain.
pub struct CandidateEvaluator<'a> {
    filters: &'a [Arc<dyn PlausibilityFilter>],
    scalar: Option<ScalarSource<'a>>,
}

impl<'a> CandidateEvaluator<'a> {
    /// `scalar` is the index of the tie-break filter in `filters` and its range,
    /// as returned by [`find_scalar_filter`].
    pub fn new(
        filters: &'a [Arc<dyn PlausibilityFilter>],
        scalar: Option<(usize, ScalarRange)>,
    ) -> Self {
        let scalar = scalar.and_then(|(idx, range)| {
            filters
                .get(idx)
                .and_then(|f| f.as_scalar())
                .map(|filter| ScalarSource { filter, range })
        });
        Self { filters, scalar }
    }

    /// AND of every filter (no short-circuit), plus whether any filter is directional
    fn apply_filters(&self, rupture: &ClusterRupture) -> (PlausibilityResult, bool) {
        let mut result = PlausibilityResult::Pass;
        let mut directional = false;
        for filter in self.filters {
            result = result.logical_and(filter.apply(rupture, false));
            directional = directional || filter.is_directional(false);
        }
        (result, directional)
    }

    fn is_better(&self, candidate: f64, current: f64) -> bool {
        match &self.scalar {
            Some(src) => src.range.is_value_better(candidate, current),
            None => false,
        }
    }

    /// Evaluate the jump point `from[i] -> to[j]` at `distance`.
    pub fn evaluate(
        &self,
        from: &Arc<FaultSubsectionCluster>,
        i: usize,
        to: &Arc<FaultSubsectionCluster>,
        j: usize,
        distance: f64,
        debug: bool,
    ) -> ConnectivityResult<CandidateJump> {
        let s1 = &from.sections()[i];
        let s2 = &to.sections()[j];

        let mut allowed_jumps = Vec::new();
        let mut failed_jumps = Vec::new();
        let mut jump_scalars: Option<Vec<(Jump, f64)>> = self.scalar.as_ref().map(|_| Vec::new());
        let mut best_scalar: Option<f64> = None;

        let to_strands = strands_at(to.sections(), j);
        for from_strand in strands_at(from.sections(), i) {
            let mut from_cluster = FaultSubsectionCluster::from_slice(from_strand)?;
            if from_cluster.last_section().section_id != s1.section_id {
                // lead up to the jump point
                from_cluster = from_cluster.reversed();
            }
            let from_cluster = Arc::new(from_cluster);

            for to_strand in &to_strands {
                let mut to_cluster = FaultSubsectionCluster::from_slice(to_strand)?;
                if to_cluster.first_section().section_id != s2.section_id {
                    // start from the jump point
                    to_cluster = to_cluster.reversed();
                }
                let trial = Jump::new(
                    Arc::clone(s1),
                    Arc::clone(&from_cluster),
                    Arc::clone(s2),
                    Arc::new(to_cluster),
                    distance,
                );
                let rupture = ClusterRupture::new(Arc::clone(&from_cluster)).take(&trial)?;
                if debug {
                    debug!("\tTrying rupture: {}", rupture);
                }

                let (mut result, directional) = self.apply_filters(&rupture);
                if debug {
                    debug!("\tResult: {}", result);
                }

                let mut scalar = match &self.scalar {
                    Some(src) if result.is_pass() => src.filter.value(&rupture),
                    _ => None,
                };
                if debug {
                    if let Some(value) = scalar {
                        debug!("\tScalar val: {}", value);
                    }
                }

                if directional && (self.scalar.is_some() || !result.is_pass()) {
                    let reversed = rupture.reversed();
                    if debug {
                        debug!("\tTrying reversed: {}", reversed);
                    }
                    let (reverse_result, _) = self.apply_filters(&reversed);
                    if debug {
                        debug!("\tResult: {}", reverse_result);
                    }
                    if let Some(src) = &self.scalar {
                        if reverse_result.is_pass() {
                            if let Some(reverse_value) = src.filter.value(&reversed) {
                                if debug {
                                    debug!("\tScalar val: {}", reverse_value);
                                }
                                let keep = match scalar {
                                    None => true,
                                    Some(forward) => self.is_better(reverse_value, forward),
                                };
                                if keep {
                                    scalar = Some(reverse_value);
                                }
                            }
                        }
                    }
                    result = result.logical_or(reverse_result);
                }

                if let Some(value) = scalar {
                    if let Some(scalars) = jump_scalars.as_mut() {
                        scalars.push((trial.clone(), value));
                    }
                    let replace = match best_scalar {
                        None => true,
                        Some(best) => self.is_better(value, best),
                    };
                    if replace {
                        best_scalar = Some(value);
                    }
                }

                if result.is_pass() {
                    allowed_jumps.push(trial);
                } else {
                    failed_jumps.push(trial);
                }
            }
        }

        let candidate = CandidateJump::new(
            Arc::clone(from),
            Arc::clone(s1),
            from.is_endpoint(i),
            Arc::clone(to),
            Arc::clone(s2),
            to.is_endpoint(j),
            distance,
            allowed_jumps,
            failed_jumps,
            jump_scalars,
            best_scalar,
        );
        if debug {
            debug!("New candidate: {}", candidate);
        }
        Ok(candidate)
    }
}

/// Evaluate every section pair of `from` x `to` within `max_jump_dist`.
///
/// Pairs are visited by from index, then to index, and that order is kept. Distances
/// are compared at single precision.
pub fn collect_candidates(
    evaluator: &CandidateEvaluator<'_>,
    distances: &dyn SectionDistanceProvider,
    max_jump_dist: f64,
    from: &Arc<FaultSubsectionCluster>,
    to: &Arc<FaultSubsectionCluster>,
    debug: bool,
) -> ConnectivityResult<Vec<CandidateJump>> {
    let mut candidates = Vec::new();
    for (i, s1) in from.sections().iter().enumerate() {
        for (j, s2) in to.sections().iter().enumerate() {
            let dist = distances.distance(s1, s2);
            if (dist as f32) <= (max_jump_dist as f32) {
                if debug {
                    debug!("{} => {}: {} km", s1.section_id, s2.section_id, dist);
                }
                candidates.push(evaluator.evaluate(from, i, to, j, dist, debug)?);
            }
        }
    }
    Ok(candidates)
}
