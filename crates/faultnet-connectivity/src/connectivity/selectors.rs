// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Jump selectors: strategies that pick the single best candidate jump for a cluster pair.

Selectors compose through fallbacks. The default policy,
`PassesMinimizeFailed(fallback = BestScalar(2 km))`, prefers jump points with at least
one passing orientation and as few failing/branching orientations as possible, then
breaks ties by scalar plausibility among candidates within 2 km of the nearest, and
finally by distance.

Distance and scalar ties are detected at single precision; sorting uses full precision.
*/

use super::candidate::CandidateJump;
use crate::plausibility::ScalarRange;
use faultnet_config::SelectorConfig;
use tracing::debug;

/// Equivalent-distance threshold of the default selector, in km
pub const DEFAULT_EQUIV_DISTANCE: f64 = 2.0;

/// Reduces a candidate list to the best candidate.
pub trait JumpSelector: Send + Sync {
    fn select<'a>(
        &self,
        candidates: &[&'a CandidateJump],
        acceptable_range: Option<&ScalarRange>,
        verbose: bool,
    ) -> Option<&'a CandidateJump>;

    /// Human-readable name for diagnostics
    fn name(&self) -> String;
}

/// First candidate with the strictly smallest single-precision distance
pub fn min_distance<'a>(candidates: &[&'a CandidateJump]) -> Option<&'a CandidateJump> {
    let mut min_dist = f32::INFINITY;
    let mut best = None;
    for &candidate in candidates {
        if (candidate.distance as f32) < min_dist {
            min_dist = candidate.distance as f32;
            best = Some(candidate);
        }
    }
    best
}

/// Picks the nearest candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinDistanceSelector;

impl JumpSelector for MinDistanceSelector {
    fn select<'a>(
        &self,
        candidates: &[&'a CandidateJump],
        _acceptable_range: Option<&ScalarRange>,
        _verbose: bool,
    ) -> Option<&'a CandidateJump> {
        min_distance(candidates)
    }

    fn name(&self) -> String {
        "Min Distance".to_string()
    }
}

/// Picks the candidate with the best scalar value among those within
/// `equiv_distance` of the nearest candidate.
///
/// A non-positive `equiv_distance` disables the distance band. Candidates without a
/// scalar or without any passing variant are ignored; if none remain, the nearest
/// candidate is returned. Scalar ties are resolved by distance.
#[derive(Debug, Clone, Copy)]
pub struct BestScalarSelector {
    equiv_distance: f64,
}

impl BestScalarSelector {
    pub fn new(equiv_distance: f64) -> Self {
        Self { equiv_distance }
    }
}

impl JumpSelector for BestScalarSelector {
    fn select<'a>(
        &self,
        candidates: &[&'a CandidateJump],
        acceptable_range: Option<&ScalarRange>,
        verbose: bool,
    ) -> Option<&'a CandidateJump> {
        if candidates.is_empty() {
            return None;
        }
        let mut sorted: Vec<&'a CandidateJump> = candidates.to_vec();
        sorted.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        if self.equiv_distance > 0.0 {
            let max_dist = (sorted[0].distance + self.equiv_distance) as f32;
            let within = sorted
                .iter()
                .take_while(|c| (c.distance as f32) <= max_dist)
                .count();
            sorted.truncate(within);
        }

        let is_better = |test: f64, prev: f64| {
            acceptable_range.map_or(false, |range| range.is_value_better(test, prev))
        };

        let mut best_value: Option<f64> = None;
        let mut best: Vec<&'a CandidateJump> = Vec::new();
        for &candidate in &sorted {
            let Some(scalar) = candidate.best_scalar else {
                continue;
            };
            if !candidate.has_allowed() {
                continue;
            }
            if verbose {
                debug!("Testing {}", candidate);
            }
            match best_value {
                None => {
                    best_value = Some(scalar);
                    best = vec![candidate];
                    if verbose {
                        debug!("\tkeeping as first");
                    }
                }
                Some(prev) if prev as f32 == scalar as f32 => {
                    best.push(candidate);
                    if verbose {
                        debug!("\tadding (tie)");
                    }
                }
                Some(prev) if is_better(scalar, prev) => {
                    best_value = Some(scalar);
                    best = vec![candidate];
                    if verbose {
                        debug!("\treplacing as new best");
                    }
                }
                Some(prev) => {
                    if verbose {
                        debug!(
                            "\t{} is worse than {} (range: {:?})",
                            scalar, prev, acceptable_range
                        );
                    }
                }
            }
        }

        if best.is_empty() {
            if verbose {
                debug!("No scalars, falling back to minDist");
            }
            return Some(sorted[0]);
        }
        min_distance(&best)
    }

    fn name(&self) -> String {
        format!("Best Scalar (equiv={} km)", self.equiv_distance)
    }
}

/// Nearest candidate with at least one passing variant; the fallback decides
/// (over the original list) when nothing passes.
pub struct AnyPassMinDistSelector {
    fallback: Box<dyn JumpSelector>,
}

impl AnyPassMinDistSelector {
    pub fn new(fallback: Box<dyn JumpSelector>) -> Self {
        Self { fallback }
    }
}

impl Default for AnyPassMinDistSelector {
    fn default() -> Self {
        Self::new(Box::new(MinDistanceSelector))
    }
}

impl JumpSelector for AnyPassMinDistSelector {
    fn select<'a>(
        &self,
        candidates: &[&'a CandidateJump],
        acceptable_range: Option<&ScalarRange>,
        verbose: bool,
    ) -> Option<&'a CandidateJump> {
        let passed: Vec<&'a CandidateJump> = candidates
            .iter()
            .copied()
            .filter(|c| c.has_allowed())
            .collect();
        if passed.is_empty() {
            return self.fallback.select(candidates, acceptable_range, verbose);
        }
        min_distance(&passed)
    }

    fn name(&self) -> String {
        format!("Any Pass Min Distance (fallback: {})", self.fallback.name())
    }
}

/// Among candidates with at least one passing variant, keeps those with the fewest
/// failed variants, then the fewest total variants (end-to-end connections over
/// mid-strand splits), and lets the fallback choose among the ties. With no passing
/// candidate, the fallback decides over the original list.
pub struct PassesMinimizeFailedSelector {
    fallback: Box<dyn JumpSelector>,
}

impl PassesMinimizeFailedSelector {
    pub fn new(fallback: Box<dyn JumpSelector>) -> Self {
        Self { fallback }
    }
}

impl Default for PassesMinimizeFailedSelector {
    fn default() -> Self {
        Self::new(Box::new(MinDistanceSelector))
    }
}

impl JumpSelector for PassesMinimizeFailedSelector {
    fn select<'a>(
        &self,
        candidates: &[&'a CandidateJump],
        acceptable_range: Option<&ScalarRange>,
        verbose: bool,
    ) -> Option<&'a CandidateJump> {
        let mut options: Vec<&'a CandidateJump> = Vec::new();
        for &candidate in candidates {
            if !candidate.has_allowed() {
                continue;
            }
            let Some(prev) = options.first() else {
                if verbose {
                    debug!("First real option: {}", candidate);
                }
                options.push(candidate);
                continue;
            };
            let cmp = prev
                .failed_jumps
                .len()
                .cmp(&candidate.failed_jumps.len())
                .then_with(|| prev.total_jumps().cmp(&candidate.total_jumps()));
            if verbose {
                debug!("Comparing: {:?}\n\tprev: {}\n\tnew={}", cmp, prev, candidate);
            }
            match cmp {
                std::cmp::Ordering::Greater => {
                    if verbose {
                        debug!("\t\tnew best!");
                    }
                    options = vec![candidate];
                }
                std::cmp::Ordering::Equal => {
                    if verbose {
                        debug!("\t\ttie for best!");
                    }
                    options.push(candidate);
                }
                std::cmp::Ordering::Less => {}
            }
        }
        if options.is_empty() {
            return self.fallback.select(candidates, acceptable_range, verbose);
        }
        if verbose {
            debug!("Ended with {} options:", options.len());
            for candidate in &options {
                debug!("\t{}", candidate);
            }
        }
        self.fallback.select(&options, acceptable_range, verbose)
    }

    fn name(&self) -> String {
        format!("Passes Minimize Failed (fallback: {})", self.fallback.name())
    }
}

/// `PassesMinimizeFailed(fallback = BestScalar(2 km))`
pub fn default_selector() -> Box<dyn JumpSelector> {
    Box::new(PassesMinimizeFailedSelector::new(Box::new(
        BestScalarSelector::new(DEFAULT_EQUIV_DISTANCE),
    )))
}

/// Build a selector chain from its configuration. Missing fallbacks are `MinDistance`.
pub fn selector_from_config(config: &SelectorConfig) -> Box<dyn JumpSelector> {
    let fallback_or_min = |fallback: &Option<Box<SelectorConfig>>| -> Box<dyn JumpSelector> {
        match fallback {
            Some(inner) => selector_from_config(inner),
            None => Box::new(MinDistanceSelector),
        }
    };
    match config {
        SelectorConfig::MinDistance => Box::new(MinDistanceSelector),
        SelectorConfig::BestScalar { equiv_distance } => {
            Box::new(BestScalarSelector::new(*equiv_distance))
        }
        SelectorConfig::AnyPassMinDistance { fallback } => {
            Box::new(AnyPassMinDistSelector::new(fallback_or_min(fallback)))
        }
        SelectorConfig::PassesMinimizeFailed { fallback } => {
            Box::new(PassesMinimizeFailedSelector::new(fallback_or_min(fallback)))
        }
    }
}
