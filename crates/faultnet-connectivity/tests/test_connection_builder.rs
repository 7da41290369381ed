// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Connection Builder Integration Tests

Covers the path from cluster pair to selected jump:
- candidate discovery and the distance cutoff
- per-candidate bookkeeping (allowed/failed variants, scalar tracking)
- default selector behaviour (failures, end-to-end preference, scalar tie-breaks)
- whole-network connection on a worker pool and replay through the precomputed strategy
*/

use faultnet_config::{ConnectionConfig, DiagnosticsConfig, SelectorConfig};
use faultnet_connectivity::{
    build_clusters, connect_clusters, unique_undirected_jumps, BestScalarSelector,
    ClusterConnectionStrategy, ClusterRupture, ConnectivityError, FaultSection,
    FaultSubsectionCluster, PlausibilityFilter, PlausibilityResult, PlausibleConnectionStrategy,
    PrecomputedConnectionStrategy, ScalarRange, ScalarValuePlausibilityFilter,
    SectionDistanceCache, SectionDistanceProvider, TracePoint,
};
use std::collections::HashMap;
use std::sync::Arc;

// ============================================================================
// Test fakes
// ============================================================================

/// Returns the same result for every rupture
struct Fixed(PlausibilityResult);

impl PlausibilityFilter for Fixed {
    fn name(&self) -> String {
        format!("Fixed {}", self.0)
    }

    fn apply(&self, _rupture: &ClusterRupture, _verbose: bool) -> PlausibilityResult {
        self.0
    }
}

/// Fails ruptures with more than `max` sections
struct MaxSections(usize);

impl PlausibilityFilter for MaxSections {
    fn name(&self) -> String {
        format!("Max {} Sections", self.0)
    }

    fn apply(&self, rupture: &ClusterRupture, _verbose: bool) -> PlausibilityResult {
        if rupture.section_count() > self.0 {
            PlausibilityResult::Fail
        } else {
            PlausibilityResult::Pass
        }
    }
}

/// Scalar equal to the id of the first section the rupture jumps to; larger is better
struct JumpTargetScalar;

impl PlausibilityFilter for JumpTargetScalar {
    fn name(&self) -> String {
        "Jump Target".to_string()
    }

    fn apply(&self, _rupture: &ClusterRupture, _verbose: bool) -> PlausibilityResult {
        PlausibilityResult::Pass
    }

    fn as_scalar(&self) -> Option<&dyn ScalarValuePlausibilityFilter> {
        Some(self)
    }
}

impl ScalarValuePlausibilityFilter for JumpTargetScalar {
    fn value(&self, rupture: &ClusterRupture) -> Option<f64> {
        rupture
            .jumps()
            .first()
            .map(|jump| jump.to_section.section_id as f64)
    }

    fn acceptable_range(&self) -> Option<ScalarRange> {
        Some(ScalarRange::at_least(0.0))
    }
}

/// Same scalar for every rupture
struct ConstantScalar(f64);

impl PlausibilityFilter for ConstantScalar {
    fn name(&self) -> String {
        "Constant".to_string()
    }

    fn apply(&self, _rupture: &ClusterRupture, _verbose: bool) -> PlausibilityResult {
        PlausibilityResult::Pass
    }

    fn as_scalar(&self) -> Option<&dyn ScalarValuePlausibilityFilter> {
        Some(self)
    }
}

impl ScalarValuePlausibilityFilter for ConstantScalar {
    fn value(&self, _rupture: &ClusterRupture) -> Option<f64> {
        Some(self.0)
    }

    fn acceptable_range(&self) -> Option<ScalarRange> {
        Some(ScalarRange::at_least(0.0))
    }
}

/// Directional scalar: id of the rupture's starting section, larger is better.
/// Only passes ruptures that start on parent 1.
struct StartSectionScalar;

impl PlausibilityFilter for StartSectionScalar {
    fn name(&self) -> String {
        "Start Section".to_string()
    }

    fn apply(&self, rupture: &ClusterRupture, _verbose: bool) -> PlausibilityResult {
        if rupture.first_cluster().parent_id() == 1 {
            PlausibilityResult::Pass
        } else {
            PlausibilityResult::Fail
        }
    }

    fn is_directional(&self, _splayed: bool) -> bool {
        true
    }

    fn as_scalar(&self) -> Option<&dyn ScalarValuePlausibilityFilter> {
        Some(self)
    }
}

impl ScalarValuePlausibilityFilter for StartSectionScalar {
    fn value(&self, rupture: &ClusterRupture) -> Option<f64> {
        Some(rupture.first_cluster().first_section().section_id as f64)
    }

    fn acceptable_range(&self) -> Option<ScalarRange> {
        Some(ScalarRange::at_least(0.0))
    }
}

/// Scalar equal to the rupture's section count, ranked by `range`
struct RuptureSizeScalar(ScalarRange);

impl PlausibilityFilter for RuptureSizeScalar {
    fn name(&self) -> String {
        format!("Rupture Size {}", self.0)
    }

    fn apply(&self, _rupture: &ClusterRupture, _verbose: bool) -> PlausibilityResult {
        PlausibilityResult::Pass
    }

    fn as_scalar(&self) -> Option<&dyn ScalarValuePlausibilityFilter> {
        Some(self)
    }
}

impl ScalarValuePlausibilityFilter for RuptureSizeScalar {
    fn value(&self, rupture: &ClusterRupture) -> Option<f64> {
        Some(rupture.section_count() as f64)
    }

    fn acceptable_range(&self) -> Option<ScalarRange> {
        Some(self.0)
    }
}

/// Symmetric distance table; missing pairs are infinitely far apart
#[derive(Default)]
struct TableDistances {
    table: HashMap<(u32, u32), f64>,
}

impl TableDistances {
    fn with(mut self, a: u32, b: u32, dist: f64) -> Self {
        self.table.insert((a.min(b), a.max(b)), dist);
        self
    }
}

impl SectionDistanceProvider for TableDistances {
    fn distance(&self, a: &FaultSection, b: &FaultSection) -> f64 {
        let key = (
            a.section_id.min(b.section_id),
            a.section_id.max(b.section_id),
        );
        self.table.get(&key).copied().unwrap_or(f64::INFINITY)
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn cluster(parent: u32, ids: &[u32]) -> Arc<FaultSubsectionCluster> {
    let sections = ids
        .iter()
        .map(|&id| Arc::new(FaultSection::new(id, parent, format!("Fault {}", parent), vec![])))
        .collect();
    Arc::new(FaultSubsectionCluster::new(sections).unwrap())
}

fn strategy(
    distances: TableDistances,
    filters: Vec<Arc<dyn PlausibilityFilter>>,
) -> PlausibleConnectionStrategy {
    PlausibleConnectionStrategy::new(Arc::new(distances), 5.0, filters).unwrap()
}

/// Section along the x axis from `x0` to `x1` km
fn line_section(id: u32, parent: u32, x0: f64, x1: f64) -> Arc<FaultSection> {
    Arc::new(FaultSection::new(
        id,
        parent,
        format!("Fault {}", parent),
        vec![TracePoint::new(x0, 0.0, 0.0), TracePoint::new(x1, 0.0, 0.0)],
    ))
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_single_passing_pair() {
    let strategy = strategy(
        TableDistances::default().with(0, 10, 0.5),
        vec![Arc::new(Fixed(PlausibilityResult::Pass))],
    );
    let from = cluster(1, &[0]);
    let to = cluster(2, &[10]);

    let jump = strategy.build_connection(&from, &to).unwrap().unwrap();
    assert_eq!(jump.section_ids(), (0, 10));
    assert_eq!(jump.distance, 0.5);
    assert!(Arc::ptr_eq(&jump.from_cluster, &from));
    assert!(Arc::ptr_eq(&jump.to_cluster, &to));
}

#[test]
fn test_nothing_in_range() {
    let strategy = strategy(
        TableDistances::default().with(0, 10, 5.5),
        vec![Arc::new(Fixed(PlausibilityResult::Pass))],
    );
    let from = cluster(1, &[0]);
    let to = cluster(2, &[10]);
    assert!(strategy.build_connection(&from, &to).unwrap().is_none());
}

#[test]
fn test_cutoff_is_inclusive() {
    let strategy = strategy(
        TableDistances::default().with(0, 10, 5.0),
        vec![Arc::new(Fixed(PlausibilityResult::Pass))],
    );
    let from = cluster(1, &[0]);
    let to = cluster(2, &[10]);
    assert!(strategy.build_connection(&from, &to).unwrap().is_some());
}

#[test]
fn test_all_failing_resolves_to_nearest() {
    let distances = TableDistances::default()
        .with(0, 10, 3.0)
        .with(1, 11, 2.0)
        .with(1, 10, 1.0);
    let strategy = strategy(distances, vec![Arc::new(Fixed(PlausibilityResult::Fail))]);
    let from = cluster(1, &[0, 1]);
    let to = cluster(2, &[10, 11]);

    let candidates = strategy.candidates(&from, &to).unwrap();
    assert_eq!(candidates.len(), 3);
    assert!(candidates.iter().all(|c| !c.has_allowed()));

    let jump = strategy.build_connection(&from, &to).unwrap().unwrap();
    assert_eq!(jump.section_ids(), (1, 10));
    assert_eq!(jump.distance, 1.0);
}

#[test]
fn test_candidates_keep_pair_order() {
    let distances = TableDistances::default()
        .with(1, 10, 1.0)
        .with(0, 11, 0.2)
        .with(0, 10, 3.0);
    let strategy = strategy(distances, vec![Arc::new(Fixed(PlausibilityResult::Pass))]);
    let from = cluster(1, &[0, 1]);
    let to = cluster(2, &[10, 11]);

    let order: Vec<(u32, u32)> = strategy
        .candidates(&from, &to)
        .unwrap()
        .iter()
        .map(|c| (c.from_section.section_id, c.to_section.section_id))
        .collect();
    assert_eq!(order, vec![(0, 10), (0, 11), (1, 10)]);
}

#[test]
fn test_end_to_end_preferred_over_nearer_split() {
    // 0 -> 11 splits the target cluster into two strands; 0 -> 10 does not
    let distances = TableDistances::default().with(0, 11, 0.5).with(0, 10, 1.5);
    let strategy = strategy(distances, vec![Arc::new(Fixed(PlausibilityResult::Pass))]);
    let from = cluster(1, &[0]);
    let to = cluster(2, &[10, 11, 12]);

    let candidates = strategy.candidates(&from, &to).unwrap();
    let split = candidates
        .iter()
        .find(|c| c.to_section.section_id == 11)
        .unwrap();
    assert_eq!(split.total_jumps(), 2);
    assert!(!split.to_end);

    let jump = strategy.build_connection(&from, &to).unwrap().unwrap();
    assert_eq!(jump.section_ids(), (0, 10));
}

#[test]
fn test_fewer_failures_win_over_distance() {
    // Near candidate 0 -> 10 drags the whole 4-section cluster and fails; the split at
    // 12 has one short passing strand.
    let distances = TableDistances::default()
        .with(0, 10, 0.5)
        .with(0, 12, 4.0);
    let strategy = strategy(distances, vec![Arc::new(MaxSections(3))]);
    let from = cluster(1, &[0]);
    let to = cluster(2, &[10, 11, 12, 13]);

    let candidates = strategy.candidates(&from, &to).unwrap();
    let near = &candidates[0];
    assert_eq!(near.to_section.section_id, 10);
    assert!(!near.has_allowed());
    let far = &candidates[1];
    assert_eq!((far.allowed_jumps.len(), far.failed_jumps.len()), (1, 1));

    let jump = strategy.build_connection(&from, &to).unwrap().unwrap();
    assert_eq!(jump.section_ids(), (0, 12));
}

#[test]
fn test_better_scalar_beats_nearer_candidate() {
    let distances = TableDistances::default().with(0, 10, 1.0).with(0, 12, 1.5);
    let strategy = strategy(distances, vec![Arc::new(JumpTargetScalar)]);
    let from = cluster(1, &[0]);
    let to = cluster(2, &[10, 11, 12]);

    assert_eq!(strategy.scalar_filter_index(), Some(0));
    let jump = strategy.build_connection(&from, &to).unwrap().unwrap();
    assert_eq!(jump.section_ids(), (0, 12));
}

#[test]
fn test_scalar_outside_band_ignored() {
    // 0 -> 12 has the better scalar but is more than 2 km beyond the nearest
    let distances = TableDistances::default().with(0, 10, 1.0).with(0, 12, 3.5);
    let strategy = strategy(distances, vec![Arc::new(JumpTargetScalar)]);
    let from = cluster(1, &[0]);
    let to = cluster(2, &[10, 11, 12]);

    let jump = strategy.build_connection(&from, &to).unwrap().unwrap();
    assert_eq!(jump.section_ids(), (0, 10));
}

#[test]
fn test_scalar_tie_resolved_by_distance() {
    let distances = TableDistances::default().with(0, 12, 1.0).with(0, 10, 1.5);
    let strategy = strategy(distances, vec![Arc::new(ConstantScalar(3.0))]);
    let from = cluster(1, &[0]);
    let to = cluster(2, &[10, 11, 12]);

    let jump = strategy.build_connection(&from, &to).unwrap().unwrap();
    assert_eq!(jump.section_ids(), (0, 12));
}

#[test]
fn test_scalar_filter_is_first_in_configured_order() {
    let strategy = strategy(
        TableDistances::default(),
        vec![
            Arc::new(Fixed(PlausibilityResult::Pass)),
            Arc::new(ConstantScalar(1.0)),
            Arc::new(JumpTargetScalar),
        ],
    );
    assert_eq!(strategy.scalar_filter_index(), Some(1));
    assert!(strategy.scalar_range().is_some());
}

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn test_candidate_and_selector_share_scalar_ordering() {
    // 1->10 splits [0,1,2,3] into variants of 3 and 4 sections; 3->10 has one variant of 5
    let from = cluster(1, &[0, 1, 2, 3]);
    let to = cluster(2, &[10]);
    let build = |range: ScalarRange| {
        let distances = TableDistances::default().with(1, 10, 1.0).with(3, 10, 1.5);
        PlausibleConnectionStrategy::with_selector(
            Arc::new(distances),
            5.0,
            Box::new(BestScalarSelector::new(2.0)),
            vec![Arc::new(RuptureSizeScalar(range))],
        )
        .unwrap()
    };

    let smaller_better = build(ScalarRange::at_most(100.0));
    let candidates = smaller_better.candidates(&from, &to).unwrap();
    let best: Vec<Option<f64>> = candidates.iter().map(|c| c.best_scalar).collect();
    assert_eq!(best, vec![Some(3.0), Some(5.0)]);
    let jump = smaller_better.build_connection(&from, &to).unwrap().unwrap();
    assert_eq!(jump.section_ids(), (1, 10));

    let larger_better = build(ScalarRange::at_least(0.0));
    let candidates = larger_better.candidates(&from, &to).unwrap();
    let best: Vec<Option<f64>> = candidates.iter().map(|c| c.best_scalar).collect();
    assert_eq!(best, vec![Some(4.0), Some(5.0)]);
    let jump = larger_better.build_connection(&from, &to).unwrap().unwrap();
    assert_eq!(jump.section_ids(), (3, 10));
}

#[test]
fn test_candidate_bookkeeping() {
    let distances = TableDistances::default()
        .with(0, 11, 0.5)
        .with(1, 11, 1.0)
        .with(2, 10, 2.0)
        .with(1, 12, 4.0);
    let strategy = strategy(distances, vec![Arc::new(StartSectionScalar)]);
    let from = cluster(1, &[0, 1, 2]);
    let to = cluster(2, &[10, 11, 12]);

    let candidates = strategy.candidates(&from, &to).unwrap();
    assert_eq!(candidates.len(), 4);
    for candidate in &candidates {
        assert_eq!(
            candidate.total_jumps(),
            candidate.allowed_jumps.len() + candidate.failed_jumps.len()
        );
        let scalars = candidate.jump_scalars.as_ref().unwrap();
        let best = scalars.iter().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max);
        if scalars.is_empty() {
            assert!(candidate.best_scalar.is_none());
        } else {
            assert_eq!(candidate.best_scalar, Some(best));
        }
    }
}

#[test]
fn test_directional_filter_passes_when_reversed_passes() {
    // Starting from parent 2 fails forward; the reversed rupture starts on parent 1
    let strategy = strategy(
        TableDistances::default().with(0, 10, 1.0),
        vec![Arc::new(StartSectionScalar)],
    );
    let from = cluster(2, &[10]);
    let to = cluster(1, &[0]);

    let candidates = strategy.candidates(&from, &to).unwrap();
    assert_eq!(candidates.len(), 1);
    assert!(candidates[0].has_allowed());
    assert_eq!(candidates[0].best_scalar, Some(0.0));
}

#[test]
fn test_build_connection_is_idempotent() {
    let distances = TableDistances::default()
        .with(0, 10, 1.0)
        .with(1, 11, 1.2)
        .with(1, 10, 2.2);
    let strategy = strategy(distances, vec![Arc::new(JumpTargetScalar)]);
    let from = cluster(1, &[0, 1]);
    let to = cluster(2, &[10, 11]);

    let first = strategy.build_connection(&from, &to).unwrap().unwrap();
    let second = strategy.build_connection(&from, &to).unwrap().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.distance, second.distance);
    assert_eq!(from.connections().len(), 0);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_strategy_from_config() {
    let connection = ConnectionConfig {
        max_jump_dist: 2.0,
        selector: SelectorConfig::MinDistance,
    };
    let diagnostics = DiagnosticsConfig {
        debug_parent_pairs: vec![[1, 2]],
        trace_all_pairs: false,
    };
    let distances = TableDistances::default().with(0, 11, 0.5).with(0, 10, 1.5);
    let strategy = PlausibleConnectionStrategy::from_config(
        &connection,
        &diagnostics,
        Arc::new(distances),
        vec![Arc::new(Fixed(PlausibilityResult::Pass))],
    )
    .unwrap();

    assert_eq!(strategy.max_jump_dist(), 2.0);
    assert_eq!(strategy.selector().name(), "Min Distance");
    assert_eq!(strategy.name(), "Fixed PASS Plausible: maxDist=2 km");

    // Plain min distance ignores the split penalty
    let jump = strategy
        .build_connection(&cluster(1, &[0]), &cluster(2, &[10, 11, 12]))
        .unwrap()
        .unwrap();
    assert_eq!(jump.section_ids(), (0, 11));
}

#[test]
fn test_config_error_converts() {
    let err: ConnectivityError =
        faultnet_config::ConfigError::InvalidValue("max_jump_dist".to_string()).into();
    assert!(matches!(err, ConnectivityError::Config(_)));
}

// ============================================================================
// Whole network
// ============================================================================

#[test]
fn test_connect_network_and_replay() {
    let sections = vec![
        line_section(0, 1, 0.0, 1.0),
        line_section(1, 1, 1.0, 2.0),
        line_section(2, 2, 2.5, 3.5),
        line_section(3, 2, 3.5, 4.5),
        line_section(4, 3, 100.0, 101.0),
    ];
    let clusters = build_clusters(&sections).unwrap();
    assert_eq!(clusters.len(), 3);

    let distances = Arc::new(SectionDistanceCache::new());
    let strategy = PlausibleConnectionStrategy::new(
        Arc::clone(&distances) as Arc<dyn SectionDistanceProvider>,
        5.0,
        vec![Arc::new(Fixed(PlausibilityResult::Pass))],
    )
    .unwrap();

    let connected = connect_clusters(&strategy, &clusters, 2).unwrap();
    assert_eq!(connected.len(), 3);
    assert_eq!(connected[0].connections().len(), 1);
    assert_eq!(connected[0].connections()[0].section_ids(), (1, 2));
    assert_eq!(connected[0].connections()[0].distance, 0.5);
    assert_eq!(connected[1].connections().len(), 1);
    assert_eq!(connected[1].connections()[0].section_ids(), (2, 1));
    assert!(connected[2].connections().is_empty());
    assert!(!distances.is_empty());

    let unique = unique_undirected_jumps(&connected);
    assert_eq!(unique.len(), 1);

    let replay = PrecomputedConnectionStrategy::new("replay", connected, strategy.max_jump_dist());
    assert!(replay.are_parents_connected(1, 2));
    assert!(replay.are_parents_connected(2, 1));
    assert!(!replay.are_parents_connected(1, 3));
    assert!(matches!(
        connect_clusters(&replay, &clusters, 1),
        Err(ConnectivityError::AlreadyComputed(_))
    ));
}

#[test]
fn test_connect_is_deterministic_across_thread_counts() {
    let sections: Vec<Arc<FaultSection>> = (0..12)
        .map(|i| {
            let x = i as f64 * 1.1;
            line_section(i, i / 2, x, x + 1.0)
        })
        .collect();
    let clusters = build_clusters(&sections).unwrap();
    let strategy = PlausibleConnectionStrategy::new(
        Arc::new(SectionDistanceCache::new()),
        3.0,
        vec![Arc::new(Fixed(PlausibilityResult::Pass))],
    )
    .unwrap();

    let single = connect_clusters(&strategy, &clusters, 1).unwrap();
    let pooled = connect_clusters(&strategy, &clusters, 4).unwrap();
    let render = |clusters: &[FaultSubsectionCluster]| -> Vec<Vec<String>> {
        clusters
            .iter()
            .map(|c| c.connections().iter().map(|j| j.to_string()).collect())
            .collect()
    };
    assert_eq!(render(&single), render(&pooled));
    assert_eq!(
        unique_undirected_jumps(&single),
        unique_undirected_jumps(&pooled)
    );
}
