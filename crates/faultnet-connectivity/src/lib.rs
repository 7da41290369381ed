// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
# faultnet connectivity

Decides, for every pair of fault subsection clusters, whether they connect into a
single rupture path and through which jump point.

- Candidate discovery: every section pair within the maximum jump distance
- Strand splitting and directional rupture assembly for each candidate
- Three-valued plausibility filtering with optional scalar tie-breaking
- Composable jump selectors that pick the single best candidate

## Architecture

```text
collect_candidates  ->  Vec<CandidateJump>  ->  JumpSelector  ->  Option<Jump>
   (strands, filters)                           (chain of policies)
```

`PlausibleConnectionStrategy` is the entry point; `connect_clusters` runs it over a
whole network on a bounded worker pool.

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod connectivity;
pub mod distance;
pub mod models;
pub mod plausibility;
pub mod types;

pub use connectivity::{
    build_clusters, connect_clusters, default_selector, selector_from_config,
    unique_undirected_jumps, AnyPassMinDistSelector, BestScalarSelector, CandidateJump,
    ClusterConnectionStrategy, DiagnosticPairs, JumpSelector, MinDistanceSelector,
    PassesMinimizeFailedSelector, PlausibleConnectionStrategy, PrecomputedConnectionStrategy,
};
pub use distance::{SectionDistanceCache, SectionDistanceProvider};
pub use models::{ClusterRupture, FaultSection, FaultSubsectionCluster, Jump, TracePoint};
pub use plausibility::{
    PlausibilityFilter, PlausibilityResult, ScalarRange, ScalarValuePlausibilityFilter,
};
pub use types::{ConnectivityError, ConnectivityResult, ParentId, SectionId};
