// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Connection strategy abstraction shared by computed and precomputed connectivity.
*/

use crate::models::{FaultSubsectionCluster, Jump};
use crate::types::ConnectivityResult;
use std::sync::Arc;

/// Decides the connection (if any) from one cluster to another.
///
/// Implementations are called concurrently for independent cluster pairs.
pub trait ClusterConnectionStrategy: Send + Sync {
    /// Human-readable name for diagnostics
    fn name(&self) -> String;

    /// Maximum jump distance considered, in km
    fn max_jump_dist(&self) -> f64;

    /// The selected jump from `from` to `to`, or `None` if they do not connect.
    fn build_possible_connections(
        &self,
        from: &Arc<FaultSubsectionCluster>,
        to: &Arc<FaultSubsectionCluster>,
    ) -> ConnectivityResult<Option<Jump>>;
}

/// Format a distance with at most one decimal place ("5", "5.3")
pub(crate) fn format_distance(distance: f64) -> String {
    let rounded = (distance * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.1}", rounded)
    }
}
