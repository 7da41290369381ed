// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Plausibility filter capabilities.

Filter physics (Coulomb stress, path probabilities, ...) live outside this crate;
connection building only needs the capabilities below.
*/

use super::range::ScalarRange;
use super::result::PlausibilityResult;
use crate::models::ClusterRupture;

/// Judges whether a rupture path is plausible.
///
/// Implementations are shared across worker threads; any cache they keep must
/// tolerate concurrent reads and idempotent population.
pub trait PlausibilityFilter: Send + Sync {
    fn name(&self) -> String;

    fn apply(&self, rupture: &ClusterRupture, verbose: bool) -> PlausibilityResult;

    /// True if the outcome can change when the rupture is traversed backwards
    fn is_directional(&self, _splayed: bool) -> bool {
        false
    }

    /// Scalar view of this filter, if it has one
    fn as_scalar(&self) -> Option<&dyn ScalarValuePlausibilityFilter> {
        None
    }
}

/// A filter that also yields a continuous plausibility value.
pub trait ScalarValuePlausibilityFilter: PlausibilityFilter {
    fn value(&self, rupture: &ClusterRupture) -> Option<f64>;

    /// Range of passing values, `None` if the filter has no notion of one.
    ///
    /// Values are ranked against each other by [`ScalarRange::is_value_better`] only.
    fn acceptable_range(&self) -> Option<ScalarRange>;
}
