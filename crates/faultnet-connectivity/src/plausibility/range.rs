// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Acceptable scalar ranges and the "betterness" order they induce.
*/

use serde::{Deserialize, Serialize};
use std::fmt;

/// One end of a [`ScalarRange`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeBound {
    pub value: f64,
    pub inclusive: bool,
}

/// Interval over `f64` with optional, open or closed, bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScalarRange {
    pub lower: Option<RangeBound>,
    pub upper: Option<RangeBound>,
}

impl ScalarRange {
    pub fn all() -> Self {
        Self::default()
    }

    /// `[lower, upper]`
    pub fn closed(lower: f64, upper: f64) -> Self {
        Self {
            lower: Some(RangeBound { value: lower, inclusive: true }),
            upper: Some(RangeBound { value: upper, inclusive: true }),
        }
    }

    /// `(lower, upper)`
    pub fn open(lower: f64, upper: f64) -> Self {
        Self {
            lower: Some(RangeBound { value: lower, inclusive: false }),
            upper: Some(RangeBound { value: upper, inclusive: false }),
        }
    }

    /// `[lower, +inf)`
    pub fn at_least(lower: f64) -> Self {
        Self {
            lower: Some(RangeBound { value: lower, inclusive: true }),
            upper: None,
        }
    }

    /// `(lower, +inf)`
    pub fn greater_than(lower: f64) -> Self {
        Self {
            lower: Some(RangeBound { value: lower, inclusive: false }),
            upper: None,
        }
    }

    /// `(-inf, upper]`
    pub fn at_most(upper: f64) -> Self {
        Self {
            lower: None,
            upper: Some(RangeBound { value: upper, inclusive: true }),
        }
    }

    /// `(-inf, upper)`
    pub fn less_than(upper: f64) -> Self {
        Self {
            lower: None,
            upper: Some(RangeBound { value: upper, inclusive: false }),
        }
    }

    pub fn has_lower_bound(&self) -> bool {
        self.lower.is_some()
    }

    pub fn has_upper_bound(&self) -> bool {
        self.upper.is_some()
    }

    pub fn contains(&self, value: f64) -> bool {
        let above = match self.lower {
            Some(b) if b.inclusive => value >= b.value,
            Some(b) => value > b.value,
            None => true,
        };
        let below = match self.upper {
            Some(b) if b.inclusive => value <= b.value,
            Some(b) => value < b.value,
            None => true,
        };
        above && below
    }

    /// Distance from `value` to the nearest bound, zero inside the range.
    pub fn dist_from_range(&self, value: f64) -> f64 {
        if self.contains(value) {
            return 0.0;
        }
        let mut dist = f64::INFINITY;
        if let Some(b) = self.lower {
            if value <= b.value {
                dist = dist.min(b.value - value);
            }
        }
        if let Some(b) = self.upper {
            if value >= b.value {
                dist = dist.min(value - b.value);
            }
        }
        dist
    }

    /// True if `test` ranks strictly better than `prev` relative to this range.
    ///
    /// - lower bound only: larger is better
    /// - upper bound only: smaller is better
    /// - both bounds: closer to the range is better (values inside tie)
    /// - unbounded: nothing is better
    pub fn is_value_better(&self, test: f64, prev: f64) -> bool {
        match (self.has_lower_bound(), self.has_upper_bound()) {
            (true, true) => self.dist_from_range(test) < self.dist_from_range(prev),
            (true, false) => test > prev,
            (false, true) => test < prev,
            (false, false) => false,
        }
    }
}

impl fmt::Display for ScalarRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lower {
            Some(b) if b.inclusive => write!(f, "[{}", b.value)?,
            Some(b) => write!(f, "({}", b.value)?,
            None => write!(f, "(-∞")?,
        }
        write!(f, "..")?;
        match self.upper {
            Some(b) if b.inclusive => write!(f, "{}]", b.value),
            Some(b) => write!(f, "{})", b.value),
            None => write!(f, "+∞)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_respects_openness() {
        assert!(ScalarRange::at_least(0.5).contains(0.5));
        assert!(!ScalarRange::greater_than(0.5).contains(0.5));
        assert!(ScalarRange::at_most(2.0).contains(2.0));
        assert!(!ScalarRange::less_than(2.0).contains(2.0));
        assert!(ScalarRange::all().contains(-1e300));
    }

    #[test]
    fn test_dist_from_range() {
        let range = ScalarRange::closed(1.0, 2.0);
        assert_eq!(range.dist_from_range(1.5), 0.0);
        assert_eq!(range.dist_from_range(0.25), 0.75);
        assert_eq!(range.dist_from_range(3.0), 1.0);
    }

    #[test]
    fn test_lower_bounded_prefers_larger() {
        let range = ScalarRange::greater_than(0.0);
        assert!(range.is_value_better(0.9, 0.2));
        assert!(!range.is_value_better(0.2, 0.9));
        assert!(!range.is_value_better(0.5, 0.5));
    }

    #[test]
    fn test_upper_bounded_prefers_smaller() {
        let range = ScalarRange::at_most(10.0);
        assert!(range.is_value_better(1.0, 4.0));
        assert!(!range.is_value_better(4.0, 1.0));
    }

    #[test]
    fn test_two_sided_prefers_closer() {
        let range = ScalarRange::closed(0.0, 1.0);
        assert!(range.is_value_better(1.2, 2.0));
        assert!(range.is_value_better(0.5, -0.1));
        assert!(!range.is_value_better(0.2, 0.8));
        assert!(!ScalarRange::all().is_value_better(5.0, 1.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(ScalarRange::greater_than(0.5).to_string(), "(0.5..+∞)");
        assert_eq!(ScalarRange::closed(1.0, 2.0).to_string(), "[1..2]");
    }
}
