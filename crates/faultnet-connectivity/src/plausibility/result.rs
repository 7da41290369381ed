// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Three-valued plausibility outcome.
*/

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a plausibility filter.
///
/// `FailHardStop` means the rupture fails and no extension of it can pass either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlausibilityResult {
    Pass,
    Fail,
    FailHardStop,
}

impl PlausibilityResult {
    fn severity(self) -> u8 {
        match self {
            PlausibilityResult::Pass => 0,
            PlausibilityResult::Fail => 1,
            PlausibilityResult::FailHardStop => 2,
        }
    }

    pub fn is_pass(self) -> bool {
        self == PlausibilityResult::Pass
    }

    /// False only for a hard stop
    pub fn can_continue(self) -> bool {
        self != PlausibilityResult::FailHardStop
    }

    /// Both must pass; the more severe failure wins
    pub fn logical_and(self, other: PlausibilityResult) -> PlausibilityResult {
        if other.severity() > self.severity() {
            other
        } else {
            self
        }
    }

    /// Either may pass; the less severe outcome wins
    pub fn logical_or(self, other: PlausibilityResult) -> PlausibilityResult {
        if other.severity() < self.severity() {
            other
        } else {
            self
        }
    }
}

impl fmt::Display for PlausibilityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlausibilityResult::Pass => "PASS",
            PlausibilityResult::Fail => "FAIL",
            PlausibilityResult::FailHardStop => "FAIL_HARD_STOP",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::PlausibilityResult::*;

    #[test]
    fn test_and_table() {
        assert_eq!(Pass.logical_and(Pass), Pass);
        assert_eq!(Pass.logical_and(Fail), Fail);
        assert_eq!(Fail.logical_and(Pass), Fail);
        assert_eq!(Fail.logical_and(FailHardStop), FailHardStop);
        assert_eq!(FailHardStop.logical_and(Pass), FailHardStop);
    }

    #[test]
    fn test_or_table() {
        assert_eq!(Fail.logical_or(Pass), Pass);
        assert_eq!(FailHardStop.logical_or(Pass), Pass);
        assert_eq!(FailHardStop.logical_or(Fail), Fail);
        assert_eq!(Fail.logical_or(Fail), Fail);
        assert_eq!(FailHardStop.logical_or(FailHardStop), FailHardStop);
    }

    #[test]
    fn test_flags() {
        assert!(Pass.is_pass());
        assert!(!Fail.is_pass());
        assert!(Fail.can_continue());
        assert!(!FailHardStop.can_continue());
        assert_eq!(FailHardStop.to_string(), "FAIL_HARD_STOP");
    }
}
