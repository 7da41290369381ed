// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Plausibility filtering: outcomes, scalar ranges and filter capabilities.
*/

pub mod filter;
pub mod range;
pub mod result;

pub use filter::{PlausibilityFilter, ScalarValuePlausibilityFilter};
pub use range::{RangeBound, ScalarRange};
pub use result::PlausibilityResult;
