// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Strand splitting at a jump point.

A jump point inside a cluster splits it into a strand ending at the point and a
strand starting at it; a jump point at either end yields a single strand.
*/

use crate::models::FaultSection;
use std::sync::Arc;

/// Sub-sequences of `sections` usable as the from/to side of a jump at `index`.
///
/// - single-section input: that section alone
/// - otherwise: `[0..=index]` when `index > 0`, then `[index..]` when `index < len - 1`
pub fn strands_at(sections: &[Arc<FaultSection>], index: usize) -> Vec<&[Arc<FaultSection>]> {
    debug_assert!(index < sections.len());
    let mut strands = Vec::with_capacity(2);
    if sections.len() == 1 {
        strands.push(&sections[index..index + 1]);
    } else {
        if index > 0 {
            strands.push(&sections[..=index]);
        }
        if index + 1 < sections.len() {
            strands.push(&sections[index..]);
        }
    }
    strands
}
