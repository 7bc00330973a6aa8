//! Pivot estimation from three samples.
//!
//! The closer the pivot is to the median, the less has to be swapped. Computing the median is too
//! expensive, so the pivot is the mean of the first, middle and last element of the range.

use crate::error::{Result, SortError};

/// How the three samples are summed before the division by three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PivotSum {
    /// Sum in 64 bits. The pivot always lies between the smallest and largest sample.
    #[default]
    Widened,
    /// Sum in 32 bits with wrap-around, bit-exact with the classic `uint32_t` formulation. Once the
    /// sum overflows the pivot can fall below every sample.
    Wrapping,
}

/// Returns the pivot for the whole of `v`.
///
/// `v` must not be empty.
#[inline]
pub fn estimate(v: &[u32], policy: PivotSum) -> u32 {
    debug_assert!(!v.is_empty());

    let last = v.len() - 1;
    // (left + right) / 2 relative to left is the same as (right - left) / 2.
    let (a, b, c) = (v[0], v[last / 2], v[last]);

    mean_of_three(a, b, c, policy)
}

/// Checked variant of [`estimate`] over the inclusive range `left..=right` of `v`.
pub fn estimate_range(v: &[u32], left: usize, right: usize, policy: PivotSum) -> Result<u32> {
    if v.is_empty() {
        return Err(SortError::EmptyRange);
    }

    if left > right || right >= v.len() {
        return Err(SortError::InvalidRange {
            left,
            right,
            len: v.len(),
        });
    }

    Ok(estimate(&v[left..=right], policy))
}

#[inline]
pub fn mean_of_three(a: u32, b: u32, c: u32, policy: PivotSum) -> u32 {
    match policy {
        PivotSum::Widened => ((a as u64 + b as u64 + c as u64) / 3) as u32,
        PivotSum::Wrapping => a.wrapping_add(b).wrapping_add(c) / 3,
    }
}
