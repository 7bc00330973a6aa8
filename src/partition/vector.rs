//! Hoare partition that classifies eight elements per step.
//!
//! Two windows of `LANES` elements move towards each other, one growing from the left and one
//! shrinking from the right. Each window carries a pending mask of lanes that sit on the wrong side
//! of the pivot. Once both masks are non-empty their set bits are paired up in increasing bit
//! order, and the paired lanes are exchanged between the two registers with a permute plus blend.
//! Unpaired bits stay pending for the next step. A window with no pending lanes left is written
//! back and the next one is loaded.
//!
//! When fewer than `3 * LANES` unclassified elements remain the vector loop stops, the pending
//! window is flushed, and the residual is finished by the scalar kernel.

use super::lanes::{Lanes, Portable, VectorBackend, LANES};
use super::{scalar, Split};

#[cfg(target_arch = "x86_64")]
use super::lanes::Avx2;

partition_impl!("vector_hoare");

/// Partitions `v` around `pivot` with the backend picked by [`VectorBackend::detect`].
///
/// Same contract as [`scalar::partition`]. Slices of at most `2 * LANES` elements are handed to
/// the scalar kernel as a whole.
#[inline]
pub fn partition(v: &mut [u32], pivot: u32) -> Split {
    partition_with(v, pivot, VectorBackend::detect())
}

/// Partitions `v` around `pivot` with an explicit backend. A backend the CPU does not support
/// falls back to [`VectorBackend::Portable`].
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub fn partition_with(v: &mut [u32], pivot: u32, backend: VectorBackend) -> Split {
    if v.len() <= 2 * LANES {
        return scalar::partition(v, pivot);
    }

    match backend {
        #[cfg(target_arch = "x86_64")]
        // SAFETY: AVX2 support was just checked.
        VectorBackend::Avx2 if backend.is_available() => unsafe { partition_avx2(v, pivot) },
        // SAFETY: The portable lanes have no CPU requirement.
        _ => unsafe { partition_lanes::<Portable>(v, pivot) },
    }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn partition_avx2(v: &mut [u32], pivot: u32) -> Split {
    partition_lanes::<Avx2>(v, pivot)
}

/// Pairing of two pending masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Aligned {
    /// Bits of the left mask that found a partner.
    paired_l: u8,
    /// Bits of the right mask that found a partner.
    paired_r: u8,
    /// `from_l[lane_r] == lane_l`, pulls left lanes into their right partner positions.
    from_l: [u32; LANES],
    /// `from_r[lane_l] == lane_r`, pulls right lanes into their left partner positions.
    from_r: [u32; LANES],
    /// Left bits still waiting for a partner.
    rest_l: u8,
    /// Right bits still waiting for a partner.
    rest_r: u8,
}

/// Pairs the set bits of `mask_l` and `mask_r` lowest first. With unequal population counts the
/// surplus bits of the larger mask are returned as rest.
#[inline(always)]
fn align_masks(mask_l: u8, mask_r: u8) -> Aligned {
    debug_assert!(mask_l != 0 && mask_r != 0);

    let mut rest_l = mask_l;
    let mut rest_r = mask_r;

    // Unpaired lanes keep index 0, they are masked out by the blend.
    let mut from_l = [0; LANES];
    let mut from_r = [0; LANES];

    while rest_l != 0 && rest_r != 0 {
        let lane_l = rest_l.trailing_zeros();
        let lane_r = rest_r.trailing_zeros();

        // Clear lowest set bit.
        rest_l &= rest_l - 1;
        rest_r &= rest_r - 1;

        from_l[lane_r as usize] = lane_l;
        from_r[lane_l as usize] = lane_r;
    }

    let paired_l = mask_l ^ rest_l;
    let paired_r = mask_r ^ rest_r;
    debug_assert_eq!(paired_l.count_ones(), paired_r.count_ones());

    Aligned {
        paired_l,
        paired_r,
        from_l,
        from_r,
        rest_l,
        rest_r,
    }
}

/// Exchanges the paired lanes of `left` and `right`.
#[inline(always)]
unsafe fn swap_lanes<L: Lanes>(left: &mut L, right: &mut L, aligned: &Aligned) {
    let to_right = left.permute(L::load(&aligned.from_l));
    let to_left = right.permute(L::load(&aligned.from_r));

    *left = L::blend(aligned.paired_l, to_left, *left);
    *right = L::blend(aligned.paired_r, to_right, *right);
}

/// # Safety
///
/// The CPU must support `L`. `v.len()` must exceed `2 * LANES`.
#[inline(always)]
unsafe fn partition_lanes<L: Lanes>(v: &mut [u32], pivot: u32) -> Split {
    let len = v.len();
    debug_assert!(len > 2 * LANES);

    let pivot_lanes = L::splat(pivot);

    // v[..l] is < pivot and v[r..] is >= pivot. The left window is v[l..l + LANES], the right
    // window v[r - LANES..r].
    let mut l = 0;
    let mut r = len;

    let mut left = pivot_lanes;
    let mut right = pivot_lanes;

    // Left lanes that are >= pivot, right lanes that are < pivot.
    let mut mask_l: u8 = 0;
    let mut mask_r: u8 = 0;

    // A new window is only loaded while at least 3 * LANES unclassified elements remain, so the
    // two windows never overlap.
    'scan: loop {
        if mask_l == 0 {
            loop {
                if r - l < 3 * LANES {
                    break 'scan;
                }

                left = L::load(&v[l..]);
                let is_lt = left.lt_mask(pivot_lanes);

                if is_lt == u8::MAX {
                    l += LANES;
                } else {
                    mask_l = !is_lt;
                    break;
                }
            }
        }

        if mask_r == 0 {
            loop {
                if r - l < 3 * LANES {
                    break 'scan;
                }

                right = L::load(&v[r - LANES..]);
                let is_lt = right.lt_mask(pivot_lanes);

                if is_lt == 0 {
                    r -= LANES;
                } else {
                    mask_r = is_lt;
                    break;
                }
            }
        }

        let aligned = align_masks(mask_l, mask_r);
        swap_lanes(&mut left, &mut right, &aligned);

        mask_l = aligned.rest_l;
        mask_r = aligned.rest_r;

        if mask_l == 0 {
            left.store(&mut v[l..]);
            l += LANES;
        }

        if mask_r == 0 {
            right.store(&mut v[r - LANES..]);
            r -= LANES;
        }
    }

    // The scan only stops while growing a window with an empty mask, so at most one side is
    // still resident.
    debug_assert!(mask_l == 0 || mask_r == 0);

    if mask_l != 0 {
        left.store(&mut v[l..]);
    } else if mask_r != 0 {
        right.store(&mut v[r - LANES..]);
    }

    finish_residual(v, pivot, l, r)
}

/// Partitions the unclassified `v[l..r]`, given that `v[..l]` is `< pivot` and `v[r..]` is
/// `>= pivot`.
fn finish_residual(v: &mut [u32], pivot: u32, l: usize, r: usize) -> Split {
    debug_assert!(l < r);

    let mut less = 0;
    let mut greater = 0;
    for &elem in &v[l..r] {
        less += (elem < pivot) as usize;
        greater += (elem > pivot) as usize;
    }

    if less == 0 {
        // Nothing in the residual belongs strictly left. Re-partition it together with the high
        // side, which spreads elements equal to the pivot across both halves.
        scalar::partition(&mut v[l..], pivot).offset(l)
    } else if greater == 0 {
        // Symmetric, together with the low side.
        scalar::partition(&mut v[..r], pivot)
    } else {
        scalar::partition(&mut v[l..r], pivot).offset(l)
    }
}
