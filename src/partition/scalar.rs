use super::Split;

partition_impl!("scalar_hoare");

/// Two-pointer Hoare partition of `v` around `pivot`.
///
/// Advances from the left past elements `< pivot`, retreats from the right past elements
/// `> pivot`, and swaps the pair that stopped both scans until the scans cross. Elements equal to
/// the pivot may end up on either side.
///
/// Both scans stay inside `v`. If `pivot` is outside the value span of `v` one side of the result
/// is empty.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub fn partition(v: &mut [u32], pivot: u32) -> Split {
    let len = v.len();

    // `lo` is the left index, `hi` is one past the right index.
    let mut lo = 0;
    let mut hi = len;

    while lo < hi {
        while lo < len && v[lo] < pivot {
            lo += 1;
        }

        while hi > 0 && v[hi - 1] > pivot {
            hi -= 1;
        }

        if lo < hi {
            v.swap(lo, hi - 1);

            lo += 1;
            hi -= 1;
        }
    }

    Split {
        low_end: hi,
        high_start: lo,
    }
}
