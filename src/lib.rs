//! Quicksort for `u32` buffers with two independent accelerations of the partition step: 8-lane
//! vector compare/permute/blend, and fork-join task parallelism over a per-call worker pool.
//!
//! The variants live in [`unstable`], each one implementing [`sort_test_tools::Sort`]. The
//! checked entry points below validate their arguments before touching the buffer.

macro_rules! sort_impl {
    ($name:expr) => {
        pub struct SortImpl;

        impl sort_test_tools::Sort for SortImpl {
            fn name() -> String {
                $name.into()
            }

            #[inline]
            fn sort(arr: &mut [u32]) {
                sort(arr);
            }
        }
    };
}

pub mod config;
pub mod error;
pub mod partition;
pub mod pivot;
mod quicksort;
pub mod unstable;

pub use config::{Kernel, SortConfig, DEFAULT_CUTOFF};
pub use error::{Result, SortError};
pub use partition::{Split, VectorBackend, LANES};
pub use pivot::PivotSum;

/// Sorts `v[..len]` ascending with the vector kernel on a pool of `thread_count` workers.
///
/// `thread_count == 1` runs without a pool. Elements past `len` are left untouched.
pub fn sort(v: &mut [u32], len: usize, thread_count: usize) -> Result<()> {
    if len > v.len() {
        return Err(SortError::LengthOutOfBounds {
            len,
            buffer_len: v.len(),
        });
    }

    sort_with(
        &mut v[..len],
        &SortConfig::default().with_threads(thread_count),
    )
}

/// Sorts all of `v` ascending as described by `config`.
pub fn sort_with(v: &mut [u32], config: &SortConfig) -> Result<()> {
    quicksort::sort(v, config)
}

/// Partitions the inclusive range `v[left..=right]` around `pivot` with the vector kernel.
///
/// The returned bounds are absolute indices into `v`. Any `pivot` is accepted, one that lies
/// outside the values of the range leaves one side empty.
pub fn partition(v: &mut [u32], pivot: u32, left: usize, right: usize) -> Result<Split> {
    let range = checked_range(v, left, right)?;
    Ok(partition::vector::partition(&mut v[range], pivot).offset(left))
}

/// Scalar twin of [`partition`].
pub fn partition_scalar(v: &mut [u32], pivot: u32, left: usize, right: usize) -> Result<Split> {
    let range = checked_range(v, left, right)?;
    Ok(partition::scalar::partition(&mut v[range], pivot).offset(left))
}

fn checked_range(v: &[u32], left: usize, right: usize) -> Result<std::ops::RangeInclusive<usize>> {
    if left > right || right >= v.len() {
        return Err(SortError::InvalidRange {
            left,
            right,
            len: v.len(),
        });
    }

    Ok(left..=right)
}
