//! Hoare partition kernels, scalar and 8-lane vector.

/// Crossed bounds of a partitioned slice.
///
/// Given the classical two-pointer formulation with inclusive `i` and `j`, `low_end == j + 1` and
/// `high_start == i`. All of `v[..low_end]` is `<= pivot`, all of `v[high_start..]` is `>= pivot`
/// and `low_end <= high_start`. If they are not equal the single element between them equals the
/// pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split {
    pub low_end: usize,
    pub high_start: usize,
}

impl Split {
    #[inline]
    pub(crate) fn offset(self, by: usize) -> Self {
        Self {
            low_end: self.low_end + by,
            high_start: self.high_start + by,
        }
    }

    /// `true` if either side is the whole of a slice with `len` elements, meaning recursing on it
    /// would not make progress.
    #[inline]
    pub(crate) fn is_degenerate(self, len: usize) -> bool {
        self.low_end >= len || self.high_start == 0
    }
}

pub trait Partition {
    fn name() -> String;

    fn partition(v: &mut [u32], pivot: u32) -> Split;
}

macro_rules! partition_impl {
    ($name:expr) => {
        pub struct PartitionImpl;

        impl crate::partition::Partition for PartitionImpl {
            fn name() -> String {
                $name.into()
            }

            #[inline]
            fn partition(v: &mut [u32], pivot: u32) -> crate::partition::Split {
                partition(v, pivot)
            }
        }
    };
}

pub mod lanes;
pub mod scalar;
pub mod vector;

pub use lanes::{VectorBackend, LANES};
