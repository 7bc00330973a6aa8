//! Vector partition combined with the task-parallel driver. This is what [`crate::sort`] runs.

use crate::config::{Kernel, SortConfig};

sort_impl!("rust_qs_simd_parallel");

/// One worker per available core.
pub fn config() -> SortConfig {
    SortConfig::default().with_kernel(Kernel::Vector)
}

pub fn sort(v: &mut [u32]) {
    super::sort_or_sequential(v, &config());
}
