//! Sort variants, one module per combination of partition kernel and driver.

use log::warn;

use crate::config::SortConfig;
use crate::quicksort::{self, Params};

pub mod rust_qs_scalar;
pub mod rust_qs_scalar_parallel;
pub mod rust_qs_simd;
pub mod rust_qs_simd_parallel;
pub mod rust_std;

/// Runs `config` on `v`. The variant configurations are always valid, so the only possible error
/// is a worker pool that fails to start, in which case `v` is sorted on the calling thread.
fn sort_or_sequential(v: &mut [u32], config: &SortConfig) {
    if let Err(err) = quicksort::sort(v, config) {
        warn!("{err}, sorting on the calling thread instead");
        quicksort::quicksort(v, Params::from_config(config));
    }
}
