use crate::config::{Kernel, SortConfig};

sort_impl!("rust_qs_scalar_parallel");

/// One worker per available core.
pub fn config() -> SortConfig {
    SortConfig::default().with_kernel(Kernel::Scalar)
}

pub fn sort(v: &mut [u32]) {
    super::sort_or_sequential(v, &config());
}
