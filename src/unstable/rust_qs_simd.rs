use crate::config::{Kernel, SortConfig};

sort_impl!("rust_qs_simd");

pub fn config() -> SortConfig {
    SortConfig::sequential().with_kernel(Kernel::Vector)
}

#[inline]
pub fn sort(v: &mut [u32]) {
    super::sort_or_sequential(v, &config());
}
