use crate::config::{Kernel, SortConfig};

sort_impl!("rust_qs_scalar");

pub fn config() -> SortConfig {
    SortConfig::sequential().with_kernel(Kernel::Scalar)
}

#[inline]
pub fn sort(v: &mut [u32]) {
    super::sort_or_sequential(v, &config());
}
