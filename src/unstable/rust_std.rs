sort_impl!("rust_std_unstable");

#[inline]
pub fn sort(v: &mut [u32]) {
    v.sort_unstable();
}
