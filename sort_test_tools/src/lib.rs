/// An in-place ascending sort over `u32` buffers.
///
/// Implementations are free to reorder equal elements.
pub trait Sort {
    fn name() -> String;

    fn sort(arr: &mut [u32]);
}

pub mod patterns;
