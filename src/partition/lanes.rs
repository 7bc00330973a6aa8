//! The vector operations the partition kernel is written against: broadcast, load, store, compare
//! to movemask, permute, and bitmask driven blend, over eight 32-bit lanes.
//!
//! Two backends implement them. `Avx2` maps each operation onto one or two AVX2 instructions,
//! `Portable` emulates them on a `[u32; 8]` and is available everywhere. Which one runs is decided
//! once per process by [`VectorBackend::detect`], or explicitly by the caller.

use log::debug;
use once_cell::sync::Lazy;

/// Number of 32-bit lanes in a 256-bit register.
pub const LANES: usize = 8;

/// Lane-wise operations over eight `u32` values.
///
/// # Safety
///
/// All methods are `unsafe` because a backend may only be used on a CPU that supports it.
/// `load` and `store` additionally require at least `LANES` elements in the given slice.
pub trait Lanes: Copy {
    unsafe fn splat(x: u32) -> Self;

    unsafe fn load(src: &[u32]) -> Self;

    unsafe fn store(self, dst: &mut [u32]);

    /// Bitmask with bit `i` set if lane `i` of `self` is less than lane `i` of `pivot`, compared as
    /// unsigned integers.
    unsafe fn lt_mask(self, pivot: Self) -> u8;

    /// Lane `i` of the result is lane `idx[i]` of `self`. Only the low three bits of each index are
    /// used.
    unsafe fn permute(self, idx: Self) -> Self;

    /// Lane `i` of the result is taken from `on` if bit `i` of `mask` is set, else from `off`.
    unsafe fn blend(mask: u8, on: Self, off: Self) -> Self;
}

/// Available implementations of [`Lanes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorBackend {
    Avx2,
    Portable,
}

static DETECTED: Lazy<VectorBackend> = Lazy::new(|| {
    let backend = if VectorBackend::Avx2.is_available() {
        VectorBackend::Avx2
    } else {
        VectorBackend::Portable
    };

    debug!("vector partition backend: {:?}", backend);

    backend
});

impl VectorBackend {
    /// The fastest backend the running CPU supports. Probed once per process.
    #[inline]
    pub fn detect() -> Self {
        *DETECTED
    }

    pub fn is_available(self) -> bool {
        match self {
            VectorBackend::Portable => true,
            #[cfg(target_arch = "x86_64")]
            VectorBackend::Avx2 => is_x86_feature_detected!("avx2"),
            #[cfg(not(target_arch = "x86_64"))]
            VectorBackend::Avx2 => false,
        }
    }
}

// --- Portable ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Portable([u32; LANES]);

impl Lanes for Portable {
    #[inline(always)]
    unsafe fn splat(x: u32) -> Self {
        Portable([x; LANES])
    }

    #[inline(always)]
    unsafe fn load(src: &[u32]) -> Self {
        let mut lanes = [0; LANES];
        lanes.copy_from_slice(&src[..LANES]);
        Portable(lanes)
    }

    #[inline(always)]
    unsafe fn store(self, dst: &mut [u32]) {
        dst[..LANES].copy_from_slice(&self.0);
    }

    #[inline(always)]
    unsafe fn lt_mask(self, pivot: Self) -> u8 {
        let mut mask = 0;
        for i in 0..LANES {
            mask |= ((self.0[i] < pivot.0[i]) as u8) << i;
        }
        mask
    }

    #[inline(always)]
    unsafe fn permute(self, idx: Self) -> Self {
        let mut lanes = [0; LANES];
        for i in 0..LANES {
            lanes[i] = self.0[(idx.0[i] as usize) & (LANES - 1)];
        }
        Portable(lanes)
    }

    #[inline(always)]
    unsafe fn blend(mask: u8, on: Self, off: Self) -> Self {
        let mut lanes = off.0;
        for i in 0..LANES {
            if mask & (1 << i) != 0 {
                lanes[i] = on.0[i];
            }
        }
        Portable(lanes)
    }
}

// --- AVX2 ---

#[cfg(target_arch = "x86_64")]
pub use avx2::Avx2;

#[cfg(target_arch = "x86_64")]
mod avx2 {
    use core::arch::x86_64::{
        __m256i, _mm256_and_si256, _mm256_blendv_epi8, _mm256_castsi256_ps, _mm256_cmpeq_epi32,
        _mm256_cmpgt_epi32, _mm256_loadu_si256, _mm256_movemask_ps, _mm256_permutevar8x32_epi32,
        _mm256_set1_epi32, _mm256_setr_epi32, _mm256_storeu_si256, _mm256_xor_si256,
    };

    use super::{Lanes, LANES};

    #[derive(Clone, Copy)]
    pub struct Avx2(__m256i);

    // AVX2 only has a signed 32-bit compare. Flipping the sign bit of both operands maps unsigned
    // order onto signed order.
    const SIGN_BIT: i32 = i32::MIN;

    /// Converts a bitmask to a bytemask, every lane is either all ones or all zeros.
    #[inline(always)]
    unsafe fn bitmask_to_bytemask(mask: u8) -> __m256i {
        let mask = _mm256_set1_epi32(mask as i32);
        let bits = _mm256_setr_epi32(0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80);

        _mm256_cmpeq_epi32(_mm256_and_si256(mask, bits), bits)
    }

    impl Lanes for Avx2 {
        #[inline(always)]
        unsafe fn splat(x: u32) -> Self {
            Avx2(_mm256_set1_epi32(x as i32))
        }

        #[inline(always)]
        unsafe fn load(src: &[u32]) -> Self {
            debug_assert!(src.len() >= LANES);
            Avx2(_mm256_loadu_si256(src.as_ptr() as *const __m256i))
        }

        #[inline(always)]
        unsafe fn store(self, dst: &mut [u32]) {
            debug_assert!(dst.len() >= LANES);
            _mm256_storeu_si256(dst.as_mut_ptr() as *mut __m256i, self.0);
        }

        #[inline(always)]
        unsafe fn lt_mask(self, pivot: Self) -> u8 {
            let bias = _mm256_set1_epi32(SIGN_BIT);
            let lhs = _mm256_xor_si256(self.0, bias);
            let rhs = _mm256_xor_si256(pivot.0, bias);

            // pivot > self
            let bytemask = _mm256_cmpgt_epi32(rhs, lhs);
            _mm256_movemask_ps(_mm256_castsi256_ps(bytemask)) as u8
        }

        #[inline(always)]
        unsafe fn permute(self, idx: Self) -> Self {
            Avx2(_mm256_permutevar8x32_epi32(self.0, idx.0))
        }

        #[inline(always)]
        unsafe fn blend(mask: u8, on: Self, off: Self) -> Self {
            Avx2(_mm256_blendv_epi8(off.0, on.0, bitmask_to_bytemask(mask)))
        }
    }
}
