//! SIMD type aliases and architecture bindings
//!
//! A tiny portability layer so the rest of `simd_abstraction` can refer to
//! `simd_arch` and `__m128i` uniformly on both x86_64 and aarch64.
//!
//! - On x86_64 we re-export `std::arch::x86_64` as `simd_arch` and use the
//!   native `__m128i` type.
//! - On aarch64 we re-export `std::arch::aarch64` as `simd_arch` and define a
//!   transparent wrapper `__m128i` backed by `uint8x16_t`. Residue bytes and
//!   lane counters are both unsigned 8-bit data, so the wrapper holds the
//!   `u8` view directly.

#[cfg(target_arch = "x86_64")]
pub use std::arch::x86_64 as simd_arch;

#[cfg(target_arch = "aarch64")]
pub use std::arch::aarch64 as simd_arch;

/// Type alias for `__m128i` on x86_64.
#[allow(non_camel_case_types)]
#[cfg(target_arch = "x86_64")]
pub type __m128i = simd_arch::__m128i;

/// Transparent `__m128i` wrapper on aarch64 (NEON), backed by `uint8x16_t`.
#[allow(non_camel_case_types)]
#[cfg(target_arch = "aarch64")]
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct __m128i(pub simd_arch::uint8x16_t);

#[cfg(target_arch = "aarch64")]
impl std::fmt::Debug for __m128i {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bytes: [u8; 16] = unsafe { std::mem::transmute(self.0) };
        write!(f, "__m128i({:?})", bytes)
    }
}

#[cfg(target_arch = "aarch64")]
impl __m128i {
    /// Load 16 residue bytes from a slice.
    /// Panics if the slice is not 16 bytes long.
    #[inline]
    pub fn from_slice(slice: &[u8]) -> Self {
        assert_eq!(slice.len(), 16);
        Self(unsafe { simd_arch::vld1q_u8(slice.as_ptr()) })
    }

    /// Copy the lanes into a slice.
    /// Panics if the slice is not 16 bytes long.
    #[inline]
    pub fn copy_to_slice(&self, slice: &mut [u8]) {
        assert_eq!(slice.len(), 16);
        unsafe { simd_arch::vst1q_u8(slice.as_mut_ptr(), self.0) };
    }
}
