//! Portable helpers that mirror the subset of SSE2 intrinsics used by the
//! residue comparison kernels.
//!
//! Each function maps to the native SSE2 intrinsic on x86_64 and to the
//! equivalent NEON operation on aarch64, so `engine128` can be written once.
//! All functions are `unsafe` for the same reasons as the underlying
//! intrinsics (pointer validity, CPU features).

use super::types::{__m128i, simd_arch};

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn _mm_setzero_si128() -> __m128i {
    #[cfg(target_arch = "x86_64")]
    {
        unsafe { simd_arch::_mm_setzero_si128() }
    }
    #[cfg(target_arch = "aarch64")]
    {
        unsafe { __m128i(simd_arch::vdupq_n_u8(0)) }
    }
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn _mm_set1_epi8(a: i8) -> __m128i {
    #[cfg(target_arch = "x86_64")]
    {
        unsafe { simd_arch::_mm_set1_epi8(a) }
    }
    #[cfg(target_arch = "aarch64")]
    {
        unsafe { __m128i(simd_arch::vdupq_n_u8(a as u8)) }
    }
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn _mm_cmpeq_epi8(a: __m128i, b: __m128i) -> __m128i {
    #[cfg(target_arch = "x86_64")]
    {
        unsafe { simd_arch::_mm_cmpeq_epi8(a, b) }
    }
    #[cfg(target_arch = "aarch64")]
    {
        unsafe { __m128i(simd_arch::vceqq_u8(a.0, b.0)) }
    }
}

/// Per‑lane wrapping add of 8‑bit lanes.
#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn _mm_add_epi8(a: __m128i, b: __m128i) -> __m128i {
    #[cfg(target_arch = "x86_64")]
    {
        simd_arch::_mm_add_epi8(a, b)
    }
    #[cfg(target_arch = "aarch64")]
    {
        unsafe { __m128i(simd_arch::vaddq_u8(a.0, b.0)) }
    }
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn _mm_or_si128(a: __m128i, b: __m128i) -> __m128i {
    #[cfg(target_arch = "x86_64")]
    {
        simd_arch::_mm_or_si128(a, b)
    }
    #[cfg(target_arch = "aarch64")]
    {
        unsafe { __m128i(simd_arch::vorrq_u8(a.0, b.0)) }
    }
}

/// Bitwise AND of two 128-bit vectors
#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn _mm_and_si128(a: __m128i, b: __m128i) -> __m128i {
    #[cfg(target_arch = "x86_64")]
    {
        simd_arch::_mm_and_si128(a, b)
    }
    #[cfg(target_arch = "aarch64")]
    {
        unsafe { __m128i(simd_arch::vandq_u8(a.0, b.0)) }
    }
}

/// `~a & b`, matching the x86 operand order.
#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn _mm_andnot_si128(a: __m128i, b: __m128i) -> __m128i {
    #[cfg(target_arch = "x86_64")]
    {
        simd_arch::_mm_andnot_si128(a, b)
    }
    #[cfg(target_arch = "aarch64")]
    {
        unsafe { __m128i(simd_arch::vbicq_u8(b.0, a.0)) }
    }
}

/// Load 128-bit value from unaligned memory
#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn _mm_loadu_si128(p: *const __m128i) -> __m128i {
    #[cfg(target_arch = "x86_64")]
    {
        simd_arch::_mm_loadu_si128(p)
    }
    #[cfg(target_arch = "aarch64")]
    {
        // NEON loads are unaligned by default
        unsafe { __m128i(simd_arch::vld1q_u8(p as *const u8)) }
    }
}

/// Store 128-bit value to unaligned memory
#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn _mm_storeu_si128(p: *mut __m128i, a: __m128i) {
    #[cfg(target_arch = "x86_64")]
    {
        simd_arch::_mm_storeu_si128(p, a);
    }
    #[cfg(target_arch = "aarch64")]
    {
        // NEON stores are unaligned by default
        unsafe {
            simd_arch::vst1q_u8(p as *mut u8, a.0);
        }
    }
}

/// Exact sum of the sixteen unsigned 8‑bit lanes.
///
/// The lanes are widened before they are added: `psadbw` against zero sums
/// each group of eight bytes into a 64‑bit lane on x86_64, and `vpaddlq_u8`
/// pairs bytes into 16‑bit lanes on aarch64 before the across‑vector add.
/// An 8‑bit horizontal add (`vaddvq_u8`) would wrap at 256.
#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn _mm_hsum_epu8(a: __m128i) -> u32 {
    #[cfg(target_arch = "x86_64")]
    {
        let sad = simd_arch::_mm_sad_epu8(a, simd_arch::_mm_setzero_si128());
        let mut halves = [0u64; 2];
        simd_arch::_mm_storeu_si128(halves.as_mut_ptr() as *mut __m128i, sad);
        (halves[0] + halves[1]) as u32
    }
    #[cfg(target_arch = "aarch64")]
    {
        unsafe {
            let paired = simd_arch::vpaddlq_u8(a.0);
            simd_arch::vaddvq_u16(paired) as u32
        }
    }
}
