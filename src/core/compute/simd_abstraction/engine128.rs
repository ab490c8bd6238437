//! 128‑bit SIMD engine (SSE2 on x86_64; NEON on aarch64)
//!
//! This module implements the 128‑bit `SimdEngine` backend on top of the
//! helpers in `portable_intrinsics.rs`, which map each operation to SSE2 on
//! x86_64 and to NEON on aarch64. It is the baseline engine: SSE2 is part of
//! the x86_64 ABI and NEON is mandatory on aarch64, so it never needs runtime
//! detection.

use super::portable_intrinsics::*;
use super::types::__m128i;

use super::SimdEngine;

/// 128-bit SIMD engine (SSE2 on x86_64, NEON on aarch64)
///
/// Provides 16-way parallelism for 8-bit operations.
#[derive(Clone, Copy, Debug)]
pub struct SimdEngine128;

#[allow(unsafe_op_in_unsafe_fn)]
impl SimdEngine for SimdEngine128 {
    const WIDTH_8: usize = 16; // 128 bits ÷ 8 bits = 16 lanes

    type Vec8 = __m128i;

    #[inline]
    unsafe fn setzero_epi8() -> Self::Vec8 {
        _mm_setzero_si128()
    }

    #[inline]
    unsafe fn set1_epi8(a: i8) -> Self::Vec8 {
        _mm_set1_epi8(a)
    }

    #[inline]
    unsafe fn add_epi8(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8 {
        _mm_add_epi8(a, b)
    }

    #[inline]
    unsafe fn cmpeq_epi8(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8 {
        _mm_cmpeq_epi8(a, b)
    }

    #[inline]
    unsafe fn and_si128(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8 {
        _mm_and_si128(a, b)
    }

    #[inline]
    unsafe fn or_si128(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8 {
        _mm_or_si128(a, b)
    }

    #[inline]
    unsafe fn andnot_si128(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8 {
        _mm_andnot_si128(a, b)
    }

    #[inline]
    unsafe fn hsum_epu8(a: Self::Vec8) -> u32 {
        _mm_hsum_epu8(a)
    }

    #[inline]
    unsafe fn loadu_si128(p: *const u8) -> Self::Vec8 {
        _mm_loadu_si128(p as *const __m128i)
    }

    #[inline]
    unsafe fn storeu_si128(p: *mut u8, a: Self::Vec8) {
        _mm_storeu_si128(p as *mut __m128i, a)
    }
}
