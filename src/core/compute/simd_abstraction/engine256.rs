//! 256‑bit SIMD engine (AVX2)
//!
//! This module provides the AVX2 implementation of the `SimdEngine` trait on
//! x86_64. It offers 32 lanes for 8‑bit operations, mapping directly to
//! `_mm256_*` intrinsics.
//!
//! All functions are `unsafe` and additionally annotated with
//! `#[target_feature(enable = "avx2")]`. Callers must ensure AVX2 is
//! available (the crate’s runtime dispatch does this for you).

#[cfg(target_arch = "x86_64")]
use super::SimdEngine;
#[cfg(target_arch = "x86_64")]
use super::types::simd_arch;

#[cfg(target_arch = "x86_64")]
/// 256-bit SIMD engine (AVX2 on x86_64)
///
/// Provides 32-way parallelism for 8-bit operations.
/// Requires AVX2 CPU support (Intel Haswell 2013+ or AMD Excavator 2015+).
#[derive(Clone, Copy, Debug)]
pub struct SimdEngine256;

#[cfg(target_arch = "x86_64")]
#[allow(unsafe_op_in_unsafe_fn)]
impl SimdEngine for SimdEngine256 {
    const WIDTH_8: usize = 32; // 256 bits ÷ 8 bits = 32 lanes

    type Vec8 = simd_arch::__m256i;

    #[inline]
    #[target_feature(enable = "avx2")]
    unsafe fn setzero_epi8() -> Self::Vec8 {
        simd_arch::_mm256_setzero_si256()
    }

    #[inline]
    #[target_feature(enable = "avx2")]
    unsafe fn set1_epi8(a: i8) -> Self::Vec8 {
        simd_arch::_mm256_set1_epi8(a)
    }

    #[inline]
    #[target_feature(enable = "avx2")]
    unsafe fn add_epi8(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8 {
        simd_arch::_mm256_add_epi8(a, b)
    }

    #[inline]
    #[target_feature(enable = "avx2")]
    unsafe fn cmpeq_epi8(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8 {
        simd_arch::_mm256_cmpeq_epi8(a, b)
    }

    #[inline]
    #[target_feature(enable = "avx2")]
    unsafe fn and_si128(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8 {
        simd_arch::_mm256_and_si256(a, b)
    }

    #[inline]
    #[target_feature(enable = "avx2")]
    unsafe fn or_si128(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8 {
        simd_arch::_mm256_or_si256(a, b)
    }

    #[inline]
    #[target_feature(enable = "avx2")]
    unsafe fn andnot_si128(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8 {
        simd_arch::_mm256_andnot_si256(a, b)
    }

    #[inline]
    #[target_feature(enable = "avx2")]
    unsafe fn hsum_epu8(a: Self::Vec8) -> u32 {
        // vpsadbw against zero widens each group of 8 bytes into a u64 lane
        let sad = simd_arch::_mm256_sad_epu8(a, simd_arch::_mm256_setzero_si256());
        let mut quads = [0u64; 4];
        simd_arch::_mm256_storeu_si256(quads.as_mut_ptr() as *mut simd_arch::__m256i, sad);
        quads.iter().sum::<u64>() as u32
    }

    #[inline]
    #[target_feature(enable = "avx2")]
    unsafe fn loadu_si128(p: *const u8) -> Self::Vec8 {
        simd_arch::_mm256_loadu_si256(p as *const simd_arch::__m256i)
    }

    #[inline]
    #[target_feature(enable = "avx2")]
    unsafe fn storeu_si128(p: *mut u8, a: Self::Vec8) {
        simd_arch::_mm256_storeu_si256(p as *mut simd_arch::__m256i, a)
    }
}
