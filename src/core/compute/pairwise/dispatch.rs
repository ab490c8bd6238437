//! Runtime dispatch from `SimdEngineType` to the monomorphised kernels
//!
//! The AVX2 path goes through `#[target_feature]` wrappers so the generic
//! kernel is compiled with AVX2 enabled and the engine methods inline into it.

use super::scalar;
use super::types::PairCounts;
use crate::core::compute::simd::SimdEngineType;

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
use super::kernel;
#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
use crate::core::compute::simd_abstraction::SimdEngine128;
#[cfg(target_arch = "x86_64")]
use crate::core::compute::simd_abstraction::SimdEngine256;

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn count_pair_avx2(a: &[u8], b: &[u8], skip: Option<&[u8]>, indet: u8) -> PairCounts {
    unsafe { kernel::count_pair::<SimdEngine256>(a, b, skip, indet) }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn accumulate_agreement_avx2(a: &[u8], b: &[u8], hits: &mut [u8], indet: u8) {
    unsafe { kernel::accumulate_agreement::<SimdEngine256>(a, b, hits, indet) }
}

/// Compare two equal-length sequences with the requested engine.
///
/// `skip`, when given, must have the same length as the sequences; non-zero
/// bytes exclude the position. Every engine returns identical counts.
///
/// # Panics
/// If the slice lengths differ.
pub fn count_pair(
    engine: SimdEngineType,
    a: &[u8],
    b: &[u8],
    skip: Option<&[u8]>,
    indet: u8,
) -> PairCounts {
    assert_eq!(a.len(), b.len(), "sequences must have equal length");
    if let Some(mask) = skip {
        assert_eq!(mask.len(), a.len(), "skip mask must match sequence length");
    }

    match engine {
        SimdEngineType::Scalar => scalar::count_pair(a, b, skip, indet),
        #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
        SimdEngineType::Engine128 => unsafe { kernel::count_pair::<SimdEngine128>(a, b, skip, indet) },
        #[cfg(target_arch = "x86_64")]
        SimdEngineType::Engine256 => unsafe { count_pair_avx2(a, b, skip, indet) },
    }
}

/// Add one agreement vote per position of `a` against `b` into `hits`.
///
/// A position agrees when the residues are equal or neither is a gap or
/// `indet`. The caller owns the overflow budget of `hits` (see
/// `LANE_FLUSH_INTERVAL`).
///
/// # Panics
/// If the slice lengths differ.
pub fn accumulate_agreement(engine: SimdEngineType, a: &[u8], b: &[u8], hits: &mut [u8], indet: u8) {
    assert_eq!(a.len(), b.len(), "sequences must have equal length");
    assert_eq!(hits.len(), a.len(), "counter buffer must match sequence length");

    match engine {
        SimdEngineType::Scalar => scalar::accumulate_agreement(a, b, hits, indet),
        #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
        SimdEngineType::Engine128 => unsafe {
            kernel::accumulate_agreement::<SimdEngine128>(a, b, hits, indet)
        },
        #[cfg(target_arch = "x86_64")]
        SimdEngineType::Engine256 => unsafe { accumulate_agreement_avx2(a, b, hits, indet) },
    }
}
