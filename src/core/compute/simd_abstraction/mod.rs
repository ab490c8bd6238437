//! SIMD abstraction layer
//!
//! This module exposes a single, portable surface area for the handful of
//! byte-wise SIMD operations used by the residue comparison kernels. It hides
//! ISA differences between x86_64 (SSE2/AVX2) and aarch64 (NEON) behind the
//! `SimdEngine` trait, while preserving zero‑cost calls to architecture
//! intrinsics.
//!
//! ## Engines and widths
//!
//! - `SimdEngine128`: 128‑bit vectors, 16 lanes of u8
//!   (SSE2 on x86_64; NEON on aarch64)
//! - `SimdEngine256`: 256‑bit vectors, 32 lanes of u8 (AVX2 on x86_64)
//!
//! The kernels in `core::compute::pairwise` are generic over the engine, so
//! the lane width is a compile-time constant (`SimdEngine::WIDTH_8`) of the
//! chosen engine. Engine selection happens once through
//! `core::compute::simd::detect_optimal_simd_engine()`.
//!
//! ## Counter discipline
//!
//! Kernels use 8‑bit lanes as counters. Every comparison step adds at most 1
//! to a lane, and lanes are reduced with `hsum_epu8` at least once every
//! `LANE_FLUSH_INTERVAL` (255) steps, so no lane ever wraps.
//!
//! ## Safety model
//!
//! All trait functions are `unsafe` because they may:
//! - require specific CPU features (e.g. AVX2), and
//! - dereference raw pointers for loads/stores.
//!
//! Callers must ensure that the chosen `SimdEngine` implementation matches the
//! CPU’s supported features (handled by runtime detection in this crate), and
//! that any pointer arguments are valid for `WIDTH_8` bytes.

/// Trait for a generic SIMD engine, providing the byte-lane operations needed
/// to classify and count residues.
pub trait SimdEngine: Sized + Copy {
    /// Number of 8‑bit lanes in the engine’s native vector type.
    const WIDTH_8: usize;

    /// Architecture‑specific 8‑bit vector type used by this engine.
    type Vec8: Copy + Clone;

    // ===== Creation and Initialization =====
    /// Set all 8‑bit lanes to zero.
    unsafe fn setzero_epi8() -> Self::Vec8;
    /// Broadcast a scalar i8 into all lanes.
    unsafe fn set1_epi8(a: i8) -> Self::Vec8;

    // ===== 8-bit Integer Arithmetic =====
    /// Per‑lane add of 8‑bit lanes (wrapping semantics as per the underlying ISA intrinsic).
    unsafe fn add_epi8(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8;

    // ===== Comparison Operations =====
    /// Compare equal on 8‑bit lanes; result is an all‑ones/-zeros mask vector.
    unsafe fn cmpeq_epi8(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8;

    // ===== Bitwise Operations =====
    /// Per‑byte bitwise AND.
    unsafe fn and_si128(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8;
    /// Per‑byte bitwise OR.
    unsafe fn or_si128(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8;
    /// Per‑byte bitwise AND‑NOT: `~a & b` on a per‑byte basis.
    unsafe fn andnot_si128(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8;

    // ===== Reduction =====
    /// Sum all unsigned 8‑bit lanes into a `u32` using widening adds.
    ///
    /// Exact as long as every lane holds its true count (≤ 255).
    unsafe fn hsum_epu8(a: Self::Vec8) -> u32;

    // ===== Memory Operations =====
    /// Load `WIDTH_8` bytes from an unaligned pointer.
    unsafe fn loadu_si128(p: *const u8) -> Self::Vec8;
    /// Store `WIDTH_8` bytes to an unaligned pointer.
    unsafe fn storeu_si128(p: *mut u8, a: Self::Vec8);
}

pub mod engine128;
pub mod engine256;
pub mod portable_intrinsics;
pub mod types;

#[cfg(test)]
mod neon_tests;

// Re-export the SimdEngine implementations
pub use engine128::SimdEngine128;
#[cfg(target_arch = "x86_64")]
pub use engine256::SimdEngine256;
