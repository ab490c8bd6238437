//! Compute layer: SIMD engines, scratch memory and the comparison kernels.

pub mod aligned_buffer;
pub mod pairwise;
pub mod simd;
#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
pub mod simd_abstraction;
