//! Module for runtime SIMD engine detection and management.
//!
//! This module provides functionality to detect the optimal SIMD engine
//! available on the CPU at runtime and to retrieve associated metadata
//! like human-readable descriptions and lane widths.

use crate::defaults::{FORCE_SCALAR_ENV, FORCE_SSE_ENV};

/// Available SIMD engine types based on CPU capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimdEngineType {
    /// Portable scalar reference - always available
    Scalar,
    /// 128-bit SIMD (SSE2/NEON) - x86_64 and aarch64
    #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
    Engine128,
    /// 256-bit SIMD (AVX2) - x86_64 only
    #[cfg(target_arch = "x86_64")]
    Engine256,
}

fn env_flag(name: &str) -> bool {
    std::env::var(name).map(|v| v == "1").unwrap_or(false)
}

/// Detects the optimal SIMD engine based on CPU features
///
/// Environment variable overrides for testing/debugging:
/// - `FERROUS_TRIM_FORCE_SCALAR=1`: Force the scalar reference kernels
/// - `FERROUS_TRIM_FORCE_SSE=1`: Force the 128-bit engine (skip AVX2)
pub fn detect_optimal_simd_engine() -> SimdEngineType {
    if env_flag(FORCE_SCALAR_ENV) {
        log::info!("{FORCE_SCALAR_ENV}=1: Using scalar kernels");
        return SimdEngineType::Scalar;
    }

    #[cfg(target_arch = "x86_64")]
    {
        if env_flag(FORCE_SSE_ENV) {
            log::info!("{FORCE_SSE_ENV}=1: Using SSE (128-bit) engine");
            return SimdEngineType::Engine128;
        }

        if is_x86_feature_detected!("avx2") {
            return SimdEngineType::Engine256;
        }

        // SSE2 is part of the x86_64 baseline
        SimdEngineType::Engine128
    }

    #[cfg(target_arch = "aarch64")]
    {
        let _ = FORCE_SSE_ENV;
        // NEON is mandatory on aarch64
        SimdEngineType::Engine128
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        let _ = FORCE_SSE_ENV;
        SimdEngineType::Scalar
    }
}

/// Returns every engine usable on the running CPU, scalar first.
///
/// Used by the parity tests and benchmarks to exercise each backend.
pub fn available_simd_engines() -> Vec<SimdEngineType> {
    #[allow(unused_mut)]
    let mut engines = vec![SimdEngineType::Scalar];
    #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
    engines.push(SimdEngineType::Engine128);
    #[cfg(target_arch = "x86_64")]
    if is_x86_feature_detected!("avx2") {
        engines.push(SimdEngineType::Engine256);
    }
    engines
}

/// Returns a human-readable description of the SIMD engine
pub fn simd_engine_description(engine: SimdEngineType) -> &'static str {
    match engine {
        SimdEngineType::Scalar => "Scalar (portable reference)",
        #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
        SimdEngineType::Engine128 => {
            #[cfg(target_arch = "x86_64")]
            {
                "SSE2 (128-bit, 16-way parallelism)"
            }
            #[cfg(not(target_arch = "x86_64"))]
            {
                "NEON (128-bit, 16-way parallelism)"
            }
        }
        #[cfg(target_arch = "x86_64")]
        SimdEngineType::Engine256 => "AVX2 (256-bit, 32-way parallelism)",
    }
}

/// Number of residues compared per vector step for the given engine.
///
/// The scalar engine compares one residue at a time.
pub fn lane_width(engine: SimdEngineType) -> usize {
    match engine {
        SimdEngineType::Scalar => 1,
        #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
        SimdEngineType::Engine128 => 16,
        #[cfg(target_arch = "x86_64")]
        SimdEngineType::Engine256 => 32,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
