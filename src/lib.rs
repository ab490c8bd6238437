//! Vectorized alignment statistics for trimming multiple sequence alignments.
//!
//! Pairwise sequence identities, per-column conservation and per-sequence
//! spuriousness, computed with byte-lane SIMD kernels (SSE2/AVX2 on x86_64,
//! NEON on aarch64) that match the scalar reference exactly.

pub mod cleaner;
pub mod core;
pub mod defaults;
pub mod error;
pub mod msa;
pub mod statistics;
pub mod stats_opt;

pub use cleaner::{Cleaner, SeqIdentities};
pub use core::compute::simd::{SimdEngineType, available_simd_engines, detect_optimal_simd_engine};
pub use error::{Diagnostic, Result, TrimError};
pub use msa::{Alignment, GapStats, SequenceType};
pub use statistics::{IdentityMatrix, Similarity, SimilarityMatrix};
pub use stats_opt::StatsOpt;
