//! Pairwise residue comparison kernels
//!
//! - `types`: `PairCounts` and the lane flush interval
//! - `scalar`: one-residue-at-a-time reference
//! - `kernel`: engine-generic vector kernels
//! - `dispatch`: runtime engine selection

pub mod dispatch;
#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
pub mod kernel;
pub mod scalar;
pub mod types;

pub use dispatch::{accumulate_agreement, count_pair};
pub use types::{KEEP, LANE_FLUSH_INTERVAL, PairCounts, SKIP};
