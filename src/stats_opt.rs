// src/stats_opt.rs
//
// Options shared by the similarity and cleaner statistics

use crate::core::compute::simd::{SimdEngineType, detect_optimal_simd_engine};
use crate::defaults;

/// Options controlling how the alignment statistics are computed
#[derive(Debug, Clone)]
pub struct StatsOpt {
    /// Columns whose gap count reaches `gap_cut_fraction * n_sequences` get a
    /// conservation of 0 when gap cutting is requested
    pub gap_cut_fraction: f32,
    /// Spread sequence pairs over the rayon pool when building the identity matrix
    pub parallel: bool,
    /// Force a SIMD engine; `None` selects the best one for this CPU
    pub engine: Option<SimdEngineType>,
}

impl Default for StatsOpt {
    fn default() -> Self {
        StatsOpt {
            gap_cut_fraction: defaults::GAP_CUT_FRACTION,
            parallel: true,
            engine: None,
        }
    }
}

impl StatsOpt {
    /// Options pinned to a specific engine (parity tests, benchmarks)
    pub fn with_engine(engine: SimdEngineType) -> Self {
        StatsOpt {
            engine: Some(engine),
            ..Default::default()
        }
    }

    /// The engine to run, resolving `None` through runtime detection
    pub fn resolve_engine(&self) -> SimdEngineType {
        match self.engine {
            Some(engine) => engine,
            None => {
                let engine = detect_optimal_simd_engine();
                log::debug!("Auto-selected SIMD engine: {:?}", engine);
                engine
            }
        }
    }

    /// Validate parameters
    /// Returns Ok(()) if valid, or Err with description of issues
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !(0.0..=1.0).contains(&self.gap_cut_fraction) {
            errors.push(format!(
                "gap_cut_fraction must be in [0, 1], got {}",
                self.gap_cut_fraction
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
