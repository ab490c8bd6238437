//! Per-column gap statistics

use crate::defaults::GAP_SYMBOL;

/// Gap counts for every column of an alignment.
///
/// Only the gap symbol `-` is counted; indeterminate residues are not gaps
/// here. Every sequence is counted, kept or not, so indices and totals refer
/// to the original alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapStats {
    gaps_per_column: Vec<u32>,
}

impl GapStats {
    pub fn compute<S: AsRef<[u8]>>(sequences: &[S], residue_count: usize) -> Self {
        let mut gaps_per_column = vec![0u32; residue_count];
        for seq in sequences {
            for (count, &c) in gaps_per_column.iter_mut().zip(seq.as_ref()) {
                *count += (c == GAP_SYMBOL) as u32;
            }
        }
        log::trace!(
            "Computed gap statistics for {} columns over {} sequences",
            residue_count,
            sequences.len()
        );
        GapStats { gaps_per_column }
    }

    /// Gap count of each column
    #[inline]
    pub fn gaps_per_column(&self) -> &[u32] {
        &self.gaps_per_column
    }

    #[inline]
    pub fn gaps(&self, column: usize) -> Option<u32> {
        self.gaps_per_column.get(column).copied()
    }

    /// Largest gap count over all columns
    pub fn max_gaps(&self) -> u32 {
        self.gaps_per_column.iter().copied().max().unwrap_or(0)
    }

    /// Number of columns holding no gap at all
    pub fn gap_free_columns(&self) -> usize {
        self.gaps_per_column.iter().filter(|&&g| g == 0).count()
    }
}
