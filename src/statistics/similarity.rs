// src/statistics/similarity.rs
//
// Column conservation (MDK) built from pairwise sequence distances and a residue
// distance table.

use rayon::prelude::*;

use super::identity_matrix::IdentityMatrix;
use super::similarity_matrix::SimilarityMatrix;
use crate::core::compute::pairwise::{self, PairCounts};
use crate::core::compute::simd::SimdEngineType;
use crate::defaults::GAP_SYMBOL;
use crate::error::{Result, TrimError};
use crate::msa::Alignment;
use crate::stats_opt::StatsOpt;

/// Conservation statistics for one alignment.
///
/// The identity matrix is built once and kept until `calculate_vectors`
/// succeeds; the per-column vector then stays available through `mdk()`.
pub struct Similarity<'a> {
    alig: &'a Alignment,
    sim_matrix: Option<&'a SimilarityMatrix>,
    identities: Option<IdentityMatrix>,
    mdk: Option<Vec<f32>>,
    mdk_window: Option<Vec<f32>>,
    engine: SimdEngineType,
    opt: StatsOpt,
}

impl<'a> Similarity<'a> {
    pub fn new(alig: &'a Alignment) -> Self {
        let opt = StatsOpt::default();
        Similarity {
            alig,
            sim_matrix: None,
            identities: None,
            mdk: None,
            mdk_window: None,
            engine: opt.resolve_engine(),
            opt,
        }
    }

    pub fn with_options(alig: &'a Alignment, opt: StatsOpt) -> Result<Self> {
        opt.validate()
            .map_err(|errors| TrimError::InvalidOptions(errors.join("; ")))?;
        Ok(Similarity {
            alig,
            sim_matrix: None,
            identities: None,
            mdk: None,
            mdk_window: None,
            engine: opt.resolve_engine(),
            opt,
        })
    }

    pub fn set_similarity_matrix(&mut self, matrix: &'a SimilarityMatrix) {
        self.sim_matrix = Some(matrix);
    }

    #[inline]
    pub fn engine(&self) -> SimdEngineType {
        self.engine
    }

    /// The memoized distance matrix, if built and not yet consumed
    #[inline]
    pub fn matrix_identity(&self) -> Option<&IdentityMatrix> {
        self.identities.as_ref()
    }

    /// Per-column conservation values, once `calculate_vectors` succeeded
    #[inline]
    pub fn mdk(&self) -> Option<&[f32]> {
        self.mdk.as_deref()
    }

    /// Windowed conservation values from the last `apply_window`
    #[inline]
    pub fn mdk_window(&self) -> Option<&[f32]> {
        self.mdk_window.as_deref()
    }

    /// Fill the pairwise distance matrix `1 - matches/length` for every pair of
    /// sequences. Returns the memoized matrix when it already exists.
    pub fn calculate_matrix_identity(&mut self) -> &IdentityMatrix {
        let (alig, engine, parallel) = (self.alig, self.engine, self.opt.parallel);
        self.identities
            .get_or_insert_with(|| build_identities(alig, engine, parallel))
    }

    /// Compute the conservation value of every column.
    ///
    /// With `cut_by_gap`, columns whose gap count reaches
    /// `gap_cut_fraction * sequence_count` score 0 without looking at their
    /// residues. The identity matrix is released on success and kept on error.
    pub fn calculate_vectors(&mut self, cut_by_gap: bool) -> Result<()> {
        let sim = self.sim_matrix.ok_or(TrimError::ConfigurationMissing)?;

        let alig = self.alig;
        let n = alig.sequence_count();
        let residues = alig.residue_count();
        let indet = alig.indeterminate();
        let sequences = alig.sequences();
        let gap_cut = self.opt.gap_cut_fraction * n as f32;

        let gaps = if cut_by_gap {
            let stats = alig.gap_stats();
            log::debug!(
                "Gap cut at {:.1} gaps per column: max {} gaps, {} gap-free columns",
                gap_cut,
                stats.max_gaps(),
                stats.gap_free_columns()
            );
            // None when no column reaches the cut
            (stats.max_gaps() as f32 >= gap_cut).then(|| stats.gaps_per_column())
        } else {
            None
        };

        let identities = self.calculate_matrix_identity();

        let mut mdk = vec![0.0f32; residues];
        let mut classes: Vec<Option<usize>> = vec![None; n];

        for (column, value) in mdk.iter_mut().enumerate() {
            if let Some(gaps) = gaps {
                if gaps[column] as f32 >= gap_cut {
                    continue;
                }
            }

            for (class, seq) in classes.iter_mut().zip(sequences) {
                let residue = seq[column].to_ascii_uppercase();
                *class = if residue == GAP_SYMBOL || residue == indet {
                    None
                } else if !residue.is_ascii_uppercase() {
                    return Err(TrimError::IncorrectSymbol {
                        symbol: residue as char,
                    });
                } else {
                    Some(sim.class_of(residue).ok_or(TrimError::UndefinedSymbol {
                        symbol: residue as char,
                    })?)
                };
            }

            let mut num = 0.0f32;
            let mut den = 0.0f32;
            for j in 0..n {
                let Some(cj) = classes[j] else { continue };
                for k in (j + 1)..n {
                    let Some(ck) = classes[k] else { continue };
                    let weight = identities.get(j, k);
                    num += weight * sim.distance(cj, ck);
                    den += weight;
                }
            }

            *value = conservation(num, den);
        }

        log::debug!(
            "Conservation computed for {} columns (cut_by_gap={})",
            residues,
            cut_by_gap
        );

        self.mdk = Some(mdk);
        self.mdk_window = None;
        self.identities = None;
        Ok(())
    }

    /// Average every conservation value over `2 * half_window + 1` columns,
    /// reflecting the window at both ends of the alignment.
    ///
    /// `half_window` may be at most a quarter of the residue count. A half
    /// window of 0 copies the per-column vector.
    pub fn apply_window(&mut self, half_window: usize) -> Result<&[f32]> {
        let mdk = self.mdk.as_deref().ok_or(TrimError::VectorNotComputed)?;
        let residues = mdk.len();
        let max = residues / 4;
        if half_window > max {
            return Err(TrimError::InvalidWindow { half_window, max });
        }

        let width = (2 * half_window + 1) as f32;
        let windowed: Vec<f32> = (0..residues)
            .map(|i| {
                let sum: f32 = (0..=2 * half_window)
                    .map(|offset| mdk[reflect(i + offset, half_window, residues)])
                    .sum();
                sum / width
            })
            .collect();

        Ok(self.mdk_window.insert(windowed).as_slice())
    }
}

/// Distances for every pair `i < j`, mirrored into a symmetric matrix. A pair
/// with no comparable position is logged and gets distance 0.
fn build_identities(alig: &Alignment, engine: SimdEngineType, parallel: bool) -> IdentityMatrix {
    let n = alig.sequence_count();
    let sequences = alig.sequences();
    let indet = alig.indeterminate();

    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .collect();

    let compare = |&(i, j): &(usize, usize)| -> PairCounts {
        pairwise::count_pair(engine, &sequences[i], &sequences[j], None, indet)
    };
    let counts: Vec<PairCounts> = if parallel {
        pairs.par_iter().map(compare).collect()
    } else {
        pairs.iter().map(compare).collect()
    };

    let mut identities = IdentityMatrix::zeros(n);
    for (&(i, j), c) in pairs.iter().zip(&counts) {
        let distance = match c.distance() {
            Some(d) => d,
            None => {
                log::warn!(
                    "Sequences '{}' and '{}' share no comparable residues, distance set to 0",
                    alig.names()[i],
                    alig.names()[j]
                );
                0.0
            }
        };
        identities.set_symmetric(i, j, distance);
    }

    log::debug!(
        "Identity matrix: {} pairs over {} residues ({:?})",
        pairs.len(),
        alig.residue_count(),
        engine
    );
    identities
}

/// Map a shifted window position `shifted = i + offset` (with the window
/// starting `half_window` before `i`) back into `0..len`, mirroring around the
/// first and last column.
#[inline]
fn reflect(shifted: usize, half_window: usize, len: usize) -> usize {
    if shifted < half_window {
        half_window - shifted
    } else {
        let j = shifted - half_window;
        if j >= len { 2 * len - j - 2 } else { j }
    }
}

/// `exp(-Q)` with `Q = num / den`; 0 when no pair was weighted, 1 when `Q`
/// is negative.
#[inline]
fn conservation(num: f32, den: f32) -> f32 {
    if den == 0.0 {
        return 0.0;
    }
    let q = num / den;
    if q < 0.0 { 1.0 } else { (-q).exp() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msa::SequenceType;

    fn nucleotides() -> Alignment {
        Alignment::new(
            vec!["seq1", "seq2", "seq3"],
            vec!["ACGT", "ACGA", "AGGT"],
            SequenceType::Nucleotide,
        )
        .unwrap()
    }

    #[test]
    fn test_identity_matrix_hand_example() {
        let ali = nucleotides();
        let mut sim = Similarity::with_options(&ali, StatsOpt::with_engine(SimdEngineType::Scalar)).unwrap();
        sim.calculate_matrix_identity();
        let m = sim.matrix_identity().unwrap();
        assert_eq!(m.get(0, 1), 0.25);
        assert_eq!(m.get(0, 2), 0.25);
        assert_eq!(m.get(1, 2), 0.5);
        assert_eq!(m.get(1, 1), 0.0);
        assert!(m.is_symmetric());
    }

    #[test]
    fn test_calculate_vectors_requires_matrix() {
        let ali = nucleotides();
        let mut sim = Similarity::new(&ali);
        assert_eq!(sim.calculate_vectors(false), Err(TrimError::ConfigurationMissing));
        assert!(sim.mdk().is_none());
    }

    #[test]
    fn test_identity_matrix_released_after_vectors() {
        let ali = nucleotides();
        let matrix = SimilarityMatrix::default_nucleotide();
        let mut sim = Similarity::new(&ali);
        sim.set_similarity_matrix(&matrix);
        sim.calculate_matrix_identity();
        assert!(sim.matrix_identity().is_some());
        sim.calculate_vectors(false).unwrap();
        assert!(sim.matrix_identity().is_none());
        assert_eq!(sim.mdk().unwrap().len(), 4);
    }

    #[test]
    fn test_matrix_identity_is_memoized() {
        let ali = nucleotides();
        let mut sim = Similarity::new(&ali);
        let first = sim.calculate_matrix_identity().clone();
        assert_eq!(sim.calculate_matrix_identity(), &first);
        assert_eq!(sim.matrix_identity(), Some(&first));
    }

    #[test]
    fn test_gap_cut_below_every_column_matches_no_cut() {
        // at most one gap in three rows never reaches 0.8 * 3
        let ali = Alignment::new(
            vec!["a", "b", "c"],
            vec!["AC-T", "A-GT", "ACGA"],
            SequenceType::Nucleotide,
        )
        .unwrap();
        assert_eq!(ali.gap_stats().max_gaps(), 1);
        let matrix = SimilarityMatrix::default_nucleotide();

        let mut cut = Similarity::new(&ali);
        cut.set_similarity_matrix(&matrix);
        cut.calculate_vectors(true).unwrap();

        let mut plain = Similarity::new(&ali);
        plain.set_similarity_matrix(&matrix);
        plain.calculate_vectors(false).unwrap();

        assert_eq!(cut.mdk(), plain.mdk());
    }

    #[test]
    fn test_conservation_formula() {
        assert_eq!(conservation(0.0, 0.0), 0.0);
        assert_eq!(conservation(-1.0, 2.0), 1.0);
        assert_eq!(conservation(0.0, 2.0), 1.0);
        assert!((conservation(2.0, 2.0) - (-1.0f32).exp()).abs() < 1e-7);
    }

    #[test]
    fn test_reflect_indices() {
        // len 8, half window 2: window around column 0 reads 2,1,0,1,2
        let idx: Vec<usize> = (0..5).map(|o| reflect(o, 2, 8)).collect();
        assert_eq!(idx, vec![2, 1, 0, 1, 2]);
        // around column 7 it reads 5,6,7,6,5
        let idx: Vec<usize> = (0..5).map(|o| reflect(7 + o, 2, 8)).collect();
        assert_eq!(idx, vec![5, 6, 7, 6, 5]);
    }

    #[test]
    fn test_apply_window() {
        let ali = Alignment::new(
            vec!["a", "b"],
            vec!["ACGTACGT", "ACGTACGA"],
            SequenceType::Nucleotide,
        )
        .unwrap();
        let matrix = SimilarityMatrix::default_nucleotide();
        let mut sim = Similarity::new(&ali);
        sim.set_similarity_matrix(&matrix);

        assert_eq!(sim.apply_window(1).unwrap_err(), TrimError::VectorNotComputed);
        sim.calculate_vectors(false).unwrap();

        assert_eq!(
            sim.apply_window(3).unwrap_err(),
            TrimError::InvalidWindow { half_window: 3, max: 2 }
        );

        let mdk = sim.mdk().unwrap().to_vec();
        assert_eq!(sim.apply_window(0).unwrap(), mdk.as_slice());

        let windowed = sim.apply_window(1).unwrap().to_vec();
        let expected_first = (mdk[1] + mdk[0] + mdk[1]) / 3.0;
        assert_eq!(windowed[0], expected_first);
        assert_eq!(sim.mdk_window().unwrap(), windowed.as_slice());
    }
}
