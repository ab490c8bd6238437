// src/cleaner.rs
//
// Sequence-level statistics used to decide which sequences to trim: masked
// pairwise identity and per-sequence spuriousness.

use rayon::prelude::*;

use crate::core::compute::aligned_buffer::AlignedBuffer;
use crate::core::compute::pairwise::{self, KEEP, LANE_FLUSH_INTERVAL, PairCounts, SKIP};
use crate::core::compute::simd::SimdEngineType;
use crate::error::{Diagnostic, Result, TrimError};
use crate::msa::Alignment;
use crate::stats_opt::StatsOpt;

/// Masked identity fractions between kept sequences.
///
/// One row per original sequence; removed sequences have no row. Within a
/// row, entries for removed sequences and the diagonal are 0.
#[derive(Debug, Clone, PartialEq)]
pub struct SeqIdentities {
    rows: Vec<Option<Vec<f32>>>,
    diagnostics: Vec<Diagnostic>,
}

impl SeqIdentities {
    #[inline]
    pub fn rows(&self) -> &[Option<Vec<f32>>] {
        &self.rows
    }

    #[inline]
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        self.rows.get(i)?.as_deref()
    }

    /// Identity of sequences `i` and `j`, `None` if `i` was removed
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        self.row(i).and_then(|row| row.get(j).copied())
    }

    /// Pairs that had no comparable position
    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

pub struct Cleaner<'a> {
    alig: &'a Alignment,
    engine: SimdEngineType,
    parallel: bool,
    /// SKIP for excluded columns, KEEP otherwise
    skip_residues: AlignedBuffer<u8>,
    hits: AlignedBuffer<u32>,
    hits_u8: AlignedBuffer<u8>,
}

impl<'a> Cleaner<'a> {
    pub fn new(alig: &'a Alignment) -> Self {
        Self::build(alig, &StatsOpt::default())
    }

    pub fn with_options(alig: &'a Alignment, opt: StatsOpt) -> Result<Self> {
        opt.validate()
            .map_err(|errors| TrimError::InvalidOptions(errors.join("; ")))?;
        Ok(Self::build(alig, &opt))
    }

    fn build(alig: &'a Alignment, opt: &StatsOpt) -> Self {
        let residues = alig.residue_count();
        let mut skip_residues = AlignedBuffer::zeroed(residues);
        for (slot, &keep) in skip_residues.iter_mut().zip(alig.keep_residues()) {
            *slot = if keep { KEEP } else { SKIP };
        }

        log::trace!(
            "Cleaner over {} of {} columns and {} of {} sequences",
            alig.kept_residue_count(),
            residues,
            alig.kept_sequence_count(),
            alig.sequence_count()
        );

        Cleaner {
            alig,
            engine: opt.resolve_engine(),
            parallel: opt.parallel,
            skip_residues,
            hits: AlignedBuffer::zeroed(residues),
            hits_u8: AlignedBuffer::zeroed(residues),
        }
    }

    #[inline]
    pub fn engine(&self) -> SimdEngineType {
        self.engine
    }

    /// Replace the column exclusion mask; `true` excludes the column.
    pub fn set_skip_residues(&mut self, skip: &[bool]) -> Result<()> {
        if skip.len() != self.skip_residues.len() {
            return Err(TrimError::MaskLength {
                expected: self.skip_residues.len(),
                found: skip.len(),
            });
        }
        for (slot, &excluded) in self.skip_residues.iter_mut().zip(skip) {
            *slot = if excluded { SKIP } else { KEEP };
        }
        Ok(())
    }

    /// Identity `matches / comparable` for every pair of kept sequences,
    /// ignoring excluded columns.
    ///
    /// A pair with no comparable position gets identity 0 and a
    /// `Diagnostic::NoResidueSequences`.
    pub fn calculate_seq_identity(&self) -> SeqIdentities {
        let n = self.alig.sequence_count();
        let keep = self.alig.keep_sequences();
        let sequences = self.alig.sequences();
        let names = self.alig.names();
        let indet = self.alig.indeterminate();
        let skip: &[u8] = &self.skip_residues;
        let engine = self.engine;

        let pairs: Vec<(usize, usize)> = (0..n)
            .filter(|&i| keep[i])
            .flat_map(|i| ((i + 1)..n).filter(|&j| keep[j]).map(move |j| (i, j)))
            .collect();

        let compare = |&(i, j): &(usize, usize)| -> PairCounts {
            pairwise::count_pair(engine, &sequences[i], &sequences[j], Some(skip), indet)
        };
        let counts: Vec<PairCounts> = if self.parallel {
            pairs.par_iter().map(compare).collect()
        } else {
            pairs.iter().map(compare).collect()
        };

        let mut rows: Vec<Option<Vec<f32>>> = keep
            .iter()
            .map(|&k| k.then(|| vec![0.0f32; n]))
            .collect();
        let mut diagnostics = Vec::new();

        for (&(i, j), c) in pairs.iter().zip(&counts) {
            let identity = match c.identity() {
                Some(v) => v,
                None => {
                    let diag = Diagnostic::NoResidueSequences {
                        first: names[i].clone(),
                        second: names[j].clone(),
                    };
                    log::warn!("{diag}");
                    diagnostics.push(diag);
                    0.0
                }
            };
            if let Some(row) = rows[i].as_mut() {
                row[j] = identity;
            }
            if let Some(row) = rows[j].as_mut() {
                row[i] = identity;
            }
        }

        log::debug!(
            "Sequence identities: {} pairs among {} of {} sequences, {} without common residues",
            pairs.len(),
            self.alig.kept_sequence_count(),
            n,
            diagnostics.len()
        );

        SeqIdentities { rows, diagnostics }
    }

    /// Fraction of columns in which each sequence agrees with at least
    /// `ceil(overlap * (N - 1))` other sequences.
    ///
    /// A column agrees between two sequences when the residues are equal or
    /// neither is a gap or indeterminate. Nothing is written unless every
    /// argument is valid.
    pub fn calculate_spurious_vector(&mut self, overlap: f32, spurious: Option<&mut [f32]>) -> Result<()> {
        let spurious = spurious.ok_or(TrimError::MissingOutputBuffer)?;
        let n = self.alig.sequence_count();
        if spurious.len() != n {
            return Err(TrimError::OutputBufferSize {
                expected: n,
                found: spurious.len(),
            });
        }
        if !(0.0..=1.0).contains(&overlap) {
            return Err(TrimError::InvalidOverlap(overlap));
        }

        let residues = self.alig.residue_count();
        let sequences = self.alig.sequences();
        let indet = self.alig.indeterminate();
        let threshold = (overlap * (n - 1) as f32).ceil() as u32;

        for (i, score) in spurious.iter_mut().enumerate() {
            self.hits.clear();
            self.hits_u8.clear();

            let mut pending = 0usize;
            for j in (0..n).filter(|&j| j != i) {
                pairwise::accumulate_agreement(self.engine, &sequences[i], &sequences[j], &mut self.hits_u8, indet);
                pending += 1;
                if pending == LANE_FLUSH_INTERVAL {
                    drain_hits(&mut self.hits_u8, &mut self.hits);
                    pending = 0;
                }
            }
            if pending > 0 {
                drain_hits(&mut self.hits_u8, &mut self.hits);
            }

            let agreeing = self.hits.iter().filter(|&&h| h >= threshold).count();
            *score = if residues == 0 {
                0.0
            } else {
                agreeing as f32 / residues as f32
            };
        }

        log::debug!(
            "Spuriousness computed for {} sequences (overlap={}, threshold={})",
            n,
            overlap,
            threshold
        );
        Ok(())
    }
}

/// Add the 8-bit counters into the wide ones and reset them
#[inline]
fn drain_hits(narrow: &mut AlignedBuffer<u8>, wide: &mut AlignedBuffer<u32>) {
    for (w, &h) in wide.iter_mut().zip(narrow.iter()) {
        *w += h as u32;
    }
    narrow.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msa::SequenceType;

    fn proteins() -> Alignment {
        Alignment::new(
            vec!["a", "b", "c"],
            vec!["MKV-LA", "MKI-LA", "--X-XX"],
            SequenceType::AminoAcid,
        )
        .unwrap()
    }

    #[test]
    fn test_seq_identity_hand_example() {
        let ali = proteins();
        let cleaner = Cleaner::with_options(&ali, StatsOpt::with_engine(SimdEngineType::Scalar)).unwrap();
        let ids = cleaner.calculate_seq_identity();

        // a vs b: 5 comparable, 4 equal
        assert_eq!(ids.get(0, 1), Some(0.8));
        assert_eq!(ids.get(1, 0), Some(0.8));
        assert_eq!(ids.get(0, 0), Some(0.0));
        // c holds only gaps and X; every column against a is one-sided
        assert_eq!(ids.get(0, 2), Some(0.0));
        assert!(ids.diagnostics().is_empty());
    }

    #[test]
    fn test_seq_identity_skips_removed_sequences() {
        let mut ali = proteins();
        ali.set_keep_sequences(&[true, false, true]).unwrap();
        let cleaner = Cleaner::new(&ali);
        let ids = cleaner.calculate_seq_identity();
        assert!(ids.row(1).is_none());
        assert_eq!(ids.get(0, 1), Some(0.0));
        assert_eq!(ids.rows().len(), 3);
    }

    #[test]
    fn test_skip_mask_changes_identity() {
        let ali = proteins();
        let mut cleaner = Cleaner::new(&ali);
        // exclude the only mismatching column
        cleaner
            .set_skip_residues(&[false, false, true, false, false, false])
            .unwrap();
        assert_eq!(cleaner.calculate_seq_identity().get(0, 1), Some(1.0));

        assert_eq!(
            cleaner.set_skip_residues(&[true]).unwrap_err(),
            TrimError::MaskLength { expected: 6, found: 1 }
        );
    }

    #[test]
    fn test_no_common_residue_diagnostic() {
        let ali = Alignment::new(
            vec!["x", "y"],
            vec!["--X", "X--"],
            SequenceType::AminoAcid,
        )
        .unwrap();
        let ids = Cleaner::new(&ali).calculate_seq_identity();
        assert_eq!(ids.get(0, 1), Some(0.0));
        assert_eq!(
            ids.diagnostics(),
            &[Diagnostic::NoResidueSequences {
                first: "x".to_string(),
                second: "y".to_string()
            }]
        );
    }

    #[test]
    fn test_spurious_argument_errors() {
        let ali = proteins();
        let mut cleaner = Cleaner::new(&ali);
        assert_eq!(
            cleaner.calculate_spurious_vector(0.5, None),
            Err(TrimError::MissingOutputBuffer)
        );

        let mut short = [7.0f32; 2];
        assert_eq!(
            cleaner.calculate_spurious_vector(0.5, Some(&mut short)),
            Err(TrimError::OutputBufferSize { expected: 3, found: 2 })
        );
        assert_eq!(short, [7.0; 2]);

        let mut out = [7.0f32; 3];
        assert_eq!(
            cleaner.calculate_spurious_vector(1.5, Some(&mut out)),
            Err(TrimError::InvalidOverlap(1.5))
        );
        assert!(cleaner.calculate_spurious_vector(f32::NAN, Some(&mut out)).is_err());
        assert_eq!(out, [7.0; 3]);
    }

    #[test]
    fn test_spurious_hand_example() {
        let ali = proteins();
        let mut cleaner = Cleaner::with_options(&ali, StatsOpt::with_engine(SimdEngineType::Scalar)).unwrap();
        let mut out = [0.0f32; 3];
        cleaner.calculate_spurious_vector(1.0, Some(&mut out)).unwrap();
        // threshold 2: a agrees with b everywhere but with c only on the
        // all-gap column 3, which is the only column reaching 2 votes.
        assert_eq!(out[0], 1.0 / 6.0);
        assert_eq!(out[1], 1.0 / 6.0);
        assert_eq!(out[2], 1.0 / 6.0);
    }
}
