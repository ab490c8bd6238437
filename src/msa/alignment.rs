// src/msa/alignment.rs
//
// In-memory multiple sequence alignment. Trimming never shrinks the data: removed
// sequences and columns are only flagged, so every index refers to the original
// alignment.

use std::sync::OnceLock;

use super::gaps::GapStats;
use super::sequence_type::SequenceType;
use crate::error::{Result, TrimError};

#[derive(Debug)]
pub struct Alignment {
    names: Vec<String>,
    sequences: Vec<Vec<u8>>,
    residue_count: usize,
    seq_type: SequenceType,
    keep_sequences: Vec<bool>,
    keep_residues: Vec<bool>,
    gap_stats: OnceLock<GapStats>,
}

impl Alignment {
    /// Build an alignment from named rows of equal length.
    ///
    /// Residues are stored uppercased. All sequences and columns start out
    /// kept.
    pub fn new<N, S>(names: Vec<N>, sequences: Vec<S>, seq_type: SequenceType) -> Result<Self>
    where
        N: Into<String>,
        S: AsRef<[u8]>,
    {
        if names.len() != sequences.len() {
            return Err(TrimError::SequenceCountMismatch {
                names: names.len(),
                sequences: sequences.len(),
            });
        }
        if sequences.is_empty() {
            return Err(TrimError::EmptyAlignment);
        }

        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let residue_count = sequences[0].as_ref().len();

        let mut rows = Vec::with_capacity(sequences.len());
        for (name, seq) in names.iter().zip(&sequences) {
            let seq = seq.as_ref();
            if seq.len() != residue_count {
                return Err(TrimError::SequenceLengthMismatch {
                    name: name.clone(),
                    expected: residue_count,
                    found: seq.len(),
                });
            }
            rows.push(seq.to_ascii_uppercase());
        }

        log::debug!(
            "Alignment: {} sequences x {} residues ({:?})",
            rows.len(),
            residue_count,
            seq_type
        );

        Ok(Alignment {
            keep_sequences: vec![true; rows.len()],
            keep_residues: vec![true; residue_count],
            names,
            sequences: rows,
            residue_count,
            seq_type,
            gap_stats: OnceLock::new(),
        })
    }

    /// Like [`Alignment::new`], typing the alignment from its composition.
    pub fn with_detected_type<N, S>(names: Vec<N>, sequences: Vec<S>) -> Result<Self>
    where
        N: Into<String>,
        S: AsRef<[u8]>,
    {
        let seq_type = SequenceType::detect(sequences.iter().map(|s| s.as_ref()));
        Self::new(names, sequences, seq_type)
    }

    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[inline]
    pub fn sequences(&self) -> &[Vec<u8>] {
        &self.sequences
    }

    #[inline]
    pub fn sequence(&self, index: usize) -> Option<&[u8]> {
        self.sequences.get(index).map(Vec::as_slice)
    }

    /// Residues of one column, top to bottom
    pub fn residues(&self, column: usize) -> Option<Vec<u8>> {
        if column >= self.residue_count {
            return None;
        }
        Some(self.sequences.iter().map(|s| s[column]).collect())
    }

    /// Original number of sequences
    #[inline]
    pub fn sequence_count(&self) -> usize {
        self.sequences.len()
    }

    /// Original number of columns
    #[inline]
    pub fn residue_count(&self) -> usize {
        self.residue_count
    }

    #[inline]
    pub fn seq_type(&self) -> SequenceType {
        self.seq_type
    }

    #[inline]
    pub fn indeterminate(&self) -> u8 {
        self.seq_type.indeterminate()
    }

    #[inline]
    pub fn keep_sequences(&self) -> &[bool] {
        &self.keep_sequences
    }

    #[inline]
    pub fn keep_residues(&self) -> &[bool] {
        &self.keep_residues
    }

    pub fn kept_sequence_count(&self) -> usize {
        self.keep_sequences.iter().filter(|&&k| k).count()
    }

    pub fn kept_residue_count(&self) -> usize {
        self.keep_residues.iter().filter(|&&k| k).count()
    }

    pub fn set_keep_sequences(&mut self, mask: &[bool]) -> Result<()> {
        if mask.len() != self.sequences.len() {
            return Err(TrimError::MaskLength {
                expected: self.sequences.len(),
                found: mask.len(),
            });
        }
        self.keep_sequences.copy_from_slice(mask);
        Ok(())
    }

    pub fn set_keep_residues(&mut self, mask: &[bool]) -> Result<()> {
        if mask.len() != self.residue_count {
            return Err(TrimError::MaskLength {
                expected: self.residue_count,
                found: mask.len(),
            });
        }
        self.keep_residues.copy_from_slice(mask);
        Ok(())
    }

    /// Gap statistics over all sequences, computed on first call
    pub fn gap_stats(&self) -> &GapStats {
        self.gap_stats
            .get_or_init(|| GapStats::compute(&self.sequences, self.residue_count))
    }
}
