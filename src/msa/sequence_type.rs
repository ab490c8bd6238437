use crate::defaults::{AA_INDETERMINATE, GAP_SYMBOL, NT_INDETERMINATE, NUCLEOTIDE_FRACTION};

/// Residue alphabet of an alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceType {
    AminoAcid,
    Nucleotide,
}

impl SequenceType {
    /// Symbol standing for an unknown residue (`X` or `N`)
    #[inline]
    pub fn indeterminate(self) -> u8 {
        match self {
            SequenceType::AminoAcid => AA_INDETERMINATE,
            SequenceType::Nucleotide => NT_INDETERMINATE,
        }
    }

    /// Guess the alphabet from residue composition.
    ///
    /// Nucleotide when at least `NUCLEOTIDE_FRACTION` of the non-gap residues
    /// are one of `ACGTUN` (any case). An all-gap input is typed as amino acid.
    pub fn detect<'a, I>(sequences: I) -> SequenceType
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut residues = 0usize;
        let mut nucleotides = 0usize;

        for seq in sequences {
            for &c in seq.iter().filter(|&&c| c != GAP_SYMBOL) {
                residues += 1;
                if matches!(c.to_ascii_uppercase(), b'A' | b'C' | b'G' | b'T' | b'U' | b'N') {
                    nucleotides += 1;
                }
            }
        }

        if residues > 0 && nucleotides as f32 >= NUCLEOTIDE_FRACTION * residues as f32 {
            SequenceType::Nucleotide
        } else {
            SequenceType::AminoAcid
        }
    }
}
