//! Residue similarity and distance tables for conservation scoring

use crate::error::{Result, TrimError};
use crate::msa::SequenceType;

const ALPHABET_SIZE: usize = 26;

const BLOSUM62_SYMBOLS: &[u8] = b"ARNDCQEGHILKMFPSTWYVBZX";

#[rustfmt::skip]
const BLOSUM62_SCORES: [f32; 23 * 23] = [
    //         A     R     N     D     C     Q     E     G     H     I     L     K     M     F     P     S     T     W     Y     V     B     Z     X
    /*A*/   4.0, -1.0, -2.0, -2.0,  0.0, -1.0, -1.0,  0.0, -2.0, -1.0, -1.0, -1.0, -1.0, -2.0, -1.0,  1.0,  0.0, -3.0, -2.0,  0.0, -2.0, -1.0, -1.0,
    /*R*/  -1.0,  5.0,  0.0, -2.0, -3.0,  1.0,  0.0, -2.0,  0.0, -3.0, -2.0,  2.0, -1.0, -3.0, -2.0, -1.0, -1.0, -3.0, -2.0, -3.0, -1.0,  0.0, -1.0,
    /*N*/  -2.0,  0.0,  6.0,  1.0, -3.0,  0.0,  0.0,  0.0,  1.0, -3.0, -3.0,  0.0, -2.0, -3.0, -2.0,  1.0,  0.0, -4.0, -2.0, -3.0,  4.0,  0.0, -1.0,
    /*D*/  -2.0, -2.0,  1.0,  6.0, -3.0,  0.0,  2.0, -1.0, -1.0, -3.0, -4.0, -1.0, -3.0, -3.0, -1.0,  0.0, -1.0, -4.0, -3.0, -3.0,  4.0,  1.0, -1.0,
    /*C*/   0.0, -3.0, -3.0, -3.0,  9.0, -3.0, -4.0, -3.0, -3.0, -1.0, -1.0, -3.0, -1.0, -2.0, -3.0, -1.0, -1.0, -2.0, -2.0, -1.0, -3.0, -3.0, -1.0,
    /*Q*/  -1.0,  1.0,  0.0,  0.0, -3.0,  5.0,  2.0, -2.0,  0.0, -3.0, -2.0,  1.0,  0.0, -3.0, -1.0,  0.0, -1.0, -2.0, -1.0, -2.0,  0.0,  4.0, -1.0,
    /*E*/  -1.0,  0.0,  0.0,  2.0, -4.0,  2.0,  5.0, -2.0,  0.0, -3.0, -3.0,  1.0, -2.0, -3.0, -1.0,  0.0, -1.0, -3.0, -2.0, -2.0,  1.0,  4.0, -1.0,
    /*G*/   0.0, -2.0,  0.0, -1.0, -3.0, -2.0, -2.0,  6.0, -2.0, -4.0, -4.0, -2.0, -3.0, -3.0, -2.0,  0.0, -2.0, -2.0, -3.0, -3.0, -1.0, -2.0, -1.0,
    /*H*/  -2.0,  0.0,  1.0, -1.0, -3.0,  0.0,  0.0, -2.0,  8.0, -3.0, -3.0, -1.0, -2.0, -1.0, -2.0, -1.0, -2.0, -2.0,  2.0, -3.0,  0.0,  0.0, -1.0,
    /*I*/  -1.0, -3.0, -3.0, -3.0, -1.0, -3.0, -3.0, -4.0, -3.0,  4.0,  2.0, -3.0,  1.0,  0.0, -3.0, -2.0, -1.0, -3.0, -1.0,  3.0, -3.0, -3.0, -1.0,
    /*L*/  -1.0, -2.0, -3.0, -4.0, -1.0, -2.0, -3.0, -4.0, -3.0,  2.0,  4.0, -2.0,  2.0,  0.0, -3.0, -2.0, -1.0, -2.0, -1.0,  1.0, -4.0, -3.0, -1.0,
    /*K*/  -1.0,  2.0,  0.0, -1.0, -3.0,  1.0,  1.0, -2.0, -1.0, -3.0, -2.0,  5.0, -1.0, -3.0, -1.0,  0.0, -1.0, -3.0, -2.0, -2.0,  0.0,  1.0, -1.0,
    /*M*/  -1.0, -1.0, -2.0, -3.0, -1.0,  0.0, -2.0, -3.0, -2.0,  1.0,  2.0, -1.0,  5.0,  0.0, -2.0, -1.0, -1.0, -1.0, -1.0,  1.0, -3.0, -1.0, -1.0,
    /*F*/  -2.0, -3.0, -3.0, -3.0, -2.0, -3.0, -3.0, -3.0, -1.0,  0.0,  0.0, -3.0,  0.0,  6.0, -4.0, -2.0, -2.0,  1.0,  3.0, -1.0, -3.0, -3.0, -1.0,
    /*P*/  -1.0, -2.0, -2.0, -1.0, -3.0, -1.0, -1.0, -2.0, -2.0, -3.0, -3.0, -1.0, -2.0, -4.0,  7.0, -1.0, -1.0, -4.0, -3.0, -2.0, -2.0, -1.0, -1.0,
    /*S*/   1.0, -1.0,  1.0,  0.0, -1.0,  0.0,  0.0,  0.0, -1.0, -2.0, -2.0,  0.0, -1.0, -2.0, -1.0,  4.0,  1.0, -3.0, -2.0, -2.0,  0.0,  0.0, -1.0,
    /*T*/   0.0, -1.0,  0.0, -1.0, -1.0, -1.0, -1.0, -2.0, -2.0, -1.0, -1.0, -1.0, -1.0, -2.0, -1.0,  1.0,  5.0, -2.0, -2.0,  0.0, -1.0, -1.0, -1.0,
    /*W*/  -3.0, -3.0, -4.0, -4.0, -2.0, -2.0, -3.0, -2.0, -2.0, -3.0, -2.0, -3.0, -1.0,  1.0, -4.0, -3.0, -2.0, 11.0,  2.0, -3.0, -4.0, -2.0, -1.0,
    /*Y*/  -2.0, -2.0, -2.0, -3.0, -2.0, -1.0, -2.0, -3.0,  2.0, -1.0, -1.0, -2.0, -1.0,  3.0, -3.0, -2.0, -2.0,  2.0,  7.0, -1.0, -3.0, -2.0, -1.0,
    /*V*/   0.0, -3.0, -3.0, -3.0, -1.0, -2.0, -2.0, -3.0, -3.0,  3.0,  1.0, -2.0,  1.0, -1.0, -2.0, -2.0,  0.0, -3.0, -1.0,  4.0, -3.0, -2.0, -1.0,
    /*B*/  -2.0, -1.0,  4.0,  4.0, -3.0,  0.0,  1.0, -1.0,  0.0, -3.0, -4.0,  0.0, -3.0, -3.0, -2.0,  0.0, -1.0, -4.0, -3.0, -3.0,  4.0,  0.0, -1.0,
    /*Z*/  -1.0,  0.0,  0.0,  1.0, -3.0,  4.0,  4.0, -2.0,  0.0, -3.0, -3.0,  1.0, -1.0, -3.0, -1.0,  0.0, -1.0, -2.0, -2.0, -2.0,  0.0,  4.0, -1.0,
    /*X*/  -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0,
];

const NUCLEOTIDE_SYMBOLS: &[u8] = b"ACGTUN";

#[rustfmt::skip]
const NUCLEOTIDE_SCORES: [f32; 6 * 6] = [
    //      A    C    G    T    U    N
    /*A*/ 1.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    /*C*/ 0.0, 1.0, 0.0, 0.0, 0.0, 0.0,
    /*G*/ 0.0, 0.0, 1.0, 0.0, 0.0, 0.0,
    /*T*/ 0.0, 0.0, 0.0, 1.0, 1.0, 0.0,
    /*U*/ 0.0, 0.0, 0.0, 1.0, 1.0, 0.0,
    /*N*/ 0.0, 0.0, 0.0, 0.0, 0.0, 1.0,
];

/// Letter-to-class lookup plus a square class-by-class distance table.
///
/// Letters map through their uppercase offset from `A`; `None` marks a letter
/// the table does not define.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    classes: [Option<usize>; ALPHABET_SIZE],
    size: usize,
    distances: Vec<f32>,
}

impl SimilarityMatrix {
    /// Use `distances` (row-major, `symbols.len()` squared) as given.
    pub fn from_distances(symbols: &[u8], distances: &[f32]) -> Result<Self> {
        let classes = Self::index_symbols(symbols)?;
        let size = symbols.len();
        if distances.len() != size * size {
            return Err(TrimError::InvalidSimilarityMatrix(format!(
                "{} symbols need {} distances, got {}",
                size,
                size * size,
                distances.len()
            )));
        }
        Ok(SimilarityMatrix {
            classes,
            size,
            distances: distances.to_vec(),
        })
    }

    /// Derive distances from a square score table.
    ///
    /// The distance between two symbols is the Euclidean distance between
    /// their score columns, so identical symbols are at distance 0 and the
    /// table is symmetric.
    pub fn from_scores(symbols: &[u8], scores: &[f32]) -> Result<Self> {
        let classes = Self::index_symbols(symbols)?;
        let size = symbols.len();
        if scores.len() != size * size {
            return Err(TrimError::InvalidSimilarityMatrix(format!(
                "{} symbols need {} scores, got {}",
                size,
                size * size,
                scores.len()
            )));
        }

        let mut distances = vec![0.0f32; size * size];
        for i in 0..size {
            for j in (i + 1)..size {
                let sum: f32 = (0..size)
                    .map(|k| {
                        let d = scores[k * size + j] - scores[k * size + i];
                        d * d
                    })
                    .sum();
                let dist = sum.sqrt();
                distances[i * size + j] = dist;
                distances[j * size + i] = dist;
            }
        }

        Ok(SimilarityMatrix {
            classes,
            size,
            distances,
        })
    }

    /// BLOSUM62 over `ARNDCQEGHILKMFPSTWYVBZX`
    pub fn blosum62() -> Self {
        Self::from_builtin(BLOSUM62_SYMBOLS, &BLOSUM62_SCORES)
    }

    /// Identity scores over `ACGTUN`, with `T` and `U` equivalent
    pub fn default_nucleotide() -> Self {
        Self::from_builtin(NUCLEOTIDE_SYMBOLS, &NUCLEOTIDE_SCORES)
    }

    pub fn default_for(seq_type: SequenceType) -> Self {
        match seq_type {
            SequenceType::AminoAcid => Self::blosum62(),
            SequenceType::Nucleotide => Self::default_nucleotide(),
        }
    }

    fn from_builtin(symbols: &[u8], scores: &[f32]) -> Self {
        match Self::from_scores(symbols, scores) {
            Ok(matrix) => matrix,
            Err(e) => unreachable!("built-in similarity table is malformed: {e}"),
        }
    }

    fn index_symbols(symbols: &[u8]) -> Result<[Option<usize>; ALPHABET_SIZE]> {
        if symbols.is_empty() {
            return Err(TrimError::InvalidSimilarityMatrix(
                "no symbols given".to_string(),
            ));
        }
        let mut classes = [None; ALPHABET_SIZE];
        for (class, &symbol) in symbols.iter().enumerate() {
            let upper = symbol.to_ascii_uppercase();
            if !upper.is_ascii_uppercase() {
                return Err(TrimError::InvalidSimilarityMatrix(format!(
                    "symbol '{}' is not a letter",
                    symbol as char
                )));
            }
            let slot = &mut classes[(upper - b'A') as usize];
            if slot.is_some() {
                return Err(TrimError::InvalidSimilarityMatrix(format!(
                    "symbol '{}' appears twice",
                    upper as char
                )));
            }
            *slot = Some(class);
        }
        Ok(classes)
    }

    /// Number of symbol classes
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Class of an uppercase letter, or `None` when undefined or not a letter
    #[inline]
    pub fn class_of(&self, symbol: u8) -> Option<usize> {
        if symbol.is_ascii_uppercase() {
            self.classes[(symbol - b'A') as usize]
        } else {
            None
        }
    }

    #[inline]
    pub fn distance(&self, a: usize, b: usize) -> f32 {
        self.distances[a * self.size + b]
    }
}
