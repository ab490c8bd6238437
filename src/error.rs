//! Error types for ferrous-trim

use thiserror::Error;

/// Result type alias for ferrous-trim operations
pub type Result<T> = std::result::Result<T, TrimError>;

/// Fatal conditions. Each aborts the current computation without partial
/// output; none is transient, so callers should not retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrimError {
    /// Conservation scoring needs a similarity matrix
    #[error("no similarity matrix has been set")]
    ConfigurationMissing,

    /// Residue outside `A`..=`Z` after uppercasing
    #[error("the symbol '{symbol}' is incorrect")]
    IncorrectSymbol { symbol: char },

    /// Letter with no class in the similarity matrix
    #[error("the symbol '{symbol}' is not defined in the similarity matrix")]
    UndefinedSymbol { symbol: char },

    /// No destination was supplied for the spuriousness vector
    #[error("no output buffer was supplied for the spuriousness vector")]
    MissingOutputBuffer,

    /// Destination length does not match the sequence count
    #[error("output buffer holds {found} values, expected {expected}")]
    OutputBufferSize { expected: usize, found: usize },

    /// Overlap fraction outside `[0, 1]`
    #[error("overlap {0} is outside the range [0, 1]")]
    InvalidOverlap(f32),

    /// An alignment needs at least one sequence
    #[error("the alignment contains no sequences")]
    EmptyAlignment,

    /// Names and sequences were supplied in different numbers
    #[error("{names} names supplied for {sequences} sequences")]
    SequenceCountMismatch { names: usize, sequences: usize },

    /// Sequence shorter or longer than the first one
    #[error("sequence '{name}' has {found} residues, expected {expected}")]
    SequenceLengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    /// Mask length does not match the alignment
    #[error("mask has {found} entries, expected {expected}")]
    MaskLength { expected: usize, found: usize },

    /// Rejected `StatsOpt` values
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// Conservation window too wide for the alignment
    #[error("half window {half_window} exceeds the maximum of {max} for this alignment")]
    InvalidWindow { half_window: usize, max: usize },

    /// Windowed values requested before the per-column vector exists
    #[error("conservation vector has not been computed")]
    VectorNotComputed,

    /// Malformed similarity matrix input
    #[error("invalid similarity matrix: {0}")]
    InvalidSimilarityMatrix(String),
}

/// Non-fatal conditions reported alongside a valid result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Two sequences share no comparable position; their identity was set to 0
    NoResidueSequences { first: String, second: String },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::NoResidueSequences { first, second } => write!(
                f,
                "sequences '{}' and '{}' have no residues in common positions",
                first, second
            ),
        }
    }
}
