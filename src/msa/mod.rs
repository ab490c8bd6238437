//! Multiple sequence alignment model
//!
//! - `alignment`: the `Alignment` container with its keep flags
//! - `gaps`: per-column gap statistics computed on first use
//! - `sequence_type`: amino acid / nucleotide tag and detection

pub mod alignment;
pub mod gaps;
pub mod sequence_type;

pub use alignment::Alignment;
pub use gaps::GapStats;
pub use sequence_type::SequenceType;
