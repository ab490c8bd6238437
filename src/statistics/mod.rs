//! Alignment statistics: pairwise distances, residue tables and column
//! conservation.

pub mod identity_matrix;
pub mod similarity;
pub mod similarity_matrix;

pub use identity_matrix::IdentityMatrix;
pub use similarity::Similarity;
pub use similarity_matrix::SimilarityMatrix;
