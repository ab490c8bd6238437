// src/defaults.rs

// Alignment symbols
pub const GAP_SYMBOL: u8 = b'-';
pub const AA_INDETERMINATE: u8 = b'X';
pub const NT_INDETERMINATE: u8 = b'N';

// Conservation scoring
pub const GAP_CUT_FRACTION: f32 = 0.8;

// Sequence type detection: fraction of non-gap residues that must be
// nucleotide symbols for an alignment to be typed as nucleotide
pub const NUCLEOTIDE_FRACTION: f32 = 0.95;

// Byte alignment of scratch buffers (one AVX-512 register / cache line)
pub const SCRATCH_ALIGNMENT: usize = 64;

// Engine override environment variables
pub const FORCE_SCALAR_ENV: &str = "FERROUS_TRIM_FORCE_SCALAR";
pub const FORCE_SSE_ENV: &str = "FERROUS_TRIM_FORCE_SSE";
