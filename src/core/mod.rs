//! Core reusable components for alignment statistics.
//!
//! Nothing in here knows about similarity matrices or trimming; it only
//! compares residues as fast as the CPU allows.

pub mod compute;
