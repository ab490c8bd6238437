//! Scalar reference kernels
//!
//! One residue at a time, with the same counting rules as the vector kernels
//! in `kernel.rs`. They serve three roles: the tail of every vector scan, the
//! engine on targets without a SIMD backend, and the oracle for parity tests.

use super::types::PairCounts;
use crate::defaults::GAP_SYMBOL;

#[inline(always)]
pub(crate) fn is_gap(residue: u8, indet: u8) -> bool {
    residue == GAP_SYMBOL || residue == indet
}

/// Count comparable and matching positions in `from..a.len()`.
///
/// `skip[k] != 0` excludes position `k`. A position is comparable when at
/// least one residue is neither a gap nor `indet`; it matches when both are
/// valid and equal.
#[inline]
pub fn count_pair_from(
    a: &[u8],
    b: &[u8],
    skip: Option<&[u8]>,
    indet: u8,
    from: usize,
) -> PairCounts {
    let mut counts = PairCounts::default();
    for k in from..a.len() {
        if skip.is_some_and(|s| s[k] != 0) {
            continue;
        }
        let gap_a = is_gap(a[k], indet);
        let gap_b = is_gap(b[k], indet);
        counts.length += (!gap_a || !gap_b) as u32;
        counts.matches += (!gap_a && !gap_b && a[k] == b[k]) as u32;
    }
    counts
}

/// Scalar comparison of two whole sequences.
pub fn count_pair(a: &[u8], b: &[u8], skip: Option<&[u8]>, indet: u8) -> PairCounts {
    debug_assert_eq!(a.len(), b.len());
    count_pair_from(a, b, skip, indet, 0)
}

/// Add 1 to `hits[k]` for every position `k >= from` where the two residues
/// are equal or neither is a gap/indeterminate.
#[inline]
pub fn accumulate_agreement_from(a: &[u8], b: &[u8], hits: &mut [u8], indet: u8, from: usize) {
    for k in from..a.len() {
        let both_valid = !is_gap(a[k], indet) && !is_gap(b[k], indet);
        hits[k] += (both_valid || a[k] == b[k]) as u8;
    }
}

/// Scalar agreement accumulation over two whole sequences.
pub fn accumulate_agreement(a: &[u8], b: &[u8], hits: &mut [u8], indet: u8) {
    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(a.len(), hits.len());
    accumulate_agreement_from(a, b, hits, indet, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_pair_hand_computed() {
        // ACGT vs ACGA: 4 comparable, 3 matching
        let c = count_pair(b"ACGT", b"ACGA", None, b'N');
        assert_eq!(c, PairCounts { matches: 3, length: 4 });
        assert_eq!(c.distance(), Some(0.25));
        assert_eq!(c.identity(), Some(0.75));
    }

    #[test]
    fn test_count_pair_gap_rules() {
        // pos0 both gap: ignored; pos1 one gap: comparable, no match;
        // pos2 equal indets: ignored; pos3 indet vs gap: ignored; pos4 match
        let c = count_pair(b"--NNA", b"-AN-A", None, b'N');
        assert_eq!(c, PairCounts { matches: 1, length: 2 });
    }

    #[test]
    fn test_count_pair_skip_mask() {
        let skip = [0xFF, 0, 0xFF, 0];
        let c = count_pair(b"ACGT", b"ACTT", Some(&skip), b'X');
        assert_eq!(c, PairCounts { matches: 2, length: 2 });
    }

    #[test]
    fn test_accumulate_agreement_rules() {
        let mut hits = [0u8; 5];
        // equal, both valid but different, gap vs gap, indet vs residue, gap vs residue
        accumulate_agreement(b"AC-X-", b"AG-AA", &mut hits, b'X');
        assert_eq!(hits, [1, 1, 1, 0, 0]);
    }
}
