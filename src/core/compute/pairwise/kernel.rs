//! Engine-generic vector kernels for residue comparison
//!
//! Both kernels walk the sequences in chunks of `E::WIDTH_8` residues using
//! unaligned loads, classify every lane as gap/indeterminate with two byte
//! compares, and hand the positions after the last full chunk to the scalar
//! kernels in `scalar.rs`, so results match the scalar reference exactly.

use super::scalar;
use super::types::{LANE_FLUSH_INTERVAL, PairCounts};
use crate::core::compute::simd_abstraction::SimdEngine;
use crate::defaults::GAP_SYMBOL;

/// Count comparable and matching positions of two sequences.
///
/// Lane counters are 8-bit. Full chunks are processed in blocks of at most
/// `LANE_FLUSH_INTERVAL` steps; each block ends with a widening reduction into
/// the `u32` totals, so no lane ever exceeds 255.
///
/// # Safety
/// The CPU must support `E`. `a`, `b` and `skip` (when present) must have the
/// same length.
#[inline(always)]
pub unsafe fn count_pair<E: SimdEngine>(
    a: &[u8],
    b: &[u8],
    skip: Option<&[u8]>,
    indet: u8,
) -> PairCounts {
    debug_assert_eq!(a.len(), b.len());
    debug_assert!(skip.is_none_or(|s| s.len() == a.len()));

    let lanes = E::WIDTH_8;
    let full_chunks = a.len() / lanes;

    let all_gap = unsafe { E::set1_epi8(GAP_SYMBOL as i8) };
    let all_indet = unsafe { E::set1_epi8(indet as i8) };
    let ones = unsafe { E::set1_epi8(1) };
    let no_skip = unsafe { E::setzero_epi8() };

    let mut counts = PairCounts::default();
    let mut chunk = 0;

    while chunk < full_chunks {
        let block_end = full_chunks.min(chunk + LANE_FLUSH_INTERVAL);
        let mut hit_acc = unsafe { E::setzero_epi8() };
        let mut len_acc = unsafe { E::setzero_epi8() };

        while chunk < block_end {
            let k = chunk * lanes;
            unsafe {
                let seq_a = E::loadu_si128(a.as_ptr().add(k));
                let seq_b = E::loadu_si128(b.as_ptr().add(k));
                let skipped = match skip {
                    Some(mask) => E::loadu_si128(mask.as_ptr().add(k)),
                    None => no_skip,
                };

                let gaps_a = E::or_si128(E::cmpeq_epi8(seq_a, all_gap), E::cmpeq_epi8(seq_a, all_indet));
                let gaps_b = E::or_si128(E::cmpeq_epi8(seq_b, all_gap), E::cmpeq_epi8(seq_b, all_indet));
                let eq = E::cmpeq_epi8(seq_a, seq_b);

                // 1 where the column is kept and not both residues are gaps.
                // Equal residues share their gap class, so `eq & valid` is
                // exactly "both valid and equal".
                let valid = E::andnot_si128(E::or_si128(E::and_si128(gaps_a, gaps_b), skipped), ones);

                len_acc = E::add_epi8(len_acc, valid);
                hit_acc = E::add_epi8(hit_acc, E::and_si128(eq, valid));
            }
            chunk += 1;
        }

        // merge accumulators before any lane can reach 256
        unsafe {
            counts.matches += E::hsum_epu8(hit_acc);
            counts.length += E::hsum_epu8(len_acc);
        }
    }

    counts += scalar::count_pair_from(a, b, skip, indet, full_chunks * lanes);
    counts
}

/// Add 1 to `hits[k]` wherever the two residues are equal or neither is a
/// gap/indeterminate.
///
/// Each call adds at most 1 per position; the caller drains `hits` into wider
/// counters before it has been called `LANE_FLUSH_INTERVAL + 1` times.
///
/// # Safety
/// The CPU must support `E`. `a`, `b` and `hits` must have the same length.
#[inline(always)]
pub unsafe fn accumulate_agreement<E: SimdEngine>(a: &[u8], b: &[u8], hits: &mut [u8], indet: u8) {
    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(a.len(), hits.len());

    let lanes = E::WIDTH_8;
    let full_chunks = a.len() / lanes;

    let all_gap = unsafe { E::set1_epi8(GAP_SYMBOL as i8) };
    let all_indet = unsafe { E::set1_epi8(indet as i8) };
    let ones = unsafe { E::set1_epi8(1) };

    for chunk in 0..full_chunks {
        let k = chunk * lanes;
        unsafe {
            let seq_a = E::loadu_si128(a.as_ptr().add(k));
            let seq_b = E::loadu_si128(b.as_ptr().add(k));

            let gaps_a = E::or_si128(E::cmpeq_epi8(seq_a, all_gap), E::cmpeq_epi8(seq_a, all_indet));
            let gaps_b = E::or_si128(E::cmpeq_epi8(seq_b, all_gap), E::cmpeq_epi8(seq_b, all_indet));
            let eq = E::cmpeq_epi8(seq_a, seq_b);

            let agree = E::or_si128(E::and_si128(eq, ones), E::andnot_si128(E::or_si128(gaps_a, gaps_b), ones));

            let hit_ptr = hits.as_mut_ptr().add(k);
            let hit = E::add_epi8(E::loadu_si128(hit_ptr), agree);
            E::storeu_si128(hit_ptr, hit);
        }
    }

    scalar::accumulate_agreement_from(a, b, hits, indet, full_chunks * lanes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compute::simd_abstraction::SimdEngine128;
    use crate::core::compute::pairwise::types::SKIP;

    fn repeat(unit: &[u8], len: usize) -> Vec<u8> {
        unit.iter().copied().cycle().take(len).collect()
    }

    #[test]
    fn test_count_pair_engine128_matches_scalar() {
        let a = repeat(b"ACGT-NACGTTG", 1000);
        let b = repeat(b"ACGA--NCGTAGC", 1000);
        let expected = scalar::count_pair(&a, &b, None, b'N');
        let got = unsafe { count_pair::<SimdEngine128>(&a, &b, None, b'N') };
        assert_eq!(got, expected);
    }

    #[test]
    fn test_count_pair_survives_lane_overflow_boundary() {
        // Identical ungapped sequences put the maximum count in every lane.
        let len = 16 * LANE_FLUSH_INTERVAL * 3 + 5;
        let a = repeat(b"MKV", len);
        let got = unsafe { count_pair::<SimdEngine128>(&a, &a, None, b'X') };
        assert_eq!(got, PairCounts { matches: len as u32, length: len as u32 });
    }

    #[test]
    fn test_count_pair_with_skip_mask() {
        let a = repeat(b"ACDEFGHIKL", 77);
        let b = repeat(b"ACDEFGHIKM", 77);
        let skip: Vec<u8> = (0..77).map(|k| if k % 5 == 0 { SKIP } else { 0 }).collect();
        let expected = scalar::count_pair(&a, &b, Some(&skip), b'X');
        let got = unsafe { count_pair::<SimdEngine128>(&a, &b, Some(&skip), b'X') };
        assert_eq!(got, expected);
    }

    #[test]
    fn test_accumulate_agreement_engine128_matches_scalar() {
        let a = repeat(b"AC-X-MKLV", 53);
        let b = repeat(b"AG-AAMKL-", 53);
        let mut expected = vec![0u8; 53];
        let mut got = vec![0u8; 53];
        for _ in 0..3 {
            scalar::accumulate_agreement(&a, &b, &mut expected, b'X');
            unsafe { accumulate_agreement::<SimdEngine128>(&a, &b, &mut got, b'X') };
        }
        assert_eq!(got, expected);
    }
}
