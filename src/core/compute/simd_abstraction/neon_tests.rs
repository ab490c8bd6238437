#![cfg(all(test, target_arch = "aarch64"))]

use super::SimdEngine;
use super::engine128::SimdEngine128;
use super::types::__m128i;

#[test]
fn test_neon_hsum_epu8_widens() {
    unsafe {
        // vaddvq_u8 would return 240 (4080 mod 256) here.
        let vec = __m128i::from_slice(&[255u8; 16]);
        assert_eq!(SimdEngine128::hsum_epu8(vec), 4080);

        let values = [1u8, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16];
        let vec = __m128i::from_slice(&values);
        assert_eq!(SimdEngine128::hsum_epu8(vec), 136);
    }
}

#[test]
fn test_neon_andnot_operand_order() {
    unsafe {
        let mut mask = [0u8; 16];
        mask[3] = 0xFF;
        mask[9] = 0xFF;
        let mask = __m128i::from_slice(&mask);
        let ones = SimdEngine128::set1_epi8(1);

        // ~mask & ones: every lane except 3 and 9 keeps its 1
        let result = SimdEngine128::andnot_si128(mask, ones);
        let mut out = [0u8; 16];
        result.copy_to_slice(&mut out);
        for (i, &lane) in out.iter().enumerate() {
            let expected = if i == 3 || i == 9 { 0 } else { 1 };
            assert_eq!(lane, expected, "lane {i}");
        }
    }
}

#[test]
fn test_neon_cmpeq_gap_symbol() {
    unsafe {
        let residues = *b"AC-GT-NN--ACGTXX";
        let vec = __m128i::from_slice(&residues);
        let gaps = SimdEngine128::cmpeq_epi8(vec, SimdEngine128::set1_epi8(b'-' as i8));
        let mut out = [0u8; 16];
        gaps.copy_to_slice(&mut out);
        for (i, &lane) in out.iter().enumerate() {
            let expected = if residues[i] == b'-' { 0xFF } else { 0 };
            assert_eq!(lane, expected, "lane {i}");
        }
    }
}
