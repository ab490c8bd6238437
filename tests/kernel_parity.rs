// tests/kernel_parity.rs
// Every SIMD engine must produce exactly the scalar counts, including at the
// lane-width and flush-interval boundaries.

use ferrous_trim::core::compute::pairwise::{
    LANE_FLUSH_INTERVAL, SKIP, accumulate_agreement, count_pair, scalar,
};
use ferrous_trim::core::compute::simd::{SimdEngineType, available_simd_engines, lane_width};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const PROTEIN: &[u8] = b"ACDEFGHIKLMNPQRSTVWY";

/// Random protein row with roughly 20% gaps and 5% X
fn random_row(rng: &mut StdRng, len: usize) -> Vec<u8> {
    (0..len)
        .map(|_| match rng.gen_range(0..100) {
            0..=19 => b'-',
            20..=24 => b'X',
            _ => PROTEIN[rng.gen_range(0..4usize)],
        })
        .collect()
}

fn random_mask(rng: &mut StdRng, len: usize) -> Vec<u8> {
    (0..len)
        .map(|_| if rng.gen_bool(0.1) { SKIP } else { 0 })
        .collect()
}

fn boundary_lengths(width: usize) -> Vec<usize> {
    let flush = LANE_FLUSH_INTERVAL * width;
    vec![0, 1, width - 1, width, width + 1, flush, flush + 1, 10007]
}

#[test]
fn count_pair_matches_scalar_at_boundaries() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for engine in available_simd_engines() {
        let width = lane_width(engine).max(16);
        for len in boundary_lengths(width) {
            let a = random_row(&mut rng, len);
            let b = random_row(&mut rng, len);
            let mask = random_mask(&mut rng, len);

            assert_eq!(
                count_pair(engine, &a, &b, None, b'X'),
                scalar::count_pair(&a, &b, None, b'X'),
                "{engine:?} len={len} unmasked"
            );
            assert_eq!(
                count_pair(engine, &a, &b, Some(&mask), b'X'),
                scalar::count_pair(&a, &b, Some(&mask), b'X'),
                "{engine:?} len={len} masked"
            );
        }
    }
}

#[test]
fn count_pair_identical_rows_saturate_every_lane() {
    // Every position is a comparable match, so each lane counter climbs to the
    // flush limit before being reduced.
    for engine in available_simd_engines() {
        let len = LANE_FLUSH_INTERVAL * lane_width(engine) * 2 + 3;
        let row: Vec<u8> = PROTEIN.iter().copied().cycle().take(len).collect();
        let c = count_pair(engine, &row, &row, None, b'X');
        assert_eq!(c.matches as usize, len, "{engine:?}");
        assert_eq!(c.length as usize, len, "{engine:?}");
        assert_eq!(c.distance(), Some(0.0));
        assert_eq!(c.identity(), Some(1.0));
    }
}

#[test]
fn gap_against_indeterminate_has_no_comparable_position() {
    for engine in available_simd_engines() {
        let a: Vec<u8> = b"-X".iter().copied().cycle().take(1001).collect();
        let b: Vec<u8> = b"X-".iter().copied().cycle().take(1001).collect();
        let c = count_pair(engine, &a, &b, None, b'X');
        assert_eq!(c.length, 0, "{engine:?}");
        assert_eq!(c.distance(), None);
    }
}

#[test]
fn accumulate_agreement_matches_scalar() {
    let mut rng = StdRng::seed_from_u64(42);
    for engine in available_simd_engines() {
        let width = lane_width(engine).max(16);
        for len in boundary_lengths(width) {
            let reference = random_row(&mut rng, len);
            let others: Vec<Vec<u8>> = (0..5).map(|_| random_row(&mut rng, len)).collect();

            let mut expected = vec![0u8; len];
            let mut got = vec![0u8; len];
            for other in &others {
                scalar::accumulate_agreement(&reference, other, &mut expected, b'X');
                accumulate_agreement(engine, &reference, other, &mut got, b'X');
            }
            assert_eq!(got, expected, "{engine:?} len={len}");
        }
    }
}

#[test]
fn accumulate_agreement_reaches_flush_limit_without_wrapping() {
    for engine in available_simd_engines() {
        let len = 3 * lane_width(engine) + 7;
        let row: Vec<u8> = PROTEIN.iter().copied().cycle().take(len).collect();
        let mut hits = vec![0u8; len];
        for _ in 0..LANE_FLUSH_INTERVAL {
            accumulate_agreement(engine, &row, &row, &mut hits, b'X');
        }
        assert!(hits.iter().all(|&h| h == u8::MAX), "{engine:?}");
    }
}

#[test]
fn scalar_engine_is_always_available() {
    assert_eq!(available_simd_engines()[0], SimdEngineType::Scalar);
}
