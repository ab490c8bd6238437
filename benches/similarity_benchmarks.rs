use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ferrous_trim::core::compute::pairwise::count_pair;
use ferrous_trim::core::compute::simd::{available_simd_engines, simd_engine_description};
use ferrous_trim::{Alignment, Cleaner, SequenceType, Similarity, SimilarityMatrix, StatsOpt};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const PROTEIN: &[u8] = b"ACDEFGHIKLMNPQRSTVWY";

/// Rows derived from one random ancestor with ~15% substitutions and ~10% gaps
fn generate_alignment(n: usize, len: usize, seed: u64) -> Alignment {
    let mut rng = StdRng::seed_from_u64(seed);
    let ancestor: Vec<u8> = (0..len).map(|_| PROTEIN[rng.gen_range(0..PROTEIN.len())]).collect();
    let rows: Vec<Vec<u8>> = (0..n)
        .map(|_| {
            ancestor
                .iter()
                .map(|&c| match rng.gen_range(0..100) {
                    0..=9 => b'-',
                    10..=24 => PROTEIN[rng.gen_range(0..PROTEIN.len())],
                    _ => c,
                })
                .collect()
        })
        .collect();
    let names: Vec<String> = (0..n).map(|i| format!("seq{i}")).collect();
    Alignment::new(names, rows, SequenceType::AminoAcid).expect("generated rows share one length")
}

fn bench_count_pair(c: &mut Criterion) {
    let ali = generate_alignment(2, 10_000, 1);
    let (a, b) = (&ali.sequences()[0], &ali.sequences()[1]);

    let mut group = c.benchmark_group("count_pair");
    group.throughput(Throughput::Bytes(a.len() as u64));
    for engine in available_simd_engines() {
        group.bench_with_input(
            BenchmarkId::from_parameter(simd_engine_description(engine)),
            &engine,
            |bench, &engine| bench.iter(|| count_pair(engine, black_box(a), black_box(b), None, b'X')),
        );
    }
    group.finish();
}

fn bench_statistics(c: &mut Criterion) {
    let matrix = SimilarityMatrix::blosum62();
    let mut group = c.benchmark_group("statistics");
    group.sample_size(20);

    for &(n, len) in &[(50usize, 500usize), (200, 2_000)] {
        let ali = generate_alignment(n, len, 42);
        let label = format!("{n}x{len}");

        for engine in available_simd_engines() {
            let opt = StatsOpt::with_engine(engine);
            let id = format!("{label}/{engine:?}");

            group.bench_function(BenchmarkId::new("conservation", &id), |bench| {
                bench.iter(|| {
                    let mut sim = Similarity::with_options(&ali, opt.clone()).expect("valid options");
                    sim.set_similarity_matrix(&matrix);
                    sim.calculate_vectors(true).expect("BLOSUM62 covers the alphabet");
                    black_box(sim.mdk().map(<[f32]>::len))
                })
            });

            group.bench_function(BenchmarkId::new("seq_identity", &id), |bench| {
                let cleaner = Cleaner::with_options(&ali, opt.clone()).expect("valid options");
                bench.iter(|| black_box(cleaner.calculate_seq_identity()))
            });

            group.bench_function(BenchmarkId::new("spurious", &id), |bench| {
                let mut cleaner = Cleaner::with_options(&ali, opt.clone()).expect("valid options");
                let mut out = vec![0.0f32; n];
                bench.iter(|| {
                    cleaner
                        .calculate_spurious_vector(0.75, Some(&mut out))
                        .expect("valid arguments");
                    black_box(out[0])
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_count_pair, bench_statistics);
criterion_main!(benches);
