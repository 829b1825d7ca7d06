use std::collections::HashMap;

use biomet_stats::cmc::{build_ranked_matches, cmc_curve, Comparison, MissingTruthPolicy};
use biomet_stats::rates::{compute_rate_curve, ImpostorScores, Polarity};
use biomet_stats::stats::{Stats, StatsConfig};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn random_f64(n: usize, seed: u64) -> Vec<f64> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            (state >> 11) as f64 / (1u64 << 53) as f64
        })
        .collect()
}

fn bench_rate_curve(c: &mut Criterion) {
    let mut group = c.benchmark_group("rate_curve");

    // Genuine scores shifted up so the populations overlap only partially.
    let genuine: Vec<f64> = random_f64(10_000, 42).into_iter().map(|x| x + 0.5).collect();
    let impostor = random_f64(100_000, 137);

    group.bench_function("10k_genuine_100k_impostor", |b| {
        b.iter(|| {
            compute_rate_curve(
                black_box(&genuine),
                ImpostorScores::Raw(black_box(&impostor)),
                Polarity::Similarity,
            )
        })
    });

    let counts: Vec<u64> = random_f64(1_000, 7)
        .into_iter()
        .map(|x| (x * 1_000.0) as u64)
        .collect();
    let genuine_int: Vec<f64> = random_f64(10_000, 9)
        .into_iter()
        .map(|x| (x * 1_000.0).floor() + 300.0)
        .collect();

    group.bench_function("histogram_1k_bins", |b| {
        b.iter(|| {
            compute_rate_curve(
                black_box(&genuine_int),
                ImpostorScores::Histogram(black_box(&counts)),
                Polarity::Similarity,
            )
        })
    });

    group.finish();
}

fn bench_full_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("stats");

    let genuine: Vec<f64> = random_f64(5_000, 42).into_iter().map(|x| x + 0.5).collect();
    let impostor = random_f64(50_000, 137);
    let config = StatsConfig::default();

    group.bench_function("5k_genuine_50k_impostor", |b| {
        b.iter(|| {
            Stats::compute(
                "bench",
                black_box(&genuine),
                ImpostorScores::Raw(black_box(&impostor)),
                &config,
            )
        })
    });

    group.finish();
}

fn bench_cmc(c: &mut Criterion) {
    let mut group = c.benchmark_group("cmc");

    // 500 queries against a 200-identity gallery.
    let scores = random_f64(500 * 200, 42);
    let comparisons: Vec<Comparison> = scores
        .iter()
        .enumerate()
        .map(|(i, &score)| Comparison {
            query: format!("q{}", i / 200),
            candidate: format!("id{}", i % 200),
            score,
        })
        .collect();
    let truth: HashMap<String, String> = (0..500)
        .map(|q| (format!("q{q}"), format!("id{}", q % 200)))
        .collect();

    group.bench_function("500q_200_gallery_rank20", |b| {
        b.iter(|| {
            let ranked = build_ranked_matches(
                black_box(&comparisons),
                &truth,
                Polarity::Similarity,
                MissingTruthPolicy::Fail,
            )
            .unwrap();
            cmc_curve(&ranked, 20)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_rate_curve, bench_full_stats, bench_cmc);
criterion_main!(benches);
