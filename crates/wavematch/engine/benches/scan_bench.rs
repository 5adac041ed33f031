//! Benchmarks for the matching engine.
//!
//! Run with: `cargo bench -p wavematch-engine`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use wavematch_engine::{plan_scan, standardize, CorrelationMatcher, ScanPlan};
use wavematch_types::{ChannelSeries, MatchingParams, ReferenceWaveform, ScanBounds, TimeSeries};

fn generate_series(n: usize) -> Vec<f64> {
    // Simple LCG for reproducibility
    let mut values = Vec::with_capacity(n);
    let mut level = 0.0;
    let mut seed = 42u64;

    for _ in 0..n {
        seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        let upper_bits = u32::try_from(seed >> 33).unwrap_or(0);
        let random = f64::from(upper_bits) / f64::from(u32::MAX);
        level += random - 0.5;
        values.push(level);
    }

    values
}

fn reference(len: usize) -> ReferenceWaveform {
    let xs: Vec<f64> = (0..len).map(|i| i as f64).collect();
    let ys: Vec<f64> = xs
        .iter()
        .map(|x| (x / len as f64 * std::f64::consts::TAU).sin())
        .collect();
    ReferenceWaveform::new(xs, ys).unwrap_or_else(|e| panic!("invalid reference: {e}"))
}

fn bench_matcher(c: &mut Criterion) {
    let mut group = c.benchmark_group("CorrelationMatcher");
    let reference_std = standardize(reference(60).y());

    for size in [1_000usize, 10_000] {
        let ys = generate_series(size);
        let xs: Vec<f64> = (0..size).map(|i| i as f64).collect();
        let series = TimeSeries::new(xs, ys).unwrap_or_default();
        let segment = series.segment(0, series.len());
        let y_std = standardize(segment.y());
        let matcher = CorrelationMatcher::new(&reference_std, 40, 12, 0.8);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("window_40", size), &size, |b, _| {
            b.iter(|| {
                matcher
                    .as_ref()
                    .map(|m| m.find_matches("bench", black_box(&segment), black_box(&y_std), || {}))
            });
        });
    }

    group.finish();
}

fn bench_full_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("Scan");
    group.sample_size(10);

    for reference_len in [20usize, 60] {
        let channels: Vec<ChannelSeries> = (0..4)
            .map(|k| {
                let ys = generate_series(2_000 + k * 100);
                let xs = (0..ys.len()).map(|i| i as f64).collect();
                ChannelSeries::new(format!("ch{k}"), TimeSeries::new(xs, ys).unwrap_or_default())
            })
            .collect();
        let plan = plan_scan(
            &reference(reference_len),
            channels,
            ScanBounds::unbounded(),
            MatchingParams::default(),
        );
        let Ok(ScanPlan::Ready(scan)) = plan else {
            continue;
        };

        group.bench_with_input(
            BenchmarkId::new("reference_len", reference_len),
            &reference_len,
            |b, _| b.iter(|| scan.run(Vec::new())),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_matcher, bench_full_scan);
criterion_main!(benches);
