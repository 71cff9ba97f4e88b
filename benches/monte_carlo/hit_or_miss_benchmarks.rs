use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mc_integral::math::monte_carlo::{convergence_sweep, IntegrationRequest, SampleCount};

fn bench_hit_or_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_or_miss");

    for &points in &[1_000usize, 10_000, 100_000] {
        let request = IntegrationRequest::new(1.0, 1.0, f64::sqrt)
            .unwrap()
            .with_sample_count(SampleCount::new(points).unwrap())
            .with_seed(42);
        group.bench_with_input(BenchmarkId::new("sqrt", points), &request, |b, request| {
            b.iter(|| black_box(request.estimate()))
        });
    }

    group.finish();
}

fn bench_sweep(c: &mut Criterion) {
    let counts: Vec<SampleCount> = [1_000, 10_000, 100_000, 1_000_000]
        .iter()
        .map(|&n| SampleCount::new(n).unwrap())
        .collect();

    c.bench_function("convergence_sweep", |b| {
        b.iter(|| black_box(convergence_sweep(1.0, 1.0, f64::sqrt, &counts, 7).unwrap()))
    });
}

criterion_group!(benches, bench_hit_or_miss, bench_sweep);
criterion_main!(benches);
