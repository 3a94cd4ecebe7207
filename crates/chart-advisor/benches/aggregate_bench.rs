use chart_advisor::{aggregate_in, Granularity, Observation};
use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn gen_series(n: usize) -> Vec<Observation> {
    let t0 = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    (0..n).map(|i| Observation::new(t0 + Duration::minutes(i as i64 * 7), (i % 97) as f64)).collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let data = gen_series(100_000);
    for g in [Granularity::Daily, Granularity::Weekly, Granularity::Monthly] {
        group.bench_with_input(BenchmarkId::from_parameter(g), &g, |b, &g| {
            b.iter(|| black_box(aggregate_in(&data, g, &Utc)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);
