use chart_advisor::{suggest_chart_types, Observation};
use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn gen_series(n: usize) -> Vec<Observation> {
    let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..n)
        .map(|i| {
            // waveform with drift and a handful of categories
            let v = (i as f64 * 0.01).sin() * 10.0 + i as f64 * 0.001 + 20.0;
            Observation::new(t0 + Duration::minutes(i as i64), v).with_category(format!("c{}", i % 6))
        })
        .collect()
}

fn bench_suggest(c: &mut Criterion) {
    let mut group = c.benchmark_group("suggest_chart_types");
    for &n in &[1_000usize, 10_000usize, 100_000usize] {
        let data = gen_series(n);
        group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}")), &data, |b, d| {
            b.iter(|| black_box(suggest_chart_types(d)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_suggest);
criterion_main!(benches);
