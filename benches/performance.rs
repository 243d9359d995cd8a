use criterion::{criterion_group, criterion_main, Criterion};
use lazyseq::prelude::*;

fn make_rows(rows: usize) -> Vec<(String, i64, f64)> {
    (0..rows)
        .map(|i| {
            (
                format!("group-{}", i % 16),
                (i * 7919 % 1000) as i64,
                (i % 10) as f64,
            )
        })
        .collect()
}

fn bench_pipeline(c: &mut Criterion) {
    let rows = Enumerable::from_vec(make_rows(4096));
    let pipeline = rows
        .filter(|r| r.1 % 3 != 0)
        .select(|r| r.1 * 2)
        .take_while(|v| *v < 10_000);
    c.bench_function("filter_select_take_while", |b| {
        b.iter(|| pipeline.sum::<i64>())
    });
}

fn bench_group_and_order(c: &mut Criterion) {
    let rows = Enumerable::from_vec(make_rows(4096));
    let totals = rows.group_by_with(|r| r.0.clone(), |r| r.2, |k, vs| (k, vs.sum::<f64>()));
    c.bench_function("group_by_with", |b| b.iter(|| totals.count()));

    let sorted = rows.order_by(|r| r.1).then_by_descending(|r| r.0.clone());
    c.bench_function("order_by_then_by", |b| b.iter(|| sorted.first().map(|r| r.1)));
}

fn bench_cache_replay(c: &mut Criterion) {
    let cached = Enumerable::range(0, 4096).unwrap().select(|x| x * x).as_cached();
    cached.fill();
    c.bench_function("cached_replay", |b| b.iter(|| cached.sum::<i64>()));
}

criterion_group!(lazyseq_benches, bench_pipeline, bench_group_and_order, bench_cache_replay);
criterion_main!(lazyseq_benches);
