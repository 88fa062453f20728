//! Benchmarks for edit distance and candidate ranking

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use namefuzz_core::{rank_candidates, EditDistance, Options};

fn bench_single_word(c: &mut Criterion) {
    let (a, b) = ("jingleheimer", "jingelhiemer");

    let mut group = c.benchmark_group("distance");
    group.throughput(Throughput::Bytes((a.len() + b.len()) as u64));

    group.bench_function("single_word", |bench| {
        let mut engine = EditDistance::new();
        bench.iter(|| black_box(engine.distance(black_box(a), black_box(b))))
    });

    group.finish();
}

fn bench_multi_word(c: &mut Criterion) {
    let a = "maria de los angeles fernandez garcia lopez ".repeat(4);
    let b = "mariah de las angelas fernandes garsia lopes ".repeat(4);

    let mut group = c.benchmark_group("distance");
    group.throughput(Throughput::Bytes((a.len() + b.len()) as u64));

    group.bench_function("multi_word", |bench| {
        let mut engine = EditDistance::new();
        bench.iter(|| black_box(engine.distance(black_box(&a), black_box(&b))))
    });

    group.finish();
}

fn bench_ranking(c: &mut Criterion) {
    let names = [
        "John Doe", "Jane Smith", "Bob Johnson", "Alice Brown", "Charlie Davis",
        "José García", "Mary-Jane Watson", "John O'Connor",
    ];
    let candidates: Vec<String> = (0..500).map(|i| names[i % names.len()].to_string()).collect();
    let options = Options::default();

    let mut group = c.benchmark_group("search");
    group.throughput(Throughput::Elements(candidates.len() as u64));

    group.bench_function("rank_500", |bench| {
        bench.iter(|| {
            let ranked = rank_candidates(black_box("Jon Doe"), &candidates, &options);
            black_box(ranked.len())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_single_word, bench_multi_word, bench_ranking);
criterion_main!(benches);
