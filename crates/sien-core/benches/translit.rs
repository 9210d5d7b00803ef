use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use sien_core::{encode, GraphemeScheme, Transliterator};

static INPUTS: &[(&str, &str)] = &[
    ("short", "ගම"),
    ("medium", "අම්මා"),
    ("long", "බලාපොරොත්තුව"),
];

fn bench_encode(c: &mut Criterion) {
    let scheme = GraphemeScheme::from_embedded();
    let mut group = c.benchmark_group("translit/encode");
    for &(label, word) in INPUTS {
        group.bench_with_input(BenchmarkId::new(label, word.len()), &word, |b, &word| {
            b.iter(|| encode(&scheme, word));
        });
    }
    group.finish();
}

fn bench_full(c: &mut Criterion) {
    let translit = Transliterator::from_embedded();
    let mut group = c.benchmark_group("translit/full");
    for &(label, word) in INPUTS {
        group.bench_with_input(BenchmarkId::new(label, word.len()), &word, |b, &word| {
            b.iter(|| translit.transliterate(word));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_full);
criterion_main!(benches);
