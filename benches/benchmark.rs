// Index build and query benchmarks over a synthetic catalog
use chemrank_core::{EngineConfig, ProductIndex, ProductRecord};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const TERMS: &[&str] = &[
    "kazan", "soğutma", "kule", "membran", "korozyon", "kireç", "biyosit", "antiskalant",
    "temizleyici", "inhibitör", "oksijen", "tutucu", "ters", "ozmoz", "buhar", "proses",
];

fn generate_record(id: usize) -> ProductRecord {
    let term = |k: usize| TERMS[(id * 7 + k * 3) % TERMS.len()];
    ProductRecord::new(
        format!("MAKS-{} {} {}", id, term(0), term(1)),
        format!("https://bimaks.com.tr/tr/urunler/{}/{}/maks-{}", term(2), term(3), id),
    )
    .with_category(term(4))
    .with_applications([term(5), term(6)])
    .with_problems_solved([term(7)])
    .with_description(format!("{} {} için {} {}.", term(8), term(9), term(10), term(11)))
}

fn generate_catalog(size: usize) -> Vec<ProductRecord> {
    (0..size).map(generate_record).collect()
}

fn benchmark_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    let config = EngineConfig::default();

    for size in [100, 1000, 5000].iter() {
        let records = generate_catalog(*size);
        group.bench_with_input(BenchmarkId::new("chemrank", size), &records, |b, records| {
            b.iter(|| ProductIndex::build(black_box(records.clone()), &config));
        });
    }

    group.finish();
}

fn benchmark_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let index = ProductIndex::build(generate_catalog(5000), &EngineConfig::default());

    for top_k in [1, 3, 10].iter() {
        group.bench_with_input(BenchmarkId::new("top_k", top_k), top_k, |b, &top_k| {
            b.iter(|| index.search(black_box("soğutma kulesi korozyon inhibitör"), top_k));
        });
    }

    group.bench_function("forced_tier", |b| {
        b.iter(|| index.search(black_box("elektrik faturası"), 3));
    });

    group.finish();
}

criterion_group!(benches, benchmark_build, benchmark_search);
criterion_main!(benches);
