use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vitrine::{
    Catalog, Filter, FilterEvaluator, InvertedIndex, LexicalSearcher, RawRecord, Recommender,
    SimpleAnalyzer, stats,
};

const TYPES: &[&str] = &[
    "Car Vacuum Cleaner",
    "Bluetooth Speaker",
    "LED Desk Lamp",
    "Blender",
    "Wireless Mouse",
];
const BRANDS: &[&str] = &["Eureka", "Boat", "Philips", "Logitech", "Bajaj", "Havells"];
const COLORS: &[&str] = &["Black", "White", "Red", "Blue", "Silver"];

fn generate_records(count: usize) -> Vec<RawRecord> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|i| {
            RawRecord::new(format!("product_{}", i))
                .add_field("Type", TYPES[rng.random_range(0..TYPES.len())])
                .add_field("Brand", BRANDS[rng.random_range(0..BRANDS.len())])
                .add_field("Color", COLORS[rng.random_range(0..COLORS.len())])
                .add_field("Weight", rng.random_range(0.1..5.0))
        })
        .collect()
}

fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("Index Build");
    group.sample_size(10);

    for count in [1000, 10000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            let catalog = Catalog::build(generate_records(count)).unwrap();
            b.iter(|| InvertedIndex::build(&catalog, Arc::new(SimpleAnalyzer::new())))
        });
    }
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let catalog = Catalog::build(generate_records(10000)).unwrap();
    let index = InvertedIndex::build(&catalog, Arc::new(SimpleAnalyzer::new()));

    let mut group = c.benchmark_group("Queries");
    group.bench_function("search", |b| {
        let searcher = LexicalSearcher::new(&index);
        b.iter(|| searcher.search("wireless bluetooth speaker", 10).unwrap())
    });
    group.bench_function("filter", |b| {
        let filter = Filter::new()
            .contains("Type", "lamp")
            .range("Weight", 1.0, 3.0);
        let evaluator = FilterEvaluator::new(&catalog);
        b.iter(|| evaluator.evaluate(&filter).unwrap())
    });
    group.bench_function("recommend", |b| {
        let recommender = Recommender::new(&catalog);
        b.iter(|| recommender.recommend("product_0", 5).unwrap())
    });
    group.bench_function("summarize", |b| {
        b.iter(|| stats::summarize(&catalog, stats::DEFAULT_TOP_N))
    });
    group.finish();
}

criterion_group!(benches, bench_index_build, bench_queries);
criterion_main!(benches);
