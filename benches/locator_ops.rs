//! Benchmarks for compiled locator queries.
//!
//! The locator is built from an in-memory index so that only lookup,
//! materialization and pattern matching are measured.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vrepo::dump::build_index;
use vrepo::index::CompiledIndex;
use vrepo::locator::{CompiledLocator, ResourceLocator};
use vrepo::path;
use vrepo::pattern::GlobPattern;
use vrepo::repository::ResourceRepository;
use vrepo::resource::ResourceKind;

/// Compiles a repository with `num_files` files spread over modules of 100.
fn create_index(num_files: usize) -> CompiledIndex {
    let mut repo = ResourceRepository::new();
    for i in 0..num_files {
        let virtual_path = format!("/app/module{}/file{}", i / 100, i);
        let location = format!("res/module{}/file{}", i / 100, i);
        repo.bind(&virtual_path, ResourceKind::File, &location)
            .unwrap();
    }
    build_index(&repo)
}

fn bench_get_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("locator_get_path");
    let index = create_index(1000);

    group.bench_function("cold", |b| {
        b.iter_batched(
            || CompiledLocator::from_index(index.clone()),
            |mut locator| locator.get_path(black_box("/app/module5/file512")).unwrap(),
            criterion::BatchSize::SmallInput,
        )
    });

    let mut locator = CompiledLocator::from_index(index.clone());
    group.bench_function("memoized", |b| {
        b.iter(|| locator.get_path(black_box("/app/module5/file512")).unwrap())
    });

    group.finish();
}

fn bench_get_pattern(c: &mut Criterion) {
    let mut group = c.benchmark_group("locator_get_pattern");

    for count in [100, 1000, 5000] {
        let index = create_index(count);
        let pattern = GlobPattern::new("/app/module0/*").unwrap();
        group.bench_with_input(BenchmarkId::new("prefixed", count), &count, |b, _| {
            b.iter_batched(
                || CompiledLocator::from_index(index.clone()),
                |mut locator| locator.get_pattern(black_box(&pattern)).unwrap(),
                criterion::BatchSize::SmallInput,
            )
        });
    }

    let index = create_index(1000);
    let pattern = GlobPattern::new("/*/*/file1*").unwrap();
    group.bench_function("unprefixed", |b| {
        b.iter_batched(
            || CompiledLocator::from_index(index.clone()),
            |mut locator| locator.get_pattern(black_box(&pattern)).unwrap(),
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_normalize");

    group.bench_function("clean", |b| {
        b.iter(|| path::normalize(black_box("/webmozart/puli/file1")))
    });
    group.bench_function("dot_segments", |b| {
        b.iter(|| path::normalize(black_box("//webmozart/./puli/../puli//file1/..")))
    });

    group.finish();
}

criterion_group!(benches, bench_get_path, bench_get_pattern, bench_normalize);
criterion_main!(benches);
