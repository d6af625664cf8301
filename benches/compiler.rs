use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dscomp::CompilerCache;

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("compiler_build");
    for (p, o) in [(1, 6), (2, 4), (3, 3), (4, 4), (6, 3)] {
        group.bench_with_input(
            BenchmarkId::new("cold", format!("{p}x{o}")),
            &(p, o),
            |b, &(p, o)| {
                b.iter(|| {
                    let mut cache = CompilerCache::new();
                    black_box(cache.get_or_build(black_box(p), black_box(o)))
                })
            },
        );
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("compiler_lookup");
    for (p, o) in [(2, 2), (4, 4)] {
        dscomp::compiler(p, o);
        group.bench_with_input(
            BenchmarkId::new("cached", format!("{p}x{o}")),
            &(p, o),
            |b, &(p, o)| b.iter(|| black_box(dscomp::compiler(black_box(p), black_box(o)))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_lookup);
criterion_main!(benches);
