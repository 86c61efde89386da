use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use radix_params::{SortingTechnique, Tree};

fn routes(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| match i % 4 {
            0 => format!("/api/v{}/users", i),
            1 => format!("/api/v{}/users/@id", i),
            2 => format!("/api/v{}/users/@id/posts/@post", i),
            _ => format!("/static/{}/*path", i),
        })
        .collect()
}

fn build(routes: &[String]) -> Tree<usize> {
    let mut tree = Tree::new();
    for (i, route) in routes.iter().enumerate() {
        tree.add(route, i).unwrap();
    }
    tree
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");
    for &count in &[10usize, 100, 1000] {
        let mut routes = routes(count);
        routes.shuffle(&mut StdRng::seed_from_u64(7));
        group.bench_with_input(BenchmarkId::from_parameter(count), &routes, |b, routes| {
            b.iter(|| build(black_box(routes)))
        });
    }
    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let tree = build(&routes(1000));
    let mut group = c.benchmark_group("get");
    group.bench_function("literal", |b| {
        b.iter(|| tree.get(black_box("/api/v500/users")))
    });
    group.bench_function("params", |b| {
        b.iter(|| tree.get(black_box("/api/v502/users/42/posts/7")))
    });
    group.bench_function("catch_all", |b| {
        b.iter(|| tree.get(black_box("/static/503/css/site.css")))
    });
    group.bench_function("miss", |b| {
        b.iter(|| tree.get(black_box("/api/v9999/nothing")))
    });
    group.finish();
}

fn bench_del(c: &mut Criterion) {
    let routes = routes(1000);
    c.bench_function("del_all_1000", |b| {
        b.iter_batched(
            || build(&routes),
            |mut tree| {
                for route in &routes {
                    tree.del(route);
                }
                tree
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_sort(c: &mut Criterion) {
    let tree = build(&routes(1000));
    c.bench_function("sort_priority_1000", |b| {
        b.iter_batched(
            || tree.clone(),
            |mut tree| {
                tree.sort(SortingTechnique::Priority);
                tree
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_add, bench_get, bench_del, bench_sort);
criterion_main!(benches);
