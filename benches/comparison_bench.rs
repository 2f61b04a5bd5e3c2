use criterion::{criterion_group, criterion_main, Criterion};
use grid_search::{run, Algorithm, Headless, ObstacleInjector, Point, SearchGrid};
use std::hint::black_box;

fn queue_based_bench(c: &mut Criterion) {
    for algorithm in [
        Algorithm::BreadthFirst,
        Algorithm::UniformCost,
        Algorithm::Bidirectional,
    ] {
        c.bench_function(format!("standard board, {algorithm}").as_str(), |b| {
            b.iter(|| {
                let mut grid = SearchGrid::standard();
                let mut injector = ObstacleInjector::disabled();
                black_box(run(algorithm, &mut grid, &mut injector, &mut Headless))
            })
        });
    }
}

fn stack_based_bench(c: &mut Criterion) {
    // The depth-bounded searches re-expand positions at decreasing depths,
    // so they get a smaller board than the queue-based group.
    for algorithm in [
        Algorithm::DepthFirst,
        Algorithm::DepthLimited { limit: 16 },
        Algorithm::IterativeDeepening,
    ] {
        c.bench_function(format!("11x9 board, {algorithm}").as_str(), |b| {
            b.iter(|| {
                let mut grid = SearchGrid::new(11, 9, Point::new(1, 1), Point::new(9, 7));
                let mut injector = ObstacleInjector::disabled();
                black_box(run(algorithm, &mut grid, &mut injector, &mut Headless))
            })
        });
    }
}

fn dynamic_board_bench(c: &mut Criterion) {
    for algorithm in [Algorithm::BreadthFirst, Algorithm::UniformCost] {
        c.bench_function(
            format!("standard board, {algorithm} with injection").as_str(),
            |b| {
                b.iter(|| {
                    let mut grid = SearchGrid::standard();
                    let mut injector = ObstacleInjector::new(0.05, 0);
                    black_box(run(algorithm, &mut grid, &mut injector, &mut Headless))
                })
            },
        );
    }
}

criterion_group!(
    benches,
    queue_based_bench,
    stack_based_bench,
    dynamic_board_bench
);
criterion_main!(benches);
