use boundlife::{CellState, Grid, RuleEngine};
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};

fn make_grid(width: i32, height: i32) -> Grid {
    let mut grid = Grid::new(width, height).expect("valid bench grid");
    for y in 0..height {
        for x in 0..width {
            if (x + y) % 3 == 0 {
                grid.set(x, y, CellState::Alive).expect("in bounds");
            }
        }
    }
    grid
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");
    for size in [64, 100, 256] {
        let grid = make_grid(size, size);

        group.bench_with_input(BenchmarkId::new("fresh", size), &grid, |b, grid| {
            b.iter_batched(
                || (RuleEngine::default(), grid.clone()),
                |(mut engine, mut grid)| engine.step(&mut grid),
                BatchSize::LargeInput,
            );
        });

        // scratch buffers stay allocated between generations
        group.bench_with_input(BenchmarkId::new("reused", size), &grid, |b, grid| {
            let mut engine = RuleEngine::default();
            b.iter_batched(
                || grid.clone(),
                |mut grid| engine.step(&mut grid),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
