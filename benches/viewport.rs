//! Benchmarks for range computation and the deferred cell pass.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::cast_precision_loss
)]

use biggrid::{
    Grid, GridConfig, GridLayout, ManualScheduler, MemorySurface, UpdateClass, Viewport,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn dataset(rows: usize, columns: usize) -> Vec<Vec<String>> {
    (0..rows)
        .map(|r| (0..columns).map(|c| format!("row-{r}, col-{c}")).collect())
        .collect()
}

/// Range lookup at the top, middle and bottom of large uniform grids
fn bench_view_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_range");

    for rows in [1_000_usize, 20_000, 200_000] {
        let layout = GridLayout::with_defaults(rows, 50);
        let bottom = layout.total_height() - 600.0;
        group.bench_with_input(BenchmarkId::from_parameter(rows), &layout, |b, layout| {
            b.iter(|| {
                for scroll_y in [0.0, bottom / 2.0, bottom] {
                    let viewport = Viewport::new(1200.0, 600.0).with_scroll(0.0, scroll_y);
                    black_box(viewport.view_range(black_box(layout), 1));
                }
            });
        });
    }

    group.finish();
}

/// One scroll event plus the frame that follows it, 20000 x 50 grid
fn bench_scroll_pass(c: &mut Criterion) {
    let surface = MemorySurface::new(1200.0, 600.0);
    let config = GridConfig::new()
        .mount(surface.clone())
        .data(dataset(20_000, 50));
    let mut grid = Grid::new(config, ManualScheduler::new()).expect("grid should build");

    let mut step = 0_usize;
    c.bench_function("scroll_pass_20000x50", |b| {
        b.iter(|| {
            step = (step + 1) % 1_000;
            surface.scroll_to(step as f64 * 7.0, step as f64 * 53.0);
            grid.on_scroll().unwrap();
            black_box(grid.run_pending(UpdateClass::Scroll).unwrap());
        });
    });
}

criterion_group!(benches, bench_view_range, bench_scroll_pass);
criterion_main!(benches);
