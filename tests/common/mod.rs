//! Common test utilities for building headless grids.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use biggrid::{Grid, GridConfig, ManualScheduler, MemorySurface, UpdateClass};

pub type Dataset = Vec<Vec<String>>;
pub type TestGrid = Grid<Dataset, MemorySurface, ManualScheduler>;

/// `rows` x `columns` values of the form `"row-r, col-c"`.
#[must_use]
pub fn dataset(rows: usize, columns: usize) -> Dataset {
    (0..rows)
        .map(|r| (0..columns).map(|c| format!("row-{r}, col-{c}")).collect())
        .collect()
}

/// Grid over `dataset(rows, columns)` in a `width` x `height` surface.
///
/// Returns a second handle to the surface for inspection.
pub fn build_grid(rows: usize, columns: usize, width: f64, height: f64) -> (TestGrid, MemorySurface) {
    let surface = MemorySurface::new(width, height);
    let config = GridConfig::new()
        .mount(surface.clone())
        .data(dataset(rows, columns));
    let grid = Grid::new(config, ManualScheduler::new()).expect("grid should build");
    (grid, surface)
}

/// Scroll the surface and deliver the scroll event, without running the
/// deferred pass.
pub fn scroll(grid: &mut TestGrid, surface: &MemorySurface, x: f64, y: f64) {
    surface.scroll_to(x, y);
    grid.on_scroll().unwrap();
}

/// Fire the pending scroll frame.
pub fn settle(grid: &mut TestGrid) -> bool {
    grid.run_pending(UpdateClass::Scroll).unwrap()
}
