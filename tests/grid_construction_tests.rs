//! Grid construction tests
//!
//! Required options, failure atomicity, initial render and renderer output.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use biggrid::{
    CellContent, CellId, CellRenderer, Grid, GridConfig, GridError, Layer, ManualScheduler,
    MemorySurface, RowDescriptor,
};
use common::{dataset, Dataset};

#[test]
fn test_missing_data_leaves_mount_untouched() {
    let surface = MemorySurface::new(400.0, 300.0);
    let config: GridConfig<Dataset, _> = GridConfig::new().mount(surface.clone());

    let result = Grid::new(config, ManualScheduler::new());

    assert!(matches!(result, Err(GridError::MissingData)));
    assert!(!surface.is_mounted());
    assert_eq!(surface.child_count(), 0);
    assert_eq!(surface.created_count(), 0);
}

#[test]
fn test_missing_mount_reported_first() {
    let config: GridConfig<Dataset, MemorySurface> = GridConfig::new();
    let result = Grid::new(config, ManualScheduler::new());
    assert!(matches!(result, Err(GridError::MissingMount)));

    let config: GridConfig<Dataset, MemorySurface> = GridConfig::new().data(dataset(3, 3));
    let result = Grid::new(config, ManualScheduler::new());
    assert!(matches!(result, Err(GridError::MissingMount)));
}

#[test]
fn test_invalid_row_height_leaves_mount_untouched() {
    let surface = MemorySurface::new(400.0, 300.0);
    let config = GridConfig::new()
        .mount(surface.clone())
        .data(dataset(3, 3))
        .rows(vec![RowDescriptor::new("a", 28.0), RowDescriptor::new("b", -5.0)]);

    let result = Grid::new(config, ManualScheduler::new());

    assert!(matches!(
        result,
        Err(GridError::InvalidSize { index: 1, .. })
    ));
    assert_eq!(surface.child_count(), 0);
}

struct FailingRenderer;

impl CellRenderer<String> for FailingRenderer {
    fn render(&self, row: usize, column: usize, _value: Option<&String>) -> biggrid::Result<CellContent> {
        if row == 2 && column == 1 {
            Err(GridError::Renderer("cannot render 2-1".to_string()))
        } else {
            Ok(CellContent::text("ok"))
        }
    }
}

#[test]
fn test_renderer_error_aborts_construction() {
    let surface = MemorySurface::new(400.0, 300.0);
    let config = GridConfig::new()
        .mount(surface.clone())
        .data(dataset(10, 4))
        .renderer(FailingRenderer);

    let result = Grid::new(config, ManualScheduler::new());

    assert!(matches!(result, Err(GridError::Renderer(_))));
    assert_eq!(surface.child_count(), 0);
}

#[test]
fn test_initial_render() {
    let (grid, surface) = common::build_grid(20_000, 50, 400.0, 600.0);

    let range = grid.view_range();
    assert_eq!(range.start_row(), Some(0));
    assert_eq!(range.end_row(), Some(22));
    assert_eq!(surface.extent(), (50.0 * 144.0, 20_000.0 * 28.0));
    assert_eq!(surface.layer_len(Layer::Cells), 23 * 4);
    assert_eq!(surface.layer_len(Layer::Counter), 23);
    assert_eq!(surface.layer_len(Layer::Header), 4);
    assert_eq!(grid.focus(), None);

    let first = &surface.layer_paints(Layer::Cells)[0];
    assert_eq!(first.token, Some(CellId::new(0, 0)));
    assert_eq!(first.content.as_str(), "row-0, col-0");
    assert!(first.class_name.contains("big-grid__cell--even"));
}

#[test]
fn test_closure_renderer_output_is_painted() {
    let surface = MemorySurface::new(400.0, 300.0);
    let config = GridConfig::new()
        .mount(surface.clone())
        .data(dataset(10, 4))
        .renderer(|row: usize, column: usize, value: Option<&String>| {
            CellContent::text(format!("<b>{}</b>", value.map_or("", String::as_str)))
                .with_class(if row == column { "diagonal" } else { "" })
                .with_title(format!("{row}/{column}"))
                .with_style("color", "red")
                .with_style("position", "static")
        });
    let _grid = Grid::new(config, ManualScheduler::new()).unwrap();

    let paints = surface.layer_paints(Layer::Cells);
    let diagonal = paints
        .iter()
        .find(|p| p.token == Some(CellId::new(1, 1)))
        .unwrap();
    assert_eq!(diagonal.content.as_str(), "<b>row-1, col-1</b>");
    assert_eq!(diagonal.title, "1/1");
    assert!(diagonal.class_name.ends_with("diagonal"));
    assert!(diagonal.css_text().starts_with("color:red;position:absolute;"));
    assert!(!diagonal.css_text().contains("static"));
}

#[test]
fn test_grids_are_independent() {
    let (mut first, first_surface) = common::build_grid(100, 10, 400.0, 280.0);
    let (second, second_surface) = common::build_grid(50, 5, 400.0, 280.0);

    first.on_click(Some(CellId::new(3, 3)));
    common::scroll(&mut first, &first_surface, 0.0, 500.0);
    common::settle(&mut first);

    assert_eq!(second.focus(), None);
    assert_eq!(second_surface.scroll(), (0.0, 0.0));
    assert_eq!(second.view_range().start_row(), Some(0));
    assert_eq!(first.focus(), Some(CellId::new(3, 3)));
}
