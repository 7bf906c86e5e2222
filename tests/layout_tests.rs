//! Layout model tests
//!
//! Offsets, totals, defaults drawn from the dataset, explicit descriptors and
//! size validation.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use biggrid::layout::AxisSource;
use biggrid::{
    ColumnDescriptor, Grid, GridConfig, GridError, GridLayout, GridOptions, Label, ManualScheduler,
    MemorySurface, RowDescriptor,
};
use common::dataset;

#[test]
fn test_offsets_are_cumulative() {
    let rows = vec![
        RowDescriptor::new("a", 10.0),
        RowDescriptor::new("b", 40.0),
        RowDescriptor::default(),
        RowDescriptor::new("d", 0.0),
        RowDescriptor::new("e", 15.5),
    ];
    let layout = GridLayout::build(
        AxisSource::Explicit(rows),
        AxisSource::Generated(3),
        &GridOptions::default(),
    )
    .unwrap();

    let specs = layout.rows();
    for pair in specs.windows(2) {
        assert_eq!(pair[0].offset + pair[0].size, pair[1].offset);
        assert!(pair[0].offset <= pair[1].offset);
    }
    assert_eq!(specs[0].offset, 0.0);
    assert_eq!(specs[2].size, 28.0);
    assert_eq!(specs[2].name, Label::from(2_usize));
    assert_eq!(layout.total_height(), 10.0 + 40.0 + 28.0 + 0.0 + 15.5);
    assert_eq!(layout.total_width(), 3.0 * 144.0);
}

#[test]
fn test_empty_axes_have_zero_extent() {
    let layout = GridLayout::with_defaults(0, 0);
    assert_eq!(layout.total_height(), 0.0);
    assert_eq!(layout.total_width(), 0.0);
    assert!(layout.row(0).is_none());
}

#[test]
fn test_counts_default_to_dataset() {
    let surface = MemorySurface::new(400.0, 300.0);
    let config = GridConfig::new().mount(surface).data(dataset(250, 7));
    let grid = Grid::new(config, ManualScheduler::new()).unwrap();

    assert_eq!(grid.layout().row_count(), 250);
    assert_eq!(grid.layout().column_count(), 7);
    assert_eq!(grid.layout().total_height(), 250.0 * 28.0);
    assert_eq!(grid.layout().total_width(), 7.0 * 144.0);
}

#[test]
fn test_empty_dataset_has_no_columns() {
    let surface = MemorySurface::new(400.0, 300.0);
    let config = GridConfig::new()
        .mount(surface.clone())
        .data(Vec::<Vec<String>>::new());
    let grid = Grid::new(config, ManualScheduler::new()).unwrap();

    assert_eq!(grid.layout().row_count(), 0);
    assert_eq!(grid.layout().column_count(), 0);
    assert!(surface.is_mounted());
    assert!(surface.cell_tokens().is_empty());
}

#[test]
fn test_explicit_rows_do_not_imply_explicit_columns() {
    let surface = MemorySurface::new(400.0, 300.0);
    let config = GridConfig::new()
        .mount(surface)
        .data(dataset(50, 4))
        .rows(vec![RowDescriptor::new("only", 50.0); 3]);
    let grid = Grid::new(config, ManualScheduler::new()).unwrap();

    assert_eq!(grid.layout().row_count(), 3);
    assert_eq!(grid.layout().column_count(), 4);
    assert_eq!(grid.layout().total_height(), 150.0);
}

#[test]
fn test_options_change_defaults() {
    let options = GridOptions {
        overscan: 2,
        default_row_height: 20.0,
        default_column_width: 100.0,
    };
    let layout = GridLayout::build(
        AxisSource::Generated(10),
        AxisSource::Explicit(vec![
            ColumnDescriptor::default(),
            ColumnDescriptor::new("wide", 300.0),
        ]),
        &options,
    )
    .unwrap();

    assert_eq!(layout.total_height(), 200.0);
    assert_eq!(layout.column(0).unwrap().size, 100.0);
    assert_eq!(layout.column(1).unwrap().offset, 100.0);
    assert_eq!(layout.total_width(), 400.0);
}

#[test]
fn test_invalid_sizes_rejected() {
    for size in [-1.0, f64::NAN, f64::INFINITY] {
        let result = GridLayout::build(
            AxisSource::Generated(2),
            AxisSource::Explicit(vec![
                ColumnDescriptor::new("ok", 10.0),
                ColumnDescriptor::new("bad", size),
            ]),
            &GridOptions::default(),
        );
        match result {
            Err(GridError::InvalidSize { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected InvalidSize, got {other:?}"),
        }
    }
}

#[test]
fn test_column_key_selects_value() {
    let surface = MemorySurface::new(1000.0, 300.0);
    let config = GridConfig::new()
        .mount(surface.clone())
        .data(dataset(5, 4))
        .columns(vec![
            ColumnDescriptor::new("third", 144.0).with_key(2),
            ColumnDescriptor::new("first", 144.0).with_key(0),
        ]);
    let _grid = Grid::new(config, ManualScheduler::new()).unwrap();

    let paints = surface.layer_paints(biggrid::Layer::Cells);
    assert_eq!(paints[0].content.as_str(), "row-0, col-2");
    assert_eq!(paints[1].content.as_str(), "row-0, col-0");

    let headers = surface.layer_paints(biggrid::Layer::Header);
    assert_eq!(headers[0].title, "third");
    assert_eq!(headers[1].title, "first");
}
