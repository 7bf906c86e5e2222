//! Pre-computed track offsets for a grid.
//!
//! Offsets are computed once when the grid is built, so every later lookup
//! (range computation, placement of pooled nodes, scroll deltas) is a plain
//! table read.

use crate::config::GridOptions;
use crate::error::{Axis, GridError, Result};
use crate::types::{ColumnDescriptor, Label, RowDescriptor};

/// One row or column after layout.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackSpec {
    /// Rows: the row index. Columns: the position in a data row supplying
    /// this column's values.
    pub key: usize,
    pub name: Label,
    /// Height of a row or width of a column
    pub size: f64,
    /// Cumulative size of all preceding tracks
    pub offset: f64,
}

impl TrackSpec {
    /// Far edge of the track (`offset + size`).
    pub fn end(&self) -> f64 {
        self.offset + self.size
    }
}

pub type RowSpec = TrackSpec;
pub type ColumnSpec = TrackSpec;

/// Where the descriptors of one axis come from.
#[derive(Debug, Clone)]
pub enum AxisSource<T> {
    /// Caller-supplied, in display order
    Explicit(Vec<T>),
    /// One default descriptor per index
    Generated(usize),
}

/// Row and column tables plus total extents.
#[derive(Debug, Clone, Default)]
pub struct GridLayout {
    rows: Vec<RowSpec>,
    columns: Vec<ColumnSpec>,
    total_height: f64,
    total_width: f64,
}

impl GridLayout {
    /// Build the layout, validating every size before anything is returned.
    pub fn build(
        rows: AxisSource<RowDescriptor>,
        columns: AxisSource<ColumnDescriptor>,
        options: &GridOptions,
    ) -> Result<Self> {
        let row_tracks = match rows {
            AxisSource::Explicit(list) => list
                .into_iter()
                .enumerate()
                .map(|(i, row)| {
                    (
                        i,
                        row.name.unwrap_or_else(|| Label::from(i)),
                        row.height.unwrap_or(options.default_row_height),
                    )
                })
                .collect::<Vec<_>>(),
            AxisSource::Generated(count) => (0..count)
                .map(|i| (i, Label::from(i), options.default_row_height))
                .collect(),
        };

        let column_tracks = match columns {
            AxisSource::Explicit(list) => list
                .into_iter()
                .enumerate()
                .map(|(i, column)| {
                    (
                        column.key.unwrap_or(i),
                        column.name.unwrap_or_else(|| Label::from(i)),
                        column.width.unwrap_or(options.default_column_width),
                    )
                })
                .collect::<Vec<_>>(),
            AxisSource::Generated(count) => (0..count)
                .map(|i| (i, Label::from(i), options.default_column_width))
                .collect(),
        };

        let (rows, total_height) = accumulate(Axis::Row, row_tracks)?;
        let (columns, total_width) = accumulate(Axis::Column, column_tracks)?;

        Ok(GridLayout {
            rows,
            columns,
            total_height,
            total_width,
        })
    }

    /// Layout with `row_count` x `column_count` default-sized tracks.
    pub fn with_defaults(row_count: usize, column_count: usize) -> Self {
        let options = GridOptions::default();
        let (rows, total_height) = uniform(row_count, options.default_row_height);
        let (columns, total_width) = uniform(column_count, options.default_column_width);
        GridLayout {
            rows,
            columns,
            total_height,
            total_width,
        }
    }

    pub fn rows(&self) -> &[RowSpec] {
        &self.rows
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn row(&self, index: usize) -> Option<&RowSpec> {
        self.rows.get(index)
    }

    pub fn column(&self, index: usize) -> Option<&ColumnSpec> {
        self.columns.get(index)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn total_height(&self) -> f64 {
        self.total_height
    }

    pub fn total_width(&self) -> f64 {
        self.total_width
    }

    /// Offset of row `index`, or 0 when out of range.
    pub fn row_offset(&self, index: usize) -> f64 {
        self.rows.get(index).map_or(0.0, |r| r.offset)
    }

    /// Offset of column `index`, or 0 when out of range.
    pub fn column_offset(&self, index: usize) -> f64 {
        self.columns.get(index).map_or(0.0, |c| c.offset)
    }
}

fn accumulate(axis: Axis, tracks: Vec<(usize, Label, f64)>) -> Result<(Vec<TrackSpec>, f64)> {
    let mut specs = Vec::with_capacity(tracks.len());
    let mut offset = 0.0;

    for (index, (key, name, size)) in tracks.into_iter().enumerate() {
        if !size.is_finite() || size < 0.0 {
            return Err(GridError::InvalidSize { axis, index, size });
        }
        specs.push(TrackSpec {
            key,
            name,
            size,
            offset,
        });
        offset += size;
    }

    Ok((specs, offset))
}

fn uniform(count: usize, size: f64) -> (Vec<TrackSpec>, f64) {
    let mut specs = Vec::with_capacity(count);
    let mut offset = 0.0;
    for i in 0..count {
        specs.push(TrackSpec {
            key: i,
            name: Label::from(i),
            size,
            offset,
        });
        offset += size;
    }
    (specs, offset)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_COLUMN_WIDTH, DEFAULT_ROW_HEIGHT};

    #[test]
    fn test_basic_layout() {
        let layout = GridLayout::with_defaults(10, 5);

        assert_eq!(layout.row_count(), 10);
        assert_eq!(layout.column_count(), 5);
        assert_eq!(layout.total_width(), DEFAULT_COLUMN_WIDTH * 5.0);
        assert_eq!(layout.total_height(), DEFAULT_ROW_HEIGHT * 10.0);
        assert_eq!(layout.rows()[3].offset, DEFAULT_ROW_HEIGHT * 3.0);
        assert_eq!(layout.columns()[2].name, Label::Index(2));
    }

    #[test]
    fn test_explicit_columns_keep_keys() {
        let layout = GridLayout::build(
            AxisSource::Generated(2),
            AxisSource::Explicit(vec![
                ColumnDescriptor::new("B", 50.0).with_key(1),
                ColumnDescriptor::new("A", 70.0).with_key(0),
                ColumnDescriptor::default(),
            ]),
            &GridOptions::default(),
        )
        .unwrap();

        let cols = layout.columns();
        assert_eq!(cols[0].key, 1);
        assert_eq!(cols[1].key, 0);
        assert_eq!(cols[1].offset, 50.0);
        assert_eq!(cols[2].key, 2);
        assert_eq!(cols[2].size, DEFAULT_COLUMN_WIDTH);
        assert_eq!(cols[2].offset, 120.0);
        assert_eq!(layout.total_width(), 120.0 + DEFAULT_COLUMN_WIDTH);
    }

    #[test]
    fn test_invalid_size_rejected() {
        let err = GridLayout::build(
            AxisSource::Explicit(vec![
                RowDescriptor::new("a", 10.0),
                RowDescriptor::new("b", f64::NAN),
            ]),
            AxisSource::Generated(1),
            &GridOptions::default(),
        )
        .unwrap_err();

        match err {
            GridError::InvalidSize { axis, index, .. } => {
                assert_eq!(axis, Axis::Row);
                assert_eq!(index, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_axis_has_zero_extent() {
        let layout = GridLayout::with_defaults(0, 3);
        assert_eq!(layout.total_height(), 0.0);
        assert_eq!(layout.row_offset(0), 0.0);
        assert!(layout.row(0).is_none());
    }
}
