//! Construction options for a grid.

use serde::{Deserialize, Serialize};

use crate::data::{CellRenderer, DataSource};
use crate::types::{ColumnDescriptor, RowDescriptor};

/// Default row height in pixels
pub const DEFAULT_ROW_HEIGHT: f64 = 28.0;

/// Default column width in pixels
pub const DEFAULT_COLUMN_WIDTH: f64 = 144.0;

/// Extra rows/columns rendered beyond each edge of the visible window.
pub const DEFAULT_OVERSCAN: usize = 1;

/// Tunables that do not change what the grid shows, only how it is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridOptions {
    /// Overscan unit, in tracks, on each edge of each axis
    pub overscan: usize,
    /// Height of generated rows and of explicit rows without a height
    #[serde(rename = "rowHeight")]
    pub default_row_height: f64,
    /// Width of generated columns and of explicit columns without a width
    #[serde(rename = "columnWidth")]
    pub default_column_width: f64,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            overscan: DEFAULT_OVERSCAN,
            default_row_height: DEFAULT_ROW_HEIGHT,
            default_column_width: DEFAULT_COLUMN_WIDTH,
        }
    }
}

/// Everything needed to build a [`Grid`](crate::grid::Grid).
///
/// `mount` and `data` are required; `Grid::new` reports their absence
/// before touching the surface.
pub struct GridConfig<D: DataSource, S> {
    pub mount: Option<S>,
    pub data: Option<D>,
    pub rows: Option<Vec<RowDescriptor>>,
    pub columns: Option<Vec<ColumnDescriptor>>,
    pub renderer: Option<Box<dyn CellRenderer<D::Value>>>,
    pub on_scroll: Option<Box<dyn FnMut()>>,
    pub on_resize: Option<Box<dyn FnMut()>>,
    pub options: GridOptions,
}

impl<D: DataSource, S> Default for GridConfig<D, S> {
    fn default() -> Self {
        Self {
            mount: None,
            data: None,
            rows: None,
            columns: None,
            renderer: None,
            on_scroll: None,
            on_resize: None,
            options: GridOptions::default(),
        }
    }
}

impl<D: DataSource, S> GridConfig<D, S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(mut self, surface: S) -> Self {
        self.mount = Some(surface);
        self
    }

    pub fn data(mut self, data: D) -> Self {
        self.data = Some(data);
        self
    }

    /// Use explicit rows instead of one default row per data row.
    pub fn rows(mut self, rows: Vec<RowDescriptor>) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Use explicit columns instead of one default column per value of the
    /// first data row.
    pub fn columns(mut self, columns: Vec<ColumnDescriptor>) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn renderer(mut self, renderer: impl CellRenderer<D::Value> + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    /// Called once per settled (coalesced) scroll.
    pub fn on_scroll(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_scroll = Some(Box::new(callback));
        self
    }

    /// Called once per settled (coalesced) resize.
    pub fn on_resize(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_resize = Some(Box::new(callback));
        self
    }

    pub fn options(mut self, options: GridOptions) -> Self {
        self.options = options;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_options_defaults_fill_missing_fields() {
        let options: GridOptions = serde_json::from_str(r#"{"rowHeight": 20}"#).unwrap();
        assert_eq!(options.default_row_height, 20.0);
        assert_eq!(options.default_column_width, DEFAULT_COLUMN_WIDTH);
        assert_eq!(options.overscan, DEFAULT_OVERSCAN);
    }
}
