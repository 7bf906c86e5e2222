//! Dataset and cell renderer collaborators.
//!
//! The grid never owns cell values in a structured way: it asks a
//! [`DataSource`] for the value at `(row, key)` only for cells that are about
//! to be materialized, and hands it to a [`CellRenderer`].

use std::fmt::Display;

use crate::error::Result;
use crate::types::CellContent;

/// Opaque two-dimensional random-access value source.
pub trait DataSource {
    type Value: Display;

    /// Number of data rows.
    fn row_count(&self) -> usize;

    /// Number of values in `row` (0 for rows that do not exist).
    fn row_len(&self, row: usize) -> usize;

    /// Value at position `key` of `row`, if present.
    fn value(&self, row: usize, key: usize) -> Option<Self::Value>;

    /// Column count implied by the data: the length of the first row.
    fn column_count(&self) -> usize {
        if self.row_count() == 0 {
            0
        } else {
            self.row_len(0)
        }
    }
}

impl<T: Clone + Display> DataSource for Vec<Vec<T>> {
    type Value = T;

    fn row_count(&self) -> usize {
        self.len()
    }

    fn row_len(&self, row: usize) -> usize {
        self.get(row).map_or(0, Vec::len)
    }

    fn value(&self, row: usize, key: usize) -> Option<T> {
        self.get(row).and_then(|r| r.get(key)).cloned()
    }
}

impl<D: DataSource + ?Sized> DataSource for std::rc::Rc<D> {
    type Value = D::Value;

    fn row_count(&self) -> usize {
        (**self).row_count()
    }

    fn row_len(&self, row: usize) -> usize {
        (**self).row_len(row)
    }

    fn value(&self, row: usize, key: usize) -> Option<D::Value> {
        (**self).value(row, key)
    }
}

/// Turns a cell value into what the cell shows.
///
/// Renderers are trusted collaborators: an error aborts the reconciliation pass
/// and is returned to whoever triggered it.
pub trait CellRenderer<V> {
    fn render(&self, row: usize, column: usize, value: Option<&V>) -> Result<CellContent>;
}

impl<V, F> CellRenderer<V> for F
where
    F: Fn(usize, usize, Option<&V>) -> CellContent,
{
    fn render(&self, row: usize, column: usize, value: Option<&V>) -> Result<CellContent> {
        Ok(self(row, column, value))
    }
}

/// Shows the value's text as content; missing values render empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRenderer;

impl<V: Display> CellRenderer<V> for DefaultRenderer {
    fn render(&self, _row: usize, _column: usize, value: Option<&V>) -> Result<CellContent> {
        Ok(CellContent::text(
            value.map(ToString::to_string).unwrap_or_default(),
        ))
    }
}
