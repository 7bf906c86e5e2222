//! Viewport state and visible range computation.

use super::{GridLayout, TrackSpec};
use crate::types::CellId;

/// Inclusive index range along one axis. Always `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxisRange {
    pub start: usize,
    pub end: usize,
}

impl AxisRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Always false: a range holds at least one index.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    pub fn iter(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Rows and columns that must be materialized.
///
/// An axis without any tracks has no range; nothing is materialized on a
/// layer that depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewRange {
    pub rows: Option<AxisRange>,
    pub columns: Option<AxisRange>,
}

impl ViewRange {
    pub fn start_row(&self) -> Option<usize> {
        self.rows.map(|r| r.start)
    }

    pub fn end_row(&self) -> Option<usize> {
        self.rows.map(|r| r.end)
    }

    pub fn start_column(&self) -> Option<usize> {
        self.columns.map(|c| c.start)
    }

    pub fn end_column(&self) -> Option<usize> {
        self.columns.map(|c| c.end)
    }

    /// Number of data cells in the range.
    pub fn cell_count(&self) -> usize {
        match (self.rows, self.columns) {
            (Some(rows), Some(columns)) => rows.len() * columns.len(),
            _ => 0,
        }
    }

    pub fn contains(&self, cell: CellId) -> bool {
        self.rows.is_some_and(|r| r.contains(cell.row))
            && self.columns.is_some_and(|c| c.contains(cell.column))
    }

    /// Data cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellId> + '_ {
        let columns = self.columns;
        self.rows
            .into_iter()
            .flat_map(|r| r.iter())
            .flat_map(move |row| {
                columns
                    .into_iter()
                    .flat_map(|r| r.iter())
                    .map(move |column| CellId::new(row, column))
            })
    }

    /// Rows in the range minus the overscan on both edges: roughly one page.
    pub fn page_span(&self, overscan: usize) -> usize {
        self.rows
            .map_or(0, |r| (r.end - r.start).saturating_sub(overscan.saturating_mul(2)))
    }
}

/// Scroll position and extents of the scrollable surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Horizontal scroll position in grid coordinates
    pub scroll_x: f64,
    /// Vertical scroll position in grid coordinates
    pub scroll_y: f64,
    /// Outer width in pixels (used for the visible range)
    pub width: f64,
    /// Outer height in pixels (used for the visible range)
    pub height: f64,
    /// Width without the vertical scrollbar (used for visibility checks)
    pub client_width: f64,
    /// Height without the horizontal scrollbar (used for visibility checks)
    pub client_height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl Viewport {
    /// Viewport of the given size, scrolled to the origin, without scrollbars.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width,
            height,
            client_width: width,
            client_height: height,
        }
    }

    pub fn with_scroll(mut self, scroll_x: f64, scroll_y: f64) -> Self {
        self.scroll_x = scroll_x;
        self.scroll_y = scroll_y;
        self
    }

    /// Compute the range to materialize, with `overscan` extra tracks on each
    /// edge.
    pub fn view_range(&self, layout: &GridLayout, overscan: usize) -> ViewRange {
        ViewRange {
            rows: visible_span(layout.rows(), self.scroll_y, self.height, overscan),
            columns: visible_span(layout.columns(), self.scroll_x, self.width, overscan),
        }
    }

    /// Whether the cell lies entirely inside the clipped client area.
    pub fn is_cell_visible(&self, layout: &GridLayout, cell: CellId) -> bool {
        let (Some(row), Some(column)) = (layout.row(cell.row), layout.column(cell.column)) else {
            return false;
        };
        row.offset >= self.scroll_y
            && column.offset >= self.scroll_x
            && row.end() <= self.scroll_y + self.client_height
            && column.end() <= self.scroll_x + self.client_width
    }

    /// Largest scroll offsets that still show content.
    pub fn max_scroll(&self, layout: &GridLayout) -> (f64, f64) {
        (
            (layout.total_width() - self.client_width).max(0.0),
            (layout.total_height() - self.client_height).max(0.0),
        )
    }
}

/// Index range covering `[scroll, scroll + extent]` plus overscan.
///
/// Track end edges are non-decreasing, so the first track ending past a pixel
/// position is found with a partition point instead of a scan from zero.
fn visible_span(
    tracks: &[TrackSpec],
    scroll: f64,
    extent: f64,
    overscan: usize,
) -> Option<AxisRange> {
    let last = tracks.len().checked_sub(1)?;

    let first_visible = tracks.partition_point(|t| t.end() <= scroll);
    let start = if first_visible > last {
        // Scrolled past the content: keep the last track materialized.
        last
    } else {
        first_visible.saturating_sub(overscan)
    };

    let stop = scroll + extent;
    let first_past = tracks.partition_point(|t| t.end() <= stop);
    let end = if first_past > last {
        last
    } else {
        first_past.saturating_add(overscan).min(last)
    };

    Some(AxisRange::new(start, end.max(start)))
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

    #[test]
    fn test_initial_range() {
        let layout = GridLayout::with_defaults(20_000, 50);
        let viewport = Viewport::new(400.0, 600.0);
        let range = viewport.view_range(&layout, 1);

        assert_eq!(range.rows, Some(AxisRange::new(0, 22)));
        // 400px of 144px columns: column 2 ends at 432, plus one overscan
        assert_eq!(range.columns, Some(AxisRange::new(0, 3)));
        assert_eq!(range.cell_count(), 23 * 4);
    }

    #[test]
    fn test_scrolled_range_backs_up_one() {
        let layout = GridLayout::with_defaults(100, 10);
        let viewport = Viewport::new(400.0, 280.0).with_scroll(0.0, 28.0 * 10.0 + 5.0);
        let range = viewport.view_range(&layout, 1);

        // Row 10 is partially visible at the top; 9 is the overscan.
        assert_eq!(range.start_row(), Some(9));
        // Bottom edge at 565 lands in row 20; 21 is the overscan.
        assert_eq!(range.end_row(), Some(21));
    }

    #[test]
    fn test_range_clamped_at_end() {
        let layout = GridLayout::with_defaults(30, 2);
        let viewport = Viewport::new(1000.0, 600.0).with_scroll(0.0, 28.0 * 25.0);
        let range = viewport.view_range(&layout, 1);

        assert_eq!(range.start_row(), Some(24));
        assert_eq!(range.end_row(), Some(29));
        assert_eq!(range.columns, Some(AxisRange::new(0, 1)));
    }

    #[test]
    fn test_scrolled_past_content_keeps_last_track() {
        let layout = GridLayout::with_defaults(5, 1);
        let viewport = Viewport::new(100.0, 100.0).with_scroll(0.0, 10_000.0);
        let range = viewport.view_range(&layout, 1);
        assert_eq!(range.rows, Some(AxisRange::new(4, 4)));
    }

    #[test]
    fn test_empty_axis_has_no_range() {
        let layout = GridLayout::with_defaults(0, 5);
        let range = Viewport::new(400.0, 400.0).view_range(&layout, 1);
        assert_eq!(range.rows, None);
        assert!(range.columns.is_some());
        assert_eq!(range.cell_count(), 0);
        assert_eq!(range.cells().count(), 0);
    }

    #[test]
    fn test_cells_row_major() {
        let range = ViewRange {
            rows: Some(AxisRange::new(2, 3)),
            columns: Some(AxisRange::new(5, 6)),
        };
        let cells: Vec<_> = range.cells().collect();
        assert_eq!(
            cells,
            vec![
                CellId::new(2, 5),
                CellId::new(2, 6),
                CellId::new(3, 5),
                CellId::new(3, 6)
            ]
        );
    }

    #[test]
    fn test_cell_visibility_uses_client_area() {
        let layout = GridLayout::with_defaults(100, 10);
        let mut viewport = Viewport::new(300.0, 100.0);
        viewport.client_height = 90.0;

        // Row 2 spans 56..84, row 3 spans 84..112
        assert!(viewport.is_cell_visible(&layout, CellId::new(2, 0)));
        assert!(!viewport.is_cell_visible(&layout, CellId::new(3, 0)));
        // Column 2 spans 288..432
        assert!(!viewport.is_cell_visible(&layout, CellId::new(0, 2)));
        assert!(!viewport.is_cell_visible(&layout, CellId::new(500, 0)));
    }

    #[test]
    fn test_page_span() {
        let range = ViewRange {
            rows: Some(AxisRange::new(0, 22)),
            columns: None,
        };
        assert_eq!(range.page_span(1), 20);
        assert_eq!(ViewRange::default().page_span(1), 0);
        assert_eq!(range.page_span(usize::MAX / 2 + 1), 0);
    }

    #[test]
    fn test_max_scroll() {
        let layout = GridLayout::with_defaults(100, 10);
        let mut viewport = Viewport::new(400.0, 280.0);
        assert_eq!(viewport.max_scroll(&layout), (1440.0 - 400.0, 2800.0 - 280.0));

        viewport.client_height = 265.0;
        assert_eq!(viewport.max_scroll(&layout).1, 2800.0 - 265.0);
        assert_eq!(Viewport::new(400.0, 280.0).max_scroll(&GridLayout::default()), (0.0, 0.0));
    }
}
