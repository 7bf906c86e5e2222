//! Layout engine for track offsets and viewport ranges.
//!
//! This module handles:
//! - Pre-computing row/column offsets from per-track sizes
//! - Managing viewport state (scroll position, client extents)
//! - Computing the overscanned range of rows/columns to materialize

mod grid_layout;
mod viewport;

pub use grid_layout::{AxisSource, ColumnSpec, GridLayout, RowSpec, TrackSpec};
pub use viewport::{AxisRange, ViewRange, Viewport};
