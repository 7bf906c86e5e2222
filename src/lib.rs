//! biggrid - virtualized grid rendering
//!
//! Renders datasets with tens of thousands of rows by materializing only the
//! rows and columns inside a scrollable viewport:
//! - Pre-computed row/column offset tables
//! - Overscanned visible range from scroll position and viewport size
//! - Pooled header, counter and data-cell nodes, recycled on every scroll
//! - Keyboard focus that survives recycling and scrolls into view
//! - Scroll/resize bursts coalesced into one data pass per frame
//!
//! # Usage (Rust, headless)
//!
//! ```
//! use biggrid::{Grid, GridConfig, ManualScheduler, MemorySurface, UpdateClass};
//!
//! let surface = MemorySurface::new(400.0, 600.0);
//! let data: Vec<Vec<String>> = (0..1000)
//!     .map(|r| (0..20).map(|c| format!("{r}:{c}")).collect())
//!     .collect();
//! let config = GridConfig::new().mount(surface.clone()).data(data);
//! let mut grid = Grid::new(config, ManualScheduler::new()).unwrap();
//!
//! surface.scroll_to(0.0, 2800.0);
//! grid.on_scroll().unwrap();
//! grid.run_pending(UpdateClass::Scroll).unwrap();
//! assert_eq!(grid.view_range().start_row(), Some(99));
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { BigGrid } from 'biggrid';
//! await init();
//! const grid = new BigGrid({ mount: '#grid', data: rows });
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod focus;
pub mod grid;
pub mod layout;
pub mod render;
pub mod schedule;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod web;

use wasm_bindgen::prelude::*;

pub use config::{GridConfig, GridOptions};
pub use data::{CellRenderer, DataSource, DefaultRenderer};
pub use error::{GridError, Result};
pub use focus::{Key, KeyInput, KeyOutcome};
pub use grid::Grid;
pub use layout::{GridLayout, ViewRange, Viewport};
pub use render::{Layer, MemorySurface, Surface};
pub use schedule::{FrameScheduler, ManualScheduler, UpdateClass};
pub use types::*;

#[cfg(target_arch = "wasm32")]
pub use web::BigGrid;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
