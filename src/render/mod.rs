//! Rendering into pluggable surfaces.
//!
//! This module provides:
//! - The `Surface` trait and the paint description handed to it
//! - Node pools and the reconciliation pass
//! - `MemorySurface` (headless) and `DomSurface` (browser, wasm32 only)

pub mod memory;
pub mod pool;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use memory::{MemorySurface, NodeId};
pub use pool::{cell_paint, counter_paint, header_paint, reconcile, CellPool, ReconcileStats};
pub use surface::{Layer, NodeContent, NodePaint, Placement, Surface};

#[cfg(target_arch = "wasm32")]
pub use dom::{resolve_token, DomSurface};
