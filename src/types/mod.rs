//! Data types shared by the layout, reconciler and focus modules.

mod cell;
mod descriptor;

pub use cell::*;
pub use descriptor::*;
