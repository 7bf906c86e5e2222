//! Surface trait for pluggable visual trees.
//!
//! This module defines the `Surface` trait that abstracts the visual tree a
//! grid renders into, allowing the DOM (in the browser) and an in-memory tree
//! (headless, tests, benchmarks) to be used interchangeably.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::error::Result;
use crate::layout::Viewport;
use crate::types::CellId;

/// Inner padding of counter and data cells, in pixels.
pub const CELL_PADDING: f64 = 4.0;

/// Class shared by every pooled node.
pub const CELL_CLASS: &str = "big-grid__cell";
pub const HEADER_CLASS: &str = "big-grid__cell--header";
pub const COUNTER_CLASS: &str = "big-grid__cell--counter";
pub const EVEN_CLASS: &str = "big-grid__cell--even";
pub const ODD_CLASS: &str = "big-grid__cell--odd";

/// Style properties owned by the grid. Renderer-supplied values for these are
/// dropped so the grid geometry cannot be broken by a cell.
pub const RESERVED_STYLE: [&str; 7] = [
    "position",
    "top",
    "left",
    "width",
    "height",
    "padding",
    "line-height",
];

/// The three independently pooled layers of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Column names, scrolled horizontally with the data
    Header,
    /// Row names, scrolled vertically with the data
    Counter,
    /// Data cells
    Cells,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Header, Layer::Counter, Layer::Cells];
}

/// Absolute placement of a node inside its layer, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Placement {
    pub top: Option<f64>,
    pub left: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    /// Set on padded cells so text is vertically centered
    pub line_height: Option<f64>,
}

/// What a node shows.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeContent {
    /// Plain text (header and counter names)
    Text(String),
    /// Markup produced by a cell renderer
    Markup(String),
}

impl NodeContent {
    pub fn as_str(&self) -> &str {
        match self {
            NodeContent::Text(s) | NodeContent::Markup(s) => s,
        }
    }
}

/// Every attribute the reconciler assigns to a pooled node in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct NodePaint {
    /// Identity token, data cells only
    pub token: Option<CellId>,
    pub class_name: String,
    pub placement: Placement,
    /// Renderer style with reserved properties removed
    pub style: BTreeMap<String, String>,
    pub title: String,
    pub content: NodeContent,
}

impl NodePaint {
    /// Inline CSS for the node: renderer style first, grid placement last.
    pub fn css_text(&self) -> String {
        let mut css = String::new();
        for (property, value) in &self.style {
            let _ = write!(css, "{property}:{value};");
        }
        css.push_str("position:absolute;");
        let p = &self.placement;
        if let Some(top) = p.top {
            let _ = write!(css, "top:{top}px;");
        }
        if let Some(left) = p.left {
            let _ = write!(css, "left:{left}px;");
        }
        if let Some(height) = p.height {
            let _ = write!(css, "height:{height}px;");
        }
        if let Some(width) = p.width {
            let _ = write!(css, "width:{width}px;");
        }
        if let Some(line_height) = p.line_height {
            let _ = write!(css, "padding:{CELL_PADDING}px;line-height:{line_height}px;");
        }
        css
    }
}

/// Visual tree a grid renders into.
///
/// A surface owns the mount point and three layer containers. Nodes are
/// handles: the grid keeps them in pools and hands them back for painting,
/// focusing and removal.
pub trait Surface {
    type Node;

    /// Build the grid structure inside the mount, sizing the scrollable area
    /// to the total extents.
    fn mount(&mut self, total_width: f64, total_height: f64) -> Result<()>;

    /// Remove everything the grid added to the mount.
    fn unmount(&mut self);

    /// Current scroll offsets and extents of the scrollable area.
    fn measure(&self) -> Viewport;

    /// Scroll the scrollable area. The surface clamps to its scroll limits.
    fn set_scroll(&mut self, scroll_x: f64, scroll_y: f64);

    /// Create a node at the end of `layer`. Persistent listeners are attached
    /// here, once per node.
    fn create_node(&mut self, layer: Layer) -> Result<Self::Node>;

    fn paint_node(&mut self, node: &Self::Node, paint: &NodePaint) -> Result<()>;

    fn remove_node(&mut self, layer: Layer, node: Self::Node);

    /// Take a layer out of the visual tree while it is mutated.
    fn detach_layer(&mut self, layer: Layer);

    /// Put a detached layer back.
    fn attach_layer(&mut self, layer: Layer);

    /// Shift a layer along its scroll axis (headers horizontally, counters
    /// vertically).
    fn set_layer_offset(&mut self, layer: Layer, offset: f64);

    /// Give input focus to a node without scrolling the surface.
    fn focus_node(&mut self, node: &Self::Node);

    /// Forward activation to the first interactive element inside a node.
    fn activate_node(&mut self, node: &Self::Node);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_placement_last() {
        let mut style = BTreeMap::new();
        style.insert("color".to_string(), "red".to_string());
        let paint = NodePaint {
            token: None,
            class_name: CELL_CLASS.to_string(),
            placement: Placement {
                top: Some(28.0),
                left: Some(144.0),
                width: Some(144.0),
                height: Some(28.0),
                line_height: Some(20.0),
            },
            style,
            title: String::new(),
            content: NodeContent::Text(String::new()),
        };
        assert_eq!(
            paint.css_text(),
            "color:red;position:absolute;top:28px;left:144px;height:28px;width:144px;\
             padding:4px;line-height:20px;"
        );
    }
}
