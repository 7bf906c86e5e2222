//! In-memory surface for headless use.
//!
//! Mirrors the observable behavior of the DOM surface (ordered layer
//! children, detach/attach, scroll clamping, focus) without a browser, and
//! records enough bookkeeping for callers to inspect what a grid did.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::surface::{Layer, NodePaint, Surface};
use crate::error::{GridError, Result};
use crate::layout::Viewport;
use crate::types::CellId;

/// Handle to a node of a [`MemorySurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
struct LayerState {
    children: Vec<NodeId>,
    attached: bool,
    offset: f64,
    attach_count: usize,
}

#[derive(Debug)]
struct NodeRecord {
    layer: Layer,
    paint: Option<NodePaint>,
}

#[derive(Debug)]
struct MemoryTree {
    viewport: Viewport,
    mounted: bool,
    extent: (f64, f64),
    layers: HashMap<Layer, LayerState>,
    nodes: HashMap<NodeId, NodeRecord>,
    next_id: usize,
    focused: Option<NodeId>,
    activated: Vec<NodeId>,
    created: usize,
    removed: usize,
}

/// Headless surface. Clones share the same tree, so a caller can keep a
/// handle for inspection after moving one into a grid.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    tree: Rc<RefCell<MemoryTree>>,
}

impl MemorySurface {
    /// Surface whose scrollable area is `width` x `height` pixels.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            tree: Rc::new(RefCell::new(MemoryTree {
                viewport: Viewport::new(width, height),
                mounted: false,
                extent: (0.0, 0.0),
                layers: HashMap::new(),
                nodes: HashMap::new(),
                next_id: 0,
                focused: None,
                activated: Vec::new(),
                created: 0,
                removed: 0,
            })),
        }
    }

    /// Reserve `size` pixels on each axis for scrollbars.
    pub fn with_scrollbars(self, size: f64) -> Self {
        {
            let mut tree = self.tree.borrow_mut();
            tree.viewport.client_width = (tree.viewport.width - size).max(0.0);
            tree.viewport.client_height = (tree.viewport.height - size).max(0.0);
        }
        self
    }

    /// Change the outer size, keeping the scrollbar reservation.
    pub fn resize(&self, width: f64, height: f64) {
        let mut tree = self.tree.borrow_mut();
        let v = &mut tree.viewport;
        let bar_x = v.width - v.client_width;
        let bar_y = v.height - v.client_height;
        v.width = width;
        v.height = height;
        v.client_width = (width - bar_x).max(0.0);
        v.client_height = (height - bar_y).max(0.0);
        drop(tree);
        self.clamp_scroll();
    }

    /// Scroll as a user would; the grid learns about it through `on_scroll`.
    pub fn scroll_to(&self, scroll_x: f64, scroll_y: f64) {
        {
            let mut tree = self.tree.borrow_mut();
            tree.viewport.scroll_x = scroll_x;
            tree.viewport.scroll_y = scroll_y;
        }
        self.clamp_scroll();
    }

    pub fn scroll(&self) -> (f64, f64) {
        let tree = self.tree.borrow();
        (tree.viewport.scroll_x, tree.viewport.scroll_y)
    }

    pub fn is_mounted(&self) -> bool {
        self.tree.borrow().mounted
    }

    /// Size of the scrollable content set at mount.
    pub fn extent(&self) -> (f64, f64) {
        self.tree.borrow().extent
    }

    /// Number of children the grid added to the mount point.
    pub fn child_count(&self) -> usize {
        usize::from(self.tree.borrow().mounted)
    }

    pub fn layer_len(&self, layer: Layer) -> usize {
        self.tree
            .borrow()
            .layers
            .get(&layer)
            .map_or(0, |l| l.children.len())
    }

    /// Latest paint of every node of `layer`, in child order.
    pub fn layer_paints(&self, layer: Layer) -> Vec<NodePaint> {
        let tree = self.tree.borrow();
        tree.layers
            .get(&layer)
            .map(|l| {
                l.children
                    .iter()
                    .filter_map(|id| tree.nodes.get(id).and_then(|n| n.paint.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Tokens of the data-cell layer, in child order.
    pub fn cell_tokens(&self) -> Vec<CellId> {
        self.layer_paints(Layer::Cells)
            .into_iter()
            .filter_map(|p| p.token)
            .collect()
    }

    pub fn layer_offset(&self, layer: Layer) -> f64 {
        self.tree.borrow().layers.get(&layer).map_or(0.0, |l| l.offset)
    }

    pub fn is_attached(&self, layer: Layer) -> bool {
        self.tree
            .borrow()
            .layers
            .get(&layer)
            .is_some_and(|l| l.attached)
    }

    /// How many times `layer` was reattached, i.e. completed passes.
    pub fn attach_count(&self, layer: Layer) -> usize {
        self.tree
            .borrow()
            .layers
            .get(&layer)
            .map_or(0, |l| l.attach_count)
    }

    /// Total nodes ever created.
    pub fn created_count(&self) -> usize {
        self.tree.borrow().created
    }

    /// Total nodes ever removed.
    pub fn removed_count(&self) -> usize {
        self.tree.borrow().removed
    }

    /// Token of the node holding input focus.
    pub fn focused_token(&self) -> Option<CellId> {
        let tree = self.tree.borrow();
        tree.focused
            .and_then(|id| tree.nodes.get(&id))
            .and_then(|n| n.paint.as_ref())
            .and_then(|p| p.token)
    }

    /// Tokens of nodes that received forwarded activation, oldest first.
    pub fn activated_tokens(&self) -> Vec<CellId> {
        let tree = self.tree.borrow();
        tree.activated
            .iter()
            .filter_map(|id| tree.nodes.get(id))
            .filter_map(|n| n.paint.as_ref().and_then(|p| p.token))
            .collect()
    }

    fn clamp_scroll(&self) {
        let mut tree = self.tree.borrow_mut();
        let (extent_w, extent_h) = tree.extent;
        let v = &mut tree.viewport;
        let max_x = (extent_w - v.client_width).max(0.0);
        let max_y = (extent_h - v.client_height).max(0.0);
        v.scroll_x = v.scroll_x.clamp(0.0, max_x);
        v.scroll_y = v.scroll_y.clamp(0.0, max_y);
    }
}

impl Surface for MemorySurface {
    type Node = NodeId;

    fn mount(&mut self, total_width: f64, total_height: f64) -> Result<()> {
        {
            let mut tree = self.tree.borrow_mut();
            tree.mounted = true;
            tree.extent = (total_width, total_height);
            for layer in Layer::ALL {
                tree.layers.entry(layer).or_default().attached = true;
            }
        }
        self.clamp_scroll();
        Ok(())
    }

    fn unmount(&mut self) {
        let mut tree = self.tree.borrow_mut();
        tree.mounted = false;
        tree.layers.clear();
        tree.nodes.clear();
        tree.focused = None;
    }

    fn measure(&self) -> Viewport {
        self.tree.borrow().viewport
    }

    fn set_scroll(&mut self, scroll_x: f64, scroll_y: f64) {
        self.scroll_to(scroll_x, scroll_y);
    }

    fn create_node(&mut self, layer: Layer) -> Result<NodeId> {
        let mut tree = self.tree.borrow_mut();
        if !tree.mounted {
            return Err(GridError::Surface("surface is not mounted".to_string()));
        }
        let id = NodeId(tree.next_id);
        tree.next_id += 1;
        tree.nodes.insert(id, NodeRecord { layer, paint: None });
        tree.layers.entry(layer).or_default().children.push(id);
        tree.created += 1;
        Ok(id)
    }

    fn paint_node(&mut self, node: &NodeId, paint: &NodePaint) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        let record = tree
            .nodes
            .get_mut(node)
            .ok_or_else(|| GridError::Surface(format!("unknown node {}", node.0)))?;
        record.paint = Some(paint.clone());
        Ok(())
    }

    fn remove_node(&mut self, layer: Layer, node: NodeId) {
        let mut tree = self.tree.borrow_mut();
        if let Some(state) = tree.layers.get_mut(&layer) {
            state.children.retain(|&id| id != node);
        }
        if tree.nodes.remove(&node).is_some() {
            tree.removed += 1;
        }
        if tree.focused == Some(node) {
            tree.focused = None;
        }
    }

    fn detach_layer(&mut self, layer: Layer) {
        self.tree.borrow_mut().layers.entry(layer).or_default().attached = false;
    }

    fn attach_layer(&mut self, layer: Layer) {
        let mut tree = self.tree.borrow_mut();
        let state = tree.layers.entry(layer).or_default();
        state.attached = true;
        state.attach_count += 1;
    }

    fn set_layer_offset(&mut self, layer: Layer, offset: f64) {
        self.tree.borrow_mut().layers.entry(layer).or_default().offset = offset;
    }

    fn focus_node(&mut self, node: &NodeId) {
        let mut tree = self.tree.borrow_mut();
        if tree.nodes.get(node).is_some_and(|n| n.layer == Layer::Cells) {
            tree.focused = Some(*node);
        }
    }

    fn activate_node(&mut self, node: &NodeId) {
        let mut tree = self.tree.borrow_mut();
        if tree.nodes.contains_key(node) {
            tree.activated.push(*node);
        }
    }
}
