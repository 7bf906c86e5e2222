//! Recyclable node pools and the reconciliation pass.
//!
//! A pool is an ordered list of surface nodes whose order always matches the
//! row-major traversal of the range it was last reconciled against. A pass
//! walks the new range, reusing slots front to back, creating nodes only when
//! the range grew, and dropping the tail when it shrank.

use std::collections::{BTreeMap, HashMap};

use super::surface::{
    Layer, NodeContent, NodePaint, Placement, Surface, CELL_CLASS, CELL_PADDING, COUNTER_CLASS,
    EVEN_CLASS, HEADER_CLASS, ODD_CLASS, RESERVED_STYLE,
};
use crate::error::Result;
use crate::layout::{ColumnSpec, RowSpec};
use crate::types::{CellContent, CellId};

struct Slot<N> {
    node: N,
    token: Option<CellId>,
}

/// Ordered pool of reusable nodes for one layer.
pub struct CellPool<N> {
    layer: Layer,
    slots: Vec<Slot<N>>,
    /// Token -> slot index for the slots touched by the last pass
    index: HashMap<CellId, usize>,
}

/// Node churn of one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub created: usize,
    pub removed: usize,
    pub painted: usize,
}

impl<N> CellPool<N> {
    pub fn new(layer: Layer) -> Self {
        Self {
            layer,
            slots: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Node currently showing `cell`, if the pool holds one.
    pub fn node_for(&self, cell: CellId) -> Option<&N> {
        self.index
            .get(&cell)
            .and_then(|&i| self.slots.get(i))
            .map(|slot| &slot.node)
    }

    /// Tokens in pool order.
    pub fn tokens(&self) -> impl Iterator<Item = Option<CellId>> + '_ {
        self.slots.iter().map(|slot| slot.token)
    }

    /// Remove every node from the surface and empty the pool.
    pub fn clear<S: Surface<Node = N>>(&mut self, surface: &mut S) {
        self.index.clear();
        for slot in self.slots.drain(..) {
            surface.remove_node(self.layer, slot.node);
        }
    }
}

/// Align `pool` with `paints`, in order.
///
/// The layer is detached from the visual tree for the duration of the pass
/// and reattached even when a paint fails.
pub fn reconcile<S, I>(
    surface: &mut S,
    pool: &mut CellPool<S::Node>,
    paints: I,
) -> Result<ReconcileStats>
where
    S: Surface,
    I: IntoIterator<Item = Result<NodePaint>>,
{
    let layer = pool.layer;
    surface.detach_layer(layer);
    let result = fill(surface, pool, paints);
    surface.attach_layer(layer);

    if let Ok(stats) = &result {
        log::trace!(
            "[reconcile] {:?}: {} painted, {} created, {} removed",
            layer,
            stats.painted,
            stats.created,
            stats.removed
        );
    }
    result
}

fn fill<S, I>(surface: &mut S, pool: &mut CellPool<S::Node>, paints: I) -> Result<ReconcileStats>
where
    S: Surface,
    I: IntoIterator<Item = Result<NodePaint>>,
{
    let mut stats = ReconcileStats::default();
    pool.index.clear();

    for (i, paint) in paints.into_iter().enumerate() {
        let paint = paint?;
        if i >= pool.slots.len() {
            let node = surface.create_node(pool.layer)?;
            pool.slots.push(Slot { node, token: None });
            stats.created += 1;
        }
        let Some(slot) = pool.slots.get_mut(i) else {
            break;
        };
        surface.paint_node(&slot.node, &paint)?;
        slot.token = paint.token;
        if let Some(token) = paint.token {
            pool.index.insert(token, i);
        }
        stats.painted += 1;
    }

    // Shrink only once the whole range has been laid out.
    while pool.slots.len() > stats.painted {
        if let Some(slot) = pool.slots.pop() {
            surface.remove_node(pool.layer, slot.node);
            stats.removed += 1;
        }
    }

    Ok(stats)
}

fn parity_class(row: usize) -> &'static str {
    if row % 2 == 0 {
        EVEN_CLASS
    } else {
        ODD_CLASS
    }
}

/// Paint for the header node of a column.
pub fn header_paint(column: &ColumnSpec) -> NodePaint {
    let name = column.name.to_string();
    NodePaint {
        token: None,
        class_name: format!("{CELL_CLASS} {HEADER_CLASS}"),
        placement: Placement {
            left: Some(column.offset),
            width: Some(column.size),
            ..Placement::default()
        },
        style: BTreeMap::new(),
        title: name.clone(),
        content: NodeContent::Text(name),
    }
}

/// Paint for the counter node of row `index`.
pub fn counter_paint(index: usize, row: &RowSpec) -> NodePaint {
    let name = row.name.to_string();
    NodePaint {
        token: None,
        class_name: format!("{CELL_CLASS} {COUNTER_CLASS} {}", parity_class(index)),
        placement: Placement {
            top: Some(row.offset),
            height: Some(row.size),
            line_height: Some(row.size - 2.0 * CELL_PADDING),
            ..Placement::default()
        },
        style: BTreeMap::new(),
        title: name.clone(),
        content: NodeContent::Text(name),
    }
}

/// Paint for a data cell, merging renderer output with the grid placement.
pub fn cell_paint(
    cell: CellId,
    row: &RowSpec,
    column: &ColumnSpec,
    content: CellContent,
) -> NodePaint {
    let CellContent {
        class,
        mut style,
        title,
        content,
    } = content;
    style.retain(|property, _| {
        let property = property.trim().to_ascii_lowercase();
        !RESERVED_STYLE.contains(&property.as_str())
    });

    let mut class_name = format!("{CELL_CLASS} {}", parity_class(cell.row));
    if !class.trim().is_empty() {
        class_name.push(' ');
        class_name.push_str(class.trim());
    }

    NodePaint {
        token: Some(cell),
        class_name,
        placement: Placement {
            top: Some(row.offset),
            left: Some(column.offset),
            width: Some(column.size),
            height: Some(row.size),
            line_height: Some(row.size - 2.0 * CELL_PADDING),
        },
        style,
        title,
        content: NodeContent::Markup(content),
    }
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
    use crate::layout::GridLayout;

    #[test]
    fn test_cell_paint_placement_wins() {
        let layout = GridLayout::with_defaults(4, 4);
        let content = CellContent::text("x")
            .with_class("warn")
            .with_style("top", "999px")
            .with_style("Width", "1px")
            .with_style("color", "red");
        let paint = cell_paint(
            CellId::new(1, 2),
            &layout.rows()[1],
            &layout.columns()[2],
            content,
        );

        assert_eq!(paint.class_name, "big-grid__cell big-grid__cell--odd warn");
        assert_eq!(paint.placement.top, Some(28.0));
        assert_eq!(paint.placement.left, Some(288.0));
        assert_eq!(paint.placement.line_height, Some(20.0));
        assert_eq!(paint.style.len(), 1);
        assert_eq!(paint.style.get("color").map(String::as_str), Some("red"));
        assert_eq!(paint.token, Some(CellId::new(1, 2)));
    }

    #[test]
    fn test_header_paint_uses_name() {
        let layout = GridLayout::with_defaults(1, 3);
        let paint = header_paint(&layout.columns()[2]);
        assert_eq!(paint.title, "2");
        assert_eq!(paint.content, NodeContent::Text("2".to_string()));
        assert_eq!(paint.placement.left, Some(288.0));
        assert_eq!(paint.placement.top, None);
    }
}
