//! Pointer and keyboard handling.

use super::Grid;
use crate::data::DataSource;
use crate::focus::{Key, KeyInput, KeyOutcome, Navigation};
use crate::render::Surface;
use crate::schedule::FrameScheduler;
use crate::types::CellId;

impl<D, S, F> Grid<D, S, F>
where
    D: DataSource,
    S: Surface,
    F: FrameScheduler,
{
    /// A click landed on `token`, the nearest cell node under the pointer.
    pub fn on_click(&mut self, token: Option<CellId>) {
        if self.destroyed {
            return;
        }
        if let Some(cell) = token.filter(|c| self.contains(*c)) {
            log::debug!("[focus] click {cell}");
            self.focus = Some(cell);
        }
    }

    /// A key went down on the cell node identified by `target`.
    pub fn on_key_down(&mut self, target: Option<CellId>, input: &KeyInput) -> KeyOutcome {
        if self.destroyed {
            return KeyOutcome::Ignored;
        }
        let Some(target) = target else {
            return KeyOutcome::Ignored;
        };
        let focus = self.focus;
        let current = match focus {
            Some(focus) if focus == target => focus,
            // Tabbing into the grid: the tabbed-to cell becomes the focus.
            _ if input.key == Key::Tab && self.contains(target) => {
                self.focus = Some(target);
                target
            }
            _ => return KeyOutcome::Ignored,
        };

        let Some(navigation) = Navigation::from_input(input) else {
            if let Some(node) = self.cells.node_for(current) {
                self.surface.activate_node(node);
            }
            return KeyOutcome::Forwarded {
                suppress_default: input.key == Key::Space,
            };
        };

        if navigation == Navigation::Unsupported {
            log::warn!("[focus] Shift+arrow selection is not supported");
            return KeyOutcome::Unsupported;
        }

        let page = self.range.page_span(self.options.overscan);
        let candidate = navigation.apply(
            current,
            self.layout.row_count(),
            self.layout.column_count(),
            page,
        );
        match candidate {
            Some(next) if next != current => self.move_focus(current, next),
            _ => KeyOutcome::Unchanged,
        }
    }

    fn move_focus(&mut self, from: CellId, to: CellId) -> KeyOutcome {
        self.focus = Some(to);
        self.viewport = self.surface.measure();

        let visible = self.range.contains(to) && self.viewport.is_cell_visible(&self.layout, to);
        if visible {
            if let Some(node) = self.cells.node_for(to) {
                self.surface.focus_node(node);
                log::debug!("[focus] {from} -> {to}");
                return KeyOutcome::Focused(to);
            }
        }

        // Scroll by the distance between the two cells; the scroll pass
        // focuses the node once it is materialized.
        let dx = self.layout.column_offset(to.column) - self.layout.column_offset(from.column);
        let dy = self.layout.row_offset(to.row) - self.layout.row_offset(from.row);
        let (max_x, max_y) = self.viewport.max_scroll(&self.layout);
        self.surface.set_scroll(
            (self.viewport.scroll_x + dx).clamp(0.0, max_x),
            (self.viewport.scroll_y + dy).clamp(0.0, max_y),
        );
        log::debug!("[focus] {from} -> {to}, scrolling by ({dx}, {dy})");
        KeyOutcome::Scrolled { cell: to, dx, dy }
    }
}
