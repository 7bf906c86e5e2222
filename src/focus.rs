//! Keyboard focus model.
//!
//! Translates key input into a focus candidate. Applying the candidate to the
//! surface (direct focus or scroll-into-view) is done by the grid, which owns
//! the pools and the viewport.

use crate::types::CellId;

/// Keys the focus controller distinguishes, named after DOM
/// `KeyboardEvent.key` values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Tab,
    PageUp,
    PageDown,
    Space,
    Other(String),
}

impl Key {
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "Tab" => Key::Tab,
            "PageUp" => Key::PageUp,
            "PageDown" => Key::PageDown,
            " " | "Spacebar" => Key::Space,
            other => Key::Other(other.to_string()),
        }
    }

    /// Whether the key moves focus (as opposed to being forwarded to the cell).
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Key::ArrowUp
                | Key::ArrowDown
                | Key::ArrowLeft
                | Key::ArrowRight
                | Key::Tab
                | Key::PageUp
                | Key::PageDown
        )
    }

    fn is_arrow(&self) -> bool {
        matches!(
            self,
            Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight
        )
    }
}

/// A key press with the modifiers the controller cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub ctrl: bool,
    pub shift: bool,
}

impl KeyInput {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
        }
    }

    pub fn ctrl(key: Key) -> Self {
        Self {
            key,
            ctrl: true,
            shift: false,
        }
    }

    pub fn shift(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            shift: true,
        }
    }
}

/// Where a navigation key sends focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Relative move
    Step { rows: i64, columns: i64 },
    FirstRow,
    LastRow,
    FirstColumn,
    LastColumn,
    /// One page of rows, up (`-1`) or down (`1`)
    Page(i64),
    /// Recognized but not implemented (range-select extension)
    Unsupported,
    /// Navigation key with a modifier combination that does nothing
    None,
}

impl Navigation {
    /// Interpret a navigation key. Returns `None` for keys that are forwarded
    /// to the cell instead.
    pub fn from_input(input: &KeyInput) -> Option<Self> {
        if !input.key.is_navigation() {
            return None;
        }
        let nav = if input.ctrl {
            match input.key {
                Key::ArrowUp => Navigation::FirstRow,
                Key::ArrowDown => Navigation::LastRow,
                Key::ArrowLeft => Navigation::FirstColumn,
                Key::ArrowRight => Navigation::LastColumn,
                _ => Navigation::None,
            }
        } else if input.shift {
            match input.key {
                Key::Tab => Navigation::Step {
                    rows: 0,
                    columns: -1,
                },
                ref k if k.is_arrow() => Navigation::Unsupported,
                _ => Navigation::None,
            }
        } else {
            match input.key {
                Key::ArrowUp => Navigation::Step {
                    rows: -1,
                    columns: 0,
                },
                Key::ArrowDown => Navigation::Step {
                    rows: 1,
                    columns: 0,
                },
                Key::ArrowLeft => Navigation::Step {
                    rows: 0,
                    columns: -1,
                },
                Key::ArrowRight | Key::Tab => Navigation::Step {
                    rows: 0,
                    columns: 1,
                },
                Key::PageUp => Navigation::Page(-1),
                Key::PageDown => Navigation::Page(1),
                _ => Navigation::None,
            }
        };
        Some(nav)
    }

    /// Candidate focus after this navigation, clamped into
    /// `[0, row_count-1] x [0, column_count-1]`.
    ///
    /// `page_span` is the number of rows a page move shifts by. Returns `None`
    /// when the grid has no cells.
    pub fn apply(
        self,
        from: CellId,
        row_count: usize,
        column_count: usize,
        page_span: usize,
    ) -> Option<CellId> {
        let last_row = to_i64(row_count.checked_sub(1)?);
        let last_column = to_i64(column_count.checked_sub(1)?);
        let row = to_i64(from.row);
        let column = to_i64(from.column);

        let (row, column) = match self {
            Navigation::Step { rows, columns } => {
                (row.saturating_add(rows), column.saturating_add(columns))
            }
            Navigation::FirstRow => (0, column),
            Navigation::LastRow => (last_row, column),
            Navigation::FirstColumn => (row, 0),
            Navigation::LastColumn => (row, last_column),
            Navigation::Page(direction) => (
                row.saturating_add(direction.saturating_mul(to_i64(page_span))),
                column,
            ),
            Navigation::Unsupported | Navigation::None => (row, column),
        };

        Some(CellId::new(
            to_index(row.clamp(0, last_row)),
            to_index(column.clamp(0, last_column)),
        ))
    }
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn to_index(value: i64) -> usize {
    usize::try_from(value).unwrap_or(0)
}

/// Result of a key press, for the host to act on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyOutcome {
    /// Event did not concern the focused cell
    Ignored,
    /// Activation forwarded to the cell's inner element
    Forwarded { suppress_default: bool },
    /// Shift+arrow: recognized, not implemented
    Unsupported,
    /// Navigation key that left focus where it was
    Unchanged,
    /// Focus moved to an already visible cell
    Focused(CellId),
    /// Focus moved off-screen; the surface was scrolled by `(dx, dy)`
    Scrolled { cell: CellId, dx: f64, dy: f64 },
}

impl KeyOutcome {
    /// Whether the host should cancel the event's default action.
    pub fn prevents_default(&self) -> bool {
        match self {
            KeyOutcome::Ignored => false,
            KeyOutcome::Forwarded { suppress_default } => *suppress_default,
            KeyOutcome::Unsupported
            | KeyOutcome::Unchanged
            | KeyOutcome::Focused(_)
            | KeyOutcome::Scrolled { .. } => true,
        }
    }
}
