//! Keyboard focus tests
//!
//! Navigation keys, clamping, forwarding and scroll-into-view against a
//! headless grid.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use biggrid::{
    CellId, Grid, GridConfig, GridOptions, Key, KeyInput, KeyOutcome, ManualScheduler,
    MemorySurface,
};
use common::{build_grid, dataset, settle, TestGrid};

fn press(grid: &mut TestGrid, key: KeyInput) -> KeyOutcome {
    let target = grid.focus();
    grid.on_key_down(target, &key)
}

fn focus_at(grid: &mut TestGrid, row: usize, column: usize) {
    grid.on_click(Some(CellId::new(row, column)));
    assert_eq!(grid.focus(), Some(CellId::new(row, column)));
}

#[test]
fn test_arrow_down_visible_focuses_directly() {
    let (mut grid, surface) = build_grid(100, 10, 1000.0, 600.0);
    focus_at(&mut grid, 5, 5);

    let outcome = press(&mut grid, KeyInput::new(Key::ArrowDown));

    assert_eq!(outcome, KeyOutcome::Focused(CellId::new(6, 5)));
    assert_eq!(grid.focus(), Some(CellId::new(6, 5)));
    assert_eq!(surface.focused_token(), Some(CellId::new(6, 5)));
    assert_eq!(surface.scroll(), (0.0, 0.0));
}

#[test]
fn test_arrow_into_hidden_row_scrolls() {
    let (mut grid, surface) = build_grid(100, 10, 400.0, 280.0);
    focus_at(&mut grid, 9, 0);

    let outcome = press(&mut grid, KeyInput::new(Key::ArrowDown));

    assert_eq!(
        outcome,
        KeyOutcome::Scrolled {
            cell: CellId::new(10, 0),
            dx: 0.0,
            dy: 28.0
        }
    );
    assert_eq!(surface.scroll(), (0.0, 28.0));

    // The scroll signal re-enters the normal flow; the pass restores focus.
    grid.on_scroll().unwrap();
    settle(&mut grid);
    assert_eq!(surface.focused_token(), Some(CellId::new(10, 0)));
}

#[test]
fn test_ctrl_arrows_jump_to_edges() {
    let (mut grid, surface) = build_grid(100, 10, 400.0, 280.0);
    focus_at(&mut grid, 0, 0);

    let outcome = press(&mut grid, KeyInput::ctrl(Key::ArrowDown));
    assert!(matches!(outcome, KeyOutcome::Scrolled { dy, .. } if dy == 99.0 * 28.0));
    assert_eq!(grid.focus(), Some(CellId::new(99, 0)));

    // Scroll clamps at the content end; the last row is still materialized.
    assert_eq!(surface.scroll(), (0.0, 2800.0 - 280.0));
    grid.on_scroll().unwrap();
    settle(&mut grid);
    assert_eq!(grid.view_range().end_row(), Some(99));
    assert_eq!(surface.focused_token(), Some(CellId::new(99, 0)));

    press(&mut grid, KeyInput::ctrl(Key::ArrowRight));
    assert_eq!(grid.focus(), Some(CellId::new(99, 9)));

    press(&mut grid, KeyInput::ctrl(Key::ArrowLeft));
    assert_eq!(grid.focus(), Some(CellId::new(99, 0)));

    press(&mut grid, KeyInput::ctrl(Key::ArrowUp));
    assert_eq!(grid.focus(), Some(CellId::new(0, 0)));
}

#[test]
fn test_navigation_is_clamped() {
    let (mut grid, _surface) = build_grid(100, 10, 400.0, 280.0);

    focus_at(&mut grid, 0, 0);
    assert_eq!(press(&mut grid, KeyInput::new(Key::ArrowUp)), KeyOutcome::Unchanged);
    assert_eq!(press(&mut grid, KeyInput::new(Key::ArrowLeft)), KeyOutcome::Unchanged);
    assert_eq!(press(&mut grid, KeyInput::new(Key::PageUp)), KeyOutcome::Unchanged);
    assert_eq!(grid.focus(), Some(CellId::new(0, 0)));

    focus_at(&mut grid, 99, 9);
    for key in [Key::ArrowDown, Key::ArrowRight, Key::Tab, Key::PageDown] {
        assert_eq!(press(&mut grid, KeyInput::new(key)), KeyOutcome::Unchanged);
    }
    assert_eq!(grid.focus(), Some(CellId::new(99, 9)));
}

#[test]
fn test_tab_moves_along_row_without_wrapping() {
    let (mut grid, _surface) = build_grid(100, 10, 400.0, 280.0);
    focus_at(&mut grid, 3, 0);

    assert_eq!(
        press(&mut grid, KeyInput::new(Key::Tab)),
        KeyOutcome::Focused(CellId::new(3, 1))
    );
    assert_eq!(
        press(&mut grid, KeyInput::shift(Key::Tab)),
        KeyOutcome::Focused(CellId::new(3, 0))
    );
    assert_eq!(press(&mut grid, KeyInput::shift(Key::Tab)), KeyOutcome::Unchanged);
    assert_eq!(grid.focus(), Some(CellId::new(3, 0)));
}

#[test]
fn test_page_down_moves_one_page() {
    let (mut grid, _surface) = build_grid(100, 10, 400.0, 280.0);
    focus_at(&mut grid, 0, 0);

    // Range 0..=11 with one row of overscan on each edge: 9 rows per page.
    let outcome = press(&mut grid, KeyInput::new(Key::PageDown));
    assert_eq!(outcome, KeyOutcome::Focused(CellId::new(9, 0)));
}

#[test]
fn test_shift_arrow_is_unsupported() {
    let (mut grid, _surface) = build_grid(100, 10, 400.0, 280.0);
    focus_at(&mut grid, 4, 4);

    let outcome = press(&mut grid, KeyInput::shift(Key::ArrowDown));
    assert_eq!(outcome, KeyOutcome::Unsupported);
    assert!(outcome.prevents_default());
    assert_eq!(grid.focus(), Some(CellId::new(4, 4)));
}

#[test]
fn test_modifiers_on_other_keys_do_not_move() {
    let (mut grid, _surface) = build_grid(100, 10, 400.0, 280.0);
    focus_at(&mut grid, 4, 2);

    assert_eq!(press(&mut grid, KeyInput::ctrl(Key::Tab)), KeyOutcome::Unchanged);
    assert_eq!(press(&mut grid, KeyInput::ctrl(Key::PageDown)), KeyOutcome::Unchanged);
    assert_eq!(grid.focus(), Some(CellId::new(4, 2)));
}

#[test]
fn test_other_keys_are_forwarded() {
    let (mut grid, surface) = build_grid(100, 10, 400.0, 280.0);
    focus_at(&mut grid, 1, 1);

    let space = press(&mut grid, KeyInput::new(Key::Space));
    assert_eq!(
        space,
        KeyOutcome::Forwarded {
            suppress_default: true
        }
    );
    assert!(space.prevents_default());

    let enter = press(&mut grid, KeyInput::new(Key::from_dom("Enter")));
    assert!(!enter.prevents_default());

    assert_eq!(
        surface.activated_tokens(),
        vec![CellId::new(1, 1), CellId::new(1, 1)]
    );
    assert_eq!(grid.focus(), Some(CellId::new(1, 1)));
}

#[test]
fn test_keys_on_unfocused_cells_are_ignored() {
    let (mut grid, _surface) = build_grid(100, 10, 400.0, 280.0);
    focus_at(&mut grid, 1, 1);

    let outcome = grid.on_key_down(Some(CellId::new(2, 2)), &KeyInput::new(Key::ArrowDown));
    assert_eq!(outcome, KeyOutcome::Ignored);
    assert!(!outcome.prevents_default());
    assert_eq!(grid.on_key_down(None, &KeyInput::new(Key::Tab)), KeyOutcome::Ignored);
    assert_eq!(grid.focus(), Some(CellId::new(1, 1)));
}

#[test]
fn test_tab_adopts_target() {
    let (mut grid, surface) = build_grid(100, 10, 400.0, 280.0);
    assert_eq!(grid.focus(), None);

    let outcome = grid.on_key_down(Some(CellId::new(2, 2)), &KeyInput::new(Key::Tab));

    // Column 3 spans 432..576, past the 400px client width.
    assert_eq!(
        outcome,
        KeyOutcome::Scrolled {
            cell: CellId::new(2, 3),
            dx: 144.0,
            dy: 0.0
        }
    );
    assert_eq!(grid.focus(), Some(CellId::new(2, 3)));
    assert_eq!(surface.scroll(), (144.0, 0.0));
}

#[test]
fn test_click_sets_focus() {
    let (mut grid, _surface) = build_grid(100, 10, 400.0, 280.0);

    grid.on_click(None);
    assert_eq!(grid.focus(), None);

    grid.on_click(Some(CellId::new(500, 0)));
    assert_eq!(grid.focus(), None);

    grid.on_click(Some(CellId::new(7, 3)));
    assert_eq!(grid.focus(), Some(CellId::new(7, 3)));
}

#[test]
fn test_focus_survives_scrolling_away_and_back() {
    let (mut grid, surface) = build_grid(1_000, 10, 400.0, 280.0);
    focus_at(&mut grid, 2, 1);

    common::scroll(&mut grid, &surface, 0.0, 10_000.0);
    settle(&mut grid);
    assert!(!grid.view_range().contains(CellId::new(2, 1)));
    assert_eq!(grid.focus(), Some(CellId::new(2, 1)));

    common::scroll(&mut grid, &surface, 0.0, 0.0);
    settle(&mut grid);
    assert_eq!(surface.focused_token(), Some(CellId::new(2, 1)));
}

#[test]
fn test_page_with_huge_overscan_leaves_focus() {
    let surface = MemorySurface::new(400.0, 280.0);
    let options = GridOptions {
        overscan: usize::MAX / 2 + 1,
        ..GridOptions::default()
    };
    let config = GridConfig::new()
        .mount(surface.clone())
        .data(dataset(20, 4))
        .options(options);
    let mut grid = Grid::new(config, ManualScheduler::new()).unwrap();
    assert_eq!(grid.view_range().cell_count(), 80);
    focus_at(&mut grid, 0, 0);

    assert_eq!(press(&mut grid, KeyInput::new(Key::PageDown)), KeyOutcome::Unchanged);
    assert_eq!(press(&mut grid, KeyInput::new(Key::PageUp)), KeyOutcome::Unchanged);
    assert_eq!(grid.focus(), Some(CellId::new(0, 0)));
    assert_eq!(surface.scroll(), (0.0, 0.0));
}
