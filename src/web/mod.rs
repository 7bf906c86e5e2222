//! JavaScript binding: the `BigGrid` class.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { BigGrid } from 'biggrid';
//! await init();
//! const grid = new BigGrid({
//!     mount: '#grid',
//!     data: rows,
//!     renderer: (row, column, value) => ({ content: String(value) }),
//!     scroll: { callback: () => console.log('settled') },
//! });
//! grid.destroy();
//! ```
//!
//! Event handlers reach the grid through a weak reference and use
//! `try_borrow_mut`; consumer callbacks run after the borrow is dropped, so
//! they may call back into the grid. A `destroy` issued while the grid is
//! borrowed (from inside a renderer, say) completes when the borrow ends.

mod console;
mod scheduler;
mod source;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, KeyboardEvent};

use crate::config::GridConfig;
use crate::data::CellRenderer;
use crate::error::{GridError, Result};
use crate::focus::{Key, KeyInput};
use crate::grid::Grid;
use crate::render::{resolve_token, DomSurface};

pub use scheduler::{FrameHandle, GridSlot, SlotState, WebFrameScheduler};
pub use source::{JsCallbacks, JsCell, JsConfig, JsData, JsRenderer};

pub type WebGrid = Grid<JsData, DomSurface, WebFrameScheduler>;

struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| GridError::Surface(format!("{e:?}")))?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }

    fn detach(self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Run `f` on the grid unless it is gone or already borrowed.
fn with_grid<T>(slot: &GridSlot, f: impl FnOnce(&mut WebGrid) -> T) -> Option<T> {
    let state = slot.upgrade()?;
    let result = match state.try_borrow_mut() {
        Ok(mut grid) => f(&mut grid),
        Err(_) => {
            log::warn!("[grid] busy, event dropped");
            return None;
        }
    };
    slot.finish_teardown();
    Some(result)
}

fn report(result: Option<Result<()>>) {
    if let Some(Err(err)) = result {
        log::error!("{err}");
    }
}

/// A virtualized grid mounted in the page.
#[wasm_bindgen]
pub struct BigGrid {
    slot: GridSlot,
    state: Option<Rc<RefCell<WebGrid>>>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl BigGrid {
    /// Build and mount a grid. Throws when `mount` or `data` is missing or
    /// invalid; the mount element is left untouched in that case.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> std::result::Result<BigGrid, JsValue> {
        console_error_panic_hook::set_once();
        console::init();

        let JsConfig {
            mount,
            data,
            rows,
            columns,
            renderer,
            callbacks,
            options,
        } = JsConfig::read(&config).map_err(|err| {
            log::error!("{err}");
            err
        })?;

        let slot: GridSlot = Rc::default();
        let mount = mount.map(|mut surface| {
            surface.set_key_listener(Self::key_closure(Rc::clone(&slot)));
            surface
        });

        let grid_config = GridConfig {
            mount,
            data,
            rows,
            columns,
            renderer: renderer.map(|r| Box::new(r) as Box<dyn CellRenderer<JsCell>>),
            on_scroll: None,
            on_resize: None,
            options,
        };
        let scheduler = WebFrameScheduler::new(Rc::clone(&slot), Rc::new(callbacks));
        let state = Rc::new(RefCell::new(Grid::new(grid_config, scheduler)?));
        slot.bind(&state);

        let mut grid = BigGrid {
            slot: Rc::clone(&slot),
            state: Some(Rc::clone(&state)),
            listeners: Vec::new(),
        };
        if let Err(err) = grid.listen(&slot, &state) {
            log::error!("{err}");
            grid.destroy();
            return Err(err.into());
        }
        Ok(grid)
    }

    fn key_closure(slot: GridSlot) -> Closure<dyn FnMut(KeyboardEvent)> {
        Closure::wrap(Box::new(move |event: KeyboardEvent| {
            let input = KeyInput {
                key: Key::from_dom(&event.key()),
                ctrl: event.ctrl_key(),
                shift: event.shift_key(),
            };
            let target = resolve_token(event.current_target());
            let outcome = with_grid(&slot, |grid| grid.on_key_down(target, &input));
            if outcome.is_some_and(|o| o.prevents_default()) {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(KeyboardEvent)>)
    }

    fn listen(&mut self, slot: &GridSlot, state: &Rc<RefCell<WebGrid>>) -> Result<()> {
        let window = web_sys::window().ok_or_else(|| GridError::Surface("no window".to_string()))?;
        let main: EventTarget = state
            .borrow()
            .surface()
            .main()
            .ok_or_else(|| GridError::Surface("surface is not mounted".to_string()))?
            .clone()
            .into();

        {
            let slot = Rc::clone(slot);
            self.listeners.push(Listener::attach(&window, "resize", move |_| {
                report(with_grid(&slot, WebGrid::on_resize));
            })?);
        }
        {
            let slot = Rc::clone(slot);
            self.listeners.push(Listener::attach(&main, "scroll", move |_| {
                report(with_grid(&slot, WebGrid::on_scroll));
            })?);
        }
        {
            let slot = Rc::clone(slot);
            self.listeners.push(Listener::attach(&main, "click", move |event| {
                let token = resolve_token(event.target());
                with_grid(&slot, |grid| grid.on_click(token));
            })?);
        }
        Ok(())
    }

    /// Token (`"row-column"`) of the focused cell, if any.
    #[wasm_bindgen(getter, js_name = "focusedCell")]
    pub fn focused_cell(&self) -> Option<String> {
        let state = self.state.as_ref()?;
        let grid = state.try_borrow().ok()?;
        grid.focus().map(|cell| cell.to_string())
    }

    /// Remove listeners and everything the grid added to the mount.
    ///
    /// Called while the grid is busy, the DOM teardown runs as soon as the
    /// current handler releases it.
    pub fn destroy(&mut self) {
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
        if let Some(state) = self.state.take() {
            self.slot.teardown(state);
        }
    }
}

impl Drop for BigGrid {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Set the console log level (`"error"`, `"warn"`, `"debug"`, ...).
/// Returns false for unknown levels.
#[wasm_bindgen(js_name = "setLogLevel")]
pub fn set_log_level(level: &str) -> bool {
    console::init();
    console::set_level(level)
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
    use js_sys::{Array, Object, Reflect};
    use wasm_bindgen_test::*;
    use web_sys::Element;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mounted_grid(id: &str) -> (BigGrid, Element) {
        let document = web_sys::window().unwrap().document().unwrap();
        let mount = document.create_element("div").unwrap();
        mount.set_id(id);
        document.body().unwrap().append_child(&mount).unwrap();

        let data: Array = (0..50)
            .map(|r| {
                (0..5)
                    .map(|c| JsValue::from_str(&format!("{r}:{c}")))
                    .collect::<Array>()
            })
            .collect();
        let config = Object::new();
        Reflect::set(&config, &"mount".into(), &mount).unwrap();
        Reflect::set(&config, &"data".into(), &data).unwrap();
        (BigGrid::new(config.into()).unwrap(), mount)
    }

    #[wasm_bindgen_test]
    fn test_destroy_while_busy_finishes_on_release() {
        let (mut grid, mount) = mounted_grid("busy-destroy");
        let state = Rc::clone(grid.state.as_ref().unwrap());
        let slot = Rc::clone(&grid.slot);

        {
            let _busy = state.borrow_mut();
            grid.destroy();
        }
        assert!(!state.borrow().is_destroyed());
        assert!(mount.first_child().is_some());
        assert_eq!(grid.focused_cell(), None);

        assert_eq!(with_grid(&slot, |g| g.is_destroyed()), Some(false));
        assert!(state.borrow().is_destroyed());
        assert!(mount.first_child().is_none());

        drop(grid);
        drop(state);
        assert!(slot.upgrade().is_none());
    }

    #[wasm_bindgen_test]
    fn test_destroy_when_free_is_immediate() {
        let (mut grid, mount) = mounted_grid("free-destroy");
        let state = Rc::clone(grid.state.as_ref().unwrap());

        grid.destroy();
        assert!(state.borrow().is_destroyed());
        assert!(mount.first_child().is_none());
    }
}
