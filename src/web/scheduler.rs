//! Animation-frame scheduler for the browser.

use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::source::JsCallbacks;
use super::WebGrid;
use crate::error::{GridError, Result};
use crate::schedule::{FrameScheduler, UpdateClass};

/// Late-bound reference to the grid a scheduler or listener serves.
///
/// Bound once the grid exists; upgrading fails after the grid is dropped. A
/// `destroy` that arrives while the grid is borrowed parks a strong reference
/// here, and whoever holds the borrow finishes the teardown on release.
#[derive(Default)]
pub struct SlotState {
    grid: OnceCell<Weak<RefCell<WebGrid>>>,
    teardown: RefCell<Option<Rc<RefCell<WebGrid>>>>,
}

pub type GridSlot = Rc<SlotState>;

impl SlotState {
    pub(super) fn bind(&self, grid: &Rc<RefCell<WebGrid>>) {
        let _ = self.grid.set(Rc::downgrade(grid));
    }

    pub(super) fn upgrade(&self) -> Option<Rc<RefCell<WebGrid>>> {
        self.grid.get().and_then(Weak::upgrade)
    }

    /// Destroy now if the grid is free, otherwise on the next release.
    pub(super) fn teardown(&self, state: Rc<RefCell<WebGrid>>) {
        *self.teardown.borrow_mut() = Some(state);
        self.finish_teardown();
    }

    /// Run a parked teardown once the grid can be borrowed.
    pub(super) fn finish_teardown(&self) {
        let Some(state) = self.teardown.borrow_mut().take() else {
            return;
        };
        match state.try_borrow_mut() {
            Ok(mut grid) => grid.destroy(),
            Err(_) => {
                log::debug!("[grid] busy, teardown deferred");
                *self.teardown.borrow_mut() = Some(Rc::clone(&state));
            }
        }
    }
}

/// A pending animation frame or, when frames are unavailable, a timeout.
#[derive(Debug, Clone, Copy)]
pub struct FrameHandle {
    id: i32,
    animation_frame: bool,
}

/// Requests `requestAnimationFrame` callbacks, falling back to
/// `setTimeout(0)`. One persistent closure per update class.
pub struct WebFrameScheduler {
    slot: GridSlot,
    callbacks: Rc<JsCallbacks>,
    closures: HashMap<UpdateClass, Closure<dyn FnMut()>>,
}

impl WebFrameScheduler {
    pub fn new(slot: GridSlot, callbacks: Rc<JsCallbacks>) -> Self {
        Self {
            slot,
            callbacks,
            closures: HashMap::new(),
        }
    }
}

/// Frame body: run the deferred pass, release the grid, then call the
/// consumer.
fn run_frame(slot: &GridSlot, callbacks: &JsCallbacks, class: UpdateClass) {
    let Some(state) = slot.upgrade() else {
        return;
    };
    let ran = match state.try_borrow_mut() {
        Ok(mut grid) => grid.run_pending(class),
        Err(_) => {
            log::warn!("[schedule] grid busy, {class:?} frame skipped");
            return;
        }
    };
    slot.finish_teardown();
    match ran {
        Ok(true) => callbacks.invoke(class),
        Ok(false) => {}
        Err(err) => log::error!("[schedule] {class:?} pass failed: {err}"),
    }
}

impl FrameScheduler for WebFrameScheduler {
    type Handle = FrameHandle;

    fn request(&mut self, class: UpdateClass) -> Result<FrameHandle> {
        let window =
            web_sys::window().ok_or_else(|| GridError::Surface("no window".to_string()))?;

        let slot = Rc::clone(&self.slot);
        let callbacks = Rc::clone(&self.callbacks);
        let closure = self.closures.entry(class).or_insert_with(|| {
            Closure::wrap(Box::new(move || run_frame(&slot, &callbacks, class)) as Box<dyn FnMut()>)
        });
        let callback: &js_sys::Function = closure.as_ref().unchecked_ref();

        if let Ok(id) = window.request_animation_frame(callback) {
            return Ok(FrameHandle {
                id,
                animation_frame: true,
            });
        }
        window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback, 0)
            .map(|id| FrameHandle {
                id,
                animation_frame: false,
            })
            .map_err(|e| GridError::Surface(format!("{e:?}")))
    }

    fn cancel(&mut self, handle: FrameHandle) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if handle.animation_frame {
            let _ = window.cancel_animation_frame(handle.id);
        } else {
            window.clear_timeout_with_handle(handle.id);
        }
    }
}
