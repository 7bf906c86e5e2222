//! Scroll and resize handling.
//!
//! Header and counter layers follow every event so they never lag behind the
//! data. The data layer is reconciled in a deferred pass, at most one pending
//! per event class.

use super::Grid;
use crate::data::DataSource;
use crate::error::Result;
use crate::render::Surface;
use crate::schedule::{FrameScheduler, UpdateClass};

fn moved(current: f64, previous: f64) -> bool {
    (current - previous).abs() > f64::EPSILON
}

impl<D, S, F> Grid<D, S, F>
where
    D: DataSource,
    S: Surface,
    F: FrameScheduler,
{
    /// The surface scrolled.
    pub fn on_scroll(&mut self) -> Result<()> {
        if self.destroyed {
            return Ok(());
        }
        self.refresh_view();
        let (scroll_x, scroll_y) = (self.viewport.scroll_x, self.viewport.scroll_y);
        let (last_x, last_y) = self.last_scroll;

        if moved(scroll_x, last_x) {
            self.update_header()?;
        }
        if moved(scroll_y, last_y) {
            self.update_counter()?;
        }
        self.schedule(UpdateClass::Scroll)?;
        self.last_scroll = (scroll_x, scroll_y);
        Ok(())
    }

    /// The surface changed size.
    pub fn on_resize(&mut self) -> Result<()> {
        if self.destroyed {
            return Ok(());
        }
        self.refresh_view();
        self.update_header()?;
        self.update_counter()?;
        self.schedule(UpdateClass::Resize)
    }

    /// Run the deferred pass for `class` if one is pending: reconcile the
    /// data layer, then notify the consumer. Returns whether a pass ran.
    pub fn run_pending(&mut self, class: UpdateClass) -> Result<bool> {
        if self.destroyed || self.pending.take(class).is_none() {
            return Ok(false);
        }
        self.update_cells()?;

        let callback = match class {
            UpdateClass::Scroll => self.on_scroll.as_mut(),
            UpdateClass::Resize => self.on_resize.as_mut(),
        };
        if let Some(callback) = callback {
            callback();
        }
        Ok(true)
    }

    /// Whether a deferred pass for `class` is waiting for its frame.
    pub fn is_pending(&self, class: UpdateClass) -> bool {
        self.pending.is_pending(class)
    }

    fn schedule(&mut self, class: UpdateClass) -> Result<()> {
        if let Some(previous) = self.pending.take(class) {
            self.scheduler.cancel(previous);
        }
        let handle = self.scheduler.request(class)?;
        self.pending.replace(class, handle);
        log::debug!("[schedule] {class:?} pass requested");
        Ok(())
    }
}
