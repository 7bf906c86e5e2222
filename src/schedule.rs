//! Deferred update scheduling.
//!
//! Scroll and resize bursts are coalesced: each class keeps at most one
//! pending frame request, and requesting a new one cancels the old. The host
//! runs the pass with [`Grid::run_pending`](crate::grid::Grid::run_pending)
//! when the frame fires.

use crate::error::Result;

/// Event class with its own pending slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateClass {
    Scroll,
    Resize,
}

/// Source of "next frame" callbacks.
pub trait FrameScheduler {
    type Handle;

    /// Ask for a frame in which the pass for `class` runs.
    fn request(&mut self, class: UpdateClass) -> Result<Self::Handle>;

    /// Withdraw a request that has not fired yet.
    fn cancel(&mut self, handle: Self::Handle);
}

/// One optional handle per update class.
#[derive(Debug)]
pub struct PendingUpdates<H> {
    scroll: Option<H>,
    resize: Option<H>,
}

impl<H> Default for PendingUpdates<H> {
    fn default() -> Self {
        Self {
            scroll: None,
            resize: None,
        }
    }
}

impl<H> PendingUpdates<H> {
    fn slot(&mut self, class: UpdateClass) -> &mut Option<H> {
        match class {
            UpdateClass::Scroll => &mut self.scroll,
            UpdateClass::Resize => &mut self.resize,
        }
    }

    pub fn is_pending(&self, class: UpdateClass) -> bool {
        match class {
            UpdateClass::Scroll => self.scroll.is_some(),
            UpdateClass::Resize => self.resize.is_some(),
        }
    }

    /// Store `handle`, returning the one it replaces.
    pub fn replace(&mut self, class: UpdateClass, handle: H) -> Option<H> {
        self.slot(class).replace(handle)
    }

    pub fn take(&mut self, class: UpdateClass) -> Option<H> {
        self.slot(class).take()
    }

    /// Empty every slot.
    pub fn drain(&mut self) -> impl Iterator<Item = H> {
        [self.scroll.take(), self.resize.take()].into_iter().flatten()
    }
}

/// Scheduler that never fires on its own.
///
/// Requests and cancellations are recorded; the owner decides when a frame
/// "happens" by calling `run_pending`. Used headless and in tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next: u64,
    requested: Vec<(UpdateClass, u64)>,
    cancelled: Vec<u64>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request so far, oldest first.
    pub fn requested(&self) -> &[(UpdateClass, u64)] {
        &self.requested
    }

    pub fn cancelled(&self) -> &[u64] {
        &self.cancelled
    }

    /// Requests for `class` that were neither cancelled nor superseded.
    pub fn live(&self, class: UpdateClass) -> usize {
        self.requested
            .iter()
            .filter(|(c, id)| *c == class && !self.cancelled.contains(id))
            .count()
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u64;

    fn request(&mut self, class: UpdateClass) -> Result<u64> {
        let id = self.next;
        self.next += 1;
        self.requested.push((class, id));
        Ok(id)
    }

    fn cancel(&mut self, handle: u64) {
        self.cancelled.push(handle);
    }
}
