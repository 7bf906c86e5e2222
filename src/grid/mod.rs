//! The grid instance.
//!
//! A [`Grid`] owns everything one widget needs: layout, dataset, renderer,
//! the three node pools, the current view range, focus and pending frame
//! requests. Nothing is shared between grids.

mod events;
mod scroll;

use crate::config::{GridConfig, GridOptions};
use crate::data::{CellRenderer, DataSource, DefaultRenderer};
use crate::error::{GridError, Result};
use crate::layout::{AxisSource, GridLayout, ViewRange, Viewport};
use crate::render::{cell_paint, counter_paint, header_paint, reconcile, CellPool, Layer, Surface};
use crate::schedule::{FrameScheduler, PendingUpdates};
use crate::types::CellId;

type Callback = Box<dyn FnMut()>;

/// A virtualized grid bound to a surface.
pub struct Grid<D: DataSource, S: Surface, F: FrameScheduler> {
    surface: S,
    scheduler: F,
    data: D,
    renderer: Box<dyn CellRenderer<D::Value>>,
    layout: GridLayout,
    options: GridOptions,

    header: CellPool<S::Node>,
    counter: CellPool<S::Node>,
    cells: CellPool<S::Node>,

    viewport: Viewport,
    range: ViewRange,
    /// Scroll offsets seen by the previous scroll event
    last_scroll: (f64, f64),
    focus: Option<CellId>,
    pending: PendingUpdates<F::Handle>,

    on_scroll: Option<Callback>,
    on_resize: Option<Callback>,
    destroyed: bool,
}

fn logged(err: GridError) -> GridError {
    log::error!("{err}");
    err
}

impl<D, S, F> Grid<D, S, F>
where
    D: DataSource,
    S: Surface,
    F: FrameScheduler,
{
    /// Validate the configuration, mount the surface and render the initial
    /// range.
    ///
    /// A missing mount or dataset is reported before the surface is touched.
    pub fn new(config: GridConfig<D, S>, scheduler: F) -> Result<Self> {
        let GridConfig {
            mount,
            data,
            rows,
            columns,
            renderer,
            on_scroll,
            on_resize,
            options,
        } = config;

        let mut surface = mount.ok_or_else(|| logged(GridError::MissingMount))?;
        let data = data.ok_or_else(|| logged(GridError::MissingData))?;

        let rows = match rows {
            Some(list) => AxisSource::Explicit(list),
            None => AxisSource::Generated(data.row_count()),
        };
        let columns = match columns {
            Some(list) => AxisSource::Explicit(list),
            None => AxisSource::Generated(data.column_count()),
        };
        let layout = GridLayout::build(rows, columns, &options).map_err(logged)?;

        surface.mount(layout.total_width(), layout.total_height())?;
        let viewport = surface.measure();

        let mut grid = Grid {
            surface,
            scheduler,
            data,
            renderer: renderer.unwrap_or_else(|| Box::new(DefaultRenderer)),
            range: viewport.view_range(&layout, options.overscan),
            layout,
            options,
            header: CellPool::new(Layer::Header),
            counter: CellPool::new(Layer::Counter),
            cells: CellPool::new(Layer::Cells),
            last_scroll: (viewport.scroll_x, viewport.scroll_y),
            viewport,
            focus: None,
            pending: PendingUpdates::default(),
            on_scroll,
            on_resize,
            destroyed: false,
        };

        if let Err(err) = grid.render_all() {
            grid.destroy();
            return Err(logged(err));
        }

        log::debug!(
            "[grid] mounted {} x {}, range {:?}",
            grid.layout.row_count(),
            grid.layout.column_count(),
            grid.range
        );
        Ok(grid)
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    /// Range materialized by the most recent scroll or resize.
    pub fn view_range(&self) -> ViewRange {
        self.range
    }

    /// Viewport measured by the most recent event.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn focus(&self) -> Option<CellId> {
        self.focus
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn pool(&self, layer: Layer) -> &CellPool<S::Node> {
        match layer {
            Layer::Header => &self.header,
            Layer::Counter => &self.counter,
            Layer::Cells => &self.cells,
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Cancel pending passes, discard every pooled node and unmount. Events
    /// arriving afterwards are ignored.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        for handle in self.pending.drain() {
            self.scheduler.cancel(handle);
        }
        self.header.clear(&mut self.surface);
        self.counter.clear(&mut self.surface);
        self.cells.clear(&mut self.surface);
        self.surface.unmount();
        self.range = ViewRange::default();
        self.focus = None;
        self.destroyed = true;
        log::debug!("[grid] destroyed");
    }

    fn render_all(&mut self) -> Result<()> {
        self.update_header()?;
        self.update_counter()?;
        self.update_cells()
    }

    /// Re-measure the surface and recompute the range.
    fn refresh_view(&mut self) {
        self.viewport = self.surface.measure();
        self.range = self.viewport.view_range(&self.layout, self.options.overscan);
    }

    fn contains(&self, cell: CellId) -> bool {
        cell.row < self.layout.row_count() && cell.column < self.layout.column_count()
    }

    /// Column names for the columns of the range, shifted by the horizontal
    /// scroll.
    fn update_header(&mut self) -> Result<()> {
        self.surface
            .set_layer_offset(Layer::Header, -self.viewport.scroll_x);
        let layout = &self.layout;
        let paints = self
            .range
            .columns
            .into_iter()
            .flat_map(|r| r.iter())
            .filter_map(|c| layout.column(c))
            .map(|column| Ok(header_paint(column)));
        reconcile(&mut self.surface, &mut self.header, paints)?;
        Ok(())
    }

    /// Row names for the rows of the range, shifted by the vertical scroll.
    fn update_counter(&mut self) -> Result<()> {
        self.surface
            .set_layer_offset(Layer::Counter, -self.viewport.scroll_y);
        let layout = &self.layout;
        let paints = self
            .range
            .rows
            .into_iter()
            .flat_map(|r| r.iter())
            .filter_map(|r| layout.row(r).map(|row| Ok(counter_paint(r, row))));
        reconcile(&mut self.surface, &mut self.counter, paints)?;
        Ok(())
    }

    /// Data cells of the range, then focus restoration.
    fn update_cells(&mut self) -> Result<()> {
        let Self {
            surface,
            cells,
            layout,
            data,
            renderer,
            range,
            ..
        } = self;

        let paints = range
            .cells()
            .filter_map(|cell| Some((cell, layout.row(cell.row)?, layout.column(cell.column)?)))
            .map(|(cell, row, column)| {
                let value = data.value(row.key, column.key);
                let content = renderer.render(cell.row, cell.column, value.as_ref())?;
                Ok(cell_paint(cell, row, column, content))
            });
        reconcile(surface, cells, paints)?;

        if let Some(focus) = self.focus.filter(|f| self.range.contains(*f)) {
            if let Some(node) = self.cells.node_for(focus) {
                self.surface.focus_node(node);
            }
        }
        Ok(())
    }
}
