//! Editable virtualized data grid
//!
//! # Architecture
//!
//! ```text
//! DataGrid<T: TableModel>
//! ├── table: Option<T>        (bound model, replaced by bind)
//! ├── state: GridState
//! │   ├── WidgetPool          (edit buffers + click detectors by coordinate)
//! │   ├── SelectionModel      (selected row / column)
//! │   └── CellEditStateMachine (Browsing | Cell | ColumnName | RowName)
//! ├── viewport: GridViewport  (one scroll offset per axis)
//! └── style: GridStyle        (cell size, theme, corner label)
//! ```
//!
//! The host calls [`DataGrid::layout`] once per frame with the queued input
//! events and executes the returned draw ops.

pub mod edit;
pub mod labels;
pub mod layout;
pub mod paint;
pub mod pool;
pub mod selection;
pub mod state;
pub mod text;
pub mod viewport;

pub use edit::{CellEditStateMachine, CommitOutcome, EditTarget};
pub use layout::{GridGeometry, GridMetrics, HitTarget, Rect};
pub use paint::{DrawOp, Region, RenderedCell, RenderedRegion};
pub use pool::{ClickDetector, EditBuffer, WidgetKey, WidgetPool};
pub use selection::{Highlight, SelectionModel};
pub use state::GridState;
pub use viewport::GridViewport;

use crate::config::GridConfig;
use crate::messages::{GridEvent, GridMsg};
use crate::table::TableModel;
use crate::theme::GridTheme;

use paint::Painter;

pub const DEFAULT_CORNER_LABEL: &str = "Row / Col";

/// Visual parameters of a grid
#[derive(Debug, Clone, PartialEq)]
pub struct GridStyle {
    pub geometry: GridGeometry,
    pub theme: GridTheme,
    pub corner_label: String,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            geometry: GridGeometry::default(),
            theme: GridTheme::default(),
            corner_label: DEFAULT_CORNER_LABEL.to_string(),
        }
    }
}

impl GridStyle {
    pub fn from_config(config: &GridConfig, theme: GridTheme) -> Self {
        Self {
            geometry: GridGeometry {
                cell_width: config.cell_width,
                cell_height: config.cell_height,
            },
            theme,
            corner_label: config.corner_label.clone(),
        }
    }
}

/// Per-frame input from the host
#[derive(Debug, Clone, PartialEq)]
pub struct FrameContext {
    /// Surface size in physical pixels
    pub width: f32,
    pub height: f32,
    pub scale: f32,
    pub events: Vec<GridEvent>,
}

impl FrameContext {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scale: 1.0,
            events: Vec::new(),
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_events(mut self, events: impl IntoIterator<Item = GridEvent>) -> Self {
        self.events.extend(events);
        self
    }

    pub fn push(&mut self, event: GridEvent) {
        self.events.push(event);
    }
}

/// Spreadsheet-style grid bound to at most one [`TableModel`]
#[derive(Debug)]
pub struct DataGrid<T: TableModel> {
    table: Option<T>,
    state: GridState,
    viewport: GridViewport,
    style: GridStyle,
    surface: (f32, f32),
    scale: f32,
}

impl<T: TableModel> Default for DataGrid<T> {
    fn default() -> Self {
        Self::new(GridStyle::default())
    }
}

impl<T: TableModel> DataGrid<T> {
    pub fn new(style: GridStyle) -> Self {
        Self {
            table: None,
            state: GridState::new(),
            viewport: GridViewport::new(),
            style,
            surface: (0.0, 0.0),
            scale: 1.0,
        }
    }

    pub fn with_table(style: GridStyle, table: T) -> Self {
        let mut grid = Self::new(style);
        grid.bind(table);
        grid
    }

    // =========================================================================
    // Binding
    // =========================================================================

    /// Replace the bound table, returning the previous one.
    ///
    /// Pool, selection and edit target start over; the scroll position
    /// returns to the origin.
    pub fn bind(&mut self, table: T) -> Option<T> {
        let (rows, cols) = table.size();
        let previous = self.table.replace(table);
        self.state.clear();
        self.viewport.reset();
        tracing::info!("Bound table ({} x {})", rows, cols);
        previous
    }

    /// Detach the table; the grid renders an empty region until rebound
    pub fn unbind(&mut self) -> Option<T> {
        let previous = self.table.take();
        self.state.clear();
        self.viewport.reset();
        previous
    }

    pub fn table(&self) -> Option<&T> {
        self.table.as_ref()
    }

    /// Mutable access to the bound table. Shrinking it is allowed; stale
    /// coordinates render as placeholders.
    pub fn table_mut(&mut self) -> Option<&mut T> {
        self.table.as_mut()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn state(&self) -> &GridState {
        &self.state
    }

    pub fn selection(&self) -> &SelectionModel {
        self.state.selection()
    }

    pub fn edit_target(&self) -> EditTarget {
        self.state.edit_target()
    }

    /// Live text of the active edit buffer
    pub fn active_editor_text(&self) -> Option<&str> {
        self.state.active_editor().map(EditBuffer::text)
    }

    pub fn viewport(&self) -> GridViewport {
        self.viewport
    }

    pub fn style(&self) -> &GridStyle {
        &self.style
    }

    pub fn set_theme(&mut self, theme: GridTheme) {
        self.style.theme = theme;
    }

    /// Geometry of the most recent frame size against the bound table
    pub fn metrics(&self) -> GridMetrics {
        let size = self.table.as_ref().map_or((0, 0), T::size);
        GridMetrics::new(&self.style.geometry, self.scale, size, self.surface)
    }

    /// Full display text at `(row, col)`: `"."` for null, `"N/A"` out of range
    pub fn cell_text(&self, row: usize, col: usize) -> Option<String> {
        let table = self.table.as_ref()?;
        Some(edit::cell_display(table, row, col).into_owned())
    }

    /// "Selected B3: content" for the selected cell.
    ///
    /// While the cell is being edited the live buffer is shown instead of
    /// the stored value.
    pub fn selection_summary(&self) -> Option<String> {
        let (row, col) = self.selection().cell()?;
        let content = if self.edit_target().is_cell(row, col) {
            self.active_editor_text()?.to_string()
        } else {
            self.cell_text(row, col)?
        };
        Some(format!(
            "Selected {}: {}",
            labels::cell_reference(row, col),
            content
        ))
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Evict pooled editors and leave edit mode. Selection is kept.
    pub fn reset_editors(&mut self) {
        self.state.reset_editors();
    }

    /// Begin editing `(row, col)` and scroll it into view
    pub fn click_cell(&mut self, row: usize, col: usize) -> bool {
        let Some(table) = self.table.as_ref() else {
            return false;
        };
        if !table.contains(row, col) {
            tracing::debug!("Ignoring click on out-of-range cell ({}, {})", row, col);
            return false;
        }
        self.state.click_cell(table, row, col);
        let metrics = self.metrics();
        self.viewport.ensure_visible(row, col, &metrics);
        true
    }

    pub fn click_column_name(&mut self, col: usize) -> bool {
        let Some(table) = self.table.as_ref() else {
            return false;
        };
        if col >= table.size().1 {
            tracing::debug!("Ignoring click on out-of-range column {}", col);
            return false;
        }
        self.state.click_column_name(table, col);
        true
    }

    pub fn click_row_name(&mut self, row: usize) -> bool {
        let Some(table) = self.table.as_ref() else {
            return false;
        };
        if row >= table.size().0 {
            tracing::debug!("Ignoring click on out-of-range row {}", row);
            return false;
        }
        self.state.click_row_name(table, row);
        true
    }

    /// Append a null row.
    ///
    /// A table without columns gets a `var1` column holding one null value
    /// instead.
    pub fn add_row(&mut self) -> bool {
        let Some(table) = self.table.as_mut() else {
            return false;
        };
        if table.size().1 == 0 {
            return self.add_column();
        }
        if !table.append_row() {
            tracing::debug!("Bound table does not accept new rows");
            return false;
        }
        table.refresh();
        tracing::debug!(target: "grid_state", "row appended, size {:?}", table.size());
        true
    }

    /// Append a null column named `var{n}`, where `n` is the new column
    /// count. An empty table also gets one row so the column has a value.
    pub fn add_column(&mut self) -> bool {
        let Some(table) = self.table.as_mut() else {
            return false;
        };
        let (rows, cols) = table.size();
        let name = labels::appended_column_name(cols);
        if !table.append_column(&name) {
            tracing::debug!("Bound table does not accept new columns");
            return false;
        }
        if rows == 0 && !table.append_row() {
            tracing::debug!("Column {} appended without rows", name);
        }
        table.refresh();
        tracing::debug!(target: "grid_state", "column {} appended, size {:?}", name, table.size());
        true
    }

    /// Commit the active buffer and return to browsing
    pub fn submit(&mut self) -> CommitOutcome {
        match self.table.as_mut() {
            Some(table) => self.state.submit(table),
            None => CommitOutcome::NotEditing,
        }
    }

    /// Apply `f` to the active edit buffer. Returns false while browsing.
    pub fn edit_buffer(&mut self, f: impl FnOnce(&mut EditBuffer)) -> bool {
        match self.state.active_editor_mut() {
            Some(buffer) => {
                f(buffer);
                true
            }
            None => false,
        }
    }

    pub fn scroll_by(&mut self, dx: f32, dy: f32) {
        let metrics = self.metrics();
        self.viewport.scroll_by(dx, dy, &metrics);
    }

    pub fn scroll_to(&mut self, x: f32, y: f32) {
        let metrics = self.metrics();
        self.viewport.scroll_to(x, y, &metrics);
    }

    /// Record a new surface size and re-clamp the scroll offsets
    pub fn resize(&mut self, width: f32, height: f32, scale: f32) {
        self.surface = (width, height);
        self.scale = if scale > 0.0 { scale } else { 1.0 };
        let metrics = self.metrics();
        self.viewport.clamp(&metrics);
    }

    // =========================================================================
    // Frame
    // =========================================================================

    /// Process one frame of input and produce its draw ops.
    ///
    /// Clicks are latched into the click detector under the pointer, then
    /// consumed for visible widgets; clicks left unconsumed are dropped. Scroll messages apply as they arrive so
    /// later clicks hit the scrolled geometry. Other messages apply after the
    /// clicks, so text typed in the same frame lands in the newly activated
    /// editor.
    pub fn layout(&mut self, ctx: FrameContext) -> RenderedRegion {
        self.resize(ctx.width, ctx.height, ctx.scale);

        if self.table.is_none() {
            if !ctx.events.is_empty() {
                tracing::trace!("No table bound, dropping {} events", ctx.events.len());
            }
            return RenderedRegion::empty(self.metrics().bounds());
        }

        let mut deferred = Vec::new();
        for event in ctx.events {
            match event {
                GridEvent::Click { x, y } => {
                    let hit = self.metrics().hit_test(x, y, &self.viewport);
                    match hit.widget_key() {
                        Some(key) => self.state.pool_mut().clicker(key).click(),
                        None => tracing::trace!("Click at ({}, {}) hit {:?}", x, y, hit),
                    }
                }
                GridEvent::Msg(msg @ (GridMsg::ScrollBy { .. } | GridMsg::ScrollTo { .. })) => {
                    crate::update::update(self, msg);
                }
                GridEvent::Msg(msg) => deferred.push(msg),
            }
        }

        self.dispatch_clicks();

        for msg in deferred {
            crate::update::update(self, msg);
        }

        self.paint()
    }

    /// Fire the edit transition of every visible widget with a pending click
    fn dispatch_clicks(&mut self) {
        let metrics = self.metrics();
        let rows = self.viewport.visible_rows(&metrics);
        let cols = self.viewport.visible_cols(&metrics);

        for col in cols.clone() {
            if self.state.pool_mut().column_name_clicker(col).clicked() {
                self.click_column_name(col);
            }
        }
        for row in rows.clone() {
            if self.state.pool_mut().row_name_clicker(row).clicked() {
                self.click_row_name(row);
            }
        }
        for row in rows {
            for col in cols.clone() {
                if self.state.pool_mut().cell_clicker(row, col).clicked() {
                    self.click_cell(row, col);
                }
            }
        }

        let dropped = self.state.pool_mut().cancel_pending_clicks();
        if dropped > 0 {
            tracing::trace!("Dropped {} clicks on widgets scrolled out of view", dropped);
        }
    }

    fn paint(&self) -> RenderedRegion {
        let metrics = self.metrics();
        let Some(table) = self.table.as_ref() else {
            return RenderedRegion::empty(metrics.bounds());
        };
        Painter {
            table,
            state: &self.state,
            metrics,
            viewport: self.viewport,
            theme: &self.style.theme,
            corner_label: &self.style.corner_label,
            text_budget: text::cell_text_budget(self.style.geometry.cell_width),
        }
        .paint()
    }
}
