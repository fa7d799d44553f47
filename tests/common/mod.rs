//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::borrow::Cow;

use tablegrid::grid::{GridMetrics, HitTarget, RenderedRegion};
use tablegrid::{DataGrid, FrameContext, GridEvent, GridMsg, GridStyle, MemoryTable, TableModel};

/// Surface used by most tests: 800 x 600 at scale 1.
///
/// With 80 x 32 cells the row header is 160 wide, the column header 64 tall
/// and the body 640 x 536 (8 columns, 16.75 rows).
pub const WIDTH: f32 = 800.0;
pub const HEIGHT: f32 = 600.0;

/// Table wrapper that counts every mutation the grid performs
#[derive(Debug, Default)]
pub struct RecordingTable {
    pub inner: MemoryTable,
    pub cell_writes: Vec<(usize, usize, Option<String>)>,
    pub column_renames: Vec<(usize, String)>,
    pub row_renames: Vec<(usize, String)>,
    pub appended_rows: usize,
    pub appended_columns: Vec<String>,
    pub refreshes: usize,
}

impl RecordingTable {
    pub fn new(inner: MemoryTable) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    pub fn sample() -> Self {
        Self::new(MemoryTable::sample())
    }

    pub fn blank(rows: usize, cols: usize) -> Self {
        Self::new(MemoryTable::blank(rows, cols))
    }

    /// Total number of writes of any kind
    pub fn writes(&self) -> usize {
        self.cell_writes.len() + self.column_renames.len() + self.row_renames.len()
    }

    /// Drop trailing rows, as an external model might between frames
    pub fn truncate_rows(&mut self, rows: usize) {
        let (_, cols) = self.inner.size();
        let names: Vec<String> = (0..cols)
            .map(|c| self.inner.column_name(c).into_owned())
            .collect();
        let kept: Vec<Vec<Option<String>>> = (0..rows.min(self.inner.row_count()))
            .map(|r| {
                (0..cols)
                    .map(|c| self.inner.cell(r, c).map(Cow::into_owned))
                    .collect()
            })
            .collect();
        self.inner = MemoryTable::from_rows(names, kept);
    }
}

impl TableModel for RecordingTable {
    fn size(&self) -> (usize, usize) {
        self.inner.size()
    }

    fn cell(&self, row: usize, col: usize) -> Option<Cow<'_, str>> {
        self.inner.cell(row, col)
    }

    fn set_cell(&mut self, row: usize, col: usize, value: Option<&str>) {
        self.cell_writes.push((row, col, value.map(str::to_string)));
        self.inner.set_cell(row, col, value);
    }

    fn column_name(&self, col: usize) -> Cow<'_, str> {
        self.inner.column_name(col)
    }

    fn set_column_name(&mut self, col: usize, name: &str) {
        self.column_renames.push((col, name.to_string()));
        self.inner.set_column_name(col, name);
    }

    fn row_name(&self, row: usize) -> Cow<'_, str> {
        self.inner.row_name(row)
    }

    fn set_row_name(&mut self, row: usize, name: &str) {
        self.row_renames.push((row, name.to_string()));
        self.inner.set_row_name(row, name);
    }

    fn append_row(&mut self) -> bool {
        self.appended_rows += 1;
        self.inner.append_row()
    }

    fn append_column(&mut self, name: &str) -> bool {
        self.appended_columns.push(name.to_string());
        self.inner.append_column(name)
    }

    fn refresh(&mut self) {
        self.refreshes += 1;
    }
}

/// Grid bound to `table` and sized to the default test surface
pub fn test_grid<T: TableModel>(table: T) -> DataGrid<T> {
    let mut grid = DataGrid::with_table(GridStyle::default(), table);
    grid.resize(WIDTH, HEIGHT, 1.0);
    grid
}

/// Run one frame with `events` on the default surface
pub fn frame<T: TableModel>(
    grid: &mut DataGrid<T>,
    events: impl IntoIterator<Item = GridEvent>,
) -> RenderedRegion {
    grid.layout(FrameContext::new(WIDTH, HEIGHT).with_events(events))
}

/// Run one frame without input
pub fn idle_frame<T: TableModel>(grid: &mut DataGrid<T>) -> RenderedRegion {
    frame(grid, Vec::<GridEvent>::new())
}

/// Center of `target` under the grid's current scroll position
pub fn center_of<T: TableModel>(grid: &DataGrid<T>, target: HitTarget) -> (f32, f32) {
    let metrics: GridMetrics = grid.metrics();
    let viewport = grid.viewport();
    let (x, y) = match target {
        HitTarget::Cell { row, col } => (
            metrics.column_x(col, &viewport) + metrics.cell_width / 2.0,
            metrics.row_y(row, &viewport) + metrics.cell_height / 2.0,
        ),
        HitTarget::ColumnLabel(col) => (
            metrics.column_x(col, &viewport) + metrics.cell_width / 2.0,
            metrics.cell_height / 2.0,
        ),
        HitTarget::ColumnName(col) => (
            metrics.column_x(col, &viewport) + metrics.cell_width / 2.0,
            metrics.cell_height * 1.5,
        ),
        HitTarget::RowNumber(row) => (
            metrics.cell_width / 2.0,
            metrics.row_y(row, &viewport) + metrics.cell_height / 2.0,
        ),
        HitTarget::RowName(row) => (
            metrics.cell_width * 1.5,
            metrics.row_y(row, &viewport) + metrics.cell_height / 2.0,
        ),
        HitTarget::Corner => (metrics.cell_width, metrics.cell_height),
        HitTarget::None => (-1.0, -1.0),
    };
    (x, y)
}

/// Click event at the center of `target`
pub fn click_on<T: TableModel>(grid: &DataGrid<T>, target: HitTarget) -> GridEvent {
    let (x, y) = center_of(grid, target);
    GridEvent::Click { x, y }
}

/// Messages typing `text` then confirming with Enter
pub fn type_and_submit(text: &str) -> Vec<GridEvent> {
    vec![
        GridMsg::CursorEnd.into(),
        GridMsg::InsertText(text.to_string()).into(),
        GridMsg::Submit.into(),
    ]
}
