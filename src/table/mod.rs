//! Table model boundary
//!
//! The grid never owns cell storage. It reads sizes, values and names through
//! [`TableModel`] and writes committed edits back through the same trait.
//!
//! ```text
//! DataGrid<T: TableModel>
//! ├── reads:  size / cell / column_name / row_name
//! ├── writes: set_cell / set_column_name / set_row_name, then refresh
//! └── grows:  append_row / append_column (optional), then refresh
//! ```

mod memory;

use std::borrow::Cow;

pub use memory::MemoryTable;

/// Rectangular table of optional text values with named rows and columns.
///
/// `None` from [`TableModel::cell`] means the cell is null. Writers pass
/// `None` to clear a cell.
pub trait TableModel {
    /// Number of `(rows, columns)`
    fn size(&self) -> (usize, usize);

    /// Value at `(row, col)`, `None` for null or out-of-range cells
    fn cell(&self, row: usize, col: usize) -> Option<Cow<'_, str>>;

    fn set_cell(&mut self, row: usize, col: usize, value: Option<&str>);

    fn column_name(&self, col: usize) -> Cow<'_, str>;

    fn set_column_name(&mut self, col: usize, name: &str);

    fn row_name(&self, row: usize) -> Cow<'_, str>;

    fn set_row_name(&mut self, row: usize, name: &str);

    /// Called after the grid has written to the model so later reads
    /// reflect the change.
    fn refresh(&mut self) {}

    /// Append a row of null cells. Returns false when the model's shape is
    /// fixed.
    fn append_row(&mut self) -> bool {
        false
    }

    /// Append a column of null cells named `name`. Returns false when the
    /// model's shape is fixed.
    fn append_column(&mut self, _name: &str) -> bool {
        false
    }

    /// Whether `(row, col)` lies inside the current bounds
    fn contains(&self, row: usize, col: usize) -> bool {
        let (rows, cols) = self.size();
        row < rows && col < cols
    }
}

impl<T: TableModel + ?Sized> TableModel for Box<T> {
    fn size(&self) -> (usize, usize) {
        (**self).size()
    }

    fn cell(&self, row: usize, col: usize) -> Option<Cow<'_, str>> {
        (**self).cell(row, col)
    }

    fn set_cell(&mut self, row: usize, col: usize, value: Option<&str>) {
        (**self).set_cell(row, col, value)
    }

    fn column_name(&self, col: usize) -> Cow<'_, str> {
        (**self).column_name(col)
    }

    fn set_column_name(&mut self, col: usize, name: &str) {
        (**self).set_column_name(col, name)
    }

    fn row_name(&self, row: usize) -> Cow<'_, str> {
        (**self).row_name(row)
    }

    fn set_row_name(&mut self, row: usize, name: &str) {
        (**self).set_row_name(row, name)
    }

    fn append_row(&mut self) -> bool {
        (**self).append_row()
    }

    fn append_column(&mut self, name: &str) -> bool {
        (**self).append_column(name)
    }

    fn refresh(&mut self) {
        (**self).refresh()
    }
}
