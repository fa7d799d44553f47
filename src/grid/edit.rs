//! Edit target state machine and commit rules
//!
//! ```text
//!            click cell / column name / row name
//! Browsing ─────────────────────────────────────▶ Editing*(target)
//!    ▲                                                 │
//!    └──────────────── submit (commit) ────────────────┘
//! ```
//!
//! Clicking another target while editing switches directly and drops the
//! uncommitted buffer of the previous target.

use std::borrow::Cow;

use super::pool::WidgetKey;
use crate::table::TableModel;

/// Displayed for null cells; committing it clears the cell
pub const NULL_DISPLAY: &str = ".";

/// Displayed for coordinates outside the bound table
pub const OUT_OF_BOUNDS_DISPLAY: &str = "N/A";

/// What, if anything, is being edited. Exactly one value at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditTarget {
    #[default]
    Browsing,
    Cell {
        row: usize,
        col: usize,
    },
    ColumnName(usize),
    RowName(usize),
}

impl EditTarget {
    pub fn is_editing(&self) -> bool {
        !matches!(self, EditTarget::Browsing)
    }

    /// Pool key of the buffer under edit
    pub fn widget_key(&self) -> Option<WidgetKey> {
        match *self {
            EditTarget::Browsing => None,
            EditTarget::Cell { row, col } => Some(WidgetKey::Cell { row, col }),
            EditTarget::ColumnName(col) => Some(WidgetKey::ColumnName(col)),
            EditTarget::RowName(row) => Some(WidgetKey::RowName(row)),
        }
    }

    pub fn is_cell(&self, row: usize, col: usize) -> bool {
        *self == EditTarget::Cell { row, col }
    }

    pub fn is_column_name(&self, col: usize) -> bool {
        *self == EditTarget::ColumnName(col)
    }

    pub fn is_row_name(&self, row: usize) -> bool {
        *self == EditTarget::RowName(row)
    }
}

/// Result of committing an edit buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The model was mutated and refreshed
    Written,
    /// The value matched the stored one, nothing was written
    Unchanged,
    /// The target no longer exists in the model
    OutOfBounds,
    /// Nothing was being edited
    NotEditing,
}

impl CommitOutcome {
    pub fn wrote(self) -> bool {
        self == CommitOutcome::Written
    }
}

/// Holds the single active [`EditTarget`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellEditStateMachine {
    target: EditTarget,
}

impl CellEditStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> EditTarget {
        self.target
    }

    /// Enter `target`, returning the target that was abandoned (if any)
    pub fn begin(&mut self, target: EditTarget) -> Option<EditTarget> {
        let previous = std::mem::replace(&mut self.target, target);
        match previous {
            EditTarget::Browsing => {
                tracing::debug!(target: "grid_state", "edit start: {:?}", target);
                None
            }
            prev if prev == target => Some(prev),
            prev => {
                tracing::debug!(
                    target: "grid_state",
                    "edit switch: {:?} → {:?} (uncommitted text dropped)",
                    prev,
                    target
                );
                Some(prev)
            }
        }
    }

    /// Return to browsing, yielding the target that was active
    pub fn finish(&mut self) -> EditTarget {
        std::mem::take(&mut self.target)
    }
}

/// Display text for a cell value: `"."` for null, `"N/A"` out of bounds
pub fn cell_display<T: TableModel + ?Sized>(table: &T, row: usize, col: usize) -> Cow<'_, str> {
    if !table.contains(row, col) {
        return Cow::Borrowed(OUT_OF_BOUNDS_DISPLAY);
    }
    table
        .cell(row, col)
        .unwrap_or(Cow::Borrowed(NULL_DISPLAY))
}

/// Value a confirmed cell text stands for: empty or `"."` clears the cell
pub fn cell_commit_value(trimmed: &str) -> Option<&str> {
    match trimmed {
        "" | NULL_DISPLAY => None,
        value => Some(value),
    }
}

/// Write `text` for `target` into `table` unless it matches the stored value.
///
/// `text` is trimmed first. Cells map empty and `"."` to null; names are
/// written verbatim.
pub fn commit<T: TableModel + ?Sized>(target: EditTarget, text: &str, table: &mut T) -> CommitOutcome {
    let trimmed = text.trim();
    let (rows, cols) = table.size();

    let outcome = match target {
        EditTarget::Browsing => return CommitOutcome::NotEditing,
        EditTarget::Cell { row, col } => {
            if row >= rows || col >= cols {
                tracing::warn!("Dropping edit for out-of-range cell ({}, {})", row, col);
                return CommitOutcome::OutOfBounds;
            }
            let value = cell_commit_value(trimmed);
            if table.cell(row, col).as_deref() == value {
                CommitOutcome::Unchanged
            } else {
                table.set_cell(row, col, value);
                CommitOutcome::Written
            }
        }
        EditTarget::ColumnName(col) => {
            if col >= cols {
                tracing::warn!("Dropping rename of out-of-range column {}", col);
                return CommitOutcome::OutOfBounds;
            }
            if table.column_name(col) == trimmed {
                CommitOutcome::Unchanged
            } else {
                table.set_column_name(col, trimmed);
                CommitOutcome::Written
            }
        }
        EditTarget::RowName(row) => {
            if row >= rows {
                tracing::warn!("Dropping rename of out-of-range row {}", row);
                return CommitOutcome::OutOfBounds;
            }
            if table.row_name(row) == trimmed {
                CommitOutcome::Unchanged
            } else {
                table.set_row_name(row, trimmed);
                CommitOutcome::Written
            }
        }
    };

    match outcome {
        CommitOutcome::Written => {
            tracing::debug!(target: "grid_state", "commit {:?} = {:?}", target, trimmed);
            table.refresh();
        }
        _ => tracing::trace!(target: "grid_state", "commit {:?} unchanged", target),
    }
    outcome
}
