//! Per-grid retained state: widget pool, selection and edit target
//!
//! All three live in one struct so that evicting the pool and clearing the
//! edit target always happen together.

use super::edit::{cell_display, commit, CellEditStateMachine, CommitOutcome, EditTarget};
use super::pool::{EditBuffer, WidgetPool};
use super::selection::SelectionModel;
use crate::table::TableModel;

#[derive(Debug, Default)]
pub struct GridState {
    pool: WidgetPool,
    selection: SelectionModel,
    edit: CellEditStateMachine,
}

impl GridState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(&self) -> &WidgetPool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut WidgetPool {
        &mut self.pool
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn edit_target(&self) -> EditTarget {
        self.edit.target()
    }

    /// Buffer of the active edit target
    pub fn active_editor(&self) -> Option<&EditBuffer> {
        self.pool.get_editor(self.edit.target().widget_key()?)
    }

    pub fn active_editor_mut(&mut self) -> Option<&mut EditBuffer> {
        let key = self.edit.target().widget_key()?;
        self.pool.get_editor_mut(key)
    }

    /// Start editing a data cell and select it
    pub fn click_cell<T: TableModel + ?Sized>(&mut self, table: &T, row: usize, col: usize) {
        self.selection.select_cell(row, col);
        self.enter(EditTarget::Cell { row, col }, &cell_display(table, row, col));
    }

    /// Start editing a column name; the selected row is left as is
    pub fn click_column_name<T: TableModel + ?Sized>(&mut self, table: &T, col: usize) {
        self.selection.select_column(col);
        self.enter(EditTarget::ColumnName(col), &table.column_name(col));
    }

    /// Start editing a row name and select the row
    pub fn click_row_name<T: TableModel + ?Sized>(&mut self, table: &T, row: usize) {
        self.selection.select_row(row);
        self.enter(EditTarget::RowName(row), &table.row_name(row));
    }

    /// Make `target` the edit target with its buffer seeded from `live`.
    ///
    /// A click inside the editor that is already active keeps its draft.
    fn enter(&mut self, target: EditTarget, live: &str) {
        if self.edit.target() == target {
            tracing::trace!(target: "grid_state", "click inside active editor {:?}", target);
            return;
        }
        self.edit.begin(target);
        if let Some(key) = target.widget_key() {
            self.pool.editor(key, || live.to_string()).set_text(live);
        }
    }

    /// Commit the active buffer and return to browsing.
    ///
    /// The buffer keeps the trimmed text so it shows what was committed.
    pub fn submit<T: TableModel + ?Sized>(&mut self, table: &mut T) -> CommitOutcome {
        let target = self.edit.finish();
        let Some(key) = target.widget_key() else {
            return CommitOutcome::NotEditing;
        };
        let Some(buffer) = self.pool.get_editor_mut(key) else {
            tracing::warn!("No buffer for edit target {:?}", target);
            return CommitOutcome::NotEditing;
        };

        let trimmed = buffer.text().trim().to_string();
        buffer.set_text(&trimmed);
        commit(target, &trimmed, table)
    }

    /// Evict every pooled widget and return to browsing. Selection is kept.
    pub fn reset_editors(&mut self) {
        self.edit.finish();
        self.pool.reset();
    }

    /// Back to the freshly-bound state: empty pool, no selection, browsing
    pub fn clear(&mut self) {
        self.reset_editors();
        self.selection.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::MemoryTable;

    fn table() -> MemoryTable {
        MemoryTable::from_rows(
            ["a", "b"],
            vec![
                vec![Some("x".to_string()), None],
                vec![Some("y".to_string()), Some("z".to_string())],
            ],
        )
    }

    #[test]
    fn test_click_cell_seeds_and_selects() {
        let t = table();
        let mut state = GridState::new();
        state.click_cell(&t, 0, 1);
        assert_eq!(state.edit_target(), EditTarget::Cell { row: 0, col: 1 });
        assert_eq!(state.selection().cell(), Some((0, 1)));
        assert_eq!(state.active_editor().map(EditBuffer::text), Some("."));
    }

    #[test]
    fn test_switch_discards_uncommitted_text() {
        let mut t = table();
        let mut state = GridState::new();
        state.click_cell(&t, 0, 0);
        if let Some(buf) = state.active_editor_mut() {
            buf.insert_str("-draft");
        }
        state.click_cell(&t, 1, 1);
        assert_eq!(t.cell(0, 0).as_deref(), Some("x"));

        // Returning to the cell reseeds from the model, not the draft
        state.click_cell(&t, 0, 0);
        assert_eq!(state.active_editor().map(EditBuffer::text), Some("x"));
        assert_eq!(state.submit(&mut t), CommitOutcome::Unchanged);
    }

    #[test]
    fn test_click_inside_active_editor_keeps_draft() {
        let t = table();
        let mut state = GridState::new();
        fn draft(state: &mut GridState) {
            if let Some(buf) = state.active_editor_mut() {
                buf.insert_str("-draft");
            }
        }

        state.click_cell(&t, 1, 0);
        draft(&mut state);
        state.click_cell(&t, 1, 0);
        assert_eq!(state.edit_target(), EditTarget::Cell { row: 1, col: 0 });
        assert_eq!(state.active_editor().map(EditBuffer::text), Some("y-draft"));

        state.click_column_name(&t, 1);
        draft(&mut state);
        state.click_column_name(&t, 1);
        assert_eq!(state.active_editor().map(EditBuffer::text), Some("b-draft"));

        state.click_row_name(&t, 0);
        draft(&mut state);
        state.click_row_name(&t, 0);
        assert_eq!(state.active_editor().map(EditBuffer::text), Some("1-draft"));
    }

    #[test]
    fn test_click_names_selection_asymmetry() {
        let t = table();
        let mut state = GridState::new();
        state.click_cell(&t, 1, 0);
        state.click_column_name(&t, 1);
        assert_eq!(state.selection().row(), Some(1));
        assert_eq!(state.selection().col(), Some(1));
        assert_eq!(state.edit_target(), EditTarget::ColumnName(1));

        state.click_row_name(&t, 0);
        assert_eq!(state.selection().row(), Some(0));
        assert_eq!(state.selection().col(), Some(1));
        assert_eq!(state.active_editor().map(EditBuffer::text), Some("1"));
    }

    #[test]
    fn test_submit_writes_trimmed_text() {
        let mut t = table();
        let mut state = GridState::new();
        state.click_column_name(&t, 0);
        if let Some(buf) = state.active_editor_mut() {
            buf.set_text("  Alpha  ");
        }
        assert_eq!(state.submit(&mut t), CommitOutcome::Written);
        assert_eq!(t.column_name(0), "Alpha");
        assert_eq!(state.edit_target(), EditTarget::Browsing);
        assert_eq!(
            state
                .pool()
                .get_editor(crate::grid::pool::WidgetKey::ColumnName(0))
                .map(EditBuffer::text),
            Some("Alpha")
        );
    }

    #[test]
    fn test_submit_while_browsing() {
        let mut t = table();
        let mut state = GridState::new();
        assert_eq!(state.submit(&mut t), CommitOutcome::NotEditing);
    }

    #[test]
    fn test_reset_editors_clears_edit_target() {
        let t = table();
        let mut state = GridState::new();
        state.click_cell(&t, 0, 0);
        state.reset_editors();
        assert_eq!(state.edit_target(), EditTarget::Browsing);
        assert!(state.active_editor().is_none());
        assert!(state.pool().is_empty());
        assert_eq!(state.selection().cell(), Some((0, 0)));

        state.clear();
        assert_eq!(state.selection().cell(), None);
        assert_eq!(state.pool().generation(), 2);
    }
}
