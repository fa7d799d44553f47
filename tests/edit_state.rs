//! Tests for click-to-edit transitions, commit semantics and pool resets

mod common;

use common::{click_on, frame, test_grid, type_and_submit, RecordingTable};
use tablegrid::grid::{CommitOutcome, EditTarget, GridState, HitTarget, WidgetKey};
use tablegrid::update::update;
use tablegrid::{GridEvent, GridMsg, MemoryTable, TableModel};

// ============================================================================
// Commit semantics
// ============================================================================

#[test]
fn test_commit_identical_value_skips_write() {
    let mut grid = test_grid(RecordingTable::sample());
    assert!(grid.click_cell(0, 1));

    assert_eq!(grid.submit(), CommitOutcome::Unchanged);
    assert_eq!(grid.edit_target(), EditTarget::Browsing);

    let table = grid.table().unwrap();
    assert_eq!(table.writes(), 0);
    assert_eq!(table.refreshes, 0);
}

#[test]
fn test_commit_trims_before_comparing() {
    let mut grid = test_grid(RecordingTable::sample());
    grid.click_cell(0, 1);
    grid.edit_buffer(|buf| {
        buf.move_home();
        buf.insert_str("   ");
        buf.move_end();
        buf.insert_str("\t ");
    });

    assert_eq!(grid.submit(), CommitOutcome::Unchanged);
    assert_eq!(grid.table().unwrap().writes(), 0);
}

#[test]
fn test_commit_empty_clears_cell() {
    let mut grid = test_grid(RecordingTable::sample());
    grid.click_cell(0, 3);
    grid.edit_buffer(|buf| buf.set_text("  "));

    assert_eq!(grid.submit(), CommitOutcome::Written);
    let table = grid.table().unwrap();
    assert_eq!(table.cell_writes, vec![(0, 3, None)]);
    assert_eq!(table.refreshes, 1);
    assert_eq!(grid.cell_text(0, 3).as_deref(), Some("."));
}

#[test]
fn test_commit_dot_clears_cell() {
    let mut grid = test_grid(RecordingTable::sample());
    grid.click_cell(2, 2);
    grid.edit_buffer(|buf| buf.set_text("."));

    assert_eq!(grid.submit(), CommitOutcome::Written);
    assert_eq!(grid.table().unwrap().cell_writes, vec![(2, 2, None)]);
}

#[test]
fn test_null_cell_resubmitted_is_unchanged() {
    // (3, 2) is null and seeds its buffer with "."
    let mut grid = test_grid(RecordingTable::sample());
    grid.click_cell(3, 2);
    assert_eq!(grid.active_editor_text(), Some("."));

    assert_eq!(grid.submit(), CommitOutcome::Unchanged);
    assert_eq!(grid.table().unwrap().writes(), 0);
}

#[test]
fn test_column_name_written_verbatim() {
    let mut grid = test_grid(RecordingTable::sample());
    grid.click_column_name(4);
    grid.edit_buffer(|buf| buf.set_text(" . "));

    assert_eq!(grid.submit(), CommitOutcome::Written);
    let table = grid.table().unwrap();
    assert_eq!(table.column_renames, vec![(4, ".".to_string())]);
    assert!(table.cell_writes.is_empty());
    assert_eq!(table.column_name(4), ".");
}

#[test]
fn test_row_name_can_be_emptied() {
    let mut grid = test_grid(RecordingTable::sample());
    grid.click_row_name(1);
    grid.edit_buffer(|buf| buf.set_text(""));

    assert_eq!(grid.submit(), CommitOutcome::Written);
    assert_eq!(grid.table().unwrap().row_renames, vec![(1, String::new())]);
}

#[test]
fn test_submit_while_browsing_is_noop() {
    let mut grid = test_grid(RecordingTable::sample());
    assert_eq!(grid.submit(), CommitOutcome::NotEditing);
    assert_eq!(update(&mut grid, GridMsg::Submit), None);
}

// ============================================================================
// Transitions
// ============================================================================

#[test]
fn test_switching_targets_discards_uncommitted_text() {
    let mut grid = test_grid(RecordingTable::sample());
    grid.click_cell(0, 1);
    grid.edit_buffer(|buf| buf.set_text("draft"));

    grid.click_column_name(2);
    assert_eq!(grid.edit_target(), EditTarget::ColumnName(2));
    assert_eq!(grid.table().unwrap().writes(), 0);

    // Returning to the cell reseeds from the model
    grid.click_cell(0, 1);
    assert_eq!(grid.active_editor_text(), Some("Alice Johnson"));
}

#[test]
fn test_at_most_one_edit_target() {
    let mut grid = test_grid(RecordingTable::sample());
    let clicks: [fn(&mut tablegrid::DataGrid<RecordingTable>) -> bool; 4] = [
        |g| g.click_cell(1, 1),
        |g| g.click_row_name(4),
        |g| g.click_column_name(0),
        |g| g.click_cell(9, 5),
    ];
    for click in clicks {
        assert!(click(&mut grid));
        let target = grid.edit_target();
        let active = [
            matches!(target, EditTarget::Cell { .. }),
            matches!(target, EditTarget::ColumnName(_)),
            matches!(target, EditTarget::RowName(_)),
        ];
        assert_eq!(active.iter().filter(|a| **a).count(), 1);
    }
}

#[test]
fn test_column_name_click_keeps_selected_row() {
    let mut grid = test_grid(RecordingTable::sample());
    grid.click_cell(2, 3);
    grid.click_column_name(5);
    assert_eq!(grid.selection().row(), Some(2));
    assert_eq!(grid.selection().col(), Some(5));
}

#[test]
fn test_row_name_click_sets_row_only() {
    let mut grid = test_grid(RecordingTable::sample());
    grid.click_cell(2, 3);
    grid.click_row_name(7);
    assert_eq!(grid.selection().row(), Some(7));
    assert_eq!(grid.selection().col(), Some(3));
    assert_eq!(grid.edit_target(), EditTarget::RowName(7));
}

#[test]
fn test_cell_click_seeds_live_value() {
    let mut grid = test_grid(RecordingTable::sample());
    grid.table_mut().unwrap().inner.set_cell(1, 1, Some("Changed"));
    grid.click_cell(1, 1);
    assert_eq!(grid.active_editor_text(), Some("Changed"));
}

// ============================================================================
// Frame-driven editing
// ============================================================================

#[test]
fn test_click_type_submit_in_one_frame() {
    let mut grid = test_grid(RecordingTable::sample());
    let mut events = vec![click_on(&grid, HitTarget::Cell { row: 0, col: 2 })];
    events.extend(type_and_submit("5"));
    frame(&mut grid, events);

    assert_eq!(grid.edit_target(), EditTarget::Browsing);
    assert_eq!(grid.cell_text(0, 2).as_deref(), Some("345"));
    assert_eq!(grid.table().unwrap().refreshes, 1);
}

#[test]
fn test_text_with_newline_submits() {
    let mut grid = test_grid(RecordingTable::sample());
    let click = click_on(&grid, HitTarget::ColumnName(0));
    frame(&mut grid, [click]);
    assert_eq!(grid.edit_target(), EditTarget::ColumnName(0));

    frame(
        &mut grid,
        [
            GridEvent::Msg(GridMsg::CursorHome),
            GridEvent::Msg(GridMsg::DeleteForward),
            GridEvent::Msg(GridMsg::DeleteForward),
            GridEvent::Msg(GridMsg::InsertText("Key\nignored".to_string())),
        ],
    );
    assert_eq!(grid.edit_target(), EditTarget::Browsing);
    assert_eq!(grid.table().unwrap().column_name(0), "Key");
}

#[test]
fn test_editing_messages_ignored_while_browsing() {
    let mut grid = test_grid(RecordingTable::sample());
    assert_eq!(update(&mut grid, GridMsg::InsertText("x".to_string())), None);
    assert_eq!(update(&mut grid, GridMsg::DeleteBackward), None);
    assert_eq!(grid.table().unwrap().writes(), 0);
}

#[test]
fn test_click_on_label_or_corner_does_nothing() {
    let mut grid = test_grid(RecordingTable::sample());
    let clicks = [
        click_on(&grid, HitTarget::ColumnLabel(1)),
        click_on(&grid, HitTarget::RowNumber(1)),
        click_on(&grid, HitTarget::Corner),
    ];
    frame(&mut grid, clicks);
    assert_eq!(grid.edit_target(), EditTarget::Browsing);
    assert_eq!(grid.selection().row(), None);
    assert_eq!(grid.selection().col(), None);
}

#[test]
fn test_body_click_dispatched_after_header_click() {
    // Interaction pass order is column names, row names, then body cells
    let mut grid = test_grid(RecordingTable::sample());
    let clicks = [
        click_on(&grid, HitTarget::Cell { row: 1, col: 1 }),
        click_on(&grid, HitTarget::ColumnName(3)),
    ];
    frame(&mut grid, clicks);
    assert_eq!(grid.edit_target(), EditTarget::Cell { row: 1, col: 1 });
    assert_eq!(grid.selection().col(), Some(1));
}

#[test]
fn test_click_inside_active_editor_keeps_draft() {
    let targets = [
        HitTarget::Cell { row: 0, col: 1 },
        HitTarget::ColumnName(1),
        HitTarget::RowName(1),
    ];
    for target in targets {
        let mut grid = test_grid(RecordingTable::sample());
        let click = click_on(&grid, target);
        frame(
            &mut grid,
            [
                click.clone(),
                GridEvent::Msg(GridMsg::CursorEnd),
                GridEvent::Msg(GridMsg::InsertText(" draft".to_string())),
            ],
        );
        let draft = grid.active_editor_text().map(str::to_string);
        assert!(draft.as_deref().is_some_and(|t| t.ends_with(" draft")), "{:?}", target);

        frame(&mut grid, [click]);
        assert_eq!(grid.active_editor_text().map(str::to_string), draft, "{:?}", target);
        assert_eq!(grid.submit(), CommitOutcome::Written);
    }
}

#[test]
fn test_reclicked_cell_commits_draft() {
    let mut grid = test_grid(RecordingTable::sample());
    grid.click_cell(0, 1);
    grid.edit_buffer(|buf| {
        buf.move_end();
        buf.insert_str(" Jr");
    });
    grid.click_cell(0, 1);

    assert_eq!(grid.submit(), CommitOutcome::Written);
    assert_eq!(
        grid.table().unwrap().cell_writes,
        vec![(0, 1, Some("Alice Johnson Jr".to_string()))]
    );
}

#[test]
fn test_click_scrolled_out_of_view_in_same_frame_never_fires() {
    let mut grid = test_grid(RecordingTable::blank(1_000, 50));
    let click = click_on(&grid, HitTarget::Cell { row: 0, col: 0 });
    frame(
        &mut grid,
        [click, GridEvent::Msg(GridMsg::ScrollBy { dx: 0.0, dy: 5_000.0 })],
    );
    assert_eq!(grid.edit_target(), EditTarget::Browsing);

    // Scrolling back alone must not start an edit
    frame(&mut grid, [GridEvent::Msg(GridMsg::ScrollTo { x: 0.0, y: 0.0 })]);
    assert_eq!(grid.edit_target(), EditTarget::Browsing);
    assert_eq!(grid.selection().cell(), None);
    assert!(grid
        .state()
        .pool()
        .get_editor(WidgetKey::Cell { row: 0, col: 0 })
        .is_none());
}

#[test]
fn test_stale_click_does_not_discard_active_edit() {
    let mut grid = test_grid(RecordingTable::blank(1_000, 50));
    grid.click_cell(2, 2);
    grid.edit_buffer(|buf| buf.set_text("kept"));

    let click = click_on(&grid, HitTarget::Cell { row: 0, col: 0 });
    frame(
        &mut grid,
        [click, GridEvent::Msg(GridMsg::ScrollBy { dx: 0.0, dy: 5_000.0 })],
    );
    frame(&mut grid, [GridEvent::Msg(GridMsg::ScrollTo { x: 0.0, y: 0.0 })]);

    assert_eq!(grid.edit_target(), EditTarget::Cell { row: 2, col: 2 });
    assert_eq!(grid.active_editor_text(), Some("kept"));
}

#[test]
fn test_click_then_small_scroll_still_fires() {
    let mut grid = test_grid(RecordingTable::blank(1_000, 50));
    let click = click_on(&grid, HitTarget::Cell { row: 0, col: 0 });
    frame(
        &mut grid,
        [click, GridEvent::Msg(GridMsg::ScrollBy { dx: 0.0, dy: 10.0 })],
    );
    assert_eq!(grid.edit_target(), EditTarget::Cell { row: 0, col: 0 });
}

// ============================================================================
// Table growth
// ============================================================================

#[test]
fn test_add_column_names_and_null_fills() {
    let mut grid = test_grid(RecordingTable::sample());
    assert_eq!(update(&mut grid, GridMsg::AddColumn), Some(tablegrid::Cmd::Redraw));

    let table = grid.table().unwrap();
    assert_eq!(table.size(), (10, 7));
    assert_eq!(table.appended_columns, vec!["var7".to_string()]);
    assert_eq!(table.appended_rows, 0);
    assert_eq!(table.refreshes, 1);
    assert_eq!(table.column_name(6), "var7");
    assert_eq!(grid.cell_text(9, 6).as_deref(), Some("."));

    let region = common::idle_frame(&mut grid);
    assert_eq!(region.find(HitTarget::ColumnLabel(6)).unwrap().text, "G");
    assert_eq!(region.find(HitTarget::ColumnName(6)).unwrap().text, "var7");
}

#[test]
fn test_add_row_null_fills_every_column() {
    let mut grid = test_grid(RecordingTable::sample());
    assert_eq!(update(&mut grid, GridMsg::AddRow), Some(tablegrid::Cmd::Redraw));

    let table = grid.table().unwrap();
    assert_eq!(table.size(), (11, 6));
    assert_eq!(table.appended_rows, 1);
    assert!(table.appended_columns.is_empty());
    assert_eq!(table.row_name(10), "11");
    assert!((0..6).all(|col| table.cell(10, col).is_none()));
}

#[test]
fn test_add_column_to_empty_table_adds_a_row() {
    let mut grid = test_grid(RecordingTable::new(MemoryTable::new()));
    assert!(grid.add_column());
    assert_eq!(grid.table().unwrap().size(), (1, 1));
    assert_eq!(grid.table().unwrap().column_name(0), "var1");

    assert!(grid.add_column());
    let table = grid.table().unwrap();
    assert_eq!(table.size(), (1, 2));
    assert_eq!(table.appended_columns, vec!["var1".to_string(), "var2".to_string()]);
    assert_eq!(table.appended_rows, 1);
}

#[test]
fn test_add_row_without_columns_creates_var1() {
    let mut grid = test_grid(RecordingTable::new(MemoryTable::new()));
    assert!(grid.add_row());

    let table = grid.table().unwrap();
    assert_eq!(table.size(), (1, 1));
    assert_eq!(table.column_name(0), "var1");
    assert_eq!(table.cell(0, 0), None);
    assert_eq!(table.refreshes, 1);
}

#[test]
fn test_growth_keeps_active_edit() {
    let mut grid = test_grid(RecordingTable::sample());
    grid.click_cell(1, 1);
    grid.edit_buffer(|buf| buf.set_text("Kept"));

    frame(
        &mut grid,
        [
            GridEvent::Msg(GridMsg::AddRow),
            GridEvent::Msg(GridMsg::AddColumn),
            GridEvent::Msg(GridMsg::Submit),
        ],
    );
    assert_eq!(grid.table().unwrap().cell(1, 1).as_deref(), Some("Kept"));
    assert_eq!(grid.table().unwrap().size(), (11, 7));
}

/// Table whose shape cannot change
struct FixedTable(MemoryTable);

impl TableModel for FixedTable {
    fn size(&self) -> (usize, usize) {
        self.0.size()
    }

    fn cell(&self, row: usize, col: usize) -> Option<std::borrow::Cow<'_, str>> {
        self.0.cell(row, col)
    }

    fn set_cell(&mut self, row: usize, col: usize, value: Option<&str>) {
        self.0.set_cell(row, col, value)
    }

    fn column_name(&self, col: usize) -> std::borrow::Cow<'_, str> {
        self.0.column_name(col)
    }

    fn set_column_name(&mut self, col: usize, name: &str) {
        self.0.set_column_name(col, name)
    }

    fn row_name(&self, row: usize) -> std::borrow::Cow<'_, str> {
        self.0.row_name(row)
    }

    fn set_row_name(&mut self, row: usize, name: &str) {
        self.0.set_row_name(row, name)
    }
}

#[test]
fn test_fixed_shape_table_refuses_growth() {
    let mut grid = test_grid(FixedTable(MemoryTable::sample()));
    assert_eq!(update(&mut grid, GridMsg::AddRow), None);
    assert_eq!(update(&mut grid, GridMsg::AddColumn), None);
    assert_eq!(grid.table().unwrap().size(), (10, 6));
}

#[test]
fn test_growth_without_table_is_noop() {
    let mut grid = test_grid(MemoryTable::sample());
    assert!(grid.unbind().is_some());
    assert!(!grid.add_row());
    assert!(!grid.add_column());
}

// ============================================================================
// Pool reset
// ============================================================================

#[test]
fn test_reset_reseeds_editor_from_model() {
    let table = MemoryTable::sample();
    let mut state = GridState::new();
    state.click_cell(&table, 0, 0);
    state
        .active_editor_mut()
        .unwrap()
        .set_text("stale text");

    state.reset_editors();
    assert_eq!(state.edit_target(), EditTarget::Browsing);
    assert!(state.pool().is_empty());
    assert!(state
        .pool()
        .get_editor(WidgetKey::Cell { row: 0, col: 0 })
        .is_none());

    let fresh = state
        .pool_mut()
        .cell_editor(0, 0, || table.cell(0, 0).unwrap_or_default().into_owned());
    assert_eq!(fresh.text(), "c1");
}

#[test]
fn test_reset_keeps_selection() {
    let mut grid = test_grid(RecordingTable::sample());
    grid.click_cell(4, 4);
    let generation = grid.state().pool().generation();

    assert_eq!(update(&mut grid, GridMsg::ResetEditors), Some(tablegrid::Cmd::Redraw));
    assert_eq!(grid.edit_target(), EditTarget::Browsing);
    assert_eq!(grid.selection().cell(), Some((4, 4)));
    assert_eq!(grid.state().pool().generation(), generation + 1);
    assert_eq!(grid.state().pool().len(), 0);
}

#[test]
fn test_bind_clears_selection_and_edit_state() {
    let mut grid = test_grid(RecordingTable::sample());
    grid.click_cell(2, 3);
    grid.edit_buffer(|buf| buf.set_text("unsaved"));
    grid.scroll_by(0.0, 100.0);

    let previous = grid.bind(RecordingTable::blank(50, 50));
    assert_eq!(previous.map(|t| t.writes()), Some(0));
    assert_eq!(grid.selection().row(), None);
    assert_eq!(grid.selection().col(), None);
    assert_eq!(grid.edit_target(), EditTarget::Browsing);
    assert!(grid.state().pool().is_empty());
    assert_eq!(grid.viewport().scroll_y, 0.0);
}
