//! Update function for the Elm-style architecture
//!
//! All grid state transitions requested by the host go through [`update`].

use crate::commands::Cmd;
use crate::grid::{CommitOutcome, DataGrid};
use crate::messages::GridMsg;
use crate::table::TableModel;
use crate::tracing::GridSnapshot;

/// Apply `msg` to `grid`. Returns `Some(Cmd::Redraw)` when anything visible
/// may have changed.
pub fn update<T: TableModel>(grid: &mut DataGrid<T>, msg: GridMsg) -> Option<Cmd> {
    let before = GridSnapshot::capture(grid);
    let result = update_grid(grid, msg);
    let after = GridSnapshot::capture(grid);

    if let Some(diff) = before.diff(&after) {
        tracing::trace!(target: "grid_state", "{}", diff);
    }
    result
}

fn update_grid<T: TableModel>(grid: &mut DataGrid<T>, msg: GridMsg) -> Option<Cmd> {
    match msg {
        GridMsg::ClickCell { row, col } => redraw_if(grid.click_cell(row, col)),
        GridMsg::ClickColumnName(col) => redraw_if(grid.click_column_name(col)),
        GridMsg::ClickRowName(row) => redraw_if(grid.click_row_name(row)),

        GridMsg::InsertChar('\n' | '\r') | GridMsg::Submit => submit(grid),
        GridMsg::InsertChar(ch) => redraw_if(grid.edit_buffer(|buf| buf.insert_char(ch))),
        GridMsg::InsertText(text) => match text.split_once(['\n', '\r']) {
            Some((line, _)) => {
                grid.edit_buffer(|buf| buf.insert_str(line));
                submit(grid)
            }
            None => redraw_if(grid.edit_buffer(|buf| buf.insert_str(&text))),
        },
        GridMsg::DeleteBackward => redraw_if(grid.edit_buffer(|buf| buf.delete_backward())),
        GridMsg::DeleteForward => redraw_if(grid.edit_buffer(|buf| buf.delete_forward())),
        GridMsg::CursorLeft => redraw_if(grid.edit_buffer(|buf| buf.move_left())),
        GridMsg::CursorRight => redraw_if(grid.edit_buffer(|buf| buf.move_right())),
        GridMsg::CursorHome => redraw_if(grid.edit_buffer(|buf| buf.move_home())),
        GridMsg::CursorEnd => redraw_if(grid.edit_buffer(|buf| buf.move_end())),

        GridMsg::ScrollBy { dx, dy } => {
            let before = grid.viewport();
            grid.scroll_by(dx, dy);
            redraw_if(grid.viewport() != before)
        }
        GridMsg::ScrollTo { x, y } => {
            let before = grid.viewport();
            grid.scroll_to(x, y);
            redraw_if(grid.viewport() != before)
        }

        GridMsg::AddRow => redraw_if(grid.add_row()),
        GridMsg::AddColumn => redraw_if(grid.add_column()),

        GridMsg::ResetEditors => {
            grid.reset_editors();
            Some(Cmd::Redraw)
        }
    }
}

fn submit<T: TableModel>(grid: &mut DataGrid<T>) -> Option<Cmd> {
    match grid.submit() {
        CommitOutcome::NotEditing => None,
        _ => Some(Cmd::Redraw),
    }
}

fn redraw_if(changed: bool) -> Option<Cmd> {
    changed.then_some(Cmd::Redraw)
}
