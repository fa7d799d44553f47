//! Message types for the Elm-style architecture
//!
//! All grid state changes requested by a host flow through [`GridMsg`].

/// Grid-level messages
#[derive(Debug, Clone, PartialEq)]
pub enum GridMsg {
    // === Edit targets ===
    /// Start editing a data cell (selects it)
    ClickCell { row: usize, col: usize },
    /// Start editing a column name (selects the column only)
    ClickColumnName(usize),
    /// Start editing a row name (selects the row)
    ClickRowName(usize),

    // === Buffer editing ===
    /// Insert a character at the cursor; '\n' or '\r' submits
    InsertChar(char),
    /// Insert text at the cursor; a line break submits the text before it
    InsertText(String),
    /// Delete character before cursor (Backspace)
    DeleteBackward,
    /// Delete character at cursor (Delete)
    DeleteForward,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    /// Commit the active buffer and return to browsing (Enter)
    Submit,

    // === Viewport ===
    /// Scroll by a pixel delta (positive = right / down)
    ScrollBy { dx: f32, dy: f32 },
    /// Scroll to an absolute pixel offset
    ScrollTo { x: f32, y: f32 },

    // === Table shape ===
    /// Append a row of null cells
    AddRow,
    /// Append a null column named `var{n}`
    AddColumn,

    /// Discard all pooled editors and leave edit mode
    ResetEditors,
}

/// Input queued by the host for the next layout pass
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    /// Primary-button click at a surface position in physical pixels
    Click { x: f32, y: f32 },
    Msg(GridMsg),
}

impl From<GridMsg> for GridEvent {
    fn from(msg: GridMsg) -> Self {
        GridEvent::Msg(msg)
    }
}
