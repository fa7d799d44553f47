//! Selected row/column and the highlight derived from it

/// How a body cell relates to the current selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    None,
    Row,
    Column,
    Cell,
}

impl Highlight {
    pub fn as_str(self) -> &'static str {
        match self {
            Highlight::None => "none",
            Highlight::Row => "row",
            Highlight::Column => "column",
            Highlight::Cell => "cell",
        }
    }
}

/// Selected row and column, each independently optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionModel {
    row: Option<usize>,
    col: Option<usize>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&self) -> Option<usize> {
        self.row
    }

    pub fn col(&self) -> Option<usize> {
        self.col
    }

    /// Both coordinates, when a single cell is selected
    pub fn cell(&self) -> Option<(usize, usize)> {
        Some((self.row?, self.col?))
    }

    pub fn select_cell(&mut self, row: usize, col: usize) {
        self.row = Some(row);
        self.col = Some(col);
    }

    /// Select a row, leaving the column untouched
    pub fn select_row(&mut self, row: usize) {
        self.row = Some(row);
    }

    /// Select a column, leaving the row untouched
    pub fn select_column(&mut self, col: usize) {
        self.col = Some(col);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_row_selected(&self, row: usize) -> bool {
        self.row == Some(row)
    }

    pub fn is_column_selected(&self, col: usize) -> bool {
        self.col == Some(col)
    }

    /// Classify `(row, col)`: cell beats row beats column
    pub fn highlight(&self, row: usize, col: usize) -> Highlight {
        match (self.is_row_selected(row), self.is_column_selected(col)) {
            (true, true) => Highlight::Cell,
            (true, false) => Highlight::Row,
            (false, true) => Highlight::Column,
            (false, false) => Highlight::None,
        }
    }
}
