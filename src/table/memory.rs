//! In-memory table used by the desktop host, tests and benches

use std::borrow::Cow;

use super::TableModel;
use crate::grid::labels::index_to_letters;

/// Column-major table of optional strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryTable {
    columns: Vec<Column>,
    row_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Column {
    name: String,
    values: Vec<Option<String>>,
}

impl MemoryTable {
    /// Create an empty table with no rows or columns
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `rows` x `cols` table of null cells.
    ///
    /// Columns are named by their letter label and rows by their 1-based number.
    pub fn blank(rows: usize, cols: usize) -> Self {
        let columns = (0..cols)
            .map(|col| Column {
                name: index_to_letters(col),
                values: vec![None; rows],
            })
            .collect();
        let row_names = (1..=rows).map(|n| n.to_string()).collect();
        Self { columns, row_names }
    }

    /// Build a table from column names and row-major values.
    ///
    /// Short rows are padded with nulls, extra values are dropped.
    pub fn from_rows<S: Into<String>>(
        column_names: impl IntoIterator<Item = S>,
        rows: impl IntoIterator<Item = Vec<Option<String>>>,
    ) -> Self {
        let mut table = Self {
            columns: column_names
                .into_iter()
                .map(|name| Column {
                    name: name.into(),
                    values: Vec::new(),
                })
                .collect(),
            row_names: Vec::new(),
        };
        for row in rows {
            table.push_row(row);
        }
        table
    }

    /// Append a row named by its 1-based position
    pub fn push_row(&mut self, values: Vec<Option<String>>) {
        let mut values = values.into_iter();
        for column in &mut self.columns {
            column.values.push(values.next().flatten());
        }
        self.row_names.push((self.row_names.len() + 1).to_string());
    }

    /// Small people table mixing Latin and CJK text, with a few nulls
    pub fn sample() -> Self {
        const ROWS: [[&str; 6]; 10] = [
            ["c1", "Alice Johnson", "34", "Taipei 台北", "Engineer", "85000"],
            ["c2", "陳小明", "28", "Kaohsiung", "Designer", "62000"],
            ["c3", "Bob Smith", "45", "New York", "Manager", "120000"],
            ["c4", "林美玲", "", "台中市", "Nurse", "54000"],
            ["c5", "Carlos Díaz", "39", "Madrid", "Architect", "."],
            ["c6", "山田太郎", "51", "東京都", "Doctor", "150000"],
            ["c7", "Emma Brown", "23", "London", "Analyst", "58000"],
            ["c8", "王大偉", "36", "Hsinchu", "Researcher", "97000"],
            ["c9", "Fatima Zahra", "30", "Casablanca", "", "61000"],
            ["c10", "Lee Min-jun", "42", "Seoul 서울", "Pilot", "110000"],
        ];

        Self::from_rows(
            ["ID", "Name", "Age", "City", "Occupation", "Income"],
            ROWS.iter().map(|row| {
                row.iter()
                    .map(|value| match *value {
                        "" | "." => None,
                        value => Some(value.to_string()),
                    })
                    .collect()
            }),
        )
    }

    pub fn row_count(&self) -> usize {
        self.row_names.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

impl TableModel for MemoryTable {
    fn size(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    fn cell(&self, row: usize, col: usize) -> Option<Cow<'_, str>> {
        self.columns
            .get(col)?
            .values
            .get(row)?
            .as_deref()
            .map(Cow::Borrowed)
    }

    fn set_cell(&mut self, row: usize, col: usize, value: Option<&str>) {
        match self
            .columns
            .get_mut(col)
            .and_then(|column| column.values.get_mut(row))
        {
            Some(slot) => *slot = value.map(str::to_string),
            None => tracing::debug!("Ignoring write to out-of-range cell ({}, {})", row, col),
        }
    }

    fn column_name(&self, col: usize) -> Cow<'_, str> {
        self.columns
            .get(col)
            .map(|column| Cow::Borrowed(column.name.as_str()))
            .unwrap_or_default()
    }

    fn set_column_name(&mut self, col: usize, name: &str) {
        match self.columns.get_mut(col) {
            Some(column) => column.name = name.to_string(),
            None => tracing::debug!("Ignoring rename of out-of-range column {}", col),
        }
    }

    fn row_name(&self, row: usize) -> Cow<'_, str> {
        self.row_names
            .get(row)
            .map(|name| Cow::Borrowed(name.as_str()))
            .unwrap_or_default()
    }

    fn set_row_name(&mut self, row: usize, name: &str) {
        match self.row_names.get_mut(row) {
            Some(slot) => *slot = name.to_string(),
            None => tracing::debug!("Ignoring rename of out-of-range row {}", row),
        }
    }

    fn append_row(&mut self) -> bool {
        self.push_row(Vec::new());
        true
    }

    fn append_column(&mut self, name: &str) -> bool {
        self.columns.push(Column {
            name: name.to_string(),
            values: vec![None; self.row_count()],
        });
        true
    }

    fn refresh(&mut self) {
        tracing::trace!("MemoryTable refreshed ({} x {})", self.row_count(), self.column_count());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_table_names() {
        let table = MemoryTable::blank(3, 28);
        assert_eq!(table.size(), (3, 28));
        assert_eq!(table.column_name(0), "A");
        assert_eq!(table.column_name(27), "AB");
        assert_eq!(table.row_name(2), "3");
        assert_eq!(table.cell(1, 1), None);
    }

    #[test]
    fn test_from_rows_pads_short_rows() {
        let table = MemoryTable::from_rows(
            ["a", "b", "c"],
            vec![vec![Some("1".to_string())], vec![None, Some("x".to_string())]],
        );
        assert_eq!(table.size(), (2, 3));
        assert_eq!(table.cell(0, 0).as_deref(), Some("1"));
        assert_eq!(table.cell(0, 2), None);
        assert_eq!(table.cell(1, 1).as_deref(), Some("x"));
    }

    #[test]
    fn test_set_cell_and_clear() {
        let mut table = MemoryTable::blank(2, 2);
        table.set_cell(1, 0, Some("hello"));
        assert_eq!(table.cell(1, 0).as_deref(), Some("hello"));
        table.set_cell(1, 0, None);
        assert_eq!(table.cell(1, 0), None);
    }

    #[test]
    fn test_out_of_range_access_is_ignored() {
        let mut table = MemoryTable::blank(2, 2);
        table.set_cell(5, 5, Some("x"));
        table.set_column_name(9, "x");
        table.set_row_name(9, "x");
        assert_eq!(table.cell(5, 5), None);
        assert_eq!(table.column_name(9), "");
        assert_eq!(table.row_name(9), "");
        assert!(!table.contains(2, 0));
        assert!(table.contains(1, 1));
    }

    #[test]
    fn test_append_row_and_column() {
        let mut table = MemoryTable::blank(2, 1);
        assert!(table.append_column("extra"));
        assert!(table.append_row());
        assert_eq!(table.size(), (3, 2));
        assert_eq!(table.column_name(1), "extra");
        assert_eq!(table.row_name(2), "3");
        assert_eq!(table.cell(2, 1), None);

        table.set_cell(2, 1, Some("x"));
        assert_eq!(table.cell(2, 1).as_deref(), Some("x"));
    }

    #[test]
    fn test_sample_has_nulls_and_wide_text() {
        let table = MemoryTable::sample();
        assert_eq!(table.size(), (10, 6));
        assert_eq!(table.column_name(1), "Name");
        assert_eq!(table.cell(3, 2), None);
        assert_eq!(table.cell(4, 5), None);
        assert_eq!(table.cell(1, 1).as_deref(), Some("陳小明"));
        assert_eq!(table.row_name(9), "10");
    }
}
