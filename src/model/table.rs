//! Table types.

use super::Paragraph;

/// A table laid out as a fixed grid of single-paragraph cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,

    /// Total width in twips, split evenly across columns
    pub width: Option<usize>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `row_count × column_count` grid of empty cells.
    pub fn with_grid(row_count: usize, column_count: usize) -> Self {
        Self {
            rows: (0..row_count)
                .map(|_| TableRow::new((0..column_count).map(|_| TableCell::empty()).collect()))
                .collect(),
            width: None,
        }
    }

    /// Set the total table width.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.cells.len()).unwrap_or(0)
    }

    /// Get a cell.
    pub fn cell(&self, row: usize, column: usize) -> Option<&TableCell> {
        self.rows.get(row).and_then(|r| r.cells.get(column))
    }

    /// Get a mutable cell.
    pub fn cell_mut(&mut self, row: usize, column: usize) -> Option<&mut TableCell> {
        self.rows.get_mut(row).and_then(|r| r.cells.get_mut(column))
    }

    /// Text of a cell, empty for missing cells.
    pub fn text_at(&self, row: usize, column: usize) -> String {
        self.cell(row, column)
            .map(|c| c.plain_text())
            .unwrap_or_default()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.plain_text())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// A table cell holding one paragraph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableCell {
    /// Cell content
    pub paragraph: Paragraph,
}

impl TableCell {
    /// Create an empty cell.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a new cell with text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            paragraph: Paragraph::with_text(text),
        }
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        self.paragraph.plain_text()
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.paragraph.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_new() {
        let table = Table::new();
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn test_table_grid() {
        let mut table = Table::with_grid(2, 3);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.width, None);
        assert!(table.cell(1, 2).unwrap().is_empty());
        assert!(table.cell(2, 0).is_none());

        table.cell_mut(1, 2).unwrap().paragraph.add_text("last");
        assert_eq!(table.text_at(1, 2), "last");
        assert_eq!(table.plain_text(), "\t\t\n\t\tlast");
    }

    #[test]
    fn test_cell_text() {
        let cell = TableCell::text("Hello");
        assert_eq!(cell.plain_text(), "Hello");
        assert!(!cell.is_empty());
    }
}
