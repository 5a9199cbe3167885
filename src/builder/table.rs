//! Table range lookup and cell filling.

use super::{LayoutOptions, StyleApplicator};
use crate::error::{Error, Result};
use crate::model::{Block, Document, Paragraph, Style, Table, TableConfig};
use log::debug;

/// Maps content indices in the configured range onto cells of the single
/// document table.
#[derive(Debug, Clone)]
pub struct TableLocator {
    config: TableConfig,
    styles: StyleApplicator,
    width: usize,
    /// Body index of the table once it exists
    block: Option<usize>,
}

impl TableLocator {
    /// Create a locator for `config`.
    pub fn new(config: TableConfig, options: &LayoutOptions) -> Self {
        Self {
            config,
            styles: StyleApplicator::new(options),
            width: options.table_width,
            block: None,
        }
    }

    /// The table configuration.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Check whether a content index is a table cell.
    pub fn is_table_index(&self, index: usize) -> bool {
        self.config.contains(index)
    }

    /// `(row, column)` of the cell a content index maps to.
    ///
    /// Fails with `Error::TableOverflow` when the row lies past the grid.
    pub fn cell_position(&self, index: usize) -> Result<(usize, usize)> {
        if self.config.column_count == 0 {
            return Err(Error::InvalidTableConfig(
                "'columnCount' must be at least 1".into(),
            ));
        }
        let offset = index.checked_sub(self.config.start_index).ok_or_else(|| {
            Error::Other(format!("Content index {} precedes the table range", index))
        })?;
        let row = offset / self.config.column_count;
        let column = offset % self.config.column_count;

        if row >= self.config.row_count {
            return Err(Error::TableOverflow {
                index,
                row,
                row_count: self.config.row_count,
            });
        }
        Ok((row, column))
    }

    /// Write `text` into the cell for `index`, creating the table at the
    /// end of the body on first use, and style the cell.
    pub fn add_table_cell(
        &mut self,
        document: &mut Document,
        index: usize,
        text: &str,
        style: Option<&Style>,
    ) -> Result<()> {
        let paragraph = self.cell_paragraph(document, index)?;
        paragraph.add_text(text);
        self.styles.apply(Some(paragraph), style);
        Ok(())
    }

    /// Paragraph of the cell for `index`, creating the table if needed.
    pub fn cell_paragraph<'a>(
        &mut self,
        document: &'a mut Document,
        index: usize,
    ) -> Result<&'a mut Paragraph> {
        let (row, column) = self.cell_position(index)?;
        let table = self.table_mut(document)?;
        table
            .cell_mut(row, column)
            .map(|cell| &mut cell.paragraph)
            .ok_or_else(|| Error::Other(format!("Missing table cell ({}, {})", row, column)))
    }

    fn table_mut<'a>(&mut self, document: &'a mut Document) -> Result<&'a mut Table> {
        let block = match self.block {
            Some(block) => block,
            None => {
                debug!(
                    "Creating {}x{} table at body position {}",
                    self.config.row_count,
                    self.config.column_count,
                    document.body.len()
                );
                let table = Table::with_grid(self.config.row_count, self.config.column_count)
                    .with_width(self.width);
                let block = document.add_table(table);
                self.block = Some(block);
                block
            }
        };

        match document.body.get_mut(block) {
            Some(Block::Table(table)) => Ok(table),
            _ => Err(Error::Other(format!("No table at body position {}", block))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextAlign;

    fn locator(columns: usize, rows: usize, start: usize, end: usize) -> TableLocator {
        TableLocator::new(
            TableConfig::new(columns, rows, start, end),
            &LayoutOptions::default(),
        )
    }

    #[test]
    fn test_is_table_index() {
        let locator = locator(3, 3, 2, 4);
        assert!(!locator.is_table_index(1));
        assert!(locator.is_table_index(2));
        assert!(locator.is_table_index(4));
        assert!(!locator.is_table_index(5));
    }

    #[test]
    fn test_cell_position_row_major() {
        let locator = locator(3, 2, 2, 7);
        assert_eq!(locator.cell_position(2).unwrap(), (0, 0));
        assert_eq!(locator.cell_position(4).unwrap(), (0, 2));
        assert_eq!(locator.cell_position(5).unwrap(), (1, 0));
        assert_eq!(locator.cell_position(7).unwrap(), (1, 2));
    }

    #[test]
    fn test_cell_position_overflow() {
        let locator = locator(2, 1, 0, 3);
        assert!(locator.cell_position(1).is_ok());
        assert!(matches!(
            locator.cell_position(2),
            Err(Error::TableOverflow {
                index: 2,
                row: 1,
                row_count: 1
            })
        ));
    }

    #[test]
    fn test_add_table_cell_creates_one_table() {
        let mut document = Document::new();
        let mut locator = locator(3, 3, 2, 3);
        let style = Style::new("Calibri", 8).align(TextAlign::Right);

        locator
            .add_table_cell(&mut document, 2, "first", Some(&style))
            .unwrap();
        locator.add_table_cell(&mut document, 3, "second", None).unwrap();

        let tables: Vec<_> = document.tables().collect();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].width, Some(13300));
        assert_eq!(tables[0].text_at(0, 0), "first");
        assert_eq!(tables[0].text_at(0, 1), "second");

        let cell = tables[0].cell(0, 0).unwrap();
        assert_eq!(cell.paragraph.alignment, Some(TextAlign::Right));
        assert_eq!(cell.paragraph.runs[0].properties.font_size, Some(8));
    }

    #[test]
    fn test_add_table_cell_overflow_leaves_document_untouched() {
        let mut document = Document::new();
        let mut locator = locator(1, 1, 0, 1);
        let result = locator.add_table_cell(&mut document, 1, "too far", None);
        assert!(result.is_err());
        assert_eq!(document.tables().count(), 0);
    }
}
