//! Document-level types.

use super::{Paragraph, Picture, Table};
use docx_rs::{DocumentChild, Docx};

/// An assembled document.
///
/// The body rendered by the builder is appended after whatever the blank
/// template still contains once its placeholder has been removed.
#[derive(Debug, Clone)]
pub struct Document {
    /// Template package the body is appended to
    pub base: Docx,

    /// Rendered body elements, in content order
    pub body: Vec<Block>,

    /// Default header
    pub header: Option<HeaderFooter>,

    /// Default footer
    pub footer: Option<HeaderFooter>,

    /// Page geometry
    pub page: PageSetup,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::from_template(Docx::new())
    }

    /// Create a document on top of a loaded template.
    pub fn from_template(base: Docx) -> Self {
        Self {
            base,
            body: Vec::new(),
            header: None,
            footer: None,
            page: PageSetup::default(),
        }
    }

    /// Append a new body paragraph and return it.
    pub fn create_paragraph(&mut self) -> &mut Paragraph {
        self.body.push(Block::Paragraph(Paragraph::new()));
        match self.body.last_mut() {
            Some(Block::Paragraph(p)) => p,
            _ => unreachable!("a paragraph was just pushed"),
        }
    }

    /// Append a table to the body and return its block index.
    pub fn add_table(&mut self, table: Table) -> usize {
        self.body.push(Block::Table(table));
        self.body.len() - 1
    }

    /// Replace the default header with an empty one and return it.
    pub fn new_header(&mut self) -> &mut HeaderFooter {
        self.header.insert(HeaderFooter::default())
    }

    /// Replace the default footer with an empty one and return it.
    pub fn new_footer(&mut self) -> &mut HeaderFooter {
        self.footer.insert(HeaderFooter::default())
    }

    /// Body paragraph count, including paragraphs left in the template.
    pub fn paragraph_count(&self) -> usize {
        self.template_paragraph_count() + self.paragraphs().count()
    }

    /// Paragraphs remaining in the template body.
    pub fn template_paragraph_count(&self) -> usize {
        self.base
            .document
            .children
            .iter()
            .filter(|child| matches!(child, DocumentChild::Paragraph(_)))
            .count()
    }

    /// Rendered body paragraphs.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.body.iter().filter_map(|block| match block {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    /// Rendered tables.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.body.iter().filter_map(|block| match block {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    /// The last rendered body paragraph.
    pub fn last_paragraph(&self) -> Option<&Paragraph> {
        self.paragraphs().last()
    }

    /// Every picture embedded anywhere in the document.
    pub fn pictures(&self) -> Vec<&Picture> {
        let mut pictures = Vec::new();
        for block in &self.body {
            match block {
                Block::Paragraph(p) => pictures.extend(p.pictures()),
                Block::Table(t) => {
                    for row in &t.rows {
                        for cell in &row.cells {
                            pictures.extend(cell.paragraph.pictures());
                        }
                    }
                }
            }
        }
        for part in [&self.header, &self.footer].into_iter().flatten() {
            for p in &part.paragraphs {
                pictures.extend(p.pictures());
            }
        }
        pictures
    }

    /// Number of embedded pictures.
    pub fn picture_count(&self) -> usize {
        self.pictures().len()
    }

    /// Check if nothing has been rendered.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty() && self.header.is_none() && self.footer.is_none()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// A rendered body element.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// A paragraph
    Paragraph(Paragraph),

    /// A table
    Table(Table),
}

/// Content of a header or footer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderFooter {
    /// Paragraphs in the header or footer
    pub paragraphs: Vec<Paragraph>,
}

impl HeaderFooter {
    /// Append a new paragraph and return it.
    pub fn create_paragraph(&mut self) -> &mut Paragraph {
        self.paragraphs.push(Paragraph::new());
        let last = self.paragraphs.len() - 1;
        &mut self.paragraphs[last]
    }

    /// Concatenated text of all paragraphs.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Portrait (template default)
    #[default]
    Portrait,
    /// Landscape
    Landscape,
}

/// Page geometry in twips; `None` keeps the template default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSetup {
    /// Orientation, if set explicitly
    pub orientation: Option<Orientation>,

    /// Page width
    pub width: Option<u32>,

    /// Page height
    pub height: Option<u32>,

    /// Page margins
    pub margins: PageMargins,
}

/// Page margins in twips; unset sides keep the template default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageMargins {
    /// Top margin
    pub top: Option<i32>,
    /// Right margin
    pub right: Option<i32>,
    /// Bottom margin
    pub bottom: Option<i32>,
    /// Left margin
    pub left: Option<i32>,
}

impl PageMargins {
    /// Check if any side is set.
    pub fn is_set(&self) -> bool {
        self.top.is_some() || self.right.is_some() || self.bottom.is_some() || self.left.is_some()
    }
}
