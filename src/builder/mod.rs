//! Content rendering.
//!
//! [`DocumentBuilder`] walks the content list once, in index order, and
//! assembles a [`Document`]: index 0 becomes the header, the last index the
//! footer, indices in the configured table range fill table cells, and every
//! other index becomes a body paragraph.

mod options;
pub mod pictures;
pub mod placement;
pub mod style;
pub mod table;

pub use options::{LayoutOptions, EMU_PER_CM};
pub use pictures::PictureLocator;
pub use placement::{Placement, Position, TextFacts, TextRoute};
pub use style::StyleApplicator;
pub use table::TableLocator;

use crate::error::Error;
use crate::model::{Block, ContentItem, Document, Paragraph, PictureRegistry, Run, TableConfig};
use crate::storage::ResourceStore;
use log::{debug, error, info, warn};
use unicode_normalization::UnicodeNormalization;

/// The paragraph a content index was rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphSlot {
    /// Paragraph `n` of the header
    Header(usize),
    /// Paragraph `n` of the footer
    Footer(usize),
    /// Body block `n`
    Body(usize),
}

/// Builds one document from a content list.
///
/// # Example
///
/// ```no_run
/// use docxgen::{ContentItem, DocumentBuilder, ResourceStore};
///
/// let store = ResourceStore::new("./resources");
/// let content = vec![
///     Some(ContentItem::unstyled("Header")),
///     Some(ContentItem::unstyled("Body")),
///     Some(ContentItem::unstyled("Footer")),
/// ];
/// let mut builder = DocumentBuilder::new(store, content, "report.docx");
/// assert!(builder.build());
/// ```
#[derive(Debug)]
pub struct DocumentBuilder {
    store: ResourceStore,
    content: Vec<Option<ContentItem>>,
    docx_file_name: String,
    options: LayoutOptions,
    styles: StyleApplicator,
    pictures: Option<PictureLocator>,
    table: Option<TableLocator>,
    document: Document,
}

impl DocumentBuilder {
    /// Create a builder with default layout options.
    ///
    /// The blank template is loaded from the resource root; when it cannot
    /// be read the builder starts from an empty document.
    pub fn new(
        store: ResourceStore,
        content: Vec<Option<ContentItem>>,
        docx_file_name: impl Into<String>,
    ) -> Self {
        Self::with_layout(store, content, docx_file_name, LayoutOptions::default())
    }

    /// Create a builder with the given layout options.
    pub fn with_layout(
        store: ResourceStore,
        content: Vec<Option<ContentItem>>,
        docx_file_name: impl Into<String>,
        options: LayoutOptions,
    ) -> Self {
        let document = store.read_template(&options.template_name);
        Self {
            store,
            content,
            docx_file_name: docx_file_name.into(),
            styles: StyleApplicator::new(&options),
            options,
            pictures: None,
            table: None,
            document,
        }
    }

    /// Fill indices in the configured range into a table.
    pub fn with_table(mut self, config: TableConfig) -> Self {
        self.set_table(Some(config));
        self
    }

    /// Embed pictures whose file names appear as content text.
    pub fn with_pictures(mut self, registry: PictureRegistry) -> Self {
        self.set_pictures(Some(registry));
        self
    }

    /// Replace the layout options.
    ///
    /// The template is read again when its name changed.
    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        if options.template_name != self.options.template_name {
            self.document = self.store.read_template(&options.template_name);
        }
        self.styles = StyleApplicator::new(&options);
        self.pictures = self
            .pictures
            .map(|locator| PictureLocator::new(locator.registry().clone(), &options));
        self.table = self
            .table
            .map(|locator| TableLocator::new(*locator.config(), &options));
        self.options = options;
        self
    }

    /// Set or clear the table configuration.
    pub fn set_table(&mut self, config: Option<TableConfig>) {
        self.table = config.map(|config| TableLocator::new(config, &self.options));
    }

    /// Set or clear the picture registry.
    pub fn set_pictures(&mut self, registry: Option<PictureRegistry>) {
        self.pictures = registry.map(|registry| PictureLocator::new(registry, &self.options));
    }

    /// Replace the content list.
    pub fn set_content(&mut self, content: Vec<Option<ContentItem>>) {
        self.content = content;
    }

    /// Replace the destination file name.
    pub fn set_docx_file_name(&mut self, name: impl Into<String>) {
        self.docx_file_name = name.into();
    }

    /// The content list.
    pub fn content(&self) -> &[Option<ContentItem>] {
        &self.content
    }

    /// The destination file name.
    pub fn docx_file_name(&self) -> &str {
        &self.docx_file_name
    }

    /// The layout options.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// The resource store documents are written to.
    pub fn store(&self) -> &ResourceStore {
        &self.store
    }

    /// The document assembled so far.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Consume the builder and return the assembled document.
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Render the content list, apply the page setup and write the document.
    ///
    /// Returns whether the document was written.
    pub fn build(&mut self) -> bool {
        info!("Starting to build document {}...", self.docx_file_name);
        self.add_content();
        self.apply_page_setup();
        self.write()
    }

    /// Render every content index in order.
    pub fn add_content(&mut self) {
        if self.content.is_empty() {
            warn!("Content list is empty, the document will have no body");
        }
        for index in 0..self.content.len() {
            self.add_paragraph(index);
        }
    }

    /// Render the content item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for the content list.
    pub fn add_paragraph(&mut self, index: usize) {
        let item = self.content[index].clone();
        let slot = self.create_paragraph_by_index(index);

        if let Some(item) = item {
            self.add_text(slot, &item, index);
            let paragraph = slot.and_then(|slot| slot_paragraph(&mut self.document, slot));
            self.styles.apply(paragraph, item.style.as_ref());
        }
    }

    /// Create the paragraph that index `index` renders into.
    ///
    /// Returns `None` for table cells and for an absent header or footer
    /// item.
    pub fn create_paragraph_by_index(&mut self, index: usize) -> Option<ParagraphSlot> {
        let present = self.content[index].is_some();
        let position = Position {
            index,
            len: self.content.len(),
            in_table: self.is_table_index(index),
        };
        let placement = placement::place(&position);
        debug!("Content index {} placed as {:?}", index, placement);

        match placement {
            Placement::TableCell => None,
            Placement::Header if present => {
                self.document.new_header().create_paragraph();
                Some(ParagraphSlot::Header(0))
            }
            Placement::Footer if present => {
                self.document.new_footer().create_paragraph();
                Some(ParagraphSlot::Footer(0))
            }
            Placement::Header | Placement::Footer => None,
            Placement::Body => {
                self.document.create_paragraph();
                Some(ParagraphSlot::Body(self.document.body.len() - 1))
            }
        }
    }

    /// Write the text of `item` as a picture, a table cell or a text run.
    pub fn add_text(&mut self, slot: Option<ParagraphSlot>, item: &ContentItem, index: usize) {
        let facts = TextFacts {
            is_picture: self
                .pictures
                .as_ref()
                .is_some_and(|pictures| pictures.is_picture(&item.text)),
            in_table: self.is_table_index(index),
        };

        match placement::route(&facts) {
            TextRoute::Picture => self.add_picture(slot, index, item),
            TextRoute::TableCell => {
                let text: String = item.text.nfc().collect();
                if let Some(table) = self.table.as_mut() {
                    if let Err(e) =
                        table.add_table_cell(&mut self.document, index, &text, item.style.as_ref())
                    {
                        error!("Skipping table cell for index {}: {}", index, e);
                    }
                }
            }
            TextRoute::PlainText => {
                if let Some(paragraph) = slot.and_then(|slot| slot_paragraph(&mut self.document, slot))
                {
                    paragraph.add_text(item.text.nfc().collect::<String>());
                }
            }
        }
    }

    fn add_picture(&mut self, slot: Option<ParagraphSlot>, index: usize, item: &ContentItem) {
        let Some(pictures) = self.pictures.as_ref() else {
            return;
        };

        let in_cell = slot.is_none();
        let paragraph = match slot {
            Some(slot) => slot_paragraph(&mut self.document, slot),
            None => match self.table.as_mut() {
                Some(table) if table.is_table_index(index) => {
                    match table.cell_paragraph(&mut self.document, index) {
                        Ok(paragraph) => Some(paragraph),
                        Err(e) => {
                            error!("Skipping picture for index {}: {}", index, e);
                            None
                        }
                    }
                }
                _ => None,
            },
        };
        let Some(paragraph) = paragraph else {
            return;
        };

        let mut run = Run::new();
        match pictures.add_picture(&mut run, &item.text) {
            Ok(()) => {
                paragraph.add_run(run);
                if in_cell {
                    self.styles.apply(Some(paragraph), item.style.as_ref());
                }
            }
            Err(e @ Error::UnsupportedPicture(_)) => warn!("Skipping picture: {}", e),
            Err(e) => error!("Skipping picture {}: {}", item.text, e),
        }
    }

    fn is_table_index(&self, index: usize) -> bool {
        self.table
            .as_ref()
            .is_some_and(|table| table.is_table_index(index))
    }

    fn apply_page_setup(&mut self) {
        let (width, height) = self.options.page_dimensions();
        let page = &mut self.document.page;
        page.orientation = Some(self.options.orientation);
        page.width = Some(width);
        page.height = Some(height);
        page.margins.top = Some(self.options.margin_top_bottom);
        page.margins.bottom = Some(self.options.margin_top_bottom);
    }

    fn write(&self) -> bool {
        self.store.write(&self.document, &self.docx_file_name)
    }
}

fn slot_paragraph(document: &mut Document, slot: ParagraphSlot) -> Option<&mut Paragraph> {
    match slot {
        ParagraphSlot::Header(n) => document.header.as_mut()?.paragraphs.get_mut(n),
        ParagraphSlot::Footer(n) => document.footer.as_mut()?.paragraphs.get_mut(n),
        ParagraphSlot::Body(n) => match document.body.get_mut(n) {
            Some(Block::Paragraph(paragraph)) => Some(paragraph),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Style, TextAlign};
    use tempfile::TempDir;

    fn builder(content: Vec<Option<ContentItem>>) -> (TempDir, DocumentBuilder) {
        let dir = TempDir::new().unwrap();
        let store = ResourceStore::new(dir.path());
        (dir, DocumentBuilder::new(store, content, "out.docx"))
    }

    fn items(texts: &[&str]) -> Vec<Option<ContentItem>> {
        texts
            .iter()
            .map(|text| Some(ContentItem::unstyled(*text)))
            .collect()
    }

    #[test]
    fn test_header_body_footer() {
        let (_dir, mut builder) = builder(items(&["head", "one", "two", "foot"]));
        builder.add_content();

        let document = builder.document();
        assert_eq!(document.paragraph_count(), 2);
        assert_eq!(document.header.as_ref().unwrap().plain_text(), "head");
        assert_eq!(document.footer.as_ref().unwrap().plain_text(), "foot");
        assert_eq!(document.last_paragraph().unwrap().plain_text(), "two");
    }

    #[test]
    fn test_absent_items() {
        let (_dir, mut builder) = builder(vec![
            None,
            Some(ContentItem::unstyled("body")),
            None,
            None,
        ]);
        builder.add_content();

        let document = builder.document();
        assert!(document.header.is_none());
        assert!(document.footer.is_none());
        // an absent body item still reserves its slot
        assert_eq!(document.paragraph_count(), 2);
        assert!(document.last_paragraph().unwrap().is_empty());
    }

    #[test]
    fn test_header_paragraph_count_stays_one() {
        let (_dir, mut builder) = builder(items(&["head", "foot"]));
        builder.add_paragraph(0);
        builder.add_paragraph(0);
        assert_eq!(builder.document().header.as_ref().unwrap().paragraphs.len(), 1);
    }

    #[test]
    fn test_style_is_applied_to_container() {
        let style = Style::new("Arial", 14).bold().align(TextAlign::Center);
        let (_dir, mut builder) = builder(vec![
            Some(ContentItem::unstyled("head")),
            Some(ContentItem::new("Title", style)),
            Some(ContentItem::unstyled("foot")),
        ]);
        builder.add_content();

        let paragraph = builder.document().last_paragraph().unwrap();
        assert_eq!(paragraph.alignment, Some(TextAlign::Center));
        assert_eq!(paragraph.runs[0].properties.bold, Some(true));
        assert_eq!(paragraph.runs[0].properties.font_size, Some(14));
    }

    #[test]
    fn test_text_is_nfc_normalized() {
        let (_dir, mut builder) = builder(items(&["head", "e\u{301}", "foot"]));
        builder.add_content();
        let paragraph = builder.document().last_paragraph().unwrap();
        assert_eq!(paragraph.runs[0].as_text(), Some("\u{e9}"));
    }

    #[test]
    fn test_table_cells_do_not_create_paragraphs() {
        let (_dir, builder) = builder(items(&["head", "a", "b", "c", "foot"]));
        let mut builder = builder.with_table(TableConfig::new(2, 1, 1, 2));
        builder.add_content();

        let document = builder.document();
        assert_eq!(document.paragraph_count(), 1);
        let table = document.tables().next().unwrap();
        assert_eq!(table.text_at(0, 0), "a");
        assert_eq!(table.text_at(0, 1), "b");
        assert_eq!(document.last_paragraph().unwrap().plain_text(), "c");
    }

    #[test]
    fn test_table_overflow_is_skipped() {
        let (_dir, builder) = builder(items(&["head", "a", "b", "foot"]));
        let mut builder = builder.with_table(TableConfig::new(1, 1, 1, 2));
        builder.add_content();

        let table = builder.document().tables().next().unwrap();
        assert_eq!(table.plain_text(), "a");
        assert_eq!(builder.document().paragraph_count(), 0);
    }

    #[test]
    fn test_undecodable_picture_is_skipped() {
        let mut registry = PictureRegistry::new();
        registry.insert("broken.png", b"not an image".to_vec());
        let (_dir, builder) = builder(items(&["head", "broken.png", "foot"]));
        let mut builder = builder.with_pictures(registry);
        builder.add_content();

        let document = builder.document();
        assert_eq!(document.picture_count(), 0);
        assert!(document.last_paragraph().unwrap().runs.is_empty());
    }

    #[test]
    fn test_page_setup() {
        let (_dir, mut builder) = builder(items(&["head", "foot"]));
        builder.apply_page_setup();

        let page = &builder.document().page;
        assert_eq!((page.width, page.height), (Some(16840), Some(11900)));
        assert_eq!(page.margins.top, Some(240));
        assert_eq!(page.margins.bottom, Some(240));
        assert_eq!(page.margins.left, None);
        assert_eq!(page.margins.right, None);
    }

    #[test]
    #[should_panic]
    fn test_add_paragraph_out_of_range() {
        let (_dir, mut builder) = builder(items(&["only"]));
        builder.add_paragraph(1);
    }
}
