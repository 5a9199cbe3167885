//! Mapping between the document model and .docx packages.

use crate::error::{Error, Result};
use crate::model::{
    Block, BreakType, Document, HeaderFooter, Orientation, PageSetup, Paragraph, Run, RunContent,
    Table, TextAlign,
};
use docx_rs::{
    AlignmentType, DocumentChild, Docx, Footer, Header, LineSpacing, PageOrientationType,
    ParagraphChild, Pic, RunChild, RunFonts, SpecialIndentType, WidthType,
};
use log::debug;
use serde::Serialize;
use std::io::Cursor;

/// Element counts of a stored package body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PackageSummary {
    /// Body paragraphs
    pub paragraphs: usize,
    /// Body tables
    pub tables: usize,
    /// Pictures in body paragraphs
    pub pictures: usize,
}

/// Build the `docx-rs` package for `document`.
///
/// The rendered body is appended after the template's remaining elements.
pub fn to_docx(document: &Document) -> Docx {
    let mut docx = document.base.clone();

    for block in &document.body {
        docx = match block {
            Block::Paragraph(p) => docx.add_paragraph(paragraph(p)),
            Block::Table(t) => docx.add_table(table(t)),
        };
    }

    if let Some(part) = &document.header {
        docx = docx.header(header(part));
    }
    if let Some(part) = &document.footer {
        docx = docx.footer(footer(part));
    }

    page_setup(docx, &document.page)
}

/// Serialize `document` into .docx bytes.
pub fn to_bytes(document: &Document) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    to_docx(document)
        .build()
        .pack(&mut buffer)
        .map_err(|e| Error::Docx(format!("Failed to pack DOCX: {}", e)))?;
    Ok(buffer.into_inner())
}

/// Load a blank template, dropping its first body element.
///
/// Blank templates carry a single placeholder paragraph so that office
/// suites keep their section settings; it is removed before rendering.
pub fn from_template_bytes(bytes: &[u8]) -> Result<Document> {
    let mut base = docx_rs::read_docx(bytes)?;
    if !base.document.children.is_empty() {
        base.document.children.remove(0);
    }
    debug!(
        "Loaded template with {} remaining body elements",
        base.document.children.len()
    );
    Ok(Document::from_template(base))
}

/// Count the body elements of a .docx package.
pub fn summarize(bytes: &[u8]) -> Result<PackageSummary> {
    let docx = docx_rs::read_docx(bytes)?;
    let mut summary = PackageSummary::default();

    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(p) => {
                summary.paragraphs += 1;
                summary.pictures += p
                    .children
                    .iter()
                    .filter_map(|c| match c {
                        ParagraphChild::Run(run) => Some(run),
                        _ => None,
                    })
                    .flat_map(|run| run.children.iter())
                    .filter(|c| matches!(c, RunChild::Drawing(_)))
                    .count();
            }
            DocumentChild::Table(_) => summary.tables += 1,
            _ => {}
        }
    }
    Ok(summary)
}

fn header(part: &HeaderFooter) -> Header {
    part.paragraphs
        .iter()
        .fold(Header::new(), |h, p| h.add_paragraph(paragraph(p)))
}

fn footer(part: &HeaderFooter) -> Footer {
    part.paragraphs
        .iter()
        .fold(Footer::new(), |f, p| f.add_paragraph(paragraph(p)))
}

fn page_setup(mut docx: Docx, page: &PageSetup) -> Docx {
    if let (Some(width), Some(height)) = (page.width, page.height) {
        docx = docx.page_size(width, height);
    }

    if let Some(orientation) = page.orientation {
        docx = docx.page_orient(match orientation {
            Orientation::Portrait => PageOrientationType::Portrait,
            Orientation::Landscape => PageOrientationType::Landscape,
        });
    }

    let margins = page.margins;
    if margins.is_set() {
        // unset sides keep the template's margins
        let mut margin = docx.document.section_property.page_margin.clone();
        if let Some(top) = margins.top {
            margin.top = top;
        }
        if let Some(right) = margins.right {
            margin.right = right;
        }
        if let Some(bottom) = margins.bottom {
            margin.bottom = bottom;
        }
        if let Some(left) = margins.left {
            margin.left = left;
        }
        docx = docx.page_margin(margin);
    }

    docx
}

fn paragraph(p: &Paragraph) -> docx_rs::Paragraph {
    let mut out = p
        .runs
        .iter()
        .fold(docx_rs::Paragraph::new(), |out, r| out.add_run(run(r)));

    if let Some(align) = p.alignment {
        out = out.align(alignment(align));
    }

    if p.indent_left.is_some() || p.indent_first_line.is_some() {
        out = out.indent(
            p.indent_left,
            p.indent_first_line.map(SpecialIndentType::FirstLine),
            None,
            None,
        );
    }

    if let Some(after) = p.spacing_after {
        out = out.line_spacing(LineSpacing::new().after(after));
    }

    out
}

fn run(r: &Run) -> docx_rs::Run {
    let props = &r.properties;
    let mut out = docx_rs::Run::new();

    if let Some(kind) = props.break_before {
        out = out.add_break(break_type(kind));
    }

    match &r.content {
        RunContent::Text(text) => out = out.add_text(text),
        RunContent::Picture(picture) => {
            let pic = Pic::new_with_dimensions(
                picture.data.clone(),
                picture.width_px,
                picture.height_px,
            )
            .size(picture.display_width, picture.display_height);
            out = out.add_image(pic);
        }
        RunContent::Empty => {}
    }

    if let Some(size) = props.font_size {
        // half-points
        out = out.size(size as usize * 2);
    }
    if let Some(family) = &props.font_family {
        out = out.fonts(
            RunFonts::new()
                .ascii(family)
                .hi_ansi(family)
                .east_asia(family)
                .cs(family),
        );
    }
    if let Some(color) = props.color {
        out = out.color(color.rgb());
    }
    if props.bold == Some(true) {
        out = out.bold();
    }
    if props.italic == Some(true) {
        out = out.italic();
    }
    if let Some(underline) = props.underline {
        out = out.underline(underline.as_str());
    }

    out
}

fn table(t: &Table) -> docx_rs::Table {
    let rows = t
        .rows
        .iter()
        .map(|row| {
            docx_rs::TableRow::new(
                row.cells
                    .iter()
                    .map(|cell| docx_rs::TableCell::new().add_paragraph(paragraph(&cell.paragraph)))
                    .collect(),
            )
        })
        .collect();

    let mut out = docx_rs::Table::new(rows);
    if let Some(width) = t.width {
        let columns = t.column_count().max(1);
        out = out
            .set_grid(vec![width / columns; columns])
            .width(width, WidthType::Dxa);
    }
    out
}

fn alignment(align: TextAlign) -> AlignmentType {
    match align {
        TextAlign::Left => AlignmentType::Left,
        TextAlign::Center => AlignmentType::Center,
        TextAlign::Right => AlignmentType::Right,
        TextAlign::Justify => AlignmentType::Both,
    }
}

fn break_type(kind: BreakType) -> docx_rs::BreakType {
    match kind {
        BreakType::Page => docx_rs::BreakType::Page,
        BreakType::Column => docx_rs::BreakType::Column,
        BreakType::Line => docx_rs::BreakType::TextWrapping,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Color, Style};

    fn sample() -> Document {
        let mut document = Document::new();
        document
            .new_header()
            .create_paragraph()
            .add_text("Header");
        let body = document.create_paragraph();
        body.add_text("Body").properties.font_size = Some(12);
        body.alignment = Some(TextAlign::Justify);
        body.indent_first_line = Some(2000);

        let mut grid = Table::with_grid(1, 2).with_width(13300);
        grid.cell_mut(0, 1).unwrap().paragraph.add_text("cell");
        document.add_table(grid);

        document.page.orientation = Some(Orientation::Landscape);
        document.page.width = Some(16840);
        document.page.height = Some(11900);
        document.page.margins.top = Some(240);
        document
    }

    #[test]
    fn test_to_bytes_is_zip_package() {
        let bytes = to_bytes(&sample()).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_written_package_reads_back() {
        let bytes = to_bytes(&sample()).unwrap();
        let docx = docx_rs::read_docx(&bytes).unwrap();
        let paragraphs = docx
            .document
            .children
            .iter()
            .filter(|c| matches!(c, docx_rs::DocumentChild::Paragraph(_)))
            .count();
        let tables = docx
            .document
            .children
            .iter()
            .filter(|c| matches!(c, docx_rs::DocumentChild::Table(_)))
            .count();
        assert_eq!(paragraphs, 1);
        assert_eq!(tables, 1);
    }

    #[test]
    fn test_summarize() {
        let bytes = to_bytes(&sample()).unwrap();
        let summary = summarize(&bytes).unwrap();
        assert_eq!(
            summary,
            PackageSummary {
                paragraphs: 1,
                tables: 1,
                pictures: 0,
            }
        );
    }

    #[test]
    fn test_template_placeholder_is_removed() {
        let template = Docx::new()
            .add_paragraph(docx_rs::Paragraph::new().add_run(docx_rs::Run::new().add_text("x")));
        let mut buffer = Cursor::new(Vec::new());
        template.build().pack(&mut buffer).unwrap();

        let document = from_template_bytes(&buffer.into_inner()).unwrap();
        assert_eq!(document.paragraph_count(), 0);
    }

    #[test]
    fn test_unset_margins_keep_template_values() {
        let template = Docx::new()
            .page_margin(docx_rs::PageMargin::new().left(500).right(600))
            .add_paragraph(docx_rs::Paragraph::new());
        let mut buffer = Cursor::new(Vec::new());
        template.build().pack(&mut buffer).unwrap();

        let mut document = from_template_bytes(&buffer.into_inner()).unwrap();
        document.page.margins.top = Some(240);
        document.page.margins.bottom = Some(240);

        let margin = to_docx(&document).document.section_property.page_margin;
        assert_eq!((margin.top, margin.bottom), (240, 240));
        assert_eq!((margin.left, margin.right), (500, 600));
    }

    #[test]
    fn test_corrupt_template_is_error() {
        assert!(from_template_bytes(b"not a zip").is_err());
    }

    #[test]
    fn test_styled_run_packs() {
        let mut document = Document::new();
        let paragraph = document.create_paragraph();
        paragraph.add_text("styled");
        crate::builder::StyleApplicator::default().apply(
            Some(paragraph),
            Some(
                &Style::new("Courier New", 9)
                    .color(Color::RED)
                    .underline()
                    .break_before(BreakType::Page),
            ),
        );
        assert!(to_bytes(&document).is_ok());
    }
}
