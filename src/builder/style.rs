//! Applies a `Style` to a paragraph and its runs.

use super::LayoutOptions;
use crate::model::{Paragraph, Style, Underline};

/// Maps style descriptors onto run and paragraph formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleApplicator {
    indent: i32,
    spacing_after: u32,
}

impl StyleApplicator {
    /// Create an applicator using the indentation and spacing of `options`.
    pub fn new(options: &LayoutOptions) -> Self {
        Self {
            indent: options.indent,
            spacing_after: options.spacing_after,
        }
    }

    /// Apply `style` to every run already in `paragraph`, then to the
    /// paragraph itself. Does nothing if either is missing.
    ///
    /// Underline and indentation are only ever switched on: a `false` flag
    /// leaves whatever the paragraph already has.
    pub fn apply(&self, paragraph: Option<&mut Paragraph>, style: Option<&Style>) {
        let (Some(paragraph), Some(style)) = (paragraph, style) else {
            return;
        };

        for run in &mut paragraph.runs {
            let props = &mut run.properties;
            props.font_size = Some(style.font_size);
            props.font_family = Some(style.font_family.clone());
            props.color = Some(style.color);
            props.bold = Some(style.bold);
            props.italic = Some(style.italic);

            if let Some(break_type) = style.break_type {
                props.break_before = Some(break_type);
            }

            if style.underline {
                props.underline = Some(Underline::Single);
            }
        }

        if style.indent_first_line {
            paragraph.indent_first_line = Some(self.indent);
        }

        if style.indent_paragraph {
            paragraph.indent_left = Some(self.indent);
        }

        paragraph.alignment = Some(style.text_align);
        paragraph.spacing_after = Some(self.spacing_after);
    }
}

impl Default for StyleApplicator {
    fn default() -> Self {
        Self::new(&LayoutOptions::default())
    }
}
