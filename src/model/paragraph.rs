//! Paragraph and run types.

use super::{BreakType, Color, Picture, TextAlign};

/// A paragraph: a sequence of runs plus paragraph-level formatting.
///
/// Formatting attributes left at `None` fall back to the document defaults
/// and are not written to the package.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    /// Runs in the paragraph
    pub runs: Vec<Run>,

    /// Paragraph alignment
    pub alignment: Option<TextAlign>,

    /// First line indentation in twips
    pub indent_first_line: Option<i32>,

    /// Left indentation in twips
    pub indent_left: Option<i32>,

    /// Spacing after the paragraph in twips
    pub spacing_after: Option<u32>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with a single text run.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_text(text);
        p
    }

    /// Append a text run and return it for further formatting.
    pub fn add_text(&mut self, text: impl Into<String>) -> &mut Run {
        self.add_run(Run::text(text))
    }

    /// Append a run and return it.
    pub fn add_run(&mut self, run: Run) -> &mut Run {
        self.runs.push(run);
        let last = self.runs.len() - 1;
        &mut self.runs[last]
    }

    /// Concatenated text of all text runs.
    pub fn plain_text(&self) -> String {
        self.runs
            .iter()
            .filter_map(|run| match &run.content {
                RunContent::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Pictures embedded in this paragraph.
    pub fn pictures(&self) -> impl Iterator<Item = &Picture> {
        self.runs.iter().filter_map(|run| match &run.content {
            RunContent::Picture(picture) => Some(picture),
            _ => None,
        })
    }

    /// Check if the paragraph has no runs.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// A run of content with uniform character formatting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Run {
    /// What the run displays
    pub content: RunContent,

    /// Character formatting
    pub properties: RunProperties,
}

impl Run {
    /// Create an empty run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a text run.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: RunContent::Text(text.into()),
            properties: RunProperties::default(),
        }
    }

    /// Create a picture run.
    pub fn picture(picture: Picture) -> Self {
        Self {
            content: RunContent::Picture(picture),
            properties: RunProperties::default(),
        }
    }

    /// The run text, if this is a text run.
    pub fn as_text(&self) -> Option<&str> {
        match &self.content {
            RunContent::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Content of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RunContent {
    /// No content yet
    #[default]
    Empty,

    /// Plain text
    Text(String),

    /// An embedded picture
    Picture(Picture),
}

/// Character formatting of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunProperties {
    /// Font size in points
    pub font_size: Option<u32>,

    /// Font family
    pub font_family: Option<String>,

    /// Text color
    pub color: Option<Color>,

    /// Bold
    pub bold: Option<bool>,

    /// Italic
    pub italic: Option<bool>,

    /// Underline pattern
    pub underline: Option<Underline>,

    /// Break emitted before the run content
    pub break_before: Option<BreakType>,
}

/// Underline patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Underline {
    /// Single line
    Single,
}

impl Underline {
    /// WordprocessingML value of the pattern.
    pub fn as_str(&self) -> &'static str {
        match self {
            Underline::Single => "single",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_plain_text() {
        let mut p = Paragraph::new();
        p.add_text("Hello ");
        p.add_text("world");

        assert_eq!(p.plain_text(), "Hello world");
        assert_eq!(p.runs.len(), 2);
    }

    #[test]
    fn test_add_text_returns_run() {
        let mut p = Paragraph::new();
        p.add_text("bold").properties.bold = Some(true);
        assert_eq!(p.runs[0].properties.bold, Some(true));
    }

    #[test]
    fn test_new_paragraph_has_no_formatting() {
        let p = Paragraph::new();
        assert!(p.is_empty());
        assert_eq!(p.alignment, None);
        assert_eq!(p.indent_first_line, None);
        assert_eq!(p.indent_left, None);
    }
}
