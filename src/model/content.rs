//! Content descriptors that drive a document build.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of the content list: a piece of text and how to style it.
///
/// The text is interpreted as a picture reference when it equals the file
/// name of a registered picture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Text, or the file name of a registered picture
    pub text: String,

    /// Styling; `None` leaves the container unstyled
    #[serde(default)]
    pub style: Option<Style>,
}

impl ContentItem {
    /// Create an item with text and style.
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style: Some(style),
        }
    }

    /// Create an item without style.
    pub fn unstyled(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }
}

/// Styling information for one content item.
///
/// Every field except `break_type` is required on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    /// Font size in points
    pub font_size: u32,

    /// Font family name
    pub font_family: String,

    /// Text color
    pub color: Color,

    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Single underline
    pub underline: bool,

    /// Indent the first line of the paragraph
    pub indent_first_line: bool,

    /// Indent the whole paragraph from the left
    pub indent_paragraph: bool,

    /// Paragraph alignment
    pub text_align: TextAlign,

    /// Explicit break emitted before the run content
    #[serde(default, alias = "pageBreakBefore")]
    pub break_type: Option<BreakType>,
}

impl Style {
    /// Create a plain style with the given font, left aligned, black, no
    /// emphasis and no indentation.
    pub fn new(font_family: impl Into<String>, font_size: u32) -> Self {
        Self {
            font_size,
            font_family: font_family.into(),
            color: Color::BLACK,
            bold: false,
            italic: false,
            underline: false,
            indent_first_line: false,
            indent_paragraph: false,
            text_align: TextAlign::Left,
            break_type: None,
        }
    }

    /// Set color and return self.
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Make bold and return self.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Make italic and return self.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Underline and return self.
    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Set alignment and return self.
    pub fn align(mut self, text_align: TextAlign) -> Self {
        self.text_align = text_align;
        self
    }

    /// Set the break emitted before the content and return self.
    pub fn break_before(mut self, break_type: BreakType) -> Self {
        self.break_type = Some(break_type);
        self
    }
}

/// An RGB color, written as six hex digits (`"0000FF"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red component
    pub r: u8,
    /// Green component
    pub g: u8,
    /// Blue component
    pub b: u8,
}

impl Color {
    /// Black.
    pub const BLACK: Color = Color::new(0, 0, 0);
    /// White.
    pub const WHITE: Color = Color::new(255, 255, 255);
    /// Blue.
    pub const BLUE: Color = Color::new(0, 0, 255);
    /// Red.
    pub const RED: Color = Color::new(255, 0, 0);

    /// Create a color from its components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color, with or without a leading `#`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(Error::Other(format!("Invalid color: {}", hex)));
        }
        let component = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| Error::Other(format!("Invalid color: {}", hex)))
        };
        Ok(Self::new(component(0..2)?, component(2..4)?, component(4..6)?))
    }

    /// Upper-case hex representation without `#`, as used in WordprocessingML.
    pub fn rgb(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rgb())
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.rgb()
    }
}

/// Paragraph alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TextAlign {
    /// Left alignment (default)
    #[default]
    #[serde(alias = "left")]
    Left,
    /// Center alignment
    #[serde(alias = "center")]
    Center,
    /// Right alignment
    #[serde(alias = "right")]
    Right,
    /// Justified alignment
    #[serde(alias = "justify", alias = "BOTH")]
    Justify,
}

/// Explicit break inside a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BreakType {
    /// Page break
    #[serde(alias = "page")]
    Page,
    /// Column break
    #[serde(alias = "column")]
    Column,
    /// Line break
    #[serde(alias = "line", alias = "TEXT_WRAPPING")]
    Line,
}

/// Geometry and content range of the single table of a document.
///
/// Content positions `start_index..=end_index` become table cells filled
/// row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    /// Number of columns (at least 1)
    pub column_count: usize,

    /// Number of rows (at least 1)
    pub row_count: usize,

    /// First content index that is a table cell
    pub start_index: usize,

    /// Last content index that is a table cell (inclusive)
    pub end_index: usize,
}

impl TableConfig {
    /// Create a table configuration.
    pub fn new(column_count: usize, row_count: usize, start_index: usize, end_index: usize) -> Self {
        Self {
            column_count,
            row_count,
            start_index,
            end_index,
        }
    }

    /// Check whether a content index lies in the table range.
    pub fn contains(&self, index: usize) -> bool {
        self.start_index <= index && index <= self.end_index
    }

    /// Number of content positions covered by the table range.
    pub fn cell_count(&self) -> usize {
        self.end_index - self.start_index + 1
    }

    /// Validate the configuration against a content list of `content_len`
    /// items.
    ///
    /// Does not check that the grid holds the whole range; that is reported
    /// when a cell past the last row is written.
    pub fn validate(&self, content_len: usize) -> Result<()> {
        if self.column_count == 0 {
            return Err(Error::InvalidTableConfig(
                "'columnCount' must be at least 1".into(),
            ));
        }
        if self.row_count == 0 {
            return Err(Error::InvalidTableConfig(
                "'rowCount' must be at least 1".into(),
            ));
        }
        if self.start_index > self.end_index {
            return Err(Error::InvalidTableConfig(format!(
                "'startIndex' ({}) is greater than 'endIndex' ({})",
                self.start_index, self.end_index
            )));
        }
        if self.end_index >= content_len {
            return Err(Error::InvalidTableConfig(format!(
                "'endIndex' ({}) is out of range for {} content items",
                self.end_index, content_len
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::from_hex("0000ff").unwrap(), Color::BLUE);
        assert_eq!(Color::from_hex("#FF0000").unwrap(), Color::RED);
        assert_eq!(Color::BLUE.rgb(), "0000FF");
        assert!(Color::from_hex("blue").is_err());
        assert!(Color::from_hex("12345").is_err());
    }

    #[test]
    fn test_style_json() {
        let json = r#"{
            "fontSize": 11,
            "fontFamily": "Calibri",
            "color": "000000",
            "bold": true,
            "italic": false,
            "underline": false,
            "indentFirstLine": false,
            "indentParagraph": true,
            "textAlign": "CENTER"
        }"#;
        let style: Style = serde_json::from_str(json).unwrap();
        assert_eq!(style.font_size, 11);
        assert_eq!(style.text_align, TextAlign::Center);
        assert!(style.indent_paragraph);
        assert_eq!(style.break_type, None);
    }

    #[test]
    fn test_style_missing_field_is_rejected() {
        let json = r#"{ "fontSize": 11, "fontFamily": "Calibri" }"#;
        assert!(serde_json::from_str::<Style>(json).is_err());
    }

    #[test]
    fn test_content_item_without_style() {
        let item: ContentItem = serde_json::from_str(r#"{ "text": "hello" }"#).unwrap();
        assert_eq!(item, ContentItem::unstyled("hello"));
    }

    #[test]
    fn test_table_config_validate() {
        assert!(TableConfig::new(3, 3, 2, 2).validate(5).is_ok());
        assert!(TableConfig::new(0, 3, 2, 2).validate(5).is_err());
        assert!(TableConfig::new(3, 0, 2, 2).validate(5).is_err());
        assert!(TableConfig::new(3, 3, 3, 2).validate(5).is_err());
        assert!(TableConfig::new(3, 3, 2, 5).validate(5).is_err());
    }

    #[test]
    fn test_table_config_contains() {
        let config = TableConfig::new(2, 2, 1, 3);
        assert!(!config.contains(0));
        assert!(config.contains(1));
        assert!(config.contains(3));
        assert!(!config.contains(4));
        assert_eq!(config.cell_count(), 3);
    }
}
