//! Layout options and configuration.

use crate::model::Orientation;

/// EMU per centimetre.
pub const EMU_PER_CM: u32 = 360_000;

/// Layout configuration for a build.
///
/// Lengths are in twips (1/20 point) unless noted otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Indentation used for first-line and paragraph indents
    pub indent: i32,

    /// Spacing after every styled paragraph
    pub spacing_after: u32,

    /// Long side of the page
    pub page_long_side: u32,

    /// Short side of the page
    pub page_short_side: u32,

    /// Top and bottom margin
    pub margin_top_bottom: i32,

    /// Page orientation
    pub orientation: Orientation,

    /// Table width
    pub table_width: usize,

    /// Picture display width in centimetres
    pub picture_width_cm: u32,

    /// Picture display height in centimetres
    pub picture_height_cm: u32,

    /// Blank template loaded from the resource root
    pub template_name: String,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation amount.
    pub fn with_indent(mut self, indent: i32) -> Self {
        self.indent = indent;
        self
    }

    /// Set the spacing after styled paragraphs.
    pub fn with_spacing_after(mut self, spacing: u32) -> Self {
        self.spacing_after = spacing;
        self
    }

    /// Set the page dimensions.
    pub fn with_page_size(mut self, long_side: u32, short_side: u32) -> Self {
        self.page_long_side = long_side;
        self.page_short_side = short_side;
        self
    }

    /// Set the top and bottom margin.
    pub fn with_margin_top_bottom(mut self, margin: i32) -> Self {
        self.margin_top_bottom = margin;
        self
    }

    /// Set the orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Use portrait orientation.
    pub fn portrait(self) -> Self {
        self.with_orientation(Orientation::Portrait)
    }

    /// Set the table width.
    pub fn with_table_width(mut self, width: usize) -> Self {
        self.table_width = width;
        self
    }

    /// Set the picture display size in centimetres.
    pub fn with_picture_size_cm(mut self, width: u32, height: u32) -> Self {
        self.picture_width_cm = width;
        self.picture_height_cm = height;
        self
    }

    /// Set the template file name.
    pub fn with_template(mut self, name: impl Into<String>) -> Self {
        self.template_name = name.into();
        self
    }

    /// Page `(width, height)` for the configured orientation.
    pub fn page_dimensions(&self) -> (u32, u32) {
        match self.orientation {
            Orientation::Landscape => (self.page_long_side, self.page_short_side),
            Orientation::Portrait => (self.page_short_side, self.page_long_side),
        }
    }

    /// Picture display size in EMU.
    pub fn picture_size_emu(&self) -> (u32, u32) {
        (
            self.picture_width_cm * EMU_PER_CM,
            self.picture_height_cm * EMU_PER_CM,
        )
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            indent: 2000,
            spacing_after: 1,
            page_long_side: 842 * 20,
            page_short_side: 595 * 20,
            margin_top_bottom: 240,
            orientation: Orientation::Landscape,
            table_width: 13300,
            picture_width_cm: 11,
            picture_height_cm: 7,
            template_name: "EmptyDocument_2Columns.docx".to_string(),
        }
    }
}
