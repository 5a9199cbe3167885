//! Document model types.
//!
//! Content descriptors (`ContentItem`, `Style`, `TableConfig`) describe what
//! to build; the assembled `Document` is what the builder fills in and the
//! writer packages as .docx.

mod content;
mod document;
mod paragraph;
mod resource;
mod table;

pub use content::{BreakType, Color, ContentItem, Style, TableConfig, TextAlign};
pub use document::{Block, Document, HeaderFooter, Orientation, PageMargins, PageSetup};
pub use paragraph::{Paragraph, Run, RunContent, RunProperties, Underline};
pub use resource::{Picture, PictureRegistry, PictureResource};
pub use table::{Table, TableCell, TableRow};
