//! # docxgen
//!
//! Build word-processing documents from an ordered content list.
//!
//! A content list is a sequence of text items with optional styles. The
//! first item becomes the page header, the last item the page footer, a
//! configured range of items fills a table, and every other item becomes a
//! body paragraph. Items whose text equals the file name of a registered
//! picture embed that picture instead. The document is written under a
//! resource root and can be converted to PDF by an external office suite.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docxgen::{build_and_write, ContentItem, DocumentRequest, LayoutOptions, ResourceStore};
//!
//! fn main() -> docxgen::Result<()> {
//!     let store = ResourceStore::new("./resources");
//!     let request = DocumentRequest::new(
//!         vec![
//!             Some(ContentItem::unstyled("Quarterly report")),
//!             Some(ContentItem::unstyled("Revenue grew.")),
//!             Some(ContentItem::unstyled("Page footer")),
//!         ],
//!         "report.docx",
//!     );
//!
//!     let outcome = build_and_write(&store, &request, LayoutOptions::default(), None)?;
//!     println!("written: {}", outcome.written);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Position-based layout**: header, footer, table range and body
//! - **Pictures**: PNG, JPEG, GIF and BMP, embedded as PNG
//! - **Templates**: documents start from a blank template under the root
//! - **PDF conversion**: through a headless office suite
//! - **Async**: `build_and_write_async` with the `async` feature

pub mod builder;
pub mod convert;
pub mod error;
pub mod model;
pub mod request;
pub mod storage;

// Re-export commonly used types
pub use builder::{DocumentBuilder, LayoutOptions};
pub use convert::{ConverterRegistry, DocumentConverter, OfficeConverter};
pub use error::{Error, Result};
pub use model::{
    Block, BreakType, Color, ContentItem, Document, Orientation, Paragraph, PictureRegistry, Run,
    Style, Table, TableCell, TableConfig, TableRow, TextAlign,
};
pub use request::DocumentRequest;
pub use storage::ResourceStore;

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;

/// What happened during one build.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOutcome {
    /// Name of the document under the resource root
    pub docx_file_name: String,

    /// Name of the PDF, if one was requested
    pub pdf_file_name: Option<String>,

    /// Whether the document was written
    pub written: bool,

    /// Whether the PDF was written
    pub converted: bool,

    /// When the build started
    pub started_at: DateTime<Utc>,

    /// When the build finished
    pub finished_at: DateTime<Utc>,
}

impl BuildOutcome {
    /// Check whether every requested artifact was written.
    pub fn is_complete(&self) -> bool {
        self.written && (self.pdf_file_name.is_none() || self.converted)
    }
}

/// Validate `request`, build the document, write it and optionally convert
/// it to PDF.
///
/// Only configuration errors are returned. Write and conversion failures
/// are logged and reported through [`BuildOutcome`].
///
/// # Example
///
/// ```no_run
/// use docxgen::{build_and_write, DocumentRequest, LayoutOptions, OfficeConverter, ResourceStore};
///
/// let store = ResourceStore::new("./resources");
/// let request = DocumentRequest::from_path("request.json").unwrap();
/// let converter = OfficeConverter::new();
/// let outcome = build_and_write(&store, &request, LayoutOptions::default(), Some(&converter)).unwrap();
/// assert!(outcome.is_complete());
/// ```
pub fn build_and_write(
    store: &ResourceStore,
    request: &DocumentRequest,
    options: LayoutOptions,
    converter: Option<&dyn DocumentConverter>,
) -> Result<BuildOutcome> {
    request.validate()?;
    let started_at = Utc::now();

    let pictures = PictureRegistry::from_paths(&request.pictures);
    let mut builder = DocumentBuilder::with_layout(
        store.clone(),
        request.content.clone(),
        &request.docx_file_name,
        options,
    )
    .with_pictures(pictures);
    if let Some(config) = request.table_config {
        builder = builder.with_table(config);
    }

    let written = builder.build();

    let pdf_file_name = request.pdf.then(|| request.pdf_file_name());
    let converted = match (&pdf_file_name, converter) {
        (Some(pdf), Some(converter)) if !converter.produces("pdf") => {
            warn!(
                "Converter {} produces .{} files, not {}",
                converter.name(),
                converter.target_extension(),
                pdf
            );
            false
        }
        (Some(pdf), Some(converter)) if written => {
            store.convert_file(converter, &request.docx_file_name, pdf)
        }
        (Some(_), None) => {
            warn!("PDF requested but no converter is configured");
            false
        }
        _ => false,
    };

    let outcome = BuildOutcome {
        docx_file_name: request.docx_file_name.clone(),
        pdf_file_name,
        written,
        converted,
        started_at,
        finished_at: Utc::now(),
    };
    info!(
        "Build of {} finished in {} ms",
        outcome.docx_file_name,
        (outcome.finished_at - outcome.started_at).num_milliseconds()
    );
    Ok(outcome)
}

/// Read a stored document, or its PDF when `pdf` is set.
///
/// Fails with [`Error::ResourceNotFound`] when the artifact has not been
/// created yet.
pub fn download(store: &ResourceStore, file_name: &str, pdf: bool) -> Result<Vec<u8>> {
    if pdf {
        store.read(&request::pdf_file_name(file_name))
    } else {
        store.read(file_name)
    }
}

/// Run [`build_and_write`] on the blocking thread pool.
#[cfg(feature = "async")]
pub async fn build_and_write_async(
    store: ResourceStore,
    request: DocumentRequest,
    options: LayoutOptions,
    converter: Option<std::sync::Arc<dyn DocumentConverter>>,
) -> Result<BuildOutcome> {
    tokio::task::spawn_blocking(move || {
        build_and_write(&store, &request, options, converter.as_deref())
    })
    .await
    .map_err(|e| Error::Other(format!("Build task failed: {}", e)))?
}
