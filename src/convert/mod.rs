//! Format conversion of stored documents.
//!
//! Converters turn the bytes of a written .docx package into another format.
//! A [`ConverterRegistry`] maps target extensions to converters so callers
//! can pick one by the file name they want to produce.
//!
//! # Example
//!
//! ```no_run
//! use docxgen::convert::{ConverterRegistry, OfficeConverter};
//! use std::sync::Arc;
//!
//! fn main() -> docxgen::Result<()> {
//!     let mut registry = ConverterRegistry::new();
//!     registry.register(Arc::new(OfficeConverter::new()));
//!
//!     let docx = std::fs::read("resources/report.docx")?;
//!     let pdf = registry.convert_bytes(&docx, "pdf")?;
//!     std::fs::write("resources/report.pdf", pdf)?;
//!     Ok(())
//! }
//! ```

pub mod docx;
mod pdf;

pub use pdf::OfficeConverter;

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Trait for document converters.
///
/// Implement this trait to add support for a new output format.
pub trait DocumentConverter: Send + Sync {
    /// Get the name of this converter.
    fn name(&self) -> &str;

    /// Extension of the produced files, lowercase without the leading dot.
    fn target_extension(&self) -> &str;

    /// Convert the bytes of a .docx package.
    fn convert_bytes(&self, bytes: &[u8]) -> Result<Vec<u8>>;

    /// Convert a .docx file at the given path.
    fn convert_file(&self, path: &Path) -> Result<Vec<u8>> {
        let bytes = std::fs::read(path)?;
        self.convert_bytes(&bytes)
    }

    /// Check if this converter produces the given extension.
    fn produces(&self, ext: &str) -> bool {
        self.target_extension().eq_ignore_ascii_case(ext.trim_start_matches('.'))
    }
}

/// Registry for document converters.
///
/// The registry maps target extensions to converters.
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<dyn DocumentConverter>>,
}

impl ConverterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            converters: HashMap::new(),
        }
    }

    /// Create a registry with default converters (office suite to PDF).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(OfficeConverter::new()));
        registry
    }

    /// Register a converter for its target extension.
    ///
    /// A later registration for the same extension replaces the earlier one.
    pub fn register(&mut self, converter: Arc<dyn DocumentConverter>) {
        self.converters
            .insert(converter.target_extension().to_lowercase(), converter);
    }

    /// Get a converter by target extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.converters
            .get(&ext.trim_start_matches('.').to_lowercase())
            .cloned()
    }

    /// Get the converter producing the extension of `file_name`.
    pub fn for_file_name(&self, file_name: &str) -> Option<Arc<dyn DocumentConverter>> {
        Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(|ext| self.get_by_extension(ext))
    }

    /// Check if an extension can be produced.
    pub fn supports(&self, ext: &str) -> bool {
        self.get_by_extension(ext).is_some()
    }

    /// Get all target extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.converters.keys().map(|s| s.as_str()).collect();
        extensions.sort_unstable();
        extensions
    }

    /// Convert .docx bytes into the format with extension `ext`.
    pub fn convert_bytes(&self, bytes: &[u8], ext: &str) -> Result<Vec<u8>> {
        let converter = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::Conversion(format!("No converter for extension: {}", ext)))?;

        converter.convert_bytes(bytes)
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("extensions", &self.supported_extensions())
            .finish()
    }
}
