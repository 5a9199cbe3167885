//! Document build requests.

use crate::error::{Error, Result};
use crate::model::{ContentItem, TableConfig};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Accepted document file names.
pub const DOCX_FILE_NAME_PATTERN: &str = r".*\.docx$";

/// Everything needed to build, store and optionally convert one document.
///
/// # Example
///
/// ```
/// use docxgen::DocumentRequest;
///
/// let request = DocumentRequest::from_json(r#"{
///     "content": [{"text": "Header"}, null, {"text": "Footer"}],
///     "docxFileName": "report.docx",
///     "pdf": true
/// }"#).unwrap();
/// assert!(request.validate().is_ok());
/// assert_eq!(request.pdf_file_name(), "report.pdf");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRequest {
    /// Content list; `null` entries reserve a slot
    pub content: Vec<Option<ContentItem>>,

    /// Table layout for a range of content indices
    #[serde(default, alias = "tableConfigs")]
    pub table_config: Option<TableConfig>,

    /// Name of the document under the resource root
    pub docx_file_name: String,

    /// Also convert the document to PDF
    #[serde(default)]
    pub pdf: bool,

    /// Picture files whose names may appear as content text
    #[serde(default)]
    pub pictures: Vec<PathBuf>,
}

impl DocumentRequest {
    /// Create a request for `content` written as `docx_file_name`.
    pub fn new(content: Vec<Option<ContentItem>>, docx_file_name: impl Into<String>) -> Self {
        Self {
            content,
            table_config: None,
            docx_file_name: docx_file_name.into(),
            pdf: false,
            pictures: Vec::new(),
        }
    }

    /// Set the table configuration.
    pub fn with_table(mut self, config: TableConfig) -> Self {
        self.table_config = Some(config);
        self
    }

    /// Request PDF conversion.
    pub fn with_pdf(mut self, pdf: bool) -> Self {
        self.pdf = pdf;
        self
    }

    /// Add a picture file.
    pub fn with_picture(mut self, path: impl Into<PathBuf>) -> Self {
        self.pictures.push(path.into());
        self
    }

    /// Parse a request from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a request from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check the file name and table configuration.
    pub fn validate(&self) -> Result<()> {
        validate_file_name(&self.docx_file_name)?;
        if let Some(config) = &self.table_config {
            config.validate(self.content.len())?;
        }
        Ok(())
    }

    /// Name of the PDF produced from this document.
    pub fn pdf_file_name(&self) -> String {
        pdf_file_name(&self.docx_file_name)
    }
}

/// Check that `name` is a non-empty `.docx` file name.
pub fn validate_file_name(name: &str) -> Result<()> {
    let pattern =
        Regex::new(DOCX_FILE_NAME_PATTERN).map_err(|e| Error::Other(e.to_string()))?;
    if name.is_empty() || !pattern.is_match(name) {
        return Err(Error::InvalidFileName(name.to_string()));
    }
    Ok(())
}

/// Replace the `.docx` extension of `name` with `.pdf`.
pub fn pdf_file_name(name: &str) -> String {
    match name.strip_suffix(".docx") {
        Some(stem) => format!("{}.pdf", stem),
        None => format!("{}.pdf", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("report.docx").is_ok());
        assert!(validate_file_name("/nested/report.docx").is_ok());
        assert!(matches!(
            validate_file_name(""),
            Err(Error::InvalidFileName(_))
        ));
        assert!(validate_file_name("report.pdf").is_err());
        assert!(validate_file_name("report.docx.bak").is_err());
    }

    #[test]
    fn test_pdf_file_name() {
        assert_eq!(pdf_file_name("report.docx"), "report.pdf");
        assert_eq!(pdf_file_name("/a/b.docx"), "/a/b.pdf");
        assert_eq!(pdf_file_name("odd"), "odd.pdf");
    }

    #[test]
    fn test_parse_request() {
        let request = DocumentRequest::from_json(
            r#"{
                "content": [
                    {"text": "Header"},
                    {"text": "Title", "style": {
                        "fontSize": 14, "fontFamily": "Arial", "color": "000000",
                        "bold": true, "italic": false, "underline": false,
                        "indentFirstLine": false, "indentParagraph": false,
                        "textAlign": "CENTER"
                    }},
                    null,
                    {"text": "Footer"}
                ],
                "tableConfig": {"columnCount": 1, "rowCount": 1, "startIndex": 2, "endIndex": 2},
                "docxFileName": "out.docx"
            }"#,
        )
        .unwrap();

        assert_eq!(request.content.len(), 4);
        assert!(request.content[2].is_none());
        assert_eq!(request.content[1].as_ref().unwrap().style.as_ref().unwrap().font_size, 14);
        assert_eq!(request.table_config, Some(TableConfig::new(1, 1, 2, 2)));
        assert!(!request.pdf);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validate_table_config() {
        let request = DocumentRequest::new(vec![None, None], "out.docx")
            .with_table(TableConfig::new(1, 1, 0, 5));
        assert!(matches!(
            request.validate(),
            Err(Error::InvalidTableConfig(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            DocumentRequest::from_json("{"),
            Err(Error::Json(_))
        ));
    }
}
