//! PDF conversion through a headless office suite.

use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::DocumentConverter;

/// Default office suite executable.
pub const DEFAULT_PROGRAM: &str = "soffice";

/// Converts .docx packages to PDF by running an office suite in headless
/// mode inside a temporary directory.
#[derive(Debug, Clone)]
pub struct OfficeConverter {
    program: PathBuf,
}

impl OfficeConverter {
    /// Create a converter using `soffice` from the `PATH`.
    pub fn new() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
        }
    }

    /// Use a specific office suite executable.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// The executable that is run.
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self, outdir: &Path, source: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("--headless")
            .arg("--convert-to")
            .arg(self.target_extension())
            .arg("--outdir")
            .arg(outdir)
            .arg(source);
        command
    }
}

impl Default for OfficeConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentConverter for OfficeConverter {
    fn name(&self) -> &str {
        "office"
    }

    fn target_extension(&self) -> &str {
        "pdf"
    }

    fn convert_bytes(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        let dir = tempfile::tempdir()?;
        let source = dir.path().join("source.docx");
        fs::write(&source, bytes)?;

        debug!("Running {} on {}", self.program.display(), source.display());
        let output = self.command(dir.path(), &source).output().map_err(|e| {
            Error::Conversion(format!("Failed to run {}: {}", self.program.display(), e))
        })?;

        if !output.status.success() {
            return Err(Error::Conversion(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let target = source.with_extension(self.target_extension());
        fs::read(&target).map_err(|_| {
            Error::Conversion(format!(
                "{} did not produce {}",
                self.program.display(),
                target.display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_office_converter_target() {
        let converter = OfficeConverter::new();
        assert_eq!(converter.name(), "office");
        assert!(converter.produces("pdf"));
        assert!(converter.produces("PDF"));
        assert!(!converter.produces("docx"));
        assert_eq!(converter.program(), Path::new("soffice"));
    }

    #[test]
    fn test_missing_program_is_conversion_error() {
        let converter = OfficeConverter::new().with_program("/nonexistent/docxgen-soffice");
        let result = converter.convert_bytes(b"PK");
        assert!(matches!(result, Err(Error::Conversion(_))));
    }
}
