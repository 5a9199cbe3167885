//! Documents and artifacts under a resource root.
//!
//! [`ResourceStore`] resolves file names against a root directory, loads
//! blank templates, writes documents and runs format conversions. Writes to
//! the same destination are serialized; writes to different destinations run
//! concurrently.

use crate::convert::{docx, DocumentConverter};
use crate::error::{Error, Result};
use crate::model::Document;
use log::{error, info, warn};
use parking_lot::Mutex;
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Default resource root.
pub const DEFAULT_ROOT: &str = "./resources";

/// One mutex per destination path with a write in flight.
#[derive(Debug, Default)]
struct PathLocks {
    locks: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl PathLocks {
    fn lock_for(&self, path: &Path) -> Arc<Mutex<()>> {
        self.locks
            .lock()
            .entry(path.to_path_buf())
            .or_default()
            .clone()
    }

    /// Give back a lock taken with `lock_for`, dropping the entry once no
    /// other writer holds it.
    fn release(&self, path: &Path, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock();
        drop(lock);
        if locks
            .get(path)
            .is_some_and(|entry| Arc::strong_count(entry) == 1)
        {
            locks.remove(path);
        }
    }

    fn len(&self) -> usize {
        self.locks.lock().len()
    }
}

/// File access rooted at a resource directory.
///
/// Cheap to clone; clones share the lock table.
#[derive(Debug, Clone)]
pub struct ResourceStore {
    root: PathBuf,
    locks: Arc<PathLocks>,
}

impl ResourceStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            locks: Arc::new(PathLocks::default()),
        }
    }

    /// The resource root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ensure `name` starts with a `/`; an empty name becomes `"/"`.
    pub fn prepend_slash(name: &str) -> String {
        if name.starts_with('/') {
            name.to_string()
        } else {
            format!("/{}", name)
        }
    }

    /// Path of `name` under the root.
    ///
    /// `"a.docx"` and `"/a.docx"` resolve to the same path.
    pub fn resolve(&self, name: &str) -> PathBuf {
        let relative = Self::prepend_slash(name);
        self.root.join(relative.trim_start_matches('/'))
    }

    /// Check whether `name` exists under the root.
    pub fn exists(&self, name: &str) -> bool {
        self.resolve(name).is_file()
    }

    /// Serialize `document` and write it as `name`.
    ///
    /// Returns whether the file was written. Failures are logged; no partial
    /// file is left under `name`.
    pub fn write(&self, document: &Document, name: &str) -> bool {
        info!("Writing .docx file {}...", name);
        match docx::to_bytes(document).and_then(|bytes| self.write_bytes(name, &bytes)) {
            Ok(path) => {
                info!("Finished writing {}", path.display());
                true
            }
            Err(e) => {
                error!("Failed to write .docx file {}: {}", name, e);
                false
            }
        }
    }

    /// Atomically write `bytes` as `name`, returning the destination path.
    pub fn write_bytes(&self, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.resolve(name);
        let dir = path
            .parent()
            .ok_or_else(|| Error::InvalidFileName(name.to_string()))?;
        fs::create_dir_all(dir)?;

        let lock = self.locks.lock_for(&path);
        let result = {
            let _guard = lock.lock();
            Self::persist(dir, &path, bytes)
        };
        self.locks.release(&path, lock);
        result.map(|()| path)
    }

    fn persist(dir: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(bytes)?;
        file.flush()?;
        file.persist(path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }

    /// Number of destinations with a write in flight.
    pub fn pending_writes(&self) -> usize {
        self.locks.len()
    }

    /// Load the blank template `name`.
    ///
    /// A missing, unreadable or corrupt template yields an empty document;
    /// the cause is logged.
    pub fn read_template(&self, name: &str) -> Document {
        info!("Starting to read .docx file {}...", name);
        match self.try_read_template(name) {
            Ok(document) => document,
            Err(e) => {
                warn!(
                    "Failed to read .docx file {}, starting from an empty document: {}",
                    name, e
                );
                Document::new()
            }
        }
    }

    fn try_read_template(&self, name: &str) -> Result<Document> {
        if name.is_empty() {
            return Err(Error::ResourceNotFound("empty template name".into()));
        }
        let bytes = fs::read(self.resolve(name))?;
        docx::from_template_bytes(&bytes)
    }

    /// Read a stored artifact.
    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.resolve(name);
        if !path.is_file() {
            return Err(Error::ResourceNotFound(name.to_string()));
        }
        Ok(fs::read(path)?)
    }

    /// Convert the .docx read from `input` and write the result as `dest`.
    ///
    /// Returns whether the converted file was written.
    pub fn convert(
        &self,
        converter: &dyn DocumentConverter,
        input: impl Read,
        dest: &str,
    ) -> bool {
        info!(
            "Converting to .{} with {}...",
            converter.target_extension(),
            converter.name()
        );
        match self.try_convert(converter, input, dest) {
            Ok(path) => {
                info!("Finished converting {}", path.display());
                true
            }
            Err(e) => {
                error!("Failed to convert to {}: {}", dest, e);
                false
            }
        }
    }

    fn try_convert(
        &self,
        converter: &dyn DocumentConverter,
        mut input: impl Read,
        dest: &str,
    ) -> Result<PathBuf> {
        let mut bytes = Vec::new();
        input.read_to_end(&mut bytes)?;
        let converted = converter.convert_bytes(&bytes)?;
        self.write_bytes(dest, &converted)
    }

    /// Convert the stored file `source` and write the result as `dest`.
    pub fn convert_file(&self, converter: &dyn DocumentConverter, source: &str, dest: &str) -> bool {
        match File::open(self.resolve(source)) {
            Ok(file) => self.convert(converter, file, dest),
            Err(e) => {
                error!("Failed to open {} for conversion: {}", source, e);
                false
            }
        }
    }

    /// Run independent `(source, dest)` conversions in parallel.
    ///
    /// Results are returned in job order.
    pub fn convert_many(
        &self,
        converter: &dyn DocumentConverter,
        jobs: &[(String, String)],
    ) -> Vec<bool> {
        jobs.par_iter()
            .map(|(source, dest)| self.convert_file(converter, source, dest))
            .collect()
    }
}

impl Default for ResourceStore {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}
