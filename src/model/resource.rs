//! Picture resources: the registry of uploaded pictures and the pictures
//! embedded into runs.

use image::ImageFormat;
use log::warn;
use std::collections::HashMap;
use std::path::Path;

/// Raw bytes of a registered picture.
#[derive(Debug, Clone, PartialEq)]
pub struct PictureResource {
    /// Raw binary data as read from disk
    pub data: Vec<u8>,

    /// Image format guessed from the leading bytes
    pub format: Option<ImageFormat>,
}

impl PictureResource {
    /// Create a resource, guessing its image format.
    pub fn new(data: Vec<u8>) -> Self {
        let format = image::guess_format(&data).ok();
        Self { data, format }
    }

    /// Get the size of the resource data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// MIME type of the guessed format.
    pub fn mime_type(&self) -> Option<&'static str> {
        self.format.map(|f| f.to_mime_type())
    }

    /// Check whether the bytes are in a format this build can decode.
    pub fn is_decodable(&self) -> bool {
        self.format.is_some_and(|f| f.reading_enabled())
    }
}

/// Mapping from bare file name to picture bytes.
///
/// Lookups are exact and case-sensitive on the file name, never on a path.
#[derive(Debug, Clone, Default)]
pub struct PictureRegistry {
    pictures: HashMap<String, PictureResource>,
}

impl PictureRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from picture files, keyed by their file names.
    ///
    /// Files that cannot be read are skipped with a warning.
    pub fn from_paths<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Self {
        let mut registry = Self::new();
        for path in paths {
            let path = path.as_ref();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                warn!("Skipping picture without a file name: {:?}", path);
                continue;
            };
            match std::fs::read(path) {
                Ok(data) => registry.insert(name, data),
                Err(e) => warn!("Skipping picture {:?}: {}", path, e),
            }
        }
        registry
    }

    /// Register picture bytes under a file name.
    pub fn insert(&mut self, name: impl Into<String>, data: Vec<u8>) {
        self.pictures.insert(name.into(), PictureResource::new(data));
    }

    /// Check if a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.pictures.contains_key(name)
    }

    /// Get a picture by file name.
    pub fn get(&self, name: &str) -> Option<&PictureResource> {
        self.pictures.get(name)
    }

    /// Registered file names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pictures.keys().map(|k| k.as_str())
    }

    /// Number of registered pictures.
    pub fn len(&self) -> usize {
        self.pictures.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.pictures.is_empty()
    }
}

/// A picture embedded into a run, ready for packaging.
#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    /// File name the picture was registered under
    pub name: String,

    /// PNG encoded bytes
    pub data: Vec<u8>,

    /// Width in pixels
    pub width_px: u32,

    /// Height in pixels
    pub height_px: u32,

    /// Display width in EMU
    pub display_width: u32,

    /// Display height in EMU
    pub display_height: u32,
}
