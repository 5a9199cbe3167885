//! Picture lookup and embedding.

use super::LayoutOptions;
use crate::error::{Error, Result};
use crate::model::{Picture, PictureRegistry, Run, RunContent};
use image::ImageFormat;
use std::io::Cursor;

/// Recognizes picture references in content text and embeds them.
#[derive(Debug, Clone)]
pub struct PictureLocator {
    registry: PictureRegistry,
    display_width: u32,
    display_height: u32,
}

impl PictureLocator {
    /// Create a locator over `registry`, sizing pictures per `options`.
    pub fn new(registry: PictureRegistry, options: &LayoutOptions) -> Self {
        let (display_width, display_height) = options.picture_size_emu();
        Self {
            registry,
            display_width,
            display_height,
        }
    }

    /// The underlying registry.
    pub fn registry(&self) -> &PictureRegistry {
        &self.registry
    }

    /// Check whether `text` is the file name of a registered picture.
    pub fn is_picture(&self, text: &str) -> bool {
        self.registry.contains(text)
    }

    /// Embed the picture registered as `text` into `run`.
    ///
    /// The bytes are decoded and re-encoded as PNG so the package only ever
    /// carries one image format. Bytes in an unrecognized or disabled format
    /// are rejected before decoding.
    pub fn add_picture(&self, run: &mut Run, text: &str) -> Result<()> {
        let resource = self
            .registry
            .get(text)
            .ok_or_else(|| Error::ResourceNotFound(text.to_string()))?;

        let format = match resource.format {
            Some(format) if resource.is_decodable() => format,
            _ => return Err(Error::UnsupportedPicture(text.to_string())),
        };

        let image = image::load_from_memory_with_format(&resource.data, format)?;
        let mut png = Cursor::new(Vec::new());
        image.write_to(&mut png, ImageFormat::Png)?;

        run.content = RunContent::Picture(Picture {
            name: text.to_string(),
            data: png.into_inner(),
            width_px: image.width(),
            height_px: image.height(),
            display_width: self.display_width,
            display_height: self.display_height,
        });
        Ok(())
    }
}
