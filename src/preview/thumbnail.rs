use iced::widget::image::Handle;
use image::imageops::FilterType;

use super::{Preview, PreviewError, PreviewFactory};
use crate::state::data::SelectedFile;

/// Default edge length of generated thumbnails (square bound)
pub const THUMBNAIL_SIZE: u32 = 256;

/// Decodes uploads and downscales them for the grid
#[derive(Debug, Clone, Copy)]
pub struct ThumbnailFactory {
    size: u32,
}

impl Default for ThumbnailFactory {
    fn default() -> Self {
        Self::new(THUMBNAIL_SIZE)
    }
}

impl ThumbnailFactory {
    pub fn new(size: u32) -> Self {
        Self { size: size.max(1) }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Decode and resize to fit within `size` x `size`
    fn decode_thumbnail(&self, file: &SelectedFile) -> Result<Preview, PreviewError> {
        let img = image::load_from_memory(&file.bytes).map_err(|source| PreviewError::Decode {
            name: file.name.clone(),
            source,
        })?;

        // Small images are shown as-is
        let img = if img.width() > self.size || img.height() > self.size {
            img.resize(self.size, self.size, FilterType::Lanczos3)
        } else {
            img
        };

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();

        Ok(Preview {
            handle: Handle::from_rgba(width, height, rgba.into_raw()),
            dimensions: Some((width, height)),
        })
    }
}

impl PreviewFactory for ThumbnailFactory {
    fn create(&self, file: &SelectedFile) -> Result<Preview, PreviewError> {
        // Tier 1: decode + resize
        match self.decode_thumbnail(file) {
            Ok(preview) => {
                tracing::debug!(
                    name = %file.name,
                    dimensions = ?preview.dimensions,
                    "generated thumbnail"
                );
                Ok(preview)
            }
            // Tier 2: hand the encoded bytes to the renderer untouched
            Err(err) => {
                tracing::debug!(name = %file.name, error = %err, "falling back to encoded preview");
                Ok(Preview {
                    handle: Handle::from_bytes(file.bytes.as_ref().clone()),
                    dimensions: None,
                })
            }
        }
    }
}
