/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the intake layer and the UI layer.

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

use crate::preview::PreviewRef;

/// A file handed over by the picker or a window drop
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    /// Filename only (e.g., "DSC_0001.jpg")
    pub name: String,
    /// Raw file content
    pub bytes: Arc<Vec<u8>>,
    /// MIME type guessed from the extension, if known
    pub declared_type: Option<String>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>, declared_type: Option<String>) -> Self {
        Self {
            name: name.into(),
            bytes: Arc::new(bytes),
            declared_type,
        }
    }
}

/// Session-unique identifier of an uploaded image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub u64);

impl ImageId {
    /// Stable automation marker for the gallery tile of this image
    pub fn tile_marker(self) -> String {
        format!("upload-preview-{}", self.0)
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Represents a single image in the library
#[derive(Debug)]
pub struct UploadedImage {
    pub id: ImageId,
    /// Original filename, used as the filter key and display label
    pub name: String,
    pub declared_type: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    /// None while the preview is still being generated
    pub preview: Option<PreviewRef>,
}

impl UploadedImage {
    pub fn is_ready(&self) -> bool {
        self.preview.is_some()
    }
}
