/// Preview generation module
///
/// This module handles:
/// - Reading selected files into memory (intake.rs)
/// - Turning file bytes into displayable thumbnails (thumbnail.rs)
/// - Tracking the lifetime of every preview handed to the gallery

pub mod intake;
pub mod thumbnail;

use iced::widget::image::Handle;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;

use crate::state::data::SelectedFile;

pub use thumbnail::ThumbnailFactory;

/// Errors raised while producing a preview
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("failed to read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },
    #[error("preview task failed: {0}")]
    Task(String),
}

/// A displayable resource produced from raw file bytes
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub handle: Handle,
    /// Pixel size of the thumbnail, None when the renderer decodes lazily
    pub dimensions: Option<(u32, u32)>,
}

/// Turns file content into a preview
///
/// Implementations run on the blocking pool and must not touch UI state.
pub trait PreviewFactory: Send + Sync + 'static {
    fn create(&self, file: &SelectedFile) -> Result<Preview, PreviewError>;
}

/// Counts preview leases that are currently alive
#[derive(Debug, Clone, Default)]
pub struct ResourceTracker {
    live: Arc<AtomicUsize>,
}

impl ResourceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a preview for as long as the returned lease lives
    pub fn acquire(&self, preview: Preview) -> PreviewRef {
        self.live.fetch_add(1, Ordering::SeqCst);
        PreviewRef {
            preview,
            live: Arc::clone(&self.live),
        }
    }

    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

/// A preview owned by exactly one library entry
///
/// Dropping the lease releases the resource.
#[derive(Debug)]
pub struct PreviewRef {
    preview: Preview,
    live: Arc<AtomicUsize>,
}

impl PreviewRef {
    pub fn handle(&self) -> &Handle {
        &self.preview.handle
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.preview.dimensions
    }
}

impl Drop for PreviewRef {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
        tracing::trace!(handle = ?self.preview.handle.id(), "released preview");
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Wraps the raw bytes without decoding
    pub struct BytesFactory;

    impl PreviewFactory for BytesFactory {
        fn create(&self, file: &SelectedFile) -> Result<Preview, PreviewError> {
            Ok(Preview {
                handle: Handle::from_bytes(file.bytes.as_ref().clone()),
                dimensions: None,
            })
        }
    }

    /// Fails every file
    pub struct FailingFactory;

    impl PreviewFactory for FailingFactory {
        fn create(&self, file: &SelectedFile) -> Result<Preview, PreviewError> {
            Err(PreviewError::Task(format!("cannot render {}", file.name)))
        }
    }

    pub fn jpeg(name: &str) -> SelectedFile {
        SelectedFile::new(name, b"dummy content".to_vec(), Some("image/jpeg".to_string()))
    }

    pub fn preview() -> Preview {
        Preview {
            handle: Handle::from_bytes(b"dummy content".to_vec()),
            dimensions: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::preview;
    use super::*;

    #[test]
    fn test_lease_released_on_drop() {
        let tracker = ResourceTracker::new();
        let first = tracker.acquire(preview());
        let second = tracker.acquire(preview());
        assert_eq!(tracker.live(), 2);

        drop(first);
        assert_eq!(tracker.live(), 1);

        drop(second);
        assert_eq!(tracker.live(), 0);
    }

    #[test]
    fn test_tracker_clones_share_count() {
        let tracker = ResourceTracker::new();
        let shared = tracker.clone();
        let lease = shared.acquire(preview());
        assert_eq!(tracker.live(), 1);
        assert!(lease.dimensions().is_none());
    }
}
