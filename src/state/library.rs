use chrono::Utc;

use super::data::{ImageId, SelectedFile, UploadedImage};
use super::search::SearchQuery;
use crate::preview::{Preview, ResourceTracker};
#[cfg(test)]
use crate::preview::PreviewFactory;

/// The Library holds every image uploaded during this session.
///
/// Slots are reserved in submission order and filled when their preview
/// arrives, so out-of-order completions never reorder the gallery.
pub struct Library {
    slots: Vec<UploadedImage>,
    next_id: u64,
    tracker: ResourceTracker,
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}

impl Library {
    pub fn new() -> Self {
        Self::with_tracker(ResourceTracker::new())
    }

    pub fn with_tracker(tracker: ResourceTracker) -> Self {
        Self {
            slots: Vec::new(),
            next_id: 0,
            tracker,
        }
    }

    /// Append a pending slot for every file, returning their ids in order
    pub fn reserve(&mut self, files: &[SelectedFile]) -> Vec<ImageId> {
        files
            .iter()
            .map(|file| self.reserve_one(file.name.clone(), file.declared_type.clone()))
            .collect()
    }

    /// Append one pending slot before the file content is known
    pub fn reserve_one(&mut self, name: String, declared_type: Option<String>) -> ImageId {
        let id = ImageId(self.next_id);
        self.next_id += 1;
        self.slots.push(UploadedImage {
            id,
            name,
            declared_type,
            uploaded_at: Utc::now(),
            preview: None,
        });
        id
    }

    /// Fill a pending slot with its preview.
    ///
    /// Returns false when the slot was removed or already has a preview;
    /// the preview is dropped in that case.
    pub fn complete(&mut self, id: ImageId, preview: Preview) -> bool {
        match self.slots.iter_mut().find(|slot| slot.id == id) {
            Some(slot) if slot.preview.is_none() => {
                slot.preview = Some(self.tracker.acquire(preview));
                true
            }
            _ => false,
        }
    }

    /// Drop a slot that will never receive a preview
    pub fn abandon(&mut self, id: ImageId) -> bool {
        match self.slots.iter().position(|slot| slot.id == id && !slot.is_ready()) {
            Some(index) => {
                self.slots.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove an image (pending or ready), releasing its preview
    pub fn remove(&mut self, id: ImageId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|slot| slot.id != id);
        self.slots.len() != before
    }

    /// Remove every image
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// All images whose preview has arrived, in submission order
    pub fn images(&self) -> impl Iterator<Item = &UploadedImage> {
        self.slots.iter().filter(|slot| slot.is_ready())
    }

    /// Images matching `query`, in submission order
    pub fn visible<'a>(&'a self, query: &'a SearchQuery) -> impl Iterator<Item = &'a UploadedImage> {
        self.images().filter(move |img| query.matches(&img.name))
    }

    pub fn get(&self, id: ImageId) -> Option<&UploadedImage> {
        self.slots.iter().find(|slot| slot.id == id)
    }

    /// Number of images with a preview
    pub fn len(&self) -> usize {
        self.images().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids of uploads still waiting for a preview, in submission order
    pub fn pending_ids(&self) -> impl Iterator<Item = ImageId> + '_ {
        self.slots.iter().filter(|slot| !slot.is_ready()).map(|slot| slot.id)
    }

    /// Number of uploads still waiting for a preview
    pub fn pending(&self) -> usize {
        self.pending_ids().count()
    }

    pub fn tracker(&self) -> &ResourceTracker {
        &self.tracker
    }
}

#[cfg(test)]
impl Library {
    /// Reserve and fill slots in one go using `factory`.
    ///
    /// Returns the number of images added.
    pub fn upload(&mut self, files: Vec<SelectedFile>, factory: &dyn PreviewFactory) -> usize {
        let ids = self.reserve(&files);
        let mut added = 0;

        for (id, file) in ids.into_iter().zip(&files) {
            match factory.create(file) {
                Ok(preview) => {
                    if self.complete(id, preview) {
                        added += 1;
                    }
                }
                Err(err) => {
                    tracing::warn!(name = %file.name, error = %err, "preview failed");
                    self.abandon(id);
                }
            }
        }

        added
    }
}

// Implement Debug for better error messages
impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("images", &self.len())
            .field("pending", &self.pending())
            .field("live_previews", &self.tracker.live())
            .finish()
    }
}
