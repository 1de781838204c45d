/// Upload intake
///
/// Reads the files picked by the user (or dropped on the window) and runs
/// preview generation off the UI thread.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task;

use super::{Preview, PreviewError, PreviewFactory};
use crate::state::data::SelectedFile;

/// Known extensions and their MIME types
const DECLARED_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("ico", "image/x-icon"),
    ("svg", "image/svg+xml"),
];

/// Guess a MIME type from the file extension
pub fn declared_type_for(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    DECLARED_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| (*mime).to_string())
}

/// Filename shown for `path` before its content is read
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// Read one file into a selection record
pub async fn read_file(path: &Path) -> Result<SelectedFile, PreviewError> {
    let name = display_name(path);

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| PreviewError::Read {
            name: name.clone(),
            source,
        })?;

    Ok(SelectedFile::new(name, bytes, declared_type_for(path)))
}

/// Read every path in order, skipping the ones that cannot be read
pub async fn read_selection(paths: Vec<PathBuf>) -> Vec<SelectedFile> {
    let mut files = Vec::with_capacity(paths.len());

    for path in paths {
        match read_file(&path).await {
            Ok(file) => files.push(file),
            Err(err) => tracing::warn!(path = %path.display(), error = %err, "skipping file"),
        }
    }

    files
}

/// Produce a preview for `file` on the blocking pool
pub async fn generate_preview(
    factory: Arc<dyn PreviewFactory>,
    file: SelectedFile,
) -> Result<Preview, PreviewError> {
    // Spawn blocking because decoding and resizing are CPU-intensive
    task::spawn_blocking(move || factory.create(&file))
        .await
        .map_err(|e| PreviewError::Task(e.to_string()))?
}

/// Read `path` and produce its preview in one job
pub async fn load_preview(
    factory: Arc<dyn PreviewFactory>,
    path: PathBuf,
) -> Result<Preview, PreviewError> {
    let file = read_file(&path).await?;
    generate_preview(factory, file).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::testing::{jpeg, BytesFactory, FailingFactory};
    use std::io::Write;

    #[test]
    fn test_declared_type_for() {
        assert_eq!(
            declared_type_for(Path::new("a/test-image.JPG")).as_deref(),
            Some("image/jpeg")
        );
        assert_eq!(declared_type_for(Path::new("notes.txt")), None);
        assert_eq!(declared_type_for(Path::new("README")), None);
    }

    #[tokio::test]
    async fn test_read_selection_keeps_order_and_skips_missing() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("image1.jpg");
        let second = dir.path().join("image2.png");
        std::fs::File::create(&first).unwrap().write_all(b"one").unwrap();
        std::fs::File::create(&second).unwrap().write_all(b"two").unwrap();

        let files = read_selection(vec![
            first,
            dir.path().join("missing.jpg"),
            second,
        ])
        .await;

        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["image1.jpg", "image2.png"]);
        assert_eq!(files[0].bytes.as_slice(), b"one");
        assert_eq!(files[1].declared_type.as_deref(), Some("image/png"));
    }

    #[tokio::test]
    async fn test_read_selection_empty() {
        assert!(read_selection(Vec::new()).await.is_empty());
    }

    #[tokio::test]
    async fn test_generate_preview() {
        let ok = generate_preview(Arc::new(BytesFactory), jpeg("image1.jpg")).await;
        assert!(ok.is_ok());

        let failed = generate_preview(Arc::new(FailingFactory), jpeg("image1.jpg")).await;
        assert!(matches!(failed, Err(PreviewError::Task(_))));
    }

    #[tokio::test]
    async fn test_load_preview() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dropped.jpg");
        std::fs::write(&path, b"dummy content").unwrap();

        assert!(load_preview(Arc::new(BytesFactory), path).await.is_ok());

        let missing = load_preview(Arc::new(BytesFactory), dir.path().join("gone.jpg")).await;
        assert!(matches!(missing, Err(PreviewError::Read { .. })));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("/photos/first-big.jpg")), "first-big.jpg");
        assert_eq!(display_name(Path::new("/")), "");
    }
}
