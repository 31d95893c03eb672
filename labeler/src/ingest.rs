//! Turning files and folders into data URIs ready to label.

use base64::{Engine as _, engine::general_purpose};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

/// An image ready to be submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    /// File name shown alongside the result.
    pub name: String,
    pub path: PathBuf,
    /// `data:<mime>;base64,<payload>` URI.
    pub data: String,
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
    #[error("Please select valid image files")]
    NoImages,
}

/// MIME type of `path` if its extension names an image format.
pub fn image_mime(path: &Path) -> Option<String> {
    mime_guess::from_path(path)
        .iter()
        .find(|mime| mime.type_() == mime_guess::mime::IMAGE)
        .map(|mime| mime.essence_str().to_string())
}

pub fn to_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", general_purpose::STANDARD.encode(bytes))
}

/// Read `path` as an [`ImageFile`], or `None` when it is not an image.
pub fn load_image(path: &Path) -> Result<Option<ImageFile>, IngestError> {
    let Some(mime) = image_mime(path) else {
        debug!(path = %path.display(), "skipping non-image file");
        return Ok(None);
    };
    let bytes = std::fs::read(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Some(ImageFile {
        name,
        path: path.to_path_buf(),
        data: to_data_uri(&mime, &bytes),
    }))
}

/// Collect every image under `paths`, descending into directories.
///
/// Files keep the order they were given in; directory contents are sorted by
/// file name. Fails with [`IngestError::NoImages`] when nothing qualifies.
pub fn collect_images<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<ImageFile>, IngestError> {
    let mut images = Vec::new();
    for path in paths {
        let path = path.as_ref();
        if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry?;
                if entry.file_type().is_file() {
                    images.extend(load_image(entry.path())?);
                }
            }
        } else {
            images.extend(load_image(path)?);
        }
    }
    if images.is_empty() {
        return Err(IngestError::NoImages);
    }
    Ok(images)
}
