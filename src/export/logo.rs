//! Logo images embedded as data URLs

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogoError {
    #[error("Image read error for {path}: {source}", path = .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported image format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// An image carried inline in the print document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    mime: &'static str,
    data_uri: String,
}

impl EmbeddedImage {
    pub fn from_bytes(mime: &'static str, bytes: &[u8]) -> Self {
        Self {
            mime,
            data_uri: format!("data:{};base64,{}", mime, STANDARD.encode(bytes)),
        }
    }

    /// Read an image file, picking the MIME type from its extension
    pub fn from_path(path: &Path) -> Result<Self, LogoError> {
        let mime = mime_for(path).ok_or_else(|| LogoError::UnsupportedFormat(path.to_path_buf()))?;
        let bytes = std::fs::read(path).map_err(|source| LogoError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_bytes(mime, &bytes))
    }

    #[allow(dead_code)]
    pub fn mime(&self) -> &'static str {
        self.mime
    }

    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }
}

fn mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "svg" => Some("image/svg+xml"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Load the configured logo, logging and skipping it when unusable
pub fn load_logo(path: Option<&Path>) -> Option<EmbeddedImage> {
    let path = path?;
    match EmbeddedImage::from_path(path) {
        Ok(image) => Some(image),
        Err(e) => {
            tracing::warn!("Logo not embedded: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Logo.SVG");
        std::fs::write(&path, "<svg/>").unwrap();

        let image = EmbeddedImage::from_path(&path).unwrap();
        assert_eq!(image.mime(), "image/svg+xml");
        assert_eq!(image.data_uri(), "data:image/svg+xml;base64,PHN2Zy8+");
    }

    #[test]
    fn test_unusable_logo_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let text = dir.path().join("logo.txt");
        std::fs::write(&text, "x").unwrap();

        assert!(matches!(
            EmbeddedImage::from_path(&text),
            Err(LogoError::UnsupportedFormat(_))
        ));
        assert!(load_logo(Some(&text)).is_none());
        assert!(load_logo(Some(&dir.path().join("missing.png"))).is_none());
        assert!(load_logo(None).is_none());
    }
}
