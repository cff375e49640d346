//! Client-side validation for image uploads
//!
//! Only PNG and JPEG content is accepted. The check runs on the file's
//! magic bytes before any network call, so a wrongly named file is rejected
//! just like a wrongly typed one.

use std::path::Path;
use tokio::fs;

use crate::error::{CatteryError, Result};
use crate::ui::messages;

const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_MAGIC: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Content types the API accepts for uploads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
}

impl ImageKind {
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageKind::Png => "image/png",
            ImageKind::Jpeg => "image/jpeg",
        }
    }
}

/// Detect the image kind from leading magic bytes
pub fn sniff_image_kind(bytes: &[u8]) -> Option<ImageKind> {
    if bytes.starts_with(&PNG_MAGIC) {
        Some(ImageKind::Png)
    } else if bytes.starts_with(&JPEG_MAGIC) {
        Some(ImageKind::Jpeg)
    } else {
        None
    }
}

/// A validated upload candidate
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub kind: ImageKind,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Read and validate a file for upload
    ///
    /// Fails with the wrong-file-type validation error for anything that is
    /// not PNG or JPEG content; no request is issued in that case.
    pub async fn from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CatteryError::io(
                "File not found",
                path.display().to_string(),
            ));
        }

        let bytes = fs::read(path).await?;
        let kind = sniff_image_kind(&bytes)
            .ok_or_else(|| CatteryError::validation(messages::WRONG_FILE_TYPE))?;

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("cat.jpeg")
            .to_string();

        Ok(Self {
            filename,
            kind,
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::test_helpers::*;

    #[test]
    fn test_sniff_png() {
        let bytes = png_bytes();
        assert_eq!(sniff_image_kind(&bytes), Some(ImageKind::Png));
    }

    #[test]
    fn test_sniff_jpeg() {
        let bytes = jpeg_bytes();
        assert_eq!(sniff_image_kind(&bytes), Some(ImageKind::Jpeg));
    }

    #[test]
    fn test_sniff_rejects_text() {
        assert_eq!(sniff_image_kind(b"hello cats"), None);
        assert_eq!(sniff_image_kind(&[]), None);
    }

    #[tokio::test]
    async fn test_upload_file_accepts_png() {
        let dir = create_temp_dir();
        let path = create_temp_file_with_content(&dir, "cat.png", &png_bytes());

        let upload = UploadFile::from_path(&path).await.unwrap();
        assert_eq!(upload.kind, ImageKind::Png);
        assert_eq!(upload.kind.mime_type(), "image/png");
        assert_eq!(upload.filename, "cat.png");
    }

    #[tokio::test]
    async fn test_upload_file_rejects_plain_text() {
        let dir = create_temp_dir();
        // Extension lies; the content is what counts.
        let path = create_temp_file_with_content(&dir, "cat.png", b"just text");

        let err = UploadFile::from_path(&path).await.unwrap_err();
        assert!(err.is_validation_error());
        assert!(err.to_string().contains("Wrong file type selected"));
    }

    #[tokio::test]
    async fn test_upload_file_missing() {
        let dir = create_temp_dir();
        let path = dir.path().join("nope.jpg");
        assert!(UploadFile::from_path(&path).await.is_err());
    }
}
