//! Binary attachments for multipart requests

use crate::ClientResult;
use reqwest::multipart::Part;
use std::fmt;
use std::path::Path;

/// A local file to send alongside a create request or as a profile image.
///
/// The bytes are owned; dropping (or replacing) the attachment releases them.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file, guessing its content type from the extension
    pub async fn from_path(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.bin")
            .to_string();
        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        tracing::debug!(file = %file_name, %content_type, size = bytes.len(), "Attachment loaded");
        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    pub(crate) fn into_part(self) -> ClientResult<Part> {
        Ok(Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.content_type)?)
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_path_guesses_content_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portrait.png");
        tokio::fs::write(&path, [0x89, b'P', b'N', b'G']).await.unwrap();

        let attachment = Attachment::from_path(&path).await.unwrap();
        assert_eq!(attachment.file_name, "portrait.png");
        assert_eq!(attachment.content_type, "image/png");
        assert!(attachment.is_image());
        assert_eq!(attachment.bytes.len(), 4);
    }

    #[tokio::test]
    async fn test_unknown_extension_is_octet_stream() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.zzq");
        tokio::fs::write(&path, b"hello").await.unwrap();

        let attachment = Attachment::from_path(&path).await.unwrap();
        assert_eq!(attachment.content_type, "application/octet-stream");
        assert!(!attachment.is_image());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let err = Attachment::from_path("/definitely/not/here.png").await.unwrap_err();
        assert!(matches!(err, crate::ClientError::Io(_)));
    }

    #[test]
    fn test_debug_hides_bytes() {
        let attachment = Attachment::new("a.jpg", "image/jpeg", vec![1, 2, 3]);
        let text = format!("{:?}", attachment);
        assert!(text.contains("len: 3"));
        assert!(!text.contains("[1, 2, 3]"));
    }
}
