//! Image storage port for comment attachments

use async_trait::async_trait;

use crate::error::DomainError;

use super::RepoResult;

/// Accepted attachment formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
}

impl ImageKind {
    /// Detect from the client file name and declared content type.
    /// Each must name JPEG or PNG on its own; the stored file takes the
    /// extension's kind.
    pub fn detect(file_name: &str, content_type: Option<&str>) -> Result<Self, DomainError> {
        let ext = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        let by_ext = match ext.as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            _ => None,
        };
        let by_mime = match content_type.map(str::to_ascii_lowercase).as_deref() {
            Some("image/jpeg" | "image/jpg") => Some(Self::Jpeg),
            Some("image/png") => Some(Self::Png),
            _ => None,
        };

        match (by_ext, by_mime) {
            (Some(kind), Some(_)) => Ok(kind),
            _ => Err(DomainError::ValidationError(
                "Only JPG and PNG images are allowed".to_string(),
            )),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }
}

/// A validated upload ready to be persisted
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub kind: ImageKind,
    pub bytes: Vec<u8>,
}

/// Binary storage collaborator. Returns the public URL path of the stored file.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn store(&self, upload: ImageUpload) -> RepoResult<String>;
}
