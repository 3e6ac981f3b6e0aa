//! Local-disk image storage
//!
//! Comment attachments are written under `<upload_dir>/comments/` and served
//! back by the static file route mounted at `/uploads`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use gallery_core::{DomainError, ImageKind, ImageStore, ImageUpload, RepoResult};
use rand::Rng;
use tracing::{debug, instrument};

/// URL prefix the upload directory is served under
pub const UPLOADS_ROUTE: &str = "/uploads";

const COMMENTS_DIR: &str = "comments";

/// [`ImageStore`] writing to the local filesystem
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    dir: PathBuf,
}

impl LocalImageStore {
    /// Prepare `<upload_dir>/comments`, creating it if needed
    pub async fn new(upload_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let dir = upload_dir.as_ref().join(COMMENTS_DIR);
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    /// `comment-<millis>-<random>.<ext>`
    fn file_name(kind: ImageKind) -> String {
        let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
        format!(
            "comment-{}-{}.{}",
            Utc::now().timestamp_millis(),
            suffix,
            kind.extension()
        )
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    #[instrument(skip(self, upload), fields(size = upload.bytes.len()))]
    async fn store(&self, upload: ImageUpload) -> RepoResult<String> {
        let name = Self::file_name(upload.kind);
        tokio::fs::write(self.dir.join(&name), &upload.bytes)
            .await
            .map_err(|e| DomainError::StorageError(e.to_string()))?;

        debug!(file = %name, "Stored comment image");
        Ok(format!("{UPLOADS_ROUTE}/{COMMENTS_DIR}/{name}"))
    }
}
