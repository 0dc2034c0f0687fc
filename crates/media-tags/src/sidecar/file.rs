//! Filesystem sidecar store.

use media_fs::atomic_write;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::{SidecarStore, SIDECAR_FILE_NAME};
use crate::document::SidecarDocument;
use crate::error::{Result, TagError};

/// Stores each folder's document as `.meme-tags.json` inside that folder.
///
/// Documents are written as pretty-printed JSON through a temp file and a
/// rename, so a crash mid-save leaves the previous sidecar intact.
#[derive(Debug, Clone, Default)]
pub struct FileSidecarStore;

impl FileSidecarStore {
    pub fn new() -> Self {
        Self
    }

    /// Path of the sidecar for `folder`.
    pub fn sidecar_path(folder: &Path) -> PathBuf {
        folder.join(SIDECAR_FILE_NAME)
    }
}

#[async_trait::async_trait]
impl SidecarStore for FileSidecarStore {
    async fn load(&self, folder: &Path) -> Result<SidecarDocument> {
        let path = Self::sidecar_path(folder);

        let content = match fs::read(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SidecarDocument::new());
            }
            Err(e) => return Err(TagError::io(path, e)),
        };

        serde_json::from_slice(&content).map_err(|source| TagError::Parse { path, source })
    }

    async fn save(&self, folder: &Path, document: &SidecarDocument) -> Result<()> {
        let path = Self::sidecar_path(folder);
        let content = serde_json::to_vec_pretty(document).map_err(TagError::Serialize)?;

        atomic_write(&path, &content)
            .await
            .map_err(|e| TagError::io(&path, e))?;

        tracing::debug!(
            "Saved {} tag record(s) to {}",
            document.len(),
            path.display()
        );
        Ok(())
    }
}
