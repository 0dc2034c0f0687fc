//! In-memory sidecar store for testing.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::SidecarStore;
use crate::document::SidecarDocument;
use crate::error::Result;

/// Keeps documents in a map instead of on disk and counts saves, so tests can
/// observe which operations commit.
#[derive(Debug, Default)]
pub struct MemorySidecarStore {
    documents: Mutex<HashMap<PathBuf, SidecarDocument>>,
    saves: AtomicUsize,
}

impl MemorySidecarStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// The stored document for `folder`, if one was ever saved.
    pub fn stored(&self, folder: &Path) -> Option<SidecarDocument> {
        self.documents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(folder)
            .cloned()
    }
}

#[async_trait::async_trait]
impl SidecarStore for MemorySidecarStore {
    async fn load(&self, folder: &Path) -> Result<SidecarDocument> {
        Ok(self.stored(folder).unwrap_or_default())
    }

    async fn save(&self, folder: &Path, document: &SidecarDocument) -> Result<()> {
        self.documents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(folder.to_path_buf(), document.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
