//! Per-folder serialization of sidecar read-modify-write cycles.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::OwnedMutexGuard;

/// One async mutex per folder.
///
/// Two operations on the same folder run one after the other; operations on
/// different folders do not contend. Entries nobody holds are dropped
/// whenever a lock is taken, so the map stays proportional to the folders
/// currently in use.
#[derive(Debug, Default)]
pub struct FolderLocks {
    locks: Mutex<HashMap<PathBuf, Arc<tokio::sync::Mutex<()>>>>,
}

impl FolderLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key under which `folder` is locked. Different spellings of the same
    /// directory share a key when the path can be canonicalized.
    async fn key_for(folder: &Path) -> PathBuf {
        tokio::fs::canonicalize(folder)
            .await
            .unwrap_or_else(|_| folder.to_path_buf())
    }

    /// Wait for exclusive access to `folder`.
    pub async fn lock(&self, folder: &Path) -> OwnedMutexGuard<()> {
        let key = Self::key_for(folder).await;

        let mutex = {
            let mut locks = self
                .locks
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            locks.retain(|_, mutex| Arc::strong_count(mutex) > 1);
            locks.entry(key).or_default().clone()
        };

        mutex.lock_owned().await
    }

    /// Number of folders with a live lock entry.
    pub fn tracked(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}
