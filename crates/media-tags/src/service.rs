//! Tag operations over a folder's sidecar.
//!
//! Every operation is one load-resolve-mutate-save cycle run under the
//! folder's lock. Nothing is cached between calls; the sidecar on disk is the
//! only source of truth.
//!
//! Commits are explicit: an operation saves the document only when it
//! changed it. Reads are included. `get_tags` on a renamed file migrates the
//! record to the new name and persists that migration.

use indexmap::IndexMap;
use std::path::Path;

use crate::error::Result;
use crate::locks::FolderLocks;
use crate::resolver::{resolve, validate_name};
use crate::sidecar::{FileSidecarStore, SidecarStore};

/// Tag operations for media files, keyed by folder and file name.
pub struct TagService<S = FileSidecarStore> {
    store: S,
    locks: FolderLocks,
}

impl TagService<FileSidecarStore> {
    /// Service backed by `.meme-tags.json` files inside each folder.
    pub fn with_file_store() -> Self {
        Self::new(FileSidecarStore::new())
    }
}

impl<S: SidecarStore> TagService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            locks: FolderLocks::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Tags of `name` in insertion order; empty if the file was never tagged.
    ///
    /// May write: if the file was renamed since it was tagged, its record is
    /// re-keyed to `name` and the sidecar is saved. An untagged file is hashed
    /// but leaves the sidecar untouched.
    pub async fn get_tags(&self, folder: &Path, name: &str) -> Result<Vec<String>> {
        let _guard = self.locks.lock(folder).await;
        let mut document = self.store.load(folder).await?;

        let (resolution, record) = resolve(folder, &mut document, name).await?;
        let tags = record.tags.clone();

        if resolution.migrated() {
            self.store.save(folder, &document).await?;
        }
        Ok(tags)
    }

    /// Append `tag` to `name`'s tags. Adding a tag that is already present
    /// (exact, case-sensitive match) changes nothing.
    pub async fn add_tag(&self, folder: &Path, name: &str, tag: &str) -> Result<()> {
        let _guard = self.locks.lock(folder).await;
        let mut document = self.store.load(folder).await?;

        let (resolution, record) = resolve(folder, &mut document, name).await?;
        let added = record.add_tag(tag);

        if added || resolution.migrated() {
            self.store.save(folder, &document).await?;
        }
        Ok(())
    }

    /// Remove `tag` from `name`. A record left without tags is deleted,
    /// including one that was already stored empty.
    ///
    /// Only the record stored under `name` is considered; a file without one
    /// is neither hashed nor saved.
    pub async fn remove_tag(&self, folder: &Path, name: &str, tag: &str) -> Result<()> {
        validate_name(name)?;
        let _guard = self.locks.lock(folder).await;
        let mut document = self.store.load(folder).await?;

        let Some(record) = document.records.get_mut(name) else {
            tracing::debug!("No tag record for {}; nothing to remove", name);
            return Ok(());
        };

        let removed = record.remove_tag(tag);
        let untagged = record.is_untagged();
        if untagged {
            document.remove(name);
        }

        if removed || untagged {
            self.store.save(folder, &document).await?;
        }
        Ok(())
    }

    /// Replace `name`'s tags with `tags`, stored verbatim.
    ///
    /// An empty list deletes the record without hashing the file.
    pub async fn set_tags(&self, folder: &Path, name: &str, tags: Vec<String>) -> Result<()> {
        validate_name(name)?;
        let _guard = self.locks.lock(folder).await;
        let mut document = self.store.load(folder).await?;

        if tags.is_empty() {
            if document.remove(name).is_some() {
                self.store.save(folder, &document).await?;
            }
            return Ok(());
        }

        let (_, record) = resolve(folder, &mut document, name).await?;
        record.tags = tags;

        self.store.save(folder, &document).await
    }

    /// Every tagged file of `folder` with its tags. Never writes.
    ///
    /// Files that were never tagged are absent rather than mapped to an
    /// empty list.
    pub async fn list_all(&self, folder: &Path) -> Result<IndexMap<String, Vec<String>>> {
        let _guard = self.locks.lock(folder).await;
        let document = self.store.load(folder).await?;
        Ok(document.to_tag_map())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::ContentDigest;
    use crate::document::{SidecarDocument, TagRecord};
    use crate::error::TagError;
    use crate::sidecar::MemorySidecarStore;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use tokio::fs;

    async fn create_test_service() -> (TempDir, TagService<MemorySidecarStore>) {
        let temp_dir = TempDir::new().unwrap();
        let service = TagService::new(MemorySidecarStore::new());
        (temp_dir, service)
    }

    async fn write_media(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).await.unwrap();
        path
    }

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[tokio::test]
    async fn test_add_tag_is_idempotent() {
        let (temp, service) = create_test_service().await;
        write_media(temp.path(), "x.png", b"x").await;

        service.add_tag(temp.path(), "x.png", "a").await.unwrap();
        service.add_tag(temp.path(), "x.png", "a").await.unwrap();
        service.add_tag(temp.path(), "x.png", "b").await.unwrap();

        let result = service.get_tags(temp.path(), "x.png").await.unwrap();
        assert_eq!(result, tags(&["a", "b"]));
        // The duplicate add did not commit
        assert_eq!(service.store().save_count(), 2);
    }

    #[tokio::test]
    async fn test_get_tags_of_untagged_file_does_not_save() {
        let (temp, service) = create_test_service().await;
        write_media(temp.path(), "new.png", b"new").await;

        let result = service.get_tags(temp.path(), "new.png").await.unwrap();

        assert!(result.is_empty());
        assert_eq!(service.store().save_count(), 0);
        assert!(service.list_all(temp.path()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_tags_commits_rename_migration() {
        let (temp, service) = create_test_service().await;
        write_media(temp.path(), "cat.png", b"meow").await;
        service
            .set_tags(temp.path(), "cat.png", tags(&["funny", "cats"]))
            .await
            .unwrap();
        fs::rename(temp.path().join("cat.png"), temp.path().join("kitten.png"))
            .await
            .unwrap();
        let saves_before = service.store().save_count();

        let result = service.get_tags(temp.path(), "kitten.png").await.unwrap();

        assert_eq!(result, tags(&["funny", "cats"]));
        assert_eq!(service.store().save_count(), saves_before + 1);
        let stored = service.store().stored(temp.path()).unwrap();
        assert!(stored.contains("kitten.png"));
        assert!(!stored.contains("cat.png"));
    }

    #[tokio::test]
    async fn test_remove_tag_without_record_is_noop() {
        let (temp, service) = create_test_service().await;

        // No file on disk either: nothing is hashed
        service
            .remove_tag(temp.path(), "missing.png", "a")
            .await
            .unwrap();

        assert_eq!(service.store().save_count(), 0);
    }

    #[tokio::test]
    async fn test_remove_last_tag_deletes_record() {
        let (temp, service) = create_test_service().await;
        write_media(temp.path(), "x.png", b"x").await;

        service.add_tag(temp.path(), "x.png", "a").await.unwrap();
        service.remove_tag(temp.path(), "x.png", "a").await.unwrap();

        let all = service.list_all(temp.path()).await.unwrap();
        assert!(!all.contains_key("x.png"));
    }

    #[tokio::test]
    async fn test_remove_one_of_several_tags() {
        let (temp, service) = create_test_service().await;
        write_media(temp.path(), "x.png", b"x").await;
        service
            .set_tags(temp.path(), "x.png", tags(&["a", "b", "c"]))
            .await
            .unwrap();

        service.remove_tag(temp.path(), "x.png", "b").await.unwrap();

        let result = service.get_tags(temp.path(), "x.png").await.unwrap();
        assert_eq!(result, tags(&["a", "c"]));
    }

    #[tokio::test]
    async fn test_remove_absent_tag_does_not_save() {
        let (temp, service) = create_test_service().await;
        write_media(temp.path(), "x.png", b"x").await;
        service.add_tag(temp.path(), "x.png", "a").await.unwrap();

        service.remove_tag(temp.path(), "x.png", "zzz").await.unwrap();

        assert_eq!(service.store().save_count(), 1);
    }

    #[tokio::test]
    async fn test_remove_tag_prunes_stored_empty_record() {
        let (temp, service) = create_test_service().await;
        let mut document = SidecarDocument::new();
        document.insert("x.png", TagRecord::new(ContentDigest::from_bytes(b"x")));
        service.store().save(temp.path(), &document).await.unwrap();

        service.remove_tag(temp.path(), "x.png", "a").await.unwrap();

        assert_eq!(service.store().save_count(), 2);
        let stored = service.store().stored(temp.path()).unwrap();
        assert!(!stored.contains("x.png"));
    }

    #[tokio::test]
    async fn test_set_tags_empty_prunes_record() {
        let (temp, service) = create_test_service().await;
        write_media(temp.path(), "x.png", b"x").await;
        service
            .set_tags(temp.path(), "x.png", tags(&["a", "b"]))
            .await
            .unwrap();

        service.set_tags(temp.path(), "x.png", Vec::new()).await.unwrap();

        assert!(service.list_all(temp.path()).await.unwrap().is_empty());
        assert!(service.get_tags(temp.path(), "x.png").await.unwrap().is_empty());
        assert!(!service.store().stored(temp.path()).unwrap().contains("x.png"));
    }

    #[tokio::test]
    async fn test_set_tags_empty_without_record_skips_hashing() {
        let (temp, service) = create_test_service().await;

        // The file does not exist, so resolving would fail
        service
            .set_tags(temp.path(), "missing.png", Vec::new())
            .await
            .unwrap();

        assert_eq!(service.store().save_count(), 0);
    }

    #[tokio::test]
    async fn test_set_tags_stores_verbatim() {
        let (temp, service) = create_test_service().await;
        write_media(temp.path(), "x.png", b"x").await;

        service
            .set_tags(temp.path(), "x.png", tags(&["b", "a", "b", ""]))
            .await
            .unwrap();

        let result = service.get_tags(temp.path(), "x.png").await.unwrap();
        assert_eq!(result, tags(&["b", "a", "b", ""]));
    }

    #[tokio::test]
    async fn test_set_tags_on_renamed_file_migrates() {
        let (temp, service) = create_test_service().await;
        write_media(temp.path(), "new.png", b"bytes").await;

        let mut doc = SidecarDocument::new();
        doc.insert(
            "old.png",
            TagRecord {
                digest: ContentDigest::from_bytes(b"bytes"),
                tags: tags(&["keep"]),
            },
        );
        service.store().save(temp.path(), &doc).await.unwrap();

        service
            .set_tags(temp.path(), "new.png", tags(&["replaced"]))
            .await
            .unwrap();

        let all = service.list_all(temp.path()).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all["new.png"], tags(&["replaced"]));
    }

    #[tokio::test]
    async fn test_list_all_never_saves() {
        let (temp, service) = create_test_service().await;

        let all = service.list_all(temp.path()).await.unwrap();

        assert!(all.is_empty());
        assert_eq!(service.store().save_count(), 0);
    }

    #[tokio::test]
    async fn test_add_tag_to_missing_file_fails() {
        let (temp, service) = create_test_service().await;

        let err = service
            .add_tag(temp.path(), "vanished.png", "a")
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(service.store().save_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_names_are_rejected() {
        let (temp, service) = create_test_service().await;

        for op in [
            service.add_tag(temp.path(), "../escape.png", "a").await,
            service.remove_tag(temp.path(), "", "a").await,
            service.set_tags(temp.path(), ".meme-tags.json", tags(&["a"])).await,
        ] {
            assert!(matches!(op, Err(TagError::InvalidName { .. })));
        }
        assert!(matches!(
            service.get_tags(temp.path(), "sub/x.png").await,
            Err(TagError::InvalidName { .. })
        ));
    }

    #[tokio::test]
    async fn test_untouched_files_never_appear() {
        let (temp, service) = create_test_service().await;
        write_media(temp.path(), "tagged.png", b"t").await;
        write_media(temp.path(), "ignored.png", b"i").await;

        service.add_tag(temp.path(), "tagged.png", "a").await.unwrap();

        let stored = service.store().stored(temp.path()).unwrap();
        assert_eq!(stored.len(), 1);
        assert!(!stored.contains("ignored.png"));
    }
}
