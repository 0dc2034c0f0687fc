//! In-memory form of a folder's tag sidecar.
//!
//! On disk the document looks like:
//!
//! ```json
//! { "images": { "cat.png": { "hash": "<md5 hex>", "tags": ["funny", "cats"] } } }
//! ```
//!
//! Records keep insertion order so rename detection scans them
//! deterministically.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::digest::ContentDigest;

/// Read `null` (and, with `#[serde(default)]`, a missing field) as the default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Tag state of one currently-named media file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    /// Digest of the file's bytes when it was first tagged. Empty when the
    /// sidecar omitted it; such a record never matches a rename.
    #[serde(rename = "hash", default, deserialize_with = "null_as_default")]
    pub digest: ContentDigest,
    /// Labels in insertion order
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

impl TagRecord {
    /// A record with no tags yet.
    pub fn new(digest: ContentDigest) -> Self {
        Self {
            digest,
            tags: Vec::new(),
        }
    }

    /// Append `tag` unless an identical (case-sensitive) tag is present.
    ///
    /// Returns whether the tag was appended.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        if self.tags.iter().any(|existing| existing == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Remove every exact match of `tag`. Returns whether anything was removed.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|existing| existing != tag);
        self.tags.len() != before
    }

    pub fn is_untagged(&self) -> bool {
        self.tags.is_empty()
    }
}

/// All tag records of one folder, keyed by current file name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidecarDocument {
    #[serde(rename = "images", default, deserialize_with = "null_as_default")]
    pub(crate) records: IndexMap<String, TagRecord>,
}

impl SidecarDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&TagRecord> {
        self.records.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Insert or replace the record for `name`.
    ///
    /// A new name goes to the end of the scan order; replacing keeps the
    /// existing position.
    pub fn insert(&mut self, name: impl Into<String>, record: TagRecord) -> Option<TagRecord> {
        self.records.insert(name.into(), record)
    }

    /// Remove the record for `name`, keeping the order of the others.
    pub fn remove(&mut self, name: &str) -> Option<TagRecord> {
        self.records.shift_remove(name)
    }

    /// Remove and return the first record (in insertion order) whose digest
    /// matches, together with the name it was stored under.
    pub fn take_by_digest(&mut self, digest: &ContentDigest) -> Option<(String, TagRecord)> {
        let index = self
            .records
            .values()
            .position(|record| &record.digest == digest)?;
        self.records.shift_remove_index(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TagRecord)> {
        self.records.iter()
    }

    /// Project every record to its tag list.
    pub fn to_tag_map(&self) -> IndexMap<String, Vec<String>> {
        self.records
            .iter()
            .map(|(name, record)| (name.clone(), record.tags.clone()))
            .collect()
    }
}
