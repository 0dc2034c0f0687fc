//! Identity resolution: find the record for a file name, following renames.
//!
//! Hashing is lazy. A name already present in the document is returned
//! without touching the file; only a name miss pays for a digest, which is
//! then matched against existing records to detect a rename.

use std::path::Path;

use crate::digest::ContentDigest;
use crate::document::{SidecarDocument, TagRecord};
use crate::error::{Result, TagError};
use crate::sidecar::SIDECAR_FILE_NAME;

/// How a record was found for the requested name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A record was already stored under the name
    Existing,
    /// A record with the same digest was stored under `from` and has been
    /// re-keyed to the requested name
    Renamed { from: String },
    /// No record matched; an untagged record was inserted
    Created,
}

impl Resolution {
    /// Whether resolving changed the document in a way worth persisting.
    ///
    /// A freshly created record has no tags, so on its own it is not.
    pub fn migrated(&self) -> bool {
        matches!(self, Resolution::Renamed { .. })
    }
}

/// Reject names that do not address a file directly inside the folder.
pub fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name == "." || name == ".." {
        "name refers to a directory"
    } else if name.contains('/') || name.contains('\\') {
        "name must not contain path separators"
    } else if name == SIDECAR_FILE_NAME {
        "name is reserved for the tag sidecar"
    } else {
        return Ok(());
    };

    Err(TagError::InvalidName {
        name: name.to_string(),
        reason,
    })
}

/// Return the record for `name`, migrating a renamed record or creating an
/// untagged one as needed. The document is modified in place.
pub async fn resolve<'d>(
    folder: &Path,
    document: &'d mut SidecarDocument,
    name: &str,
) -> Result<(Resolution, &'d mut TagRecord)> {
    validate_name(name)?;

    let (index, resolution) = match document.records.get_index_of(name) {
        Some(index) => (index, Resolution::Existing),
        None => {
            let path = folder.join(name);
            let digest = ContentDigest::from_file(&path)
                .await
                .map_err(|e| TagError::io(&path, e))?;

            match document.take_by_digest(&digest) {
                Some((from, record)) => {
                    tracing::info!(
                        "Detected rename in {}: {} -> {}",
                        folder.display(),
                        from,
                        name
                    );
                    let (index, _) = document.records.insert_full(name.to_string(), record);
                    (index, Resolution::Renamed { from })
                }
                None => {
                    tracing::debug!("New tag record for {} ({})", name, digest);
                    let (index, _) = document
                        .records
                        .insert_full(name.to_string(), TagRecord::new(digest));
                    (index, Resolution::Created)
                }
            }
        }
    };

    Ok((resolution, &mut document.records[index]))
}
