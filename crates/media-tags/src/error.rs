//! Error types for tag operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading, resolving or persisting tags.
#[derive(Debug, Error)]
pub enum TagError {
    /// A media file or sidecar could not be read, written or hashed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The sidecar exists but is not a well-formed tag document
    #[error("Malformed tag sidecar {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document could not be encoded
    #[error("Failed to serialize tag sidecar: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The name does not address a file directly inside the folder
    #[error("Invalid media file name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },
}

impl TagError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TagError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the underlying cause is a missing file, e.g. a media file
    /// deleted between listing and hashing.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TagError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

pub type Result<T> = std::result::Result<T, TagError>;
