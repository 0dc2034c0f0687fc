//! Content-addressed tags for media folders.
//!
//! Each browsed folder carries a hidden `.meme-tags.json` sidecar mapping
//! file names to `{ hash, tags }`. Records are identified by the MD5 of the
//! file's bytes, so tags follow a file across renames: when a name is
//! unknown, the file is hashed and a record with the same digest under an
//! old name is re-keyed to the new one.
//!
//! [`TagService`] is the entry point. It serializes operations per folder and
//! commits the sidecar only when an operation changed it.

mod digest;
mod document;
mod error;
mod locks;
mod resolver;
mod service;
mod sidecar;

pub use digest::ContentDigest;
pub use document::{SidecarDocument, TagRecord};
pub use error::{Result, TagError};
pub use locks::FolderLocks;
pub use resolver::{resolve, validate_name, Resolution};
pub use service::TagService;
pub use sidecar::{FileSidecarStore, MemorySidecarStore, SidecarStore, SIDECAR_FILE_NAME};
