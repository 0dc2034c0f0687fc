//! Sidecar persistence.
//!
//! A sidecar store owns construction and serialization of
//! [`SidecarDocument`]s. The tag service loads a fresh document per call and
//! saves it back only when the call changed it.

mod file;
mod memory;

pub use file::FileSidecarStore;
pub use memory::MemorySidecarStore;

use std::path::Path;

use crate::document::SidecarDocument;
use crate::error::Result;

/// Name of the hidden per-folder sidecar file.
pub const SIDECAR_FILE_NAME: &str = ".meme-tags.json";

/// Abstract storage backend for per-folder tag documents.
#[async_trait::async_trait]
pub trait SidecarStore: Send + Sync {
    /// Load the document for `folder`.
    ///
    /// A folder without a sidecar yields an empty document. A sidecar that
    /// cannot be parsed is an error; it is never silently replaced.
    async fn load(&self, folder: &Path) -> Result<SidecarDocument>;

    /// Replace the folder's sidecar with `document`.
    async fn save(&self, folder: &Path, document: &SidecarDocument) -> Result<()>;
}
