//! Atomic file replacement.

use rand::Rng;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Generate a random hex string for temp file names.
fn random_hex() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    hex::encode(bytes)
}

/// Temp file next to `path`, so the final rename stays on one filesystem.
fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{}.{}.tmp", file_name, random_hex()))
}

/// Atomic write using temp file + rename.
///
/// Readers see either the previous content or the new content, never a
/// partially written file. The temp file is removed if any step fails.
pub async fn atomic_write(path: &Path, content: &[u8]) -> Result<(), std::io::Error> {
    let temp_path = temp_path_for(path);

    if let Err(e) = fs::write(&temp_path, content).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(e);
    }

    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(e);
    }

    tracing::trace!("atomically replaced {}", path.display());
    Ok(())
}
