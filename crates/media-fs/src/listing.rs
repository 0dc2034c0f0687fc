//! Directory listing filtered to folders, images and videos.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use tokio::fs;

/// Image extensions (lowercase, without the dot).
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "jfif", "gif", "webp", "bmp"];

/// Video extensions (lowercase, without the dot).
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mkv", "avi", "mov", "wmv", "flv", "m4v"];

const BYTES_PER_MB: u64 = 1024 * 1024;

#[derive(Debug, Error)]
pub enum ListError {
    #[error("Failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What a listed entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Folder,
    Image,
    Video,
}

/// A folder or media file entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Size in bytes (0 for folders)
    pub size: u64,
    /// RFC 3339 modification time
    pub modified: String,
}

/// Per-kind size ceilings applied while listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    pub image_limit_bytes: u64,
    pub video_limit_bytes: u64,
}

impl ListOptions {
    pub const DEFAULT_IMAGE_LIMIT_MB: u64 = 20;
    pub const DEFAULT_VIDEO_LIMIT_MB: u64 = 10;

    /// Build options from megabyte ceilings.
    pub fn from_megabytes(image_limit_mb: u64, video_limit_mb: u64) -> Self {
        Self {
            image_limit_bytes: image_limit_mb.saturating_mul(BYTES_PER_MB),
            video_limit_bytes: video_limit_mb.saturating_mul(BYTES_PER_MB),
        }
    }

    /// Whether a file of `kind` and `size` passes the ceiling for its kind.
    fn admits(&self, kind: MediaKind, size: u64) -> bool {
        match kind {
            MediaKind::Folder => true,
            MediaKind::Image => size <= self.image_limit_bytes,
            MediaKind::Video => size <= self.video_limit_bytes,
        }
    }
}

impl Default for ListOptions {
    fn default() -> Self {
        Self::from_megabytes(Self::DEFAULT_IMAGE_LIMIT_MB, Self::DEFAULT_VIDEO_LIMIT_MB)
    }
}

fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Classify a file name by extension. Returns `None` for non-media files.
pub fn classify(name: impl AsRef<Path>) -> Option<MediaKind> {
    let ext = lowercase_extension(name.as_ref())?;
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaKind::Image)
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaKind::Video)
    } else {
        None
    }
}

pub fn is_video(path: impl AsRef<Path>) -> bool {
    classify(path) == Some(MediaKind::Video)
}

pub fn is_gif(path: impl AsRef<Path>) -> bool {
    lowercase_extension(path.as_ref()).as_deref() == Some("gif")
}

fn format_modified(modified: Option<SystemTime>) -> String {
    modified
        .map(|t| DateTime::<Utc>::from(t).to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default()
}

/// List folders, images and videos directly inside `path`.
///
/// Files are kept by extension only, so dot-files with a media extension are
/// listed while tag sidecars and their temp files are not. Media files larger than their kind's ceiling are skipped, as are entries
/// whose metadata cannot be read. Results are sorted by name.
pub async fn list_dir(path: &Path, options: &ListOptions) -> Result<Vec<MediaEntry>, ListError> {
    let read_dir_err = |source| ListError::ReadDir {
        path: path.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(path).await.map_err(read_dir_err)?;
    let mut result = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(read_dir_err)? {
        let name = entry.file_name().to_string_lossy().to_string();

        let metadata = match entry.metadata().await {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::debug!("Skipping {}: {}", name, e);
                continue;
            }
        };

        let (kind, size) = if metadata.is_dir() {
            (MediaKind::Folder, 0)
        } else {
            match classify(&name) {
                Some(kind) => (kind, metadata.len()),
                None => continue,
            }
        };

        if !options.admits(kind, size) {
            tracing::debug!("Skipping {} ({} bytes exceeds {:?} limit)", name, size, kind);
            continue;
        }

        result.push(MediaEntry {
            name,
            kind,
            size,
            modified: format_modified(metadata.modified().ok()),
        });
    }

    result.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn write_file(dir: &Path, name: &str, len: usize) {
        fs::write(dir.join(name), vec![0u8; len]).await.unwrap();
    }

    #[test]
    fn test_classify_by_extension() {
        assert_eq!(classify("cat.png"), Some(MediaKind::Image));
        assert_eq!(classify("CAT.JPEG"), Some(MediaKind::Image));
        assert_eq!(classify("scan.jfif"), Some(MediaKind::Image));
        assert_eq!(classify("clip.m4v"), Some(MediaKind::Video));
        assert_eq!(classify("clip.WebM"), Some(MediaKind::Video));
        assert_eq!(classify("notes.txt"), None);
        assert_eq!(classify("Makefile"), None);
    }

    #[test]
    fn test_video_and_gif_helpers() {
        assert!(is_video("/tmp/a.MKV"));
        assert!(!is_video("/tmp/a.gif"));
        assert!(is_gif("/tmp/a.GIF"));
        assert!(!is_gif("/tmp/a.png"));
    }

    #[test]
    fn test_options_from_megabytes() {
        let options = ListOptions::from_megabytes(2, 1);
        assert_eq!(options.image_limit_bytes, 2 * 1024 * 1024);
        assert_eq!(options.video_limit_bytes, 1024 * 1024);
        assert_eq!(ListOptions::default(), ListOptions::from_megabytes(20, 10));
    }

    #[tokio::test]
    async fn test_list_dir_filters_and_sorts() {
        let temp = TempDir::new().unwrap();
        write_file(temp.path(), "b.png", 10).await;
        write_file(temp.path(), "a.mp4", 10).await;
        write_file(temp.path(), "readme.txt", 10).await;
        write_file(temp.path(), ".meme-tags.json", 10).await;
        write_file(temp.path(), ".meme-tags.json.0af3.tmp", 10).await;
        write_file(temp.path(), ".x.png", 10).await;
        fs::create_dir(temp.path().join("sub")).await.unwrap();
        fs::create_dir(temp.path().join(".stash")).await.unwrap();

        let entries = list_dir(temp.path(), &ListOptions::default()).await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec![".stash", ".x.png", "a.mp4", "b.png", "sub"]);

        let sub = entries.iter().find(|e| e.name == "sub").unwrap();
        assert_eq!(sub.kind, MediaKind::Folder);
        assert_eq!(sub.size, 0);

        let image = entries.iter().find(|e| e.name == "b.png").unwrap();
        assert_eq!(image.kind, MediaKind::Image);
        assert_eq!(image.size, 10);
        assert!(image.modified.ends_with('Z'));
    }

    #[tokio::test]
    async fn test_list_dir_applies_size_ceilings() {
        let temp = TempDir::new().unwrap();
        write_file(temp.path(), "small.png", 100).await;
        write_file(temp.path(), "big.png", 101).await;
        write_file(temp.path(), "small.mp4", 50).await;
        write_file(temp.path(), "big.mp4", 51).await;

        let options = ListOptions {
            image_limit_bytes: 100,
            video_limit_bytes: 50,
        };
        let entries = list_dir(temp.path(), &options).await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["small.mp4", "small.png"]);
    }

    #[tokio::test]
    async fn test_list_dir_missing_directory() {
        let temp = TempDir::new().unwrap();
        let result = list_dir(&temp.path().join("nope"), &ListOptions::default()).await;
        assert!(matches!(result, Err(ListError::ReadDir { .. })));
    }

    #[test]
    fn test_entry_serializes_with_type_field() {
        let entry = MediaEntry {
            name: "clip.mp4".to_string(),
            kind: MediaKind::Video,
            size: 3,
            modified: "2024-01-01T00:00:00Z".to_string(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "video");
        assert_eq!(json["name"], "clip.mp4");
    }
}
