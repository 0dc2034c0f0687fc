//! Filesystem utilities for media folders.
//!
//! Lists the folders, images and videos of a directory (filtered by extension
//! and per-kind size ceilings), classifies file names by extension, and
//! provides the atomic temp-file-then-rename write shared by every JSON store
//! in the workspace. Nothing here reads ambient configuration; callers pass
//! [`ListOptions`] explicitly.

mod atomic;
mod listing;

pub use atomic::atomic_write;
pub use listing::{
    classify, is_gif, is_video, list_dir, ListError, ListOptions, MediaEntry, MediaKind,
    IMAGE_EXTENSIONS, VIDEO_EXTENSIONS,
};

use std::path::PathBuf;

/// The current user's home directory, if the platform reports one.
pub fn home_directory() -> Option<PathBuf> {
    dirs::home_dir()
}
