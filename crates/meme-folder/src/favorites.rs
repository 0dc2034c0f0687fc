//! Favorite folders, persisted as JSON in the config directory.
//!
//! Unlike tag sidecars, this file heals itself: an empty or corrupted file is
//! replaced with an empty favorites list (and a warning is logged) instead
//! of failing every call.

use media_fs::atomic_write;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

/// A favorited folder. Missing fields read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Favorite {
    pub path: String,
    pub name: String,
    #[serde(rename = "addedAt")]
    pub added_at: String,
}

/// On-disk shape of the config file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct FavoritesFile {
    #[serde(default)]
    favorites: Option<Vec<Favorite>>,
}

#[derive(Debug, thiserror::Error)]
pub enum FavoritesError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize favorites: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Favorites stored in a single JSON file.
pub struct FavoritesStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FavoritesStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All favorites in the order they were added.
    pub async fn list(&self) -> Result<Vec<Favorite>, FavoritesError> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    /// Add a favorite. A path that is already a favorite is left as is.
    pub async fn add(&self, path: &str, name: &str, added_at: &str) -> Result<(), FavoritesError> {
        let _guard = self.lock.lock().await;
        let mut favorites = self.load().await?;

        if favorites.iter().any(|fav| fav.path == path) {
            return Ok(());
        }

        favorites.push(Favorite {
            path: path.to_string(),
            name: name.to_string(),
            added_at: added_at.to_string(),
        });
        self.save(favorites).await
    }

    /// Remove the favorite for `path`, if any.
    pub async fn remove(&self, path: &str) -> Result<(), FavoritesError> {
        let _guard = self.lock.lock().await;
        let mut favorites = self.load().await?;
        favorites.retain(|fav| fav.path != path);
        self.save(favorites).await
    }

    async fn load(&self) -> Result<Vec<Favorite>, FavoritesError> {
        let content = match fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        if content.is_empty() {
            tracing::warn!("{} is empty; resetting favorites", self.path.display());
            self.reset().await;
            return Ok(Vec::new());
        }

        match serde_json::from_slice::<FavoritesFile>(&content) {
            Ok(file) => Ok(file.favorites.unwrap_or_default()),
            Err(e) => {
                tracing::warn!(
                    "{} is corrupted ({}); resetting favorites",
                    self.path.display(),
                    e
                );
                self.reset().await;
                Ok(Vec::new())
            }
        }
    }

    /// Overwrite the file with an empty list. Failure is logged, not returned.
    async fn reset(&self) {
        if let Err(e) = self.save(Vec::new()).await {
            tracing::warn!("Failed to reset {}: {}", self.path.display(), e);
        }
    }

    async fn save(&self, favorites: Vec<Favorite>) -> Result<(), FavoritesError> {
        let file = FavoritesFile {
            favorites: Some(favorites),
        };
        let content = serde_json::to_vec_pretty(&file).map_err(FavoritesError::Serialize)?;
        atomic_write(&self.path, &content)
            .await
            .map_err(|e| self.io_error(e))
    }

    fn io_error(&self, source: std::io::Error) -> FavoritesError {
        FavoritesError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
