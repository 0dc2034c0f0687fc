//! Favorites tools - GetFavorites, AddFavorite, RemoveFavorite, GetConfigPath.

use chrono::{SecondsFormat, Utc};
use rmcp::model::{CallToolResult, Content, ErrorData};

use super::common::json_result;
use crate::favorites::FavoritesStore;

fn favorites_error(e: crate::favorites::FavoritesError) -> ErrorData {
    tracing::warn!("Favorites operation failed: {}", e);
    ErrorData::internal_error(format!("Favorites operation failed: {}", e), None)
}

/// Execute the GetFavorites tool.
pub async fn list(store: &FavoritesStore) -> Result<CallToolResult, ErrorData> {
    let favorites = store.list().await.map_err(favorites_error)?;
    json_result(&favorites)
}

/// Execute the AddFavorite tool.
///
/// `added_at` defaults to the current time (RFC 3339, UTC).
pub async fn add(
    store: &FavoritesStore,
    path: &str,
    name: &str,
    added_at: Option<&str>,
) -> Result<CallToolResult, ErrorData> {
    let added_at = added_at
        .map(str::to_string)
        .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));

    store
        .add(path, name, &added_at)
        .await
        .map_err(favorites_error)?;

    Ok(CallToolResult::success(vec![Content::text(format!(
        "Added favorite: {} ({})",
        name, path
    ))]))
}

/// Execute the RemoveFavorite tool.
pub async fn remove(store: &FavoritesStore, path: &str) -> Result<CallToolResult, ErrorData> {
    store.remove(path).await.map_err(favorites_error)?;
    Ok(CallToolResult::success(vec![Content::text(format!(
        "Removed favorite: {}",
        path
    ))]))
}

/// Execute the GetConfigPath tool.
pub fn config_path(store: &FavoritesStore) -> Result<CallToolResult, ErrorData> {
    Ok(CallToolResult::success(vec![Content::text(
        store.path().to_string_lossy().to_string(),
    )]))
}
