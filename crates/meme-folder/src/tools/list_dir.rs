//! ListDir and GetHomeDirectory tools.

use media_fs::{list_dir, ListError, ListOptions};
use rmcp::model::{CallToolResult, Content, ErrorData};
use std::path::Path;

use super::common::json_result;

/// Execute the ListDir tool.
///
/// Returns folders, images and videos in `path` as a JSON array, with media
/// over the configured size ceilings left out.
pub async fn execute(path: &str, options: &ListOptions) -> Result<CallToolResult, ErrorData> {
    let entries = list_dir(Path::new(path), options).await.map_err(|e| match e {
        ListError::ReadDir { ref source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
            ErrorData::invalid_params(format!("Folder not found: {}", path), None)
        }
        _ => ErrorData::internal_error(e.to_string(), None),
    })?;

    json_result(&entries)
}

/// Execute the GetHomeDirectory tool.
pub fn home_directory() -> Result<CallToolResult, ErrorData> {
    let home = media_fs::home_directory()
        .ok_or_else(|| ErrorData::internal_error("Could not determine home directory", None))?;
    Ok(CallToolResult::success(vec![Content::text(
        home.to_string_lossy().to_string(),
    )]))
}
