//! RemoveImageTag tool - drop a tag from a media file.

use media_tags::{SidecarStore, TagService};
use rmcp::model::{CallToolResult, Content, ErrorData};
use std::path::Path;

use super::common::tag_error;

/// Execute the RemoveImageTag tool.
///
/// Removing the last tag deletes the file's record. A file without tags is
/// left alone.
pub async fn execute<S: SidecarStore>(
    tags: &TagService<S>,
    folder: &str,
    name: &str,
    tag: &str,
) -> Result<CallToolResult, ErrorData> {
    tags.remove_tag(Path::new(folder), name, tag)
        .await
        .map_err(|e| tag_error(folder, name, e))?;

    Ok(CallToolResult::success(vec![Content::text(format!(
        "Removed '{}' from {}",
        tag, name
    ))]))
}
