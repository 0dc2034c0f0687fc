//! SetImageTags tool - replace all tags of a media file.

use media_tags::{SidecarStore, TagService};
use rmcp::model::{CallToolResult, Content, ErrorData};
use std::path::Path;

use super::common::tag_error;

/// Execute the SetImageTags tool.
///
/// Tags are stored exactly as given. An empty list clears the file's tags.
pub async fn execute<S: SidecarStore>(
    tags: &TagService<S>,
    folder: &str,
    name: &str,
    new_tags: Vec<String>,
) -> Result<CallToolResult, ErrorData> {
    let count = new_tags.len();

    tags.set_tags(Path::new(folder), name, new_tags)
        .await
        .map_err(|e| tag_error(folder, name, e))?;

    let text = if count == 0 {
        format!("Cleared all tags from {}", name)
    } else {
        format!("Set {} tag(s) on {}", count, name)
    };
    Ok(CallToolResult::success(vec![Content::text(text)]))
}
