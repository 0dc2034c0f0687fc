//! AddImageTag tool - append a tag to a media file.

use media_tags::{SidecarStore, TagService};
use rmcp::model::{CallToolResult, Content, ErrorData};
use std::path::Path;

use super::common::tag_error;

/// Execute the AddImageTag tool.
///
/// Adding a tag the file already has is a no-op.
pub async fn execute<S: SidecarStore>(
    tags: &TagService<S>,
    folder: &str,
    name: &str,
    tag: &str,
) -> Result<CallToolResult, ErrorData> {
    tags.add_tag(Path::new(folder), name, tag)
        .await
        .map_err(|e| tag_error(folder, name, e))?;

    Ok(CallToolResult::success(vec![Content::text(format!(
        "Tagged {} with '{}'",
        name, tag
    ))]))
}
