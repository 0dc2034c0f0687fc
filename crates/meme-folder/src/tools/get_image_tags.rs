//! GetImageTags tool - tags of one media file, following renames.

use media_tags::{SidecarStore, TagService};
use rmcp::model::{CallToolResult, ErrorData};
use std::path::Path;

use super::common::{json_result, tag_error};

/// Execute the GetImageTags tool.
///
/// Returns the tags as a JSON array. If the file was renamed since it was
/// tagged, its record is moved to the new name and the sidecar is saved.
pub async fn execute<S: SidecarStore>(
    tags: &TagService<S>,
    folder: &str,
    name: &str,
) -> Result<CallToolResult, ErrorData> {
    let result = tags
        .get_tags(Path::new(folder), name)
        .await
        .map_err(|e| tag_error(folder, name, e))?;

    json_result(&result)
}
