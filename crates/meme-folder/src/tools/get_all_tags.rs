//! GetAllTags tool - every tagged file of a folder.

use media_tags::{SidecarStore, TagService};
use rmcp::model::{CallToolResult, ErrorData};
use std::path::Path;

use super::common::{json_result, tag_error};

/// Execute the GetAllTags tool.
///
/// Returns a JSON object mapping file name to tags. Files that were never
/// tagged are absent; combine with ListDir for full coverage.
pub async fn execute<S: SidecarStore>(
    tags: &TagService<S>,
    folder: &str,
) -> Result<CallToolResult, ErrorData> {
    let all = tags
        .list_all(Path::new(folder))
        .await
        .map_err(|e| tag_error(folder, "*", e))?;

    json_result(&all)
}
