//! Shared utilities for tools.

use media_tags::TagError;
use rmcp::model::{CallToolResult, Content, ErrorData};
use serde::Serialize;

/// Serialize `value` as the tool's single JSON text result.
pub fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, ErrorData> {
    let json = serde_json::to_string(value).map_err(|e| {
        ErrorData::internal_error(format!("Failed to serialize response: {}", e), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Map a tag engine failure to a tool error.
///
/// Caller mistakes (bad names, files that no longer exist) become
/// `invalid_params`; everything else is an internal error.
pub fn tag_error(folder: &str, name: &str, e: TagError) -> ErrorData {
    tracing::warn!("Tag operation on {} in {} failed: {}", name, folder, e);
    match e {
        TagError::InvalidName { .. } => ErrorData::invalid_params(e.to_string(), None),
        _ if e.is_not_found() => ErrorData::invalid_params(
            format!(
                "Media file not found: {}. It may have been moved or deleted.\n\
                 Folder: {}",
                name, folder
            ),
            None,
        ),
        TagError::Parse { .. } => ErrorData::internal_error(
            format!(
                "{}. The sidecar was left untouched; fix or remove it to continue.",
                e
            ),
            None,
        ),
        _ => ErrorData::internal_error(format!("Tag operation failed: {}", e), None),
    }
}

#[cfg(test)]
pub fn result_text(result: &CallToolResult) -> String {
    result.content[0]
        .raw
        .as_text()
        .expect("Expected text")
        .text
        .clone()
}
