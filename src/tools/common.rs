use super::types::ToolResult;
use serde_json::json;

pub(crate) fn workspace_path_property() -> serde_json::Value {
    json!({
        "type": "string",
        "description": "Relative path within the workspace"
    })
}

pub(crate) fn ok_tool_result(message: impl Into<String>) -> ToolResult {
    ToolResult {
        success: true,
        output: message.into(),
        error: None,
        attachments: Vec::new(),
    }
}

pub(crate) fn failed_tool_result(message: impl Into<String>) -> ToolResult {
    ToolResult {
        success: false,
        output: String::new(),
        error: Some(message.into()),
        attachments: Vec::new(),
    }
}

/// Extract a required string argument or fail with a uniform message.
pub(crate) fn required_str<'a>(
    args: &'a serde_json::Value,
    key: &str,
) -> anyhow::Result<&'a str> {
    args.get(key)
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| anyhow::anyhow!("Missing '{key}' parameter"))
}

/// Path of `target` relative to the workspace root, for user-facing messages.
pub(crate) fn display_relative(root: &std::path::Path, target: &std::path::Path) -> String {
    target
        .strip_prefix(root)
        .unwrap_or(target)
        .display()
        .to_string()
}
