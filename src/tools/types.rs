use serde::{Deserialize, Serialize};

/// Result of a tool execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub output: String,
    pub error: Option<String>,
    #[serde(default)]
    pub attachments: Vec<OutputAttachment>,
}

/// A file produced by a tool, referenced by workspace path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputAttachment {
    pub mime_type: String,
    pub filename: Option<String>,
    pub path: String,
}

impl OutputAttachment {
    pub fn from_path(
        mime_type: impl Into<String>,
        path: impl Into<String>,
        filename: Option<String>,
    ) -> Self {
        Self {
            mime_type: mime_type.into(),
            filename,
            path: path.into(),
        }
    }
}

/// Description of a tool for the MCP client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}
