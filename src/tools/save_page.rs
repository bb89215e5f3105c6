use super::common::{failed_tool_result, ok_tool_result, required_str, workspace_path_property};
use super::file_write::write_text;
use super::traits::{ExecutionContext, Tool};
use super::types::ToolResult;
use serde_json::json;
use std::future::Future;
use std::pin::Pin;

/// Save a full webpage (HTML, CSS, or JS) into the workspace.
///
/// Same write semantics as `write_file`; kept as its own tool so the model can
/// express the save-a-page intent directly.
pub struct SavePageTool;

impl SavePageTool {
    pub const fn new() -> Self {
        Self
    }
}

impl Tool for SavePageTool {
    fn name(&self) -> &str {
        "save_page"
    }

    fn description(&self) -> &str {
        "Save a full webpage (HTML, CSS, or JS) into the workspace"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "path": workspace_path_property(),
                "content": {
                    "type": "string",
                    "description": "Full page content to save"
                }
            },
            "required": ["path", "content"]
        })
    }

    fn execute<'a>(
        &'a self,
        args: serde_json::Value,
        ctx: &'a ExecutionContext,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolResult>> + Send + 'a>> {
        Box::pin(async move {
            let path = required_str(&args, "path")?;
            let content = required_str(&args, "content")?;

            match write_text(ctx, path, content, false).await {
                Ok(relative) => Ok(ok_tool_result(format!(
                    "Saved webpage to {relative} ({} bytes)",
                    content.len()
                ))),
                Err(message) => Ok(failed_tool_result(message)),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn save_page_writes_html() {
        let tmp = TempDir::new().expect("tempdir");
        let tool = SavePageTool::new();
        let ctx = ExecutionContext::test_default(tmp.path());

        let result = tool
            .execute(
                json!({"path": "index.html", "content": "<html></html>"}),
                &ctx,
            )
            .await
            .unwrap();
        assert!(result.success);
        assert!(result.output.contains("Saved webpage to index.html"));

        let content = tokio::fs::read_to_string(tmp.path().join("index.html"))
            .await
            .unwrap();
        assert_eq!(content, "<html></html>");
    }

    #[tokio::test]
    async fn save_page_rejects_traversal() {
        let tmp = TempDir::new().expect("tempdir");
        let tool = SavePageTool::new();
        let ctx = ExecutionContext::test_default(tmp.path());

        let result = tool
            .execute(json!({"path": "../index.html", "content": "x"}), &ctx)
            .await
            .unwrap();
        assert!(!result.success);
    }
}
