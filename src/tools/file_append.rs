use super::common::{failed_tool_result, ok_tool_result, required_str, workspace_path_property};
use super::file_write::write_text;
use super::traits::{ExecutionContext, Tool};
use super::types::ToolResult;
use serde_json::json;
use std::future::Future;
use std::pin::Pin;

/// Append text to a file, creating it (and parents) if missing.
pub struct FileAppendTool;

impl FileAppendTool {
    pub const fn new() -> Self {
        Self
    }
}

impl Tool for FileAppendTool {
    fn name(&self) -> &str {
        "append_file"
    }

    fn description(&self) -> &str {
        "Append text to a file in the workspace; creates it if missing"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "path": workspace_path_property(),
                "content": {
                    "type": "string",
                    "description": "Content to append to the file"
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

            match write_text(ctx, path, content, true).await {
                Ok(relative) => Ok(ok_tool_result(format!(
                    "Appended to {relative} ({} bytes)",
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
    async fn append_creates_missing_file() {
        let tmp = TempDir::new().expect("tempdir");
        let tool = FileAppendTool::new();
        let ctx = ExecutionContext::test_default(tmp.path());

        let result = tool
            .execute(json!({"path": "log.txt", "content": "first"}), &ctx)
            .await
            .unwrap();
        assert!(result.success);

        let content = tokio::fs::read_to_string(tmp.path().join("log.txt"))
            .await
            .unwrap();
        assert_eq!(content, "first");
    }

    #[tokio::test]
    async fn append_twice_concatenates_in_call_order() {
        let tmp = TempDir::new().expect("tempdir");
        let tool = FileAppendTool::new();
        let ctx = ExecutionContext::test_default(tmp.path());

        tool.execute(json!({"path": "log.txt", "content": "one\n"}), &ctx)
            .await
            .unwrap();
        tool.execute(json!({"path": "log.txt", "content": "two\n"}), &ctx)
            .await
            .unwrap();

        let content = tokio::fs::read_to_string(tmp.path().join("log.txt"))
            .await
            .unwrap();
        assert_eq!(content, "one\ntwo\n");
    }

    #[tokio::test]
    async fn append_rejects_traversal() {
        let tmp = TempDir::new().expect("tempdir");
        let tool = FileAppendTool::new();
        let ctx = ExecutionContext::test_default(tmp.path());

        let result = tool
            .execute(json!({"path": "../escape.txt", "content": "x"}), &ctx)
            .await
            .unwrap();
        assert!(!result.success);
        assert!(result.error.as_ref().unwrap().contains("escapes workspace"));
    }
}
