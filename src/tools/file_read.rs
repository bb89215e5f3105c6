use super::common::{failed_tool_result, ok_tool_result, required_str, workspace_path_property};
use super::traits::{ExecutionContext, Tool};
use super::types::ToolResult;
use crate::error::ToolError;
use serde_json::json;
use std::future::Future;
use std::pin::Pin;

/// Read a UTF-8 text file from the workspace.
pub struct FileReadTool;

impl FileReadTool {
    pub const fn new() -> Self {
        Self
    }
}

impl Tool for FileReadTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read a UTF-8 text file from the workspace"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "path": workspace_path_property()
            },
            "required": ["path"]
        })
    }

    fn execute<'a>(
        &'a self,
        args: serde_json::Value,
        ctx: &'a ExecutionContext,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolResult>> + Send + 'a>> {
        Box::pin(async move {
            let path = required_str(&args, "path")?;

            let resolved = match ctx.resolver.resolve(path) {
                Ok(p) => p,
                Err(error) => return Ok(failed_tool_result(error.to_string())),
            };

            match tokio::fs::metadata(&resolved).await {
                Ok(meta) if meta.is_file() => {}
                _ => {
                    let error = ToolError::NotFound {
                        path: path.to_string(),
                    };
                    return Ok(failed_tool_result(error.to_string()));
                }
            }

            match tokio::fs::read_to_string(&resolved).await {
                Ok(content) => Ok(ok_tool_result(content)),
                Err(e) => Ok(failed_tool_result(format!("Failed to read file: {e}"))),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_file_schema_requires_path() {
        let tool = FileReadTool::new();
        let schema = tool.parameters_schema();
        assert!(schema["properties"]["path"].is_object());
        assert!(
            schema["required"]
                .as_array()
                .unwrap()
                .contains(&json!("path"))
        );
    }

    #[tokio::test]
    async fn read_file_returns_contents() {
        let tmp = TempDir::new().expect("tempdir");
        tokio::fs::write(tmp.path().join("hello.txt"), "hi there")
            .await
            .unwrap();

        let tool = FileReadTool::new();
        let ctx = ExecutionContext::test_default(tmp.path());
        let result = tool
            .execute(json!({"path": "hello.txt"}), &ctx)
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.output, "hi there");
    }

    #[tokio::test]
    async fn read_file_missing_file_is_not_found() {
        let tmp = TempDir::new().expect("tempdir");
        let tool = FileReadTool::new();
        let ctx = ExecutionContext::test_default(tmp.path());

        let result = tool
            .execute(json!({"path": "absent.txt"}), &ctx)
            .await
            .unwrap();
        assert!(!result.success);
        assert!(result.error.as_ref().unwrap().contains("file not found"));
    }

    #[tokio::test]
    async fn read_file_directory_is_not_found() {
        let tmp = TempDir::new().expect("tempdir");
        tokio::fs::create_dir(tmp.path().join("dir")).await.unwrap();

        let tool = FileReadTool::new();
        let ctx = ExecutionContext::test_default(tmp.path());
        let result = tool.execute(json!({"path": "dir"}), &ctx).await.unwrap();
        assert!(!result.success);
    }

    #[tokio::test]
    async fn read_file_rejects_traversal() {
        let tmp = TempDir::new().expect("tempdir");
        let tool = FileReadTool::new();
        let ctx = ExecutionContext::test_default(tmp.path());

        let result = tool
            .execute(json!({"path": "../../etc/passwd"}), &ctx)
            .await
            .unwrap();
        assert!(!result.success);
        assert!(result.error.as_ref().unwrap().contains("escapes workspace"));
    }

    #[tokio::test]
    async fn read_file_missing_param_is_an_error() {
        let tmp = TempDir::new().expect("tempdir");
        let tool = FileReadTool::new();
        let ctx = ExecutionContext::test_default(tmp.path());

        let result = tool.execute(json!({}), &ctx).await;
        assert!(result.is_err());
    }
}
