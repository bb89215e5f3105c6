use super::common::{
    display_relative, failed_tool_result, ok_tool_result, required_str, workspace_path_property,
};
use super::traits::{ExecutionContext, Tool};
use super::types::ToolResult;
use serde_json::json;
use std::future::Future;
use std::pin::Pin;

/// Create or overwrite a text file, creating parent directories as needed.
pub struct FileWriteTool;

impl FileWriteTool {
    pub const fn new() -> Self {
        Self
    }
}

impl Tool for FileWriteTool {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "Create or overwrite a UTF-8 text file in the workspace; creates parent directories"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "path": workspace_path_property(),
                "content": {
                    "type": "string",
                    "description": "Content to write to the file"
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
                    "Wrote {relative} ({} bytes)",
                    content.len()
                ))),
                Err(message) => Ok(failed_tool_result(message)),
            }
        })
    }
}

/// Shared write/append body for the write-flavored tools.
///
/// Resolves the path first; the resolver re-checks the symlink-resolved parent
/// so a link inside the workspace cannot redirect the write outside it.
pub(crate) async fn write_text(
    ctx: &ExecutionContext,
    path: &str,
    content: &str,
    append: bool,
) -> Result<String, String> {
    let resolved = ctx.resolver.resolve(path).map_err(|e| e.to_string())?;

    let Some(parent) = resolved.parent() else {
        return Err("Invalid path: missing parent directory".to_string());
    };
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| format!("Failed to create parent directory: {e}"))?;

    // The target itself may be a pre-existing symlink; refuse to follow it.
    if let Ok(meta) = tokio::fs::symlink_metadata(&resolved).await
        && meta.file_type().is_symlink()
    {
        return Err(format!(
            "Refusing to write through symlink: {}",
            resolved.display()
        ));
    }

    let io_result = if append {
        use tokio::io::AsyncWriteExt;
        match tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&resolved)
            .await
        {
            // tokio's File buffers writes; without an explicit flush the data
            // may still be in flight on a background thread when the file is
            // dropped, racing with subsequent reads.
            Ok(mut file) => match file.write_all(content.as_bytes()).await {
                Ok(()) => file.flush().await,
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        }
    } else {
        tokio::fs::write(&resolved, content).await
    };

    io_result.map_err(|e| format!("Failed to write file: {e}"))?;
    Ok(display_relative(ctx.resolver.root(), &resolved))
}
