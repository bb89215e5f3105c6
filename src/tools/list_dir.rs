use super::common::{failed_tool_result, ok_tool_result, workspace_path_property};
use super::traits::{ExecutionContext, Tool};
use super::types::ToolResult;
use serde_json::json;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

/// List files under a workspace path up to a bounded depth.
pub struct ListDirTool;

impl ListDirTool {
    pub const fn new() -> Self {
        Self
    }
}

impl Tool for ListDirTool {
    fn name(&self) -> &str {
        "list_dir"
    }

    fn description(&self) -> &str {
        "List files under a workspace path, up to a max depth (default 2)"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "path": workspace_path_property(),
                "depth": {
                    "type": "integer",
                    "description": "Maximum directory depth to list (default 2)"
                }
            }
        })
    }

    fn execute<'a>(
        &'a self,
        args: serde_json::Value,
        ctx: &'a ExecutionContext,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolResult>> + Send + 'a>> {
        Box::pin(async move {
            let path = args.get("path").and_then(|v| v.as_str()).unwrap_or(".");
            let depth = args
                .get("depth")
                .and_then(serde_json::Value::as_u64)
                .map_or(2, |d| d as usize);
            let depth = depth.min(ctx.max_tree_depth);

            let root = match ctx.resolver.resolve(path) {
                Ok(p) => p,
                Err(error) => return Ok(failed_tool_result(error.to_string())),
            };

            match collect_entries(&root, depth).await {
                Ok(entries) => {
                    let lines: Vec<String> = entries
                        .iter()
                        .map(|(rel, is_dir)| {
                            let shown = Path::new(path).join(rel);
                            let suffix = if *is_dir { "/" } else { "" };
                            format!("{}{suffix}", shown.display())
                        })
                        .collect();
                    Ok(ok_tool_result(lines.join("\n")))
                }
                Err(e) => Ok(failed_tool_result(format!("Failed to list directory: {e}"))),
            }
        })
    }
}

/// Walk `root` breadth-first up to `depth` components, returning sorted
/// root-relative paths with a directory flag.
async fn collect_entries(
    root: &Path,
    depth: usize,
) -> std::io::Result<Vec<(PathBuf, bool)>> {
    let mut results = Vec::new();
    if depth == 0 {
        return Ok(results);
    }
    let mut pending: Vec<(PathBuf, PathBuf, usize)> =
        vec![(root.to_path_buf(), PathBuf::new(), 0)];

    while let Some((dir, rel_dir, level)) = pending.pop() {
        let mut entries = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let rel = rel_dir.join(entry.file_name());
            let is_dir = entry.file_type().await?.is_dir();
            if is_dir && level + 1 < depth {
                pending.push((entry.path(), rel.clone(), level + 1));
            }
            results.push((rel, is_dir));
        }
    }

    results.sort();
    Ok(results)
}
