use super::common::ok_tool_result;
use super::traits::{ExecutionContext, Tool};
use super::types::ToolResult;
use serde_json::json;
use std::future::Future;
use std::pin::Pin;

/// Report the absolute workspace path on the host machine.
pub struct WorkspaceInfoTool;

impl WorkspaceInfoTool {
    pub const fn new() -> Self {
        Self
    }
}

impl Tool for WorkspaceInfoTool {
    fn name(&self) -> &str {
        "get_workspace"
    }

    fn description(&self) -> &str {
        "Return the absolute workspace path on the host machine"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    fn execute<'a>(
        &'a self,
        _args: serde_json::Value,
        ctx: &'a ExecutionContext,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolResult>> + Send + 'a>> {
        Box::pin(async move { Ok(ok_tool_result(ctx.resolver.root().display().to_string())) })
    }
}
