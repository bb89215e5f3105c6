use super::common::{failed_tool_result, ok_tool_result, required_str};
use super::traits::{ExecutionContext, Tool};
use super::types::ToolResult;
use serde_json::json;
use std::future::Future;
use std::pin::Pin;

/// Run an allowlisted command inside the workspace.
///
/// Admission and execution live in [`crate::sandbox::CommandGate`]; this tool
/// only shapes arguments and renders the structured errors the gate raises.
pub struct RunCmdTool;

impl RunCmdTool {
    pub const fn new() -> Self {
        Self
    }
}

impl Tool for RunCmdTool {
    fn name(&self) -> &str {
        "run_cmd"
    }

    fn description(&self) -> &str {
        "Run an allowlisted command in the workspace. Example: cmd=\"git status\""
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "cmd": {
                    "type": "string",
                    "description": "Command line to execute"
                },
                "cwd": {
                    "type": "string",
                    "description": "Working directory relative to the workspace (default \".\")"
                }
            },
            "required": ["cmd"]
        })
    }

    fn execute<'a>(
        &'a self,
        args: serde_json::Value,
        ctx: &'a ExecutionContext,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolResult>> + Send + 'a>> {
        Box::pin(async move {
            let cmd = required_str(&args, "cmd")?;
            let cwd = args.get("cwd").and_then(|v| v.as_str()).unwrap_or(".");

            match ctx.gate.execute(cmd, cwd).await {
                Ok(output) => Ok(ok_tool_result(output)),
                Err(error) => Ok(failed_tool_result(error.to_string())),
            }
        })
    }
}
