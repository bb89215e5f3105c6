//! MCP server surface: bridges the tool registry to an MCP host over stdio.
//!
//! `Content` in rmcp is `Annotated<RawContent>`; tool results are rendered as
//! text blocks, with `is_error` carrying the tool's success flag.

use crate::config::Config;
use crate::sandbox::{CommandGate, PathResolver};
use crate::stock::StockClient;
use crate::tools::{default_registry, ExecutionContext, ToolRegistry, ToolResult, ToolSpec};
use rmcp::handler::server::ServerHandler;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, JsonObject, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::transport::stdio;
use rmcp::{ErrorData as McpError, ServiceExt};
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

/// The webcoder MCP server: a tool registry plus the sandbox context every
/// call executes against.
#[derive(Clone)]
pub struct WebcoderServer {
    registry: Arc<ToolRegistry>,
    ctx: Arc<ExecutionContext>,
}

impl WebcoderServer {
    /// Build the server from config: pin the workspace root, wire the command
    /// gate to the configured allowlist, and register the default tool set.
    pub fn new(config: &Config) -> crate::error::Result<Self> {
        let resolver = Arc::new(PathResolver::new(&config.workspace_dir)?);
        let gate = Arc::new(CommandGate::new(
            config.allowlist_policy(),
            PathResolver::new(&config.workspace_dir)?,
            Duration::from_secs(config.command_timeout_secs),
        ));
        let stock = Arc::new(StockClient::new(config.stock.api_key.clone()));

        Ok(Self {
            registry: Arc::new(default_registry(stock)),
            ctx: Arc::new(ExecutionContext::new(resolver, gate, config.max_tree_depth)),
        })
    }

    /// Serve MCP over stdin/stdout until the host disconnects.
    ///
    /// Stdout belongs to the transport; all logging must go to stderr.
    pub async fn serve_stdio(self) -> anyhow::Result<()> {
        let service = self.serve(stdio()).await?;
        service.waiting().await?;
        Ok(())
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.registry.tool_names()
    }
}

fn spec_to_tool(spec: ToolSpec) -> Result<Tool, McpError> {
    let schema: JsonObject = match spec.parameters {
        serde_json::Value::Object(map) => map,
        other => {
            return Err(McpError::internal_error(
                format!("tool {} has a non-object schema: {other}", spec.name),
                None,
            ));
        }
    };
    Ok(Tool::new(
        Cow::Owned(spec.name),
        Cow::Owned(spec.description),
        Arc::new(schema),
    ))
}

fn render_result(result: ToolResult) -> CallToolResult {
    if result.success {
        let mut blocks = vec![Content::text(result.output)];
        for attachment in result.attachments {
            blocks.push(Content::text(format!(
                "[attachment {}: {}]",
                attachment.mime_type, attachment.path
            )));
        }
        CallToolResult::success(blocks)
    } else {
        let message = result
            .error
            .unwrap_or_else(|| "tool failed without a message".to_string());
        CallToolResult::error(vec![Content::text(message)])
    }
}

impl ServerHandler for WebcoderServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Workspace-sandboxed web coding tools: file access, allowlisted \
                 commands, and asset helpers, all confined to the workspace root."
                    .to_string(),
            ),
            ..ServerInfo::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = self
            .registry
            .specs()
            .into_iter()
            .map(spec_to_tool)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ListToolsResult {
            tools,
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let args = match request.arguments {
            Some(map) => serde_json::Value::Object(map),
            None => serde_json::json!({}),
        };

        tracing::debug!(tool = %request.name, "tool call");
        let result = self
            .registry
            .execute(&request.name, args, &self.ctx)
            .await
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        if !result.success {
            tracing::warn!(
                tool = %request.name,
                error = result.error.as_deref().unwrap_or(""),
                "tool call failed"
            );
        }
        Ok(render_result(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(workspace: &std::path::Path) -> Config {
        Config {
            workspace_dir: workspace.to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn server_registers_full_tool_surface() {
        let tmp = TempDir::new().expect("tempdir");
        let server = WebcoderServer::new(&test_config(tmp.path())).expect("server");
        assert_eq!(server.tool_names().len(), 9);
        assert!(server.tool_names().contains(&"run_cmd"));
    }

    #[test]
    fn specs_convert_to_mcp_tools() {
        let tmp = TempDir::new().expect("tempdir");
        let server = WebcoderServer::new(&test_config(tmp.path())).expect("server");
        let spec = server.registry.specs().into_iter().next().unwrap();
        let tool = spec_to_tool(spec).expect("tool");
        assert!(!tool.name.is_empty());
    }

    #[test]
    fn failed_results_render_as_errors() {
        let rendered = render_result(ToolResult {
            success: false,
            output: String::new(),
            error: Some("path escapes workspace".into()),
            attachments: Vec::new(),
        });
        assert_eq!(rendered.is_error, Some(true));
    }

    #[test]
    fn successful_results_render_output_text() {
        let rendered = render_result(ToolResult {
            success: true,
            output: "done".into(),
            error: None,
            attachments: Vec::new(),
        });
        assert_eq!(rendered.is_error, Some(false));
        assert_eq!(rendered.content.len(), 1);
    }
}
