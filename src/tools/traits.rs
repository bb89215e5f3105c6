use super::types::{ToolResult, ToolSpec};
use crate::sandbox::{CommandGate, PathResolver};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Shared handles every tool execution receives.
///
/// The resolver and gate are constructed once at startup from [`crate::config::Config`]
/// and are read-only afterwards, so concurrent tool calls need no locking.
#[derive(Clone)]
pub struct ExecutionContext {
    pub resolver: Arc<PathResolver>,
    pub gate: Arc<CommandGate>,
    pub max_tree_depth: usize,
}

impl ExecutionContext {
    pub fn new(resolver: Arc<PathResolver>, gate: Arc<CommandGate>, max_tree_depth: usize) -> Self {
        Self {
            resolver,
            gate,
            max_tree_depth,
        }
    }

    #[cfg(test)]
    pub fn test_default(workspace: &std::path::Path) -> Self {
        use crate::sandbox::AllowlistPolicy;
        use std::time::Duration;

        let resolver = PathResolver::new(workspace).expect("test workspace");
        let gate = CommandGate::new(
            AllowlistPolicy::default(),
            resolver.clone(),
            Duration::from_secs(5),
        );
        Self::new(Arc::new(resolver), Arc::new(gate), 4)
    }
}

/// Core tool trait — implement for any capability exposed to the MCP client.
pub trait Tool: Send + Sync {
    /// Tool name (used in MCP tool listing and dispatch).
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// JSON schema for parameters.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with given arguments.
    fn execute<'a>(
        &'a self,
        args: serde_json::Value,
        ctx: &'a ExecutionContext,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolResult>> + Send + 'a>>;

    /// Get the full spec for MCP registration.
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}
