use super::common::{display_relative, failed_tool_result, ok_tool_result, required_str};
use super::traits::{ExecutionContext, Tool};
use super::types::ToolResult;
use crate::assets;
use crate::error::ToolError;
use serde_json::json;
use std::future::Future;
use std::pin::Pin;

/// Generate base styles for a scaffolded project from a color palette.
///
/// Targets `src/app/globals.css` when the project has a Next-style `src/app`
/// layout, `src/index.css` otherwise.
pub struct InferAssetsTool;

impl InferAssetsTool {
    pub const fn new() -> Self {
        Self
    }
}

impl Tool for InferAssetsTool {
    fn name(&self) -> &str {
        "infer_assets"
    }

    fn description(&self) -> &str {
        "Write base CSS variables and styles for a project from an optional palette JSON"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "target_dir": {
                    "type": "string",
                    "description": "Project directory relative to the workspace"
                },
                "palette_json": {
                    "type": "string",
                    "description": "JSON object mapping color names to values, e.g. {\"primary\": \"#2563eb\"}"
                }
            },
            "required": ["target_dir"]
        })
    }

    fn execute<'a>(
        &'a self,
        args: serde_json::Value,
        ctx: &'a ExecutionContext,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolResult>> + Send + 'a>> {
        Box::pin(async move {
            let target_dir = required_str(&args, "target_dir")?;
            // An empty palette string means "no palette", same as omitting it.
            let palette_json = args
                .get("palette_json")
                .and_then(|v| v.as_str())
                .filter(|raw| !raw.is_empty());

            let palette = match palette_json {
                Some(raw) => match assets::parse_palette(raw) {
                    Ok(p) => Some(p),
                    Err(message) => {
                        return Ok(failed_tool_result(
                            ToolError::InvalidInput(message).to_string(),
                        ));
                    }
                },
                None => None,
            };

            let target = match ctx.resolver.resolve(target_dir) {
                Ok(p) => p,
                Err(error) => return Ok(failed_tool_result(error.to_string())),
            };

            let css_path = if target.join("src/app").is_dir() {
                target.join("src/app/globals.css")
            } else {
                target.join("src/index.css")
            };

            if let Some(parent) = css_path.parent() {
                if let Err(e) = tokio::fs::create_dir_all(parent).await {
                    return Ok(failed_tool_result(format!(
                        "Failed to create style directory: {e}"
                    )));
                }
            }

            let css = assets::render_stylesheet(palette.as_ref());
            if let Err(e) = tokio::fs::write(&css_path, &css).await {
                return Ok(failed_tool_result(format!("Failed to write styles: {e}")));
            }

            let relative = display_relative(ctx.resolver.root(), &css_path);
            tracing::info!(path = %relative, "wrote base styles");
            Ok(ok_tool_result(format!("Wrote base styles to {relative}")))
        })
    }
}
