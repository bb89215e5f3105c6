use super::common::{display_relative, failed_tool_result, required_str};
use super::traits::{ExecutionContext, Tool};
use super::types::{OutputAttachment, ToolResult};
use crate::stock::StockClient;
use serde_json::json;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Fetch a royalty-free stock image and save it into the workspace.
pub struct FetchImageTool {
    stock: Arc<StockClient>,
}

impl FetchImageTool {
    pub fn new(stock: Arc<StockClient>) -> Self {
        Self { stock }
    }
}

impl Tool for FetchImageTool {
    fn name(&self) -> &str {
        "fetch_image"
    }

    fn description(&self) -> &str {
        "Fetch a royalty-free stock image for a query and save it in the workspace"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search term for the image"
                },
                "save_path": {
                    "type": "string",
                    "description": "Directory relative to the workspace (default \"assets\")"
                }
            },
            "required": ["query"]
        })
    }

    fn execute<'a>(
        &'a self,
        args: serde_json::Value,
        ctx: &'a ExecutionContext,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolResult>> + Send + 'a>> {
        Box::pin(async move {
            let query = required_str(&args, "query")?;
            let save_path = args
                .get("save_path")
                .and_then(|v| v.as_str())
                .unwrap_or("assets");

            let dir = match ctx.resolver.resolve(save_path) {
                Ok(p) => p,
                Err(error) => return Ok(failed_tool_result(error.to_string())),
            };

            let photo = match self.stock.search_first(query).await {
                Ok(photo) => photo,
                Err(error) => return Ok(failed_tool_result(error.to_string())),
            };
            let bytes = match self.stock.download(&photo.original_url).await {
                Ok(bytes) => bytes,
                Err(error) => return Ok(failed_tool_result(error.to_string())),
            };

            if let Err(e) = tokio::fs::create_dir_all(&dir).await {
                return Ok(failed_tool_result(format!(
                    "Failed to create image directory: {e}"
                )));
            }

            let filename = format!("{}.jpg", sanitize_query(query));
            let target = dir.join(&filename);
            if let Err(e) = tokio::fs::write(&target, &bytes).await {
                return Ok(failed_tool_result(format!("Failed to save image: {e}")));
            }

            let relative = display_relative(ctx.resolver.root(), &target);
            tracing::info!(query, path = %relative, bytes = bytes.len(), "saved stock image");

            Ok(ToolResult {
                success: true,
                output: format!("Saved image to {relative} ({} bytes)", bytes.len()),
                error: None,
                attachments: vec![OutputAttachment::from_path(
                    "image/jpeg",
                    relative,
                    Some(filename),
                )],
            })
        })
    }
}

/// Turn a search query into a safe filename stem: whitespace becomes `_`,
/// path separators are dropped.
fn sanitize_query(query: &str) -> String {
    query
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| !matches!(c, '/' | '\\' | '\0'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_pexels(server: &MockServer, query: &str) {
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("query", query))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "photos": [
                    {"src": {"original": format!("{}/img.jpg", server.uri())}}
                ]
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/img.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpegdata".to_vec()))
            .mount(server)
            .await;
    }

    fn tool_for(server: &MockServer) -> FetchImageTool {
        FetchImageTool::new(Arc::new(StockClient::with_base_url(
            Some("key".into()),
            server.uri(),
        )))
    }

    #[tokio::test]
    async fn fetch_image_saves_under_default_assets_dir() {
        let server = MockServer::start().await;
        mock_pexels(&server, "blue mountains").await;

        let tmp = TempDir::new().expect("tempdir");
        let ctx = ExecutionContext::test_default(tmp.path());
        let result = tool_for(&server)
            .execute(json!({"query": "blue mountains"}), &ctx)
            .await
            .unwrap();
        assert!(result.success, "{:?}", result.error);
        assert!(result.output.contains("assets/blue_mountains.jpg"));
        assert_eq!(result.attachments.len(), 1);
        assert_eq!(result.attachments[0].mime_type, "image/jpeg");

        let saved = tokio::fs::read(tmp.path().join("assets/blue_mountains.jpg"))
            .await
            .unwrap();
        assert_eq!(saved, b"jpegdata");
    }

    #[tokio::test]
    async fn fetch_image_honors_save_path() {
        let server = MockServer::start().await;
        mock_pexels(&server, "sea").await;

        let tmp = TempDir::new().expect("tempdir");
        let ctx = ExecutionContext::test_default(tmp.path());
        let result = tool_for(&server)
            .execute(json!({"query": "sea", "save_path": "public/img"}), &ctx)
            .await
            .unwrap();
        assert!(result.success, "{:?}", result.error);
        assert!(tmp.path().join("public/img/sea.jpg").is_file());
    }

    #[tokio::test]
    async fn fetch_image_rejects_escaping_save_path() {
        let server = MockServer::start().await;
        let tmp = TempDir::new().expect("tempdir");
        let ctx = ExecutionContext::test_default(tmp.path());

        let result = tool_for(&server)
            .execute(json!({"query": "sea", "save_path": "../outside"}), &ctx)
            .await
            .unwrap();
        assert!(!result.success);
        assert!(result.error.as_ref().unwrap().contains("escapes workspace"));
    }

    #[tokio::test]
    async fn fetch_image_reports_missing_api_key() {
        let tmp = TempDir::new().expect("tempdir");
        let ctx = ExecutionContext::test_default(tmp.path());
        let tool = FetchImageTool::new(Arc::new(StockClient::new(None)));

        let result = tool.execute(json!({"query": "sea"}), &ctx).await.unwrap();
        assert!(!result.success);
        assert!(result.error.as_ref().unwrap().contains("PEXELS_API"));
    }

    #[tokio::test]
    async fn fetch_image_reports_no_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"photos": []})))
            .mount(&server)
            .await;

        let tmp = TempDir::new().expect("tempdir");
        let ctx = ExecutionContext::test_default(tmp.path());
        let result = tool_for(&server)
            .execute(json!({"query": "void"}), &ctx)
            .await
            .unwrap();
        assert!(!result.success);
        assert!(result.error.as_ref().unwrap().contains("no images found"));
    }

    #[test]
    fn sanitize_replaces_whitespace_and_strips_separators() {
        assert_eq!(sanitize_query("blue mountains"), "blue_mountains");
        assert_eq!(sanitize_query("a/../b"), "a..b");
    }
}
