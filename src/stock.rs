use crate::error::StockError;
use serde::Deserialize;

const PEXELS_BASE_URL: &str = "https://api.pexels.com";

/// First search hit for a stock image query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockPhoto {
    pub original_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    src: PhotoSrc,
}

#[derive(Debug, Deserialize)]
struct PhotoSrc {
    original: String,
}

/// Minimal Pexels client: search for the first royalty-free hit and download
/// the image bytes. The API key comes from config (`PEXELS_API` env override);
/// without one, every call fails with `MissingApiKey` before any request.
#[derive(Debug, Clone)]
pub struct StockClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl StockClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, PEXELS_BASE_URL)
    }

    /// Point the client at a different API host. Used by tests.
    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: base_url.into(),
        }
    }

    /// Search Pexels for `query` and return the first photo.
    pub async fn search_first(&self, query: &str) -> Result<StockPhoto, StockError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(StockError::MissingApiKey);
        };

        let response = self
            .http
            .get(format!("{}/v1/search", self.base_url))
            .header("Authorization", api_key)
            .query(&[("query", query), ("per_page", "1")])
            .send()
            .await?
            .error_for_status()?;

        let body: SearchResponse = response.json().await?;
        let Some(photo) = body.photos.into_iter().next() else {
            return Err(StockError::NoResults {
                query: query.to_string(),
            });
        };

        Ok(StockPhoto {
            original_url: photo.src.original,
        })
    }

    /// Download the image bytes behind `url`.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>, StockError> {
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> StockClient {
        StockClient::with_base_url(Some("test-key".into()), server.uri())
    }

    #[tokio::test]
    async fn search_first_returns_first_photo() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("query", "mountains"))
            .and(query_param("per_page", "1"))
            .and(header("Authorization", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "photos": [
                    {"src": {"original": "https://images.example/mountains.jpg"}}
                ]
            })))
            .mount(&server)
            .await;

        let photo = client_for(&server)
            .search_first("mountains")
            .await
            .expect("photo");
        assert_eq!(photo.original_url, "https://images.example/mountains.jpg");
    }

    #[tokio::test]
    async fn search_first_empty_result_is_no_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"photos": []})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .search_first("nothing")
            .await
            .expect_err("no results");
        assert!(matches!(err, StockError::NoResults { query } if query == "nothing"));
    }

    #[tokio::test]
    async fn search_first_without_key_never_hits_network() {
        let client = StockClient::with_base_url(None, "http://127.0.0.1:1");
        let err = client.search_first("anything").await.expect_err("no key");
        assert!(matches!(err, StockError::MissingApiKey));
    }

    #[tokio::test]
    async fn search_first_http_error_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .search_first("mountains")
            .await
            .expect_err("unauthorized");
        assert!(matches!(err, StockError::Http(_)));
    }

    #[tokio::test]
    async fn download_returns_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mountains.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpegdata".to_vec()))
            .mount(&server)
            .await;

        let bytes = client_for(&server)
            .download(&format!("{}/mountains.jpg", server.uri()))
            .await
            .expect("bytes");
        assert_eq!(bytes, b"jpegdata");
    }
}
