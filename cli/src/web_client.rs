use std::future::Future;

use recipes_core::{decode_search_response, FetchError, PageEnvelope, SearchRequest, SEARCH_PATH};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::debug;

/// Anything that can answer a recipe search
pub trait RecipeSource: Clone + Send + Sync + 'static {
    fn search(
        &self,
        request: SearchRequest,
    ) -> impl Future<Output = Result<PageEnvelope, FetchError>> + Send;
}

/// Search API client over HTTP
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("recipes/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn search_url(&self) -> String {
        format!("{}{}", self.base_url, SEARCH_PATH)
    }
}

impl RecipeSource for HttpClient {
    async fn search(&self, request: SearchRequest) -> Result<PageEnvelope, FetchError> {
        let pairs = request.query_pairs();
        debug!(url = %self.search_url(), query = %request.query_string(), "searching recipes");

        let response = self
            .client
            .get(self.search_url())
            .query(&pairs)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        debug!(status, bytes = body.len(), "search response received");

        decode_search_response(status, content_type.as_deref(), &body)
    }
}
