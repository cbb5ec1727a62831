//! Web searcher trait and the Google Programmable Search implementation.
//!
//! The evidence retriever only needs "query in, ordered hits out"; the
//! provider, its credentials, and its wire format stay behind this trait.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::credentials::SearchCredentials;
use crate::error::SearchError;
use crate::types::evidence::SearchHit;

/// Web search provider.
#[async_trait]
pub trait WebSearcher: Send + Sync {
    /// Provider name for logs.
    fn name(&self) -> &str;

    /// Search for `query`, returning at most `limit` hits in provider order.
    ///
    /// `language` is a provider-specific language hint (e.g. `lang_ja`).
    async fn search(
        &self,
        query: &str,
        limit: usize,
        language: &str,
    ) -> Result<Vec<SearchHit>, SearchError>;
}

/// Google Custom Search JSON API client.
pub struct GoogleSearcher {
    credentials: SearchCredentials,
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GoogleResponse {
    /// Absent when the query has no results.
    #[serde(default)]
    items: Vec<GoogleItem>,
}

#[derive(Debug, Deserialize)]
struct GoogleItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    link: String,
}

impl GoogleSearcher {
    /// Per-request timeout.
    pub const TIMEOUT: Duration = Duration::from_secs(15);

    pub fn new(credentials: SearchCredentials) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(Self::TIMEOUT)
            .build()?;

        Ok(Self {
            credentials,
            client,
            base_url: "https://www.googleapis.com".to_string(),
        })
    }

    /// Point at a different host (proxies, mock servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl WebSearcher for GoogleSearcher {
    fn name(&self) -> &str {
        "google-cse"
    }

    async fn search(
        &self,
        query: &str,
        limit: usize,
        language: &str,
    ) -> Result<Vec<SearchHit>, SearchError> {
        // The API caps `num` at 10.
        let num = limit.clamp(1, 10).to_string();

        debug!(query, num = %num, "google search request");
        let response = self
            .client
            .get(format!("{}/customsearch/v1", self.base_url))
            .query(&[
                ("key", self.credentials.api_key.expose()),
                ("cx", self.credentials.engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
                ("lr", language),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: GoogleResponse =
            serde_json::from_str(&body).map_err(|e| SearchError::Malformed(e.to_string()))?;

        let mut hits: Vec<SearchHit> = parsed
            .items
            .into_iter()
            .map(|item| SearchHit::new(item.title, item.snippet, item.link))
            .collect();
        hits.truncate(limit);
        Ok(hits)
    }
}
