//! Exclusion list kept as a CSV file in a GitHub repository.
//!
//! Reads go through the raw-content host; writes use the contents API,
//! which needs the current blob `sha` to update an existing file.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::credentials::SecretString;
use crate::error::StoreError;
use crate::traits::store::{ExclusionStore, PublishOutcome};

const USER_AGENT: &str = "brand-enrichment";

/// Location of the exclusion file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocation {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub path: String,
}

impl RepoLocation {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
            path: path.into(),
        }
    }

    /// Parse `owner/name`.
    pub fn from_slug(
        slug: &str,
        branch: impl Into<String>,
        path: impl Into<String>,
    ) -> Option<Self> {
        let (owner, repo) = slug.trim().split_once('/')?;
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return None;
        }
        Some(Self::new(owner, repo, branch, path))
    }
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    sha: String,
}

#[derive(Debug, Serialize)]
struct PutContentsRequest<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<String>,
}

/// GitHub-backed [`ExclusionStore`].
pub struct GitHubExclusionStore {
    token: SecretString,
    location: RepoLocation,
    client: reqwest::Client,
    api_base: String,
    raw_base: String,
}

impl GitHubExclusionStore {
    pub const TIMEOUT: Duration = Duration::from_secs(15);

    pub fn new(token: impl Into<SecretString>, location: RepoLocation) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Self::TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            token: token.into(),
            location,
            client,
            api_base: "https://api.github.com".to_string(),
            raw_base: "https://raw.githubusercontent.com".to_string(),
        })
    }

    /// Override the contents API host.
    pub fn with_api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the raw-content host.
    pub fn with_raw_base(mut self, url: impl Into<String>) -> Self {
        self.raw_base = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn location(&self) -> &RepoLocation {
        &self.location
    }

    fn raw_url(&self) -> String {
        let loc = &self.location;
        format!(
            "{}/{}/{}/{}/{}",
            self.raw_base, loc.owner, loc.repo, loc.branch, loc.path
        )
    }

    fn contents_url(&self) -> String {
        let loc = &self.location;
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, loc.owner, loc.repo, loc.path
        )
    }

    /// Current blob sha, or `None` when the file does not exist yet.
    async fn current_sha(&self) -> Result<Option<String>, StoreError> {
        let response = self
            .client
            .get(self.contents_url())
            .query(&[("ref", self.location.branch.as_str())])
            .bearer_auth(self.token.expose())
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let contents: ContentsResponse = serde_json::from_str(&body)?;
        Ok(Some(contents.sha))
    }
}

#[async_trait]
impl ExclusionStore for GitHubExclusionStore {
    async fn fetch(&self) -> Result<String, StoreError> {
        let url = self.raw_url();
        debug!(url = %url, "fetching exclusion list");

        let response = self
            .client
            .get(&url)
            .bearer_auth(self.token.expose())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }

    async fn publish(&self, content: &str) -> Result<PublishOutcome, StoreError> {
        let sha = self.current_sha().await?;
        debug!(path = %self.location.path, has_sha = sha.is_some(), "publishing exclusion list");

        let request = PutContentsRequest {
            message: "Update exclusion domain list",
            content: STANDARD.encode(content.as_bytes()),
            branch: &self.location.branch,
            sha,
        };

        let response = self
            .client
            .put(self.contents_url())
            .bearer_auth(self.token.expose())
            .header("Accept", "application/vnd.github+json")
            .json(&request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        info!(status, path = %self.location.path, "exclusion list publish finished");

        Ok(PublishOutcome::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn store(server: &MockServer) -> GitHubExclusionStore {
        let location = RepoLocation::new("acme", "catalog-config", "main", "exclude_domains.csv");
        GitHubExclusionStore::new("ghp_test", location)
            .unwrap()
            .with_api_base(server.base_url())
            .with_raw_base(server.base_url())
    }

    #[test]
    fn test_location_from_slug() {
        let loc = RepoLocation::from_slug("acme/catalog-config", "main", "x.csv").unwrap();
        assert_eq!(loc.owner, "acme");
        assert_eq!(loc.repo, "catalog-config");

        assert!(RepoLocation::from_slug("acme", "main", "x.csv").is_none());
        assert!(RepoLocation::from_slug("/repo", "main", "x.csv").is_none());
        assert!(RepoLocation::from_slug("a/b/c", "main", "x.csv").is_none());
    }

    #[tokio::test]
    async fn test_fetch_reads_raw_content() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/acme/catalog-config/main/exclude_domains.csv")
                    .header("authorization", "Bearer ghp_test");
                then.status(200).body("domain\namazon.co.jp\n");
            })
            .await;

        let content = store(&server).fetch().await.unwrap();
        mock.assert_async().await;
        assert_eq!(content, "domain\namazon.co.jp\n");
    }

    #[tokio::test]
    async fn test_fetch_not_found_is_api_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/acme/catalog-config/main/exclude_domains.csv");
                then.status(404).body("404: Not Found");
            })
            .await;

        let err = store(&server).fetch().await.unwrap_err();
        assert!(matches!(err, StoreError::Api { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_publish_updates_existing_file_with_sha() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/repos/acme/catalog-config/contents/exclude_domains.csv")
                    .query_param("ref", "main");
                then.status(200)
                    .json_body(serde_json::json!({"sha": "abc123", "name": "exclude_domains.csv"}));
            })
            .await;
        let put = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/repos/acme/catalog-config/contents/exclude_domains.csv")
                    .body_includes(r#""sha":"abc123""#)
                    .body_includes(r#""branch":"main""#)
                    .body_includes(r#""content":"ZG9tYWluCmV4YW1wbGUuY29tCg==""#);
                then.status(200).body(r#"{"content":{"sha":"def456"}}"#);
            })
            .await;

        let outcome = store(&server).publish("domain\nexample.com\n").await.unwrap();
        put.assert_async().await;
        assert_eq!(outcome.status, 200);
        assert!(outcome.is_success());
        assert!(outcome.body.contains("def456"));
    }

    #[tokio::test]
    async fn test_publish_creates_missing_file_without_sha() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/repos/acme/catalog-config/contents/exclude_domains.csv");
                then.status(404).body(r#"{"message":"Not Found"}"#);
            })
            .await;
        let put = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/repos/acme/catalog-config/contents/exclude_domains.csv")
                    .body_excludes(r#""sha""#);
                then.status(201).body("{}");
            })
            .await;

        let outcome = store(&server).publish("domain\n").await.unwrap();
        put.assert_async().await;
        assert_eq!(outcome.status, 201);
    }

    #[tokio::test]
    async fn test_publish_rejection_is_reported_not_raised() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/repos/acme/catalog-config/contents/exclude_domains.csv");
                then.status(200).json_body(serde_json::json!({"sha": "abc123"}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/repos/acme/catalog-config/contents/exclude_domains.csv");
                then.status(409).body(r#"{"message":"sha does not match"}"#);
            })
            .await;

        let outcome = store(&server).publish("domain\n").await.unwrap();
        assert_eq!(outcome.status, 409);
        assert!(!outcome.is_success());
        assert!(outcome.body.contains("sha does not match"));
    }
}
