use anyhow::{Context, Result};
use brand_enrichment::{GitHubExclusionStore, RepoLocation, SearchCredentials};
use dotenvy::dotenv;
use openai_client::OpenAIClient;
use std::env;

/// Configuration loaded from environment variables.
///
/// Everything is optional at load time; each command asks only for what it
/// uses, so `exclusions show` works without search or model keys.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: Option<String>,
    pub google_cse_id: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_model: Option<String>,
    pub github_token: Option<String>,
    pub exclusion_repo: Option<String>,
    pub exclusion_branch: String,
    pub exclusion_path: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self::from_lookup(|key| env::var(key).ok()))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            google_api_key: var("GOOGLE_API_KEY"),
            google_cse_id: var("GOOGLE_CSE_ID"),
            openai_api_key: var("OPENAI_API_KEY"),
            openai_model: var("OPENAI_MODEL"),
            github_token: var("GITHUB_TOKEN"),
            exclusion_repo: var("EXCLUSION_REPO"),
            exclusion_branch: var("EXCLUSION_BRANCH").unwrap_or_else(|| "main".to_string()),
            exclusion_path: var("EXCLUSION_PATH")
                .unwrap_or_else(|| "exclude_domains.csv".to_string()),
        }
    }

    pub fn search_credentials(&self) -> Result<SearchCredentials> {
        let api_key = self
            .google_api_key
            .clone()
            .context("GOOGLE_API_KEY must be set")?;
        let engine_id = self
            .google_cse_id
            .clone()
            .context("GOOGLE_CSE_ID must be set")?;
        Ok(SearchCredentials::new(api_key, engine_id))
    }

    pub fn openai_client(&self) -> Result<OpenAIClient> {
        let api_key = self
            .openai_api_key
            .clone()
            .context("OPENAI_API_KEY must be set")?;
        OpenAIClient::new(api_key).context("Failed to build OpenAI client")
    }

    /// True when both the token and the repository are configured.
    pub fn has_exclusion_store(&self) -> bool {
        self.github_token.is_some() && self.exclusion_repo.is_some()
    }

    pub fn exclusion_store(&self) -> Result<GitHubExclusionStore> {
        let token = self
            .github_token
            .clone()
            .context("GITHUB_TOKEN must be set")?;
        let slug = self
            .exclusion_repo
            .as_deref()
            .context("EXCLUSION_REPO must be set")?;
        let location = RepoLocation::from_slug(slug, &self.exclusion_branch, &self.exclusion_path)
            .with_context(|| format!("EXCLUSION_REPO must look like owner/name, got {slug:?}"))?;

        GitHubExclusionStore::new(token, location).context("Failed to build GitHub client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_for_store_location() {
        let config = config(&[]);
        assert_eq!(config.exclusion_branch, "main");
        assert_eq!(config.exclusion_path, "exclude_domains.csv");
        assert!(!config.has_exclusion_store());
    }

    #[test]
    fn test_missing_key_names_the_variable() {
        let err = config(&[("GOOGLE_API_KEY", "k")]).search_credentials().unwrap_err();
        assert!(err.to_string().contains("GOOGLE_CSE_ID"));
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config = config(&[("OPENAI_API_KEY", "  ")]);
        assert!(config.openai_client().is_err());
    }

    #[test]
    fn test_exclusion_store_from_slug() {
        let config = config(&[
            ("GITHUB_TOKEN", "ghp_x"),
            ("EXCLUSION_REPO", "acme/catalog-config"),
            ("EXCLUSION_BRANCH", "data"),
        ]);
        let store = config.exclusion_store().unwrap();
        assert_eq!(store.location().repo, "catalog-config");
        assert_eq!(store.location().branch, "data");

        let bad = Config {
            exclusion_repo: Some("not-a-slug".into()),
            ..config
        };
        assert!(bad.exclusion_store().is_err());
    }
}
