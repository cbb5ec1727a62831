//! Pipeline configuration.

use serde::{Deserialize, Serialize};

use crate::retry::RetryPolicy;

/// Configuration for the enrichment pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Results requested from the search provider per query.
    ///
    /// Default: 5.
    pub search_result_count: usize,

    /// Language hint passed to the search provider (e.g. `lang_ja`).
    pub search_language: String,

    /// Maximum characters of evidence embedded in the model prompt.
    ///
    /// Default: 2000.
    pub evidence_char_budget: usize,

    /// Maximum characters of evidence written to the output table.
    ///
    /// Default: 300.
    pub output_summary_chars: usize,

    /// Kept source links per row. Default: 3.
    pub source_link_count: usize,

    /// Chat model name. Default: `gpt-4o`.
    pub model: String,

    /// Sampling temperature. Low but non-zero, so answers lean
    /// deterministic without being reproducible.
    pub temperature: f32,

    /// Shared by search and inference calls.
    pub retry: RetryPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            search_result_count: 5,
            search_language: "lang_ja".to_string(),
            evidence_char_budget: 2000,
            output_summary_chars: 300,
            source_link_count: 3,
            model: "gpt-4o".to_string(),
            temperature: 0.2,
            retry: RetryPolicy::default(),
        }
    }
}

impl PipelineConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chat model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the search language hint.
    pub fn with_search_language(mut self, language: impl Into<String>) -> Self {
        self.search_language = language.into();
        self
    }

    /// Set the evidence budget for prompts.
    pub fn with_evidence_char_budget(mut self, chars: usize) -> Self {
        self.evidence_char_budget = chars;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.search_result_count, 5);
        assert_eq!(config.output_summary_chars, 300);
        assert_eq!(config.source_link_count, 3);
        assert!(config.temperature > 0.0 && config.temperature <= 0.3);
        assert_eq!(config.retry.max_attempts, 3);
    }

    #[test]
    fn test_builder_overrides() {
        let config = PipelineConfig::new()
            .with_model("gpt-4o-mini")
            .with_retry(RetryPolicy::immediate(1))
            .with_search_language("lang_en");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.retry.max_attempts, 1);
        assert_eq!(config.search_language, "lang_en");
    }
}
