//! Evidence retrieval: search, filter excluded domains, summarize.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::PipelineConfig;
use crate::retry::RetryPolicy;
use crate::traits::searcher::WebSearcher;
use crate::types::evidence::{truncate_chars, EvidenceResult, SearchHit};
use crate::types::exclusion::ExclusionList;

/// Turns a query into an [`EvidenceResult`].
///
/// Never returns an error: a failed search becomes the error sentinel
/// (see [`EvidenceResult::failed`]) for the orchestrator to inspect.
pub struct EvidenceRetriever {
    searcher: Arc<dyn WebSearcher>,
    retry: RetryPolicy,
    result_count: usize,
    language: String,
    link_count: usize,
    char_budget: usize,
}

impl EvidenceRetriever {
    pub fn new(searcher: Arc<dyn WebSearcher>, config: &PipelineConfig) -> Self {
        Self {
            searcher,
            retry: config.retry,
            result_count: config.search_result_count,
            language: config.search_language.clone(),
            link_count: config.source_link_count,
            char_budget: config.evidence_char_budget,
        }
    }

    pub async fn retrieve(&self, query: &str, exclusions: &ExclusionList) -> EvidenceResult {
        if query.trim().is_empty() {
            return EvidenceResult::failed("empty search query");
        }

        let searched = self
            .retry
            .run("search", move |attempt| {
                debug!(provider = self.searcher.name(), query, attempt, "searching");
                self.searcher.search(query, self.result_count, &self.language)
            })
            .await;

        match searched {
            Ok(hits) => self.summarize(hits, exclusions),
            Err(err) => {
                warn!(provider = self.searcher.name(), query, error = %err, "search failed");
                EvidenceResult::failed(err)
            }
        }
    }

    fn summarize(&self, hits: Vec<SearchHit>, exclusions: &ExclusionList) -> EvidenceResult {
        let kept: Vec<SearchHit> = hits
            .into_iter()
            .filter(|hit| !exclusions.excludes(&hit.link))
            .collect();

        let summary = kept
            .iter()
            .map(|hit| format!("{}\n{}\n{}", hit.title, hit.snippet, hit.link))
            .collect::<Vec<_>>()
            .join("\n");

        let links = kept
            .iter()
            .take(self.link_count)
            .map(|hit| hit.link.clone())
            .collect();

        EvidenceResult::new(truncate_chars(&summary, self.char_budget), links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::testing::MockWebSearcher;

    fn config() -> PipelineConfig {
        PipelineConfig::default().with_retry(RetryPolicy::immediate(3))
    }

    fn hit(n: usize, domain: &str) -> SearchHit {
        SearchHit::new(
            format!("title {n}"),
            format!("snippet {n}"),
            format!("https://{domain}/item/{n}"),
        )
    }

    #[tokio::test]
    async fn test_summary_keeps_provider_order() {
        let searcher = MockWebSearcher::new()
            .with_results("q", vec![hit(1, "a.example"), hit(2, "b.example")]);
        let retriever = EvidenceRetriever::new(Arc::new(searcher.clone()), &config());

        let evidence = retriever.retrieve("q", &ExclusionList::new()).await;

        assert_eq!(
            evidence.summary,
            "title 1\nsnippet 1\nhttps://a.example/item/1\ntitle 2\nsnippet 2\nhttps://b.example/item/2"
        );
        assert_eq!(evidence.source_links.len(), 2);
        assert_eq!(searcher.queries(), vec!["q".to_string()]);
    }

    #[tokio::test]
    async fn test_excluded_domains_never_reach_links() {
        let hits = vec![
            hit(1, "www.amazon.co.jp"),
            hit(2, "kao.co.jp"),
            hit(3, "item.rakuten.co.jp"),
            hit(4, "a.example"),
            hit(5, "b.example"),
        ];
        let searcher = MockWebSearcher::new().with_results("q", hits);
        let retriever = EvidenceRetriever::new(Arc::new(searcher), &config());
        let exclusions = ExclusionList::from_domains(["amazon.co.jp", "rakuten.co.jp"]);

        let evidence = retriever.retrieve("q", &exclusions).await;

        assert_eq!(
            evidence.source_links,
            vec![
                "https://kao.co.jp/item/2",
                "https://a.example/item/4",
                "https://b.example/item/5"
            ]
        );
        assert!(!evidence.summary.contains("amazon"));
        assert!(!evidence.summary.contains("rakuten"));
    }

    #[tokio::test]
    async fn test_at_most_three_links() {
        let hits = (1..=5).map(|n| hit(n, "a.example")).collect();
        let searcher = MockWebSearcher::new().with_results("q", hits);
        let retriever = EvidenceRetriever::new(Arc::new(searcher), &config());

        let evidence = retriever.retrieve("q", &ExclusionList::new()).await;
        assert_eq!(evidence.source_links.len(), 3);
        assert_eq!(evidence.source_links[0], "https://a.example/item/1");
    }

    #[tokio::test]
    async fn test_transient_failure_then_success() {
        let searcher = MockWebSearcher::new()
            .with_error(SearchError::Timeout)
            .with_results("q", vec![hit(1, "a.example")]);
        let retriever = EvidenceRetriever::new(Arc::new(searcher.clone()), &config());

        let evidence = retriever.retrieve("q", &ExclusionList::new()).await;
        assert!(!evidence.is_error());
        assert_eq!(searcher.queries().len(), 2);
    }

    #[tokio::test]
    async fn test_exhausted_retries_yield_sentinel() {
        let searcher = MockWebSearcher::new()
            .with_error(SearchError::Timeout)
            .with_error(SearchError::Timeout)
            .with_error(SearchError::Timeout);
        let retriever = EvidenceRetriever::new(Arc::new(searcher.clone()), &config());

        let evidence = retriever.retrieve("q", &ExclusionList::new()).await;
        assert!(evidence.is_error());
        assert!(evidence.source_links.is_empty());
        assert_eq!(searcher.queries().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_query_is_not_searched() {
        let searcher = MockWebSearcher::new();
        let retriever = EvidenceRetriever::new(Arc::new(searcher.clone()), &config());

        let evidence = retriever.retrieve("  ", &ExclusionList::new()).await;
        assert!(evidence.is_error());
        assert!(searcher.queries().is_empty());
    }

    #[tokio::test]
    async fn test_summary_respects_char_budget() {
        let long = SearchHit::new("t".repeat(50), "s".repeat(50), "https://a.example");
        let searcher = MockWebSearcher::new().with_results("q", vec![long]);
        let retriever = EvidenceRetriever::new(
            Arc::new(searcher),
            &config().with_evidence_char_budget(20),
        );

        let evidence = retriever.retrieve("q", &ExclusionList::new()).await;
        assert_eq!(evidence.summary.chars().count(), 20);
        assert_eq!(evidence.source_links, vec!["https://a.example"]);
    }
}
