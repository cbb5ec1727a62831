//! Testing utilities including mock implementations.
//!
//! These let the pipeline run end to end without network calls. Clones of
//! a mock share state, so a test can keep one handle for assertions and
//! hand another to the pipeline.

use async_trait::async_trait;
use openai_client::{ChatRequest, OpenAIError};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use crate::error::{InferenceError, SearchError};
use crate::traits::model::LanguageModel;
use crate::traits::searcher::WebSearcher;
use crate::types::evidence::SearchHit;

type SearchErrorFactory = Arc<dyn Fn() -> SearchError + Send + Sync>;

/// A mock web searcher.
///
/// Each call first takes the next queued error, if any; then a persistent
/// failure, if set; then the results registered for the exact query; then
/// the default results.
#[derive(Clone, Default)]
pub struct MockWebSearcher {
    results: Arc<RwLock<HashMap<String, Vec<SearchHit>>>>,
    default_results: Arc<RwLock<Vec<SearchHit>>>,
    queued_errors: Arc<RwLock<VecDeque<SearchError>>>,
    failure: Arc<RwLock<Option<SearchErrorFactory>>>,
    queries: Arc<RwLock<Vec<String>>>,
}

impl MockWebSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add results for an exact query.
    pub fn with_results(self, query: &str, hits: Vec<SearchHit>) -> Self {
        self.results.write().unwrap().insert(query.to_string(), hits);
        self
    }

    /// Results for any query without registered results.
    pub fn with_default_results(self, hits: Vec<SearchHit>) -> Self {
        *self.default_results.write().unwrap() = hits;
        self
    }

    /// Fail the next call with `error`. Queued errors are used in order.
    pub fn with_error(self, error: SearchError) -> Self {
        self.queued_errors.write().unwrap().push_back(error);
        self
    }

    /// Fail every call with an error built by `make`.
    pub fn failing_with(self, make: impl Fn() -> SearchError + Send + Sync + 'static) -> Self {
        *self.failure.write().unwrap() = Some(Arc::new(make));
        self
    }

    /// Every query received, one entry per call.
    pub fn queries(&self) -> Vec<String> {
        self.queries.read().unwrap().clone()
    }
}

#[async_trait]
impl WebSearcher for MockWebSearcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(
        &self,
        query: &str,
        limit: usize,
        _language: &str,
    ) -> Result<Vec<SearchHit>, SearchError> {
        self.queries.write().unwrap().push(query.to_string());

        if let Some(error) = self.queued_errors.write().unwrap().pop_front() {
            return Err(error);
        }
        if let Some(make) = self.failure.read().unwrap().as_ref() {
            return Err(make());
        }

        let mut hits = self
            .results
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_else(|| self.default_results.read().unwrap().clone());
        hits.truncate(limit);
        Ok(hits)
    }
}

/// A mock language model.
///
/// Each call first takes the next queued response, if any; then a
/// persistent failure, if set; then the first keyed answer whose key
/// appears in the user message; then the default answer. With nothing
/// configured the answer is blank, which is an [`InferenceError::EmptyAnswer`].
#[derive(Clone, Default)]
pub struct MockLanguageModel {
    queued: Arc<RwLock<VecDeque<Result<String, OpenAIError>>>>,
    keyed: Arc<RwLock<Vec<(String, String)>>>,
    default_answer: Arc<RwLock<Option<String>>>,
    fail_status: Arc<RwLock<Option<u16>>>,
    calls: Arc<RwLock<Vec<ChatRequest>>>,
}

impl MockLanguageModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the next call with `answer`.
    pub fn with_answer(self, answer: impl Into<String>) -> Self {
        self.queued.write().unwrap().push_back(Ok(answer.into()));
        self
    }

    /// Fail the next call with `error`.
    pub fn with_error(self, error: OpenAIError) -> Self {
        self.queued.write().unwrap().push_back(Err(error));
        self
    }

    /// Answer with `answer` whenever the user message contains `key`.
    pub fn with_answer_for(self, key: impl Into<String>, answer: impl Into<String>) -> Self {
        self.keyed.write().unwrap().push((key.into(), answer.into()));
        self
    }

    pub fn with_default_answer(self, answer: impl Into<String>) -> Self {
        *self.default_answer.write().unwrap() = Some(answer.into());
        self
    }

    /// Fail every call with an API error of this status.
    pub fn failing_with_status(self, status: u16) -> Self {
        *self.fail_status.write().unwrap() = Some(status);
        self
    }

    /// Every request received, one entry per call.
    pub fn calls(&self) -> Vec<ChatRequest> {
        self.calls.read().unwrap().clone()
    }

    fn answer_for(&self, request: &ChatRequest) -> String {
        let user_text: String = request
            .messages
            .iter()
            .filter(|m| m.role == "user")
            .map(|m| m.content.as_str())
            .collect();

        self.keyed
            .read()
            .unwrap()
            .iter()
            .find(|(key, _)| user_text.contains(key.as_str()))
            .map(|(_, answer)| answer.clone())
            .or_else(|| self.default_answer.read().unwrap().clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    async fn complete(&self, request: ChatRequest) -> Result<String, InferenceError> {
        self.calls.write().unwrap().push(request.clone());

        let answer = match self.queued.write().unwrap().pop_front() {
            Some(queued) => queued?,
            None => {
                if let Some(status) = *self.fail_status.read().unwrap() {
                    return Err(OpenAIError::Api {
                        status,
                        message: "mock failure".to_string(),
                    }
                    .into());
                }
                self.answer_for(&request)
            }
        };

        if answer.trim().is_empty() {
            return Err(InferenceError::EmptyAnswer);
        }
        Ok(answer)
    }
}
