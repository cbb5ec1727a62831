//! Typed errors for the enrichment pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`). Errors that come from
//! an external call expose `is_transient()` so the retry policy can decide
//! whether another attempt is worthwhile.

use openai_client::OpenAIError;
use thiserror::Error;

/// Errors from the search provider.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Connection failed, DNS, reset
    #[error("search network error: {0}")]
    Network(String),

    /// Request exceeded the per-call timeout
    #[error("search request timed out")]
    Timeout,

    /// Non-2xx response from the provider
    #[error("search API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("malformed search response: {0}")]
    Malformed(String),
}

impl SearchError {
    pub fn is_transient(&self) -> bool {
        match self {
            SearchError::Network(_) | SearchError::Timeout => true,
            SearchError::Api { status, .. } => is_transient_status(*status),
            SearchError::Malformed(_) => false,
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SearchError::Timeout
        } else if err.is_decode() {
            SearchError::Malformed(err.to_string())
        } else {
            SearchError::Network(err.to_string())
        }
    }
}

/// Errors from the language-model provider.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("model provider error: {0}")]
    Provider(#[from] OpenAIError),

    /// Provider answered but the answer was blank
    #[error("model returned an empty answer")]
    EmptyAnswer,
}

impl InferenceError {
    pub fn is_transient(&self) -> bool {
        match self {
            InferenceError::Provider(e) => e.is_transient(),
            InferenceError::EmptyAnswer => true,
        }
    }
}

/// Errors from the remote exclusion-list store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("store payload error: {0}")]
    Payload(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors reading or writing CSV tables.
#[derive(Debug, Error)]
pub enum TableError {
    /// Required columns absent from the header row
    #[error("missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can abort an enrichment operation as a whole.
///
/// Per-row failures never surface here; they are collected into the
/// batch's error table instead.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("table error: {0}")]
    Table(#[from] TableError),

    #[error("search error: {0}")]
    Search(#[from] SearchError),

    #[error("inference error: {0}")]
    Inference(#[from] InferenceError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Rate limits and server-side failures are worth retrying.
pub(crate) fn is_transient_status(status: u16) -> bool {
    status == 429 || status >= 500
}

/// Result type alias for enrichment operations.
pub type Result<T> = std::result::Result<T, EnrichError>;
