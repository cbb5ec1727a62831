//! Remote store for the shared exclusion-domain list.

use async_trait::async_trait;

use crate::error::StoreError;

/// Result of a publish: the store's status code and response body, shown
/// verbatim to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    pub status: u16,
    pub body: String,
}

impl PublishOutcome {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Versioned file store holding the exclusion list as CSV text.
#[async_trait]
pub trait ExclusionStore: Send + Sync {
    /// Current file content.
    async fn fetch(&self) -> Result<String, StoreError>;

    /// Replace the file content. A rejection from the store is reported in
    /// the outcome, not as an error.
    async fn publish(&self, content: &str) -> Result<PublishOutcome, StoreError>;
}
