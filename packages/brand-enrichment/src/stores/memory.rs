//! In-memory exclusion store for tests and offline runs.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::error::StoreError;
use crate::traits::store::{ExclusionStore, PublishOutcome};

/// Holds the list content in memory. Clones share state.
#[derive(Clone, Default)]
pub struct MemoryExclusionStore {
    content: Arc<RwLock<Option<String>>>,
    fail_fetch: Arc<RwLock<bool>>,
    reject_status: Arc<RwLock<Option<u16>>>,
    fetch_calls: Arc<RwLock<usize>>,
}

impl MemoryExclusionStore {
    /// Store with no file yet; `fetch` fails until something is published.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(content: impl Into<String>) -> Self {
        let store = Self::new();
        *store.content.write().unwrap() = Some(content.into());
        store
    }

    /// Make every `fetch` fail.
    pub fn failing_fetch(self) -> Self {
        *self.fail_fetch.write().unwrap() = true;
        self
    }

    /// Make every `publish` answer with this status and leave content unchanged.
    pub fn rejecting_publish(self, status: u16) -> Self {
        *self.reject_status.write().unwrap() = Some(status);
        self
    }

    pub fn content(&self) -> Option<String> {
        self.content.read().unwrap().clone()
    }

    pub fn fetch_calls(&self) -> usize {
        *self.fetch_calls.read().unwrap()
    }
}

#[async_trait]
impl ExclusionStore for MemoryExclusionStore {
    async fn fetch(&self) -> Result<String, StoreError> {
        *self.fetch_calls.write().unwrap() += 1;

        if *self.fail_fetch.read().unwrap() {
            return Err(StoreError::Api {
                status: 503,
                body: "store unavailable".to_string(),
            });
        }

        self.content.read().unwrap().clone().ok_or_else(|| StoreError::Api {
            status: 404,
            body: "not found".to_string(),
        })
    }

    async fn publish(&self, content: &str) -> Result<PublishOutcome, StoreError> {
        if let Some(status) = *self.reject_status.read().unwrap() {
            return Ok(PublishOutcome::new(status, "rejected"));
        }

        let created = self.content.read().unwrap().is_none();
        *self.content.write().unwrap() = Some(content.to_string());
        Ok(PublishOutcome::new(if created { 201 } else { 200 }, "ok"))
    }
}
