//! Session state: cached exclusion list, loaded reference table, last batch.
//!
//! One session corresponds to one operator working through one or more
//! batches. Nothing here is global; dropping the session drops everything.

use std::io::Read;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{Result, StoreError, TableError};
use crate::pipeline::BatchOrchestrator;
use crate::table_io;
use crate::traits::store::{ExclusionStore, PublishOutcome};
use crate::types::exclusion::ExclusionList;
use crate::types::outcome::{BatchOutcome, Progress};
use crate::types::reference::BrandReference;
use crate::types::table::Table;

pub struct EnrichmentSession {
    orchestrator: BatchOrchestrator,
    store: Arc<dyn ExclusionStore>,
    exclusions: Option<ExclusionList>,
    load_warning: Option<String>,
    reference: BrandReference,
    last_outcome: Option<BatchOutcome>,
}

impl EnrichmentSession {
    pub fn new(orchestrator: BatchOrchestrator, store: Arc<dyn ExclusionStore>) -> Self {
        Self {
            orchestrator,
            store,
            exclusions: None,
            load_warning: None,
            reference: BrandReference::new(),
            last_outcome: None,
        }
    }

    /// The exclusion list, fetched from the store on first use.
    ///
    /// A failed fetch is not fatal: the list is empty, the failure is kept
    /// in [`load_warning`](Self::load_warning), and the next call tries
    /// the store again.
    pub async fn exclusions(&mut self) -> ExclusionList {
        if let Some(list) = &self.exclusions {
            return list.clone();
        }

        match self.fetch_exclusions().await {
            Ok(list) => {
                info!(domains = list.len(), "exclusion list loaded");
                self.load_warning = None;
                self.exclusions = Some(list.clone());
                list
            }
            Err(err) => {
                warn!(error = %err, "exclusion list unavailable, continuing without it");
                self.load_warning = Some(format!("exclusion list unavailable: {err}"));
                ExclusionList::new()
            }
        }
    }

    async fn fetch_exclusions(&self) -> std::result::Result<ExclusionList, StoreError> {
        let content = self.store.fetch().await?;
        ExclusionList::from_csv(&content)
    }

    /// Warning from the last failed exclusion load, if any.
    pub fn load_warning(&self) -> Option<&str> {
        self.load_warning.as_deref()
    }

    /// Publish new exclusion content. The cached list is dropped only when
    /// the store accepts the update.
    pub async fn publish_exclusions(
        &mut self,
        content: &str,
    ) -> std::result::Result<PublishOutcome, StoreError> {
        let outcome = self.store.publish(content).await?;
        if outcome.is_success() {
            info!(status = outcome.status, "exclusion list published, cache invalidated");
            self.exclusions = None;
        } else {
            warn!(status = outcome.status, body = %outcome.body, "exclusion list publish rejected");
        }
        Ok(outcome)
    }

    /// Replace the reference table from CSV.
    pub fn load_reference<R: Read>(
        &mut self,
        reader: R,
    ) -> std::result::Result<&BrandReference, TableError> {
        let reference = table_io::read_reference(reader)?;
        info!(brands = reference.len(), "reference table loaded");
        self.reference = reference;
        Ok(&self.reference)
    }

    pub fn set_reference(&mut self, reference: BrandReference) {
        self.reference = reference;
    }

    pub fn reference(&self) -> &BrandReference {
        &self.reference
    }

    /// Run a batch with the session's reference table and exclusion list.
    pub async fn run<F>(&mut self, table: &Table, on_progress: F) -> Result<&BatchOutcome>
    where
        F: FnMut(Progress),
    {
        let exclusions = self.exclusions().await;
        let outcome = self
            .orchestrator
            .run(table, &self.reference, &exclusions, on_progress)
            .await?;
        Ok(self.last_outcome.insert(outcome))
    }

    pub fn last_outcome(&self) -> Option<&BatchOutcome> {
        self.last_outcome.as_ref()
    }

    /// Discard the last batch. Cached exclusions and the reference stay.
    pub fn reset(&mut self) {
        self.last_outcome = None;
    }

    /// Discard everything, including the cached exclusion list and the
    /// reference table.
    pub fn reset_all(&mut self) {
        self.reset();
        self.exclusions = None;
        self.load_warning = None;
        self.reference = BrandReference::new();
    }
}
