//! Brand and manufacturer enrichment for product catalog tables.
//!
//! Each catalog row is turned into a search query; web search results
//! become evidence; a language model infers the brand and manufacturer
//! from that evidence; the answer is parsed into fields and checked
//! against a user-supplied brand reference table.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use brand_enrichment::{
//!     BatchOrchestrator, EnrichmentSession, GitHubExclusionStore, GoogleSearcher,
//!     PipelineConfig, RepoLocation, SearchCredentials, table_io,
//! };
//! use openai_client::OpenAIClient;
//!
//! let config = PipelineConfig::default();
//! let searcher = GoogleSearcher::new(SearchCredentials::new(api_key, engine_id))?;
//! let model = OpenAIClient::from_env()?;
//! let orchestrator = BatchOrchestrator::new(Arc::new(searcher), Arc::new(model), &config);
//!
//! let store = GitHubExclusionStore::new(token, RepoLocation::new("acme", "config", "main", "exclude_domains.csv"))?;
//! let mut session = EnrichmentSession::new(orchestrator, Arc::new(store));
//! session.load_reference(std::fs::File::open("reference.csv")?)?;
//!
//! let table = table_io::read_table(std::fs::File::open("products.csv")?)?;
//! let outcome = session.run(&table, |p| println!("{:.0}%", p.fraction() * 100.0)).await?;
//! table_io::write_output(std::fs::File::create("out.csv")?, outcome)?;
//! ```
//!
//! # Modules
//!
//! - [`pipeline`] - Query building, retrieval, inference, parsing, reconciliation, orchestration
//! - [`traits`] - Seams to external services (search, language model, exclusion store)
//! - [`stores`] - Exclusion store implementations (GitHub, in-memory)
//! - [`types`] - Rows, evidence, answers, reference entries, outcomes
//! - [`table_io`] - CSV input/output
//! - [`session`] - Per-operator session state
//! - [`testing`] - Mock implementations for testing

pub mod config;
pub mod credentials;
pub mod error;
pub mod pipeline;
pub mod retry;
pub mod session;
pub mod stores;
pub mod table_io;
pub mod testing;
pub mod traits;
pub mod types;

pub use config::PipelineConfig;
pub use credentials::{SearchCredentials, SecretString};
pub use error::{EnrichError, InferenceError, Result, SearchError, StoreError, TableError};
pub use pipeline::{
    build_query, parse_answer, reconcile, BatchOrchestrator, EvidenceRetriever, InferenceClient,
};
pub use retry::{RetryPolicy, Retryable};
pub use session::EnrichmentSession;
pub use stores::{GitHubExclusionStore, MemoryExclusionStore, RepoLocation};
pub use traits::{ExclusionStore, GoogleSearcher, LanguageModel, PublishOutcome, WebSearcher};
pub use types::{
    answer::{ParsedFields, NO_MATCH},
    evidence::{EvidenceResult, SearchHit, ERROR_MARKER},
    exclusion::ExclusionList,
    log::{BatchLog, LogEntry},
    outcome::{BatchOutcome, Progress, ReconciliationStatus, RowRecord, RowResult},
    reference::{BrandEntry, BrandReference},
    table::{columns, InputRow, Table},
};
