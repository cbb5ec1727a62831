//! The per-row pipeline: query → evidence → inference → parse → reconcile.

pub mod infer;
pub mod orchestrator;
pub mod parse;
pub mod prompts;
pub mod query;
pub mod reconcile;
pub mod retrieve;

pub use infer::InferenceClient;
pub use orchestrator::BatchOrchestrator;
pub use parse::parse_answer;
pub use query::build_query;
pub use reconcile::reconcile;
pub use retrieve::EvidenceRetriever;
