pub mod model;
pub mod searcher;
pub mod store;

pub use model::LanguageModel;
pub use searcher::{GoogleSearcher, WebSearcher};
pub use store::{ExclusionStore, PublishOutcome};
