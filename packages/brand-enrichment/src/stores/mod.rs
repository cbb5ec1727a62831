pub mod github;
pub mod memory;

pub use github::{GitHubExclusionStore, RepoLocation};
pub use memory::MemoryExclusionStore;
