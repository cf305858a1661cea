#![deny(unsafe_code)]

pub mod cache;
pub mod coverage;
pub mod engine;
pub mod merge;
pub mod store;

pub use cache::{DEFAULT_QUERY_CACHE_CAPACITY, QueryCache};
pub use coverage::aggregate;
pub use engine::ReconEngine;
pub use merge::{MergedTree, merge};
pub use store::{CurriculumStore, FileStore, MemoryStore, StoreError, StoreResult};
