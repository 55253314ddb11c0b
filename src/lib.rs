// src/lib.rs
// =============================================================================
// trie-search: crawl a website into a searchable in-memory word index.
//
// Modules:
// - index: prefix tree with exact, wildcard and prefix lookups
// - crawl: depth-bounded concurrent crawler and its page source
// - builder: folds crawl output into a word -> pages index
// - state: build status and query helpers for a serving layer
// - config: seed URL / depth and fetch settings
// - error: error types for every layer
// =============================================================================

pub mod builder;
pub mod config;
pub mod crawl;
pub mod error;
pub mod index;
pub mod state;

pub use builder::{build_index, build_index_from, WordIndex};
pub use config::{AppConfig, FetchConfig};
pub use error::{BuildError, FetchError, IndexError};
pub use index::{KeyValueIndex, Trie};
pub use state::{AppState, BuildStatus, SearchHit};
