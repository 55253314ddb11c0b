// src/state.rs
// =============================================================================
// Application state shared between the query side and background rebuilds.
//
// Status transitions:
//   Idle -> Building -> Ready
//                    -> Failed
//   Ready / Failed -> Building (rebuild)
//
// Only one build runs at a time. Queries keep using the last good index while
// a rebuild is running, and after a failed one.
// =============================================================================

use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tokio::task::JoinHandle;

use crate::builder::{build_index_from, WordIndex};
use crate::config::{AppConfig, FetchConfig};
use crate::crawl::{HttpSource, PageSource};
use crate::error::BuildError;

/// Maximum number of autocomplete suggestions returned.
pub const AUTOCOMPLETE_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BuildStatus {
    Idle,
    Building { url: String, depth: usize },
    Ready { words: usize },
    Failed { error: String },
}

impl BuildStatus {
    pub fn is_building(&self) -> bool {
        matches!(self, BuildStatus::Building { .. })
    }

    /// Human-readable status line.
    pub fn message(&self) -> String {
        match self {
            BuildStatus::Idle => "Ready".to_string(),
            BuildStatus::Building { url, depth } => {
                format!("Crawling {} (Depth {})...", url, depth)
            }
            BuildStatus::Ready { .. } => "Index built successfully.".to_string(),
            BuildStatus::Failed { error } => format!("Error: {}", error),
        }
    }
}

/// One wildcard search match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub word: String,
    pub urls: Vec<String>,
}

/// Snapshot of the configuration and build status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub config: AppConfig,
    pub is_building: bool,
    pub status: String,
}

#[derive(Debug)]
struct Inner {
    config: AppConfig,
    status: BuildStatus,
    index: Option<Arc<WordIndex>>,
}

#[derive(Debug)]
pub struct AppState {
    inner: RwLock<Inner>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            inner: RwLock::new(Inner {
                config,
                status: BuildStatus::Idle,
                index: None,
            }),
        }
    }

    pub fn config(&self) -> AppConfig {
        self.inner.read().config.clone()
    }

    pub fn status(&self) -> BuildStatus {
        self.inner.read().status.clone()
    }

    /// The last successfully built index, if any.
    pub fn index(&self) -> Option<Arc<WordIndex>> {
        self.inner.read().index.clone()
    }

    pub fn snapshot(&self) -> StatusReport {
        let inner = self.inner.read();
        StatusReport {
            config: inner.config.clone(),
            is_building: inner.status.is_building(),
            status: inner.status.message(),
        }
    }

    /// Moves to `Building` with `config`, unless a build is already running.
    pub fn begin_build(&self, config: AppConfig) -> Result<(), BuildError> {
        let mut inner = self.inner.write();
        if inner.status.is_building() {
            return Err(BuildError::AlreadyBuilding);
        }

        inner.status = BuildStatus::Building {
            url: config.url.clone(),
            depth: config.depth,
        };
        inner.config = config;
        tracing::info!(status = %inner.status.message(), "build started");
        Ok(())
    }

    /// Records the outcome of the running build.
    ///
    /// A failed build keeps serving the previous index.
    pub fn finish_build(&self, result: Result<WordIndex, BuildError>) {
        let mut inner = self.inner.write();
        match result {
            Ok(index) => {
                inner.status = BuildStatus::Ready { words: index.len() };
                inner.index = Some(Arc::new(index));
                tracing::info!(status = %inner.status.message(), "build finished");
            }
            Err(e) => {
                inner.status = BuildStatus::Failed {
                    error: e.to_string(),
                };
                tracing::error!(status = %inner.status.message(), "build failed");
            }
        }
    }

    /// Starts a rebuild over HTTPS on a background task.
    pub fn spawn_rebuild(
        self: &Arc<Self>,
        config: AppConfig,
        fetch: FetchConfig,
    ) -> Result<JoinHandle<()>, BuildError> {
        self.begin_build(config.clone())?;

        Ok(self.spawn_build(async move {
            let source = HttpSource::new(&fetch)?;
            Ok(build_index_from(&source, &config.url, config.depth).await)
        }))
    }

    /// Starts a rebuild with a caller-supplied page source.
    pub fn spawn_rebuild_with<S>(
        self: &Arc<Self>,
        config: AppConfig,
        source: Arc<S>,
    ) -> Result<JoinHandle<()>, BuildError>
    where
        S: PageSource + 'static,
    {
        self.begin_build(config.clone())?;

        Ok(self.spawn_build(async move {
            Ok(build_index_from(source.as_ref(), &config.url, config.depth).await)
        }))
    }

    // Runs `build` on its own task so a panic inside it still ends in
    // finish_build, leaving the state out of Building.
    fn spawn_build<F>(self: &Arc<Self>, build: F) -> JoinHandle<()>
    where
        F: Future<Output = Result<WordIndex, BuildError>> + Send + 'static,
    {
        let state = Arc::clone(self);
        tokio::spawn(async move {
            let result = match tokio::spawn(build).await {
                Ok(result) => result,
                Err(e) => Err(BuildError::Aborted(e.to_string())),
            };
            state.finish_build(result);
        })
    }

    /// Wildcard search over the current index, sorted by word.
    ///
    /// An empty pattern, or no index yet, gives no results.
    pub fn search(&self, pattern: &str) -> Vec<SearchHit> {
        let Some(index) = self.index().filter(|_| !pattern.is_empty()) else {
            return Vec::new();
        };

        let mut hits: Vec<SearchHit> = index
            .wildcard_search(pattern)
            .map(|(word, urls)| SearchHit {
                word,
                urls: sorted_urls(urls),
            })
            .collect();
        hits.sort_by(|a, b| a.word.cmp(&b.word));
        hits
    }

    /// Words starting with `prefix`, sorted, at most [`AUTOCOMPLETE_LIMIT`].
    pub fn autocomplete(&self, prefix: &str) -> Vec<String> {
        let Some(index) = self.index().filter(|_| !prefix.is_empty()) else {
            return Vec::new();
        };

        let mut words = index.autocomplete(prefix);
        words.sort();
        words.truncate(AUTOCOMPLETE_LIMIT);
        words
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

fn sorted_urls(urls: &BTreeSet<String>) -> Vec<String> {
    // BTreeSet iterates in order already
    urls.iter().cloned().collect()
}
