// src/config.rs
// =============================================================================
// Process configuration.
//
// AppConfig: what to crawl (seed URL and depth). Read from the URL and DEPTH
// environment variables, overridable on the command line.
// FetchConfig: how to fetch (allowlist, optional timeout, user agent).
// =============================================================================

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::crawl::DomainAllowlist;

pub const DEFAULT_URL: &str = "https://example.com";
pub const DEFAULT_DEPTH: usize = 2;

/// Seed URL and crawl depth for an index build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub url: String,
    pub depth: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            depth: DEFAULT_DEPTH,
        }
    }
}

impl AppConfig {
    /// Reads `URL` and `DEPTH` from the environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    // Missing values fall back to the defaults; an unparseable DEPTH is
    // logged and ignored.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("URL") {
            config.url = url;
        }

        if let Some(depth) = lookup("DEPTH") {
            match depth.trim().parse() {
                Ok(depth) => config.depth = depth,
                Err(e) => {
                    tracing::warn!(%depth, error = %e, "ignoring invalid DEPTH");
                }
            }
        }

        config
    }
}

/// Settings for the HTTP page source.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub allowlist: DomainAllowlist,
    /// Per-request timeout; None waits indefinitely
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            allowlist: DomainAllowlist::default(),
            timeout: None,
            user_agent: format!("trie-search/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
