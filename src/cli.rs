// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every subcommand crawls the site first, then works on the fresh index:
// - index: print a summary (or the whole index as JSON)
// - search: wildcard search, '*' matches any one character
// - complete: words starting with a prefix
//
// --url and --depth fall back to the URL and DEPTH environment variables.
// =============================================================================

use std::time::Duration;

use clap::{Parser, Subcommand};

use trie_search::config::{AppConfig, FetchConfig, DEFAULT_DEPTH, DEFAULT_URL};
use trie_search::crawl::DomainAllowlist;

#[derive(Parser, Debug)]
#[command(
    name = "trie-search",
    version,
    about = "Crawl a website and search the words on it",
    long_about = "trie-search crawls a website from a seed URL up to a fixed link depth, \
                  indexes every word it finds, and answers wildcard and prefix queries."
)]
pub struct Cli {
    /// Seed URL to start crawling from (must be https://)
    #[arg(long, env = "URL", default_value = DEFAULT_URL, global = true)]
    pub url: String,

    /// Link depth to follow from the seed page
    ///
    /// Depth 0 = just the seed page
    /// Depth 1 = seed page + all pages it links to
    #[arg(long, env = "DEPTH", default_value_t = DEFAULT_DEPTH, global = true)]
    pub depth: usize,

    /// Per-request timeout in seconds (no timeout by default)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// URL prefix links must start with to be followed (repeatable)
    ///
    /// Defaults to any https:// URL
    #[arg(long = "allow", value_name = "PREFIX", global = true)]
    pub allow: Vec<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the index and print a summary
    ///
    /// Example: trie-search index --url https://example.com --depth 1
    Index {
        /// Print every word and its pages as JSON
        #[arg(long)]
        json: bool,
    },

    /// Wildcard search, e.g. "c*t"
    ///
    /// Example: trie-search search 'c*t'
    Search {
        /// Pattern; '*' matches any single character
        pattern: String,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Autocomplete a prefix (at most 10 words)
    ///
    /// Example: trie-search complete app
    Complete {
        prefix: String,

        /// Output results in JSON format instead of a list
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            url: self.url.clone(),
            depth: self.depth,
        }
    }

    pub fn fetch_config(&self) -> FetchConfig {
        let mut config = FetchConfig {
            timeout: self.timeout_secs.map(Duration::from_secs),
            ..FetchConfig::default()
        };
        if !self.allow.is_empty() {
            config.allowlist = DomainAllowlist::new(self.allow.iter().cloned());
        }
        config
    }
}
