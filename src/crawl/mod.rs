// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Depth-bounded crawl starting from a seed URL
// - Concurrent fan-out: every followed link is crawled as its own future
// - At-most-once fetching per URL, even across concurrent branches
// - Domain allowlist restricting which links are followed
//
// Submodules:
// - source: the PageSource collaborator trait and its reqwest implementation
// - html: link and text extraction with scraper
// - tokenize: splitting page text into words
// - visited: the shared visited-URL set
// - crawler: the traversal itself
// =============================================================================

mod crawler;
mod html;
mod source;
mod tokenize;
mod visited;

#[cfg(test)]
pub(crate) mod testing;

pub use crawler::{crawl, crawl_site, CrawlResult};
pub use html::{extract_links, extract_text};
pub use source::{DomainAllowlist, HttpSource, PageSource, REQUIRED_SCHEME};
pub use tokenize::tokenize;
pub use visited::VisitedSet;
