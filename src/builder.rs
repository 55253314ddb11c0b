// src/builder.rs
// =============================================================================
// Turns a crawl into a word index.
//
// The crawler produces page -> words. The builder inverts that into
// word -> set of pages, stored in a Trie so it can be searched by wildcard
// and by prefix. Set union doesn't care about order, so the index is the same
// whichever branch of the crawl finished first.
// =============================================================================

use std::collections::BTreeSet;

use tracing::info;

use crate::config::FetchConfig;
use crate::crawl::{crawl_site, CrawlResult, HttpSource, PageSource};
use crate::error::BuildError;
use crate::index::Trie;

/// Word -> URLs of the pages the word appears on.
pub type WordIndex = Trie<BTreeSet<String>>;

/// Crawls `seed_url` over HTTPS and indexes every word found.
pub async fn build_index(seed_url: &str, max_depth: usize) -> Result<WordIndex, BuildError> {
    build_index_with_config(seed_url, max_depth, &FetchConfig::default()).await
}

/// Like [`build_index`], with explicit fetch settings.
///
/// The HTTP client lives exactly as long as this call.
pub async fn build_index_with_config(
    seed_url: &str,
    max_depth: usize,
    config: &FetchConfig,
) -> Result<WordIndex, BuildError> {
    let source = HttpSource::new(config)?;
    Ok(build_index_from(&source, seed_url, max_depth).await)
}

/// Blocking wrapper around [`build_index_with_config`] for callers outside
/// a tokio runtime.
pub fn build_index_blocking(
    seed_url: &str,
    max_depth: usize,
    config: &FetchConfig,
) -> Result<WordIndex, BuildError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(BuildError::Runtime)?;
    runtime.block_on(build_index_with_config(seed_url, max_depth, config))
}

/// Crawls with any page source and indexes the result.
///
/// A crawl that fetched nothing gives an empty index, not an error.
pub async fn build_index_from<S>(source: &S, seed_url: &str, max_depth: usize) -> WordIndex
where
    S: PageSource + ?Sized,
{
    info!(seed_url, max_depth, "building index");
    let pages = crawl_site(seed_url, max_depth, source).await;
    let index = index_pages(pages);
    info!(seed_url, words = index.len(), "index built");
    index
}

/// Inverts page -> words into word -> pages.
pub fn index_pages(pages: CrawlResult) -> WordIndex {
    let mut index = WordIndex::new();

    for (url, words) in pages {
        for word in words {
            match index.get_mut(&word) {
                Ok(urls) => {
                    urls.insert(url.clone());
                }
                Err(_) => {
                    index.set(&word, BTreeSet::from([url.clone()]));
                }
            }
        }
    }

    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::testing::FakeSite;

    fn urls(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|u| u.to_string()).collect()
    }

    #[test]
    fn test_index_pages_inverts_mapping() {
        let pages = CrawlResult::from([
            (
                "https://a.test/".to_string(),
                vec!["rust".to_string(), "trie".to_string(), "rust".to_string()],
            ),
            ("https://b.test/".to_string(), vec!["Rust".to_string()]),
        ]);

        let index = index_pages(pages);

        assert_eq!(index.len(), 2);
        assert_eq!(
            index.get("rust"),
            Ok(&urls(&["https://a.test/", "https://b.test/"]))
        );
        assert_eq!(index.get("trie"), Ok(&urls(&["https://a.test/"])));
    }

    #[test]
    fn test_index_pages_empty() {
        assert!(index_pages(CrawlResult::new()).is_empty());
    }

    #[tokio::test]
    async fn test_build_index_from_site() {
        let site = FakeSite::new()
            .page(
                "https://a.test/",
                r#"<p>cat dog</p> <a href="https://b.test/">cot</a>"#,
            )
            .page("https://b.test/", "<p>cat cut</p>");

        let index = build_index_from(&site, "https://a.test/", 1).await;

        assert_eq!(index.get("cat"), Ok(&urls(&["https://a.test/", "https://b.test/"])));
        assert_eq!(index.get("cut"), Ok(&urls(&["https://b.test/"])));

        let mut matches: Vec<String> = index.wildcard_search("c*t").map(|(w, _)| w).collect();
        matches.sort();
        assert_eq!(matches, vec!["cat", "cot", "cut"]);
    }

    #[tokio::test]
    async fn test_unreachable_seed_gives_empty_index() {
        let site = FakeSite::new();
        let index = build_index_from(&site, "https://down.test/", 2).await;
        assert!(index.is_empty());
    }

    #[tokio::test]
    async fn test_build_index_rejects_plain_http_seed() {
        // Refused before any request is made
        let index = build_index("http://example.com", 1).await.unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_build_index_blocking() {
        let index = build_index_blocking("ftp://example.com", 0, &FetchConfig::default()).unwrap();
        assert!(index.is_empty());
    }
}
