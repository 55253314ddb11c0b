// src/crawl/crawler.rs
// =============================================================================
// Depth-bounded, deduplicating, concurrent site crawl.
//
// How it works:
// 1. Mark the URL visited (skip it if another branch already did)
// 2. Fetch the page; on failure this branch yields nothing
// 3. Record the page's words
// 4. If depth remains, crawl every new allowed link concurrently at depth - 1
// 5. Wait for all of them and merge their results (first writer wins)
//
// Depth N means "index this page, and if N > 0 follow its links at N - 1".
// A page reached at depth 0 is indexed but its links are never looked at.
//
// Unlike a breadth-first queue, every branch runs as its own future and the
// only state they share is the VisitedSet.
// =============================================================================

use std::collections::HashMap;

use futures::future::{join_all, BoxFuture, FutureExt};
use tracing::{debug, info, warn};

use super::source::PageSource;
use super::tokenize::tokenize;
use super::visited::VisitedSet;

/// Page URL -> words on that page, in order of appearance.
pub type CrawlResult = HashMap<String, Vec<String>>;

/// Crawls from `start_url` with a fresh visited set.
pub async fn crawl_site<S>(start_url: &str, max_depth: usize, source: &S) -> CrawlResult
where
    S: PageSource + ?Sized,
{
    let visited = VisitedSet::new();
    let result = crawl(start_url, max_depth, source, &visited).await;
    info!(
        start_url,
        max_depth,
        pages = result.len(),
        visited = visited.len(),
        "crawl finished"
    );
    result
}

/// Crawls `start_url` and everything reachable within `max_depth` hops.
///
/// `visited` is shared by every branch of one crawl; a URL already in it is
/// neither fetched nor reported again. Fetch failures only empty the branch
/// they happen in.
pub fn crawl<'a, S>(
    start_url: &'a str,
    max_depth: usize,
    source: &'a S,
    visited: &'a VisitedSet,
) -> BoxFuture<'a, CrawlResult>
where
    S: PageSource + ?Sized,
{
    async move {
        // Must happen before the fetch yields, or siblings could fetch it too
        if !visited.mark(start_url) {
            debug!(url = start_url, "already visited");
            return CrawlResult::new();
        }

        let html = match source.fetch_page(start_url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(url = start_url, error = %e, "failed to fetch page");
                return CrawlResult::new();
            }
        };

        let words = tokenize(&source.extract_text(&html));
        info!(url = start_url, depth = max_depth, words = words.len(), "crawled");

        let mut result = CrawlResult::from([(start_url.to_string(), words)]);
        if max_depth == 0 {
            return result;
        }

        let links: Vec<String> = source
            .extract_links(&html, start_url)
            .into_iter()
            .filter(|link| source.allows(link) && !visited.contains(link))
            .collect();
        drop(html);

        if !links.is_empty() {
            debug!(url = start_url, links = links.len(), "following links");
            let sub_results = join_all(
                links
                    .iter()
                    .map(|link| crawl(link, max_depth - 1, source, visited)),
            )
            .await;
            merge_results(&mut result, sub_results);
        }

        result
    }
    .boxed()
}

// Folds sub-crawl results into `main`, never replacing a URL already there.
fn merge_results(main: &mut CrawlResult, sub_results: Vec<CrawlResult>) {
    for sub_result in sub_results {
        for (url, words) in sub_result {
            main.entry(url).or_insert(words);
        }
    }
}
