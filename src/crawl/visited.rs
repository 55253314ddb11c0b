// src/crawl/visited.rs
// =============================================================================
// The set of URLs already fetched (or being fetched) during one crawl.
//
// One VisitedSet is created per top-level crawl and shared by reference with
// every concurrent branch. mark() does check-and-insert under a single lock,
// so two branches racing on the same URL cannot both win.
// =============================================================================

use parking_lot::Mutex;
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: Mutex<HashSet<String>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `url` as visited.
    ///
    /// Returns `true` if the caller is the first to mark it and should fetch
    /// it, `false` if it was already marked.
    pub fn mark(&self, url: &str) -> bool {
        let mut urls = self.urls.lock();
        if urls.contains(url) {
            return false;
        }
        urls.insert(url.to_string())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.lock().contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_mark_is_first_wins() {
        let visited = VisitedSet::new();
        assert!(visited.mark("https://example.com"));
        assert!(!visited.mark("https://example.com"));
        assert!(visited.contains("https://example.com"));
        assert!(!visited.contains("https://example.com/other"));
        assert_eq!(visited.len(), 1);
    }

    #[test]
    fn test_mark_across_threads() {
        let visited = Arc::new(VisitedSet::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let visited = Arc::clone(&visited);
                std::thread::spawn(move || {
                    (0..100)
                        .filter(|i| visited.mark(&format!("https://example.com/{i}")))
                        .count()
                })
            })
            .collect();

        let winners: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(winners, 100);
        assert_eq!(visited.len(), 100);
    }
}
