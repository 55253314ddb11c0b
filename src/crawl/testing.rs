// src/crawl/testing.rs
// In-memory site used by the crawler, builder and state tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::html;
use super::source::PageSource;
use crate::error::FetchError;

#[derive(Default)]
pub(crate) struct FakeSite {
    pages: HashMap<String, String>,
    fetched: Mutex<Vec<String>>,
    link_extractions: AtomicUsize,
}

impl FakeSite {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// Every URL passed to fetch_page, in call order.
    pub(crate) fn fetches(&self) -> Vec<String> {
        self.fetched.lock().clone()
    }

    pub(crate) fn fetch_count(&self, url: &str) -> usize {
        self.fetched.lock().iter().filter(|u| *u == url).count()
    }

    pub(crate) fn link_extractions(&self) -> usize {
        self.link_extractions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageSource for FakeSite {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        self.fetched.lock().push(url.to_string());
        // Give sibling branches a chance to interleave
        tokio::task::yield_now().await;

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: reqwest::StatusCode::NOT_FOUND,
            })
    }

    fn extract_links(&self, html: &str, base_url: &str) -> Vec<String> {
        self.link_extractions.fetch_add(1, Ordering::SeqCst);
        html::extract_links(html, base_url)
    }
}
