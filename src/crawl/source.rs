// src/crawl/source.rs
// =============================================================================
// Where the crawler gets its pages from.
//
// PageSource bundles the three primitives the crawler needs:
// - fetch_page: download the HTML of one URL (async, may fail)
// - extract_links: absolute link targets on a page
// - extract_text: visible text on a page
// plus allows(), the policy deciding which discovered links may be followed.
//
// HttpSource is the real implementation on top of reqwest. Tests swap in
// in-memory sites through the same trait.
// =============================================================================

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use super::html;
use crate::config::FetchConfig;
use crate::error::{BuildError, FetchError};

/// The only scheme a page may be fetched over.
pub const REQUIRED_SCHEME: &str = "https://";

/// Prefix allowlist restricting which URLs may be fetched or followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainAllowlist {
    prefixes: Vec<String>,
}

impl DomainAllowlist {
    /// Builds an allowlist from URL prefixes such as `https://docs.rs/`.
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allows(&self, url: &str) -> bool {
        self.prefixes.iter().any(|prefix| url.starts_with(prefix.as_str()))
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

impl Default for DomainAllowlist {
    // Any HTTPS host
    fn default() -> Self {
        Self::new([REQUIRED_SCHEME])
    }
}

/// Collaborator supplying pages to the crawler.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Returns the HTML of `url`.
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError>;

    /// Returns every link on the page, resolved against `base_url`.
    fn extract_links(&self, html: &str, base_url: &str) -> Vec<String> {
        html::extract_links(html, base_url)
    }

    /// Returns the page's visible text.
    fn extract_text(&self, html: &str) -> String {
        html::extract_text(html)
    }

    /// Whether a discovered link may be followed.
    fn allows(&self, url: &str) -> bool {
        DomainAllowlist::default().allows(url)
    }
}

/// Fetches pages over HTTPS with a shared reqwest client.
///
/// The client (and its connection pool) is shared by every branch of a crawl
/// and dropped when the source is.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    allowlist: DomainAllowlist,
}

impl HttpSource {
    pub fn new(config: &FetchConfig) -> Result<Self, BuildError> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        // No timeout unless asked for: a stuck fetch stalls its branch
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(BuildError::Client)?;

        Ok(Self {
            client,
            allowlist: config.allowlist.clone(),
        })
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        if !url.starts_with(REQUIRED_SCHEME) {
            return Err(FetchError::DisallowedScheme(url.to_string()));
        }
        if !self.allowlist.allows(url) {
            return Err(FetchError::DisallowedDomain(url.to_string()));
        }

        // reqwest follows redirects by default (up to 10 hops)
        let response = self.client.get(url).send().await?;
        check_status(url, response.status())?;

        Ok(response.text().await?)
    }

    fn allows(&self, url: &str) -> bool {
        self.allowlist.allows(url)
    }
}

// Anything outside 2xx is a failed fetch (redirects are already followed)
fn check_status(url: &str, status: StatusCode) -> Result<(), FetchError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(FetchError::Status {
            url: url.to_string(),
            status,
        })
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why async_trait?
//    - The crawler holds sources as &dyn PageSource or generics
//    - #[async_trait] turns async fn into a boxed Send future
//    - That keeps the trait object-safe and the futures spawnable
//
// 2. Why is the scheme checked before the allowlist?
//    - The allowlist can be widened by the user with --allow
//    - The https:// rule cannot: a plain http:// prefix in the allowlist still
//      never gets fetched
//
// 3. Why Client and not reqwest::get()?
//    - Client keeps a connection pool
//    - Cloning a Client is cheap (it's an Arc internally)
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use std::time::Duration;

    #[test]
    fn test_default_allowlist_is_any_https() {
        let allowlist = DomainAllowlist::default();
        assert!(allowlist.allows("https://example.com/page"));
        assert!(!allowlist.allows("http://example.com/page"));
        assert!(!allowlist.allows("mailto:test@example.com"));
    }

    #[test]
    fn test_custom_allowlist() {
        let allowlist = DomainAllowlist::new(["https://docs.example.com/", "https://example.org"]);
        assert!(allowlist.allows("https://docs.example.com/guide"));
        assert!(allowlist.allows("https://example.org/about"));
        assert!(!allowlist.allows("https://example.com/"));
        assert_eq!(allowlist.prefixes().len(), 2);
    }

    #[tokio::test]
    async fn test_http_url_is_rejected_without_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/page")
            .with_status(200)
            .with_body("<p>never served</p>")
            .expect(0)
            .create_async()
            .await;

        let source = HttpSource::new(&FetchConfig::default()).unwrap();
        // mockito serves plain http://
        let url = format!("{}/page", server.url());
        let result = source.fetch_page(&url).await;

        assert!(matches!(result, Err(FetchError::DisallowedScheme(u)) if u == url));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_allowlisted_http_prefix_still_needs_https() {
        let mut server = Server::new_async().await;
        let mock = server.mock("GET", "/").expect(0).create_async().await;

        let config = FetchConfig {
            allowlist: DomainAllowlist::new([server.url()]),
            ..FetchConfig::default()
        };
        let source = HttpSource::new(&config).unwrap();
        let result = source.fetch_page(&format!("{}/", server.url())).await;

        assert!(matches!(result, Err(FetchError::DisallowedScheme(_))));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        let source = HttpSource::new(&FetchConfig::default()).unwrap();
        // Nothing listens on port 1
        let result = source.fetch_page("https://127.0.0.1:1/").await;
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }

    #[test]
    fn test_non_success_status_is_status_error() {
        assert!(check_status("https://a.test/", StatusCode::OK).is_ok());
        assert!(check_status("https://a.test/", StatusCode::NO_CONTENT).is_ok());

        let failures = [
            StatusCode::NOT_FOUND,
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::FOUND,
        ];
        for code in failures {
            match check_status("https://a.test/missing", code) {
                Err(FetchError::Status { url, status }) => {
                    assert_eq!(url, "https://a.test/missing");
                    assert_eq!(status, code);
                }
                other => panic!("unexpected result for {code}: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_url_outside_allowlist_is_rejected() {
        let config = FetchConfig {
            allowlist: DomainAllowlist::new(["https://docs.example.com/"]),
            timeout: Some(Duration::from_secs(1)),
            ..FetchConfig::default()
        };
        let source = HttpSource::new(&config).unwrap();

        let result = source.fetch_page("https://other.example.com/").await;
        assert!(matches!(result, Err(FetchError::DisallowedDomain(_))));
        assert!(!source.allows("https://other.example.com/"));
        assert!(source.allows("https://docs.example.com/a"));
    }
}
