// src/error.rs
// =============================================================================
// Error types for every layer of the crate.
//
// - IndexError: raised by the prefix tree (missing key, wrong key type)
// - FetchError: raised by a page source while fetching one URL
// - BuildError: raised by the index builder and the application state
//
// FetchError never escapes a crawl: the crawler turns it into an empty result
// for that one branch. IndexError and BuildError go back to the caller.
// =============================================================================

use thiserror::Error;

/// Errors returned by the word index.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// The key is not present (broken path or non-terminal node)
    #[error("key \"{0}\" not found in trie")]
    NotFound(String),

    /// The key supplied through an untyped surface is not a string
    #[error("key {0} must be a string")]
    TypeMismatch(String),
}

/// Errors returned while fetching a single page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Only https:// URLs may be fetched
    #[error("URL {0} must start with https://")]
    DisallowedScheme(String),

    /// The URL is outside the domain allowlist
    #[error("URL {0} does not start with an allowed domain")]
    DisallowedDomain(String),

    /// Network or protocol failure reported by the HTTP client
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// Errors returned by the index builder.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The HTTP client could not be constructed
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The runtime for a blocking build could not be started
    #[error("failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// The build task panicked or was cancelled before finishing
    #[error("build task aborted: {0}")]
    Aborted(String),

    /// A rebuild was requested while another one is running
    #[error("Index is currently building")]
    AlreadyBuilding,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_error_messages() {
        let err = IndexError::NotFound("apple".to_string());
        assert_eq!(err.to_string(), "key \"apple\" not found in trie");

        let err = IndexError::TypeMismatch("42".to_string());
        assert_eq!(err.to_string(), "key 42 must be a string");
    }

    #[test]
    fn test_fetch_error_messages() {
        let err = FetchError::DisallowedScheme("http://example.com".to_string());
        assert_eq!(err.to_string(), "URL http://example.com must start with https://");

        let err = FetchError::Status {
            url: "https://example.com/missing".to_string(),
            status: reqwest::StatusCode::NOT_FOUND,
        };
        assert_eq!(
            err.to_string(),
            "HTTP 404 Not Found for https://example.com/missing"
        );
    }
}
