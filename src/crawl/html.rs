// src/crawl/html.rs
// =============================================================================
// HTML primitives used by the crawler: outbound links and visible text.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// We also use the `url` crate to resolve relative links to absolute URLs.
//
// Neither function fails: malformed HTML still parses into some tree, and
// links that cannot be resolved are skipped.
// =============================================================================

use scraper::{Html, Node, Selector};
use url::Url;

// Elements whose text is never shown to a reader
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

// Extracts every hyperlink target on a page
//
// Parameters:
//   html: the HTML content to parse (borrowed as &str)
//   base_url: the URL of the page (for resolving relative links)
//
// Returns: Vec<String> of absolute URLs in document order, fragments removed.
// Non-HTTP targets (mailto:, javascript:, ...) are kept; deciding what to
// follow is the crawler's job.
//
// Example:
//   html = "<a href='/docs#intro'>Docs</a>"
//   base_url = "https://example.com"
//   result = ["https://example.com/docs"]
pub fn extract_links(html: &str, base_url: &str) -> Vec<String> {
    let mut links = Vec::new();

    // If base URL is invalid, we can't resolve relative links
    let base = match Url::parse(base_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(base_url, error = %e, "invalid base URL, skipping links");
            return links;
        }
    };

    let Ok(selector) = Selector::parse("a[href]") else {
        return links;
    };

    let document = Html::parse_document(html);
    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(absolute_url) = resolve_url(&base, href) {
                links.push(absolute_url);
            }
        }
    }

    links
}

// Resolves a possibly-relative href against the page URL
//
// Examples:
//   base = "https://example.com/page/"
//   href = "/docs"              -> Some("https://example.com/docs")
//   href = "../other#top"       -> Some("https://example.com/other")
//   href = "https://other.com"  -> Some("https://other.com/")
//   href = "https://[::1"       -> None (unparseable)
fn resolve_url(base: &Url, href: &str) -> Option<String> {
    // join() handles both absolute and relative hrefs
    let mut url = base.join(href.trim()).ok()?;
    url.set_fragment(None);
    Some(url.to_string())
}

// Returns the text a reader would see on the page
//
// Text nodes are concatenated in document order without separators, the way
// a DOM's textContent reads. Contents of script/style/noscript/template are
// skipped.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::new();

    for node in document.root_element().descendants() {
        let Node::Text(fragment) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| HIDDEN_ELEMENTS.contains(&element.name()))
        });
        if !hidden {
            text.push_str(fragment);
        }
    }

    text
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does let-else do?
//    - let Ok(selector) = ... else { return links; };
//    - Binds the value if the pattern matches, otherwise runs the else block
//    - The else block must leave the function (return, continue, break)
//
// 2. Why strip the fragment?
//    - https://example.com/#top and https://example.com/ are the same page
//    - Without stripping, the crawler would fetch the page twice
//
// 3. What is descendants()?
//    - Walks every node below an element, depth-first, in document order
//    - Includes text nodes, comments and elements
//    - ancestors() walks the other way, up to the document root
// -----------------------------------------------------------------------------
