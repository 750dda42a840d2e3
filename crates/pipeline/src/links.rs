//! Ticket link extraction from bot comment bodies.
//!
//! Contract: the body is parsed permissively and nothing ever escapes this
//! boundary as an error. Unterminated tags, stray closing tags, and plain text
//! all parse; anything the parser cannot make sense of yields no links.
//! Any HTML parser that honours this contract can replace the one used here.

use scraper::{Html, Selector};

use crate::TicketUrl;

/// Prefix every ticket link must start with to be collected.
pub const TICKET_URL_PREFIX: &str = "https://linear.app";

/// Collects, in document order, the `href` of every anchor that starts with
/// [`TICKET_URL_PREFIX`].
///
/// Anchors without an `href` are skipped. Duplicates are preserved. An absent
/// or empty body yields an empty vector.
pub fn extract_ticket_urls(html_body: Option<&str>) -> Vec<TicketUrl> {
    let Some(body) = html_body.filter(|b| !b.trim().is_empty()) else {
        return Vec::new();
    };

    let selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(err) => {
            tracing::error!(error = %err, "Anchor selector failed to compile");
            return Vec::new();
        }
    };

    let fragment = Html::parse_fragment(body);
    let urls: Vec<TicketUrl> = fragment
        .select(&selector)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter(|href| href.starts_with(TICKET_URL_PREFIX))
        .filter_map(|href| TicketUrl::new(href))
        .collect();

    tracing::debug!(count = urls.len(), "Extracted ticket links from comment");
    urls
}

#[cfg(test)]
#[path = "links_tests.rs"]
mod tests;
