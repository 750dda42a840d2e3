//! Ticket identifier resolution.

use crate::{MalformedUrlError, TicketId, TicketUrl};

const ISSUE_MARKER: &str = "/issue/";

/// Returns the segment between `/issue/` and the next `/`.
///
/// `https://linear.app/co/issue/ABC-123/some/slug` resolves to `ABC-123`.
/// The slug is never inspected, so it may contain further `/` characters.
pub fn resolve_ticket_id(url: &TicketUrl) -> Result<TicketId, MalformedUrlError> {
    let malformed = || MalformedUrlError {
        url: url.as_str().to_string(),
    };

    let (_, after_marker) = url.as_str().split_once(ISSUE_MARKER).ok_or_else(malformed)?;
    let id = after_marker.split('/').next().unwrap_or_default();
    TicketId::new(id).ok_or_else(malformed)
}
