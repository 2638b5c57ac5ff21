//! Pagination support for the GitLab API.
//!
//! GitLab paginates list endpoints and advertises neighbouring pages in an
//! RFC 5988 `link` response header. The deciphering layer only needs the
//! `rel="next"` target to decide whether more data exists; the full set of
//! relations is kept for callers that want to jump around.

use serde::{Deserialize, Serialize};

/// Pagination metadata extracted from a `link` header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    /// URL for the next page (if available)
    pub next: Option<String>,

    /// URL for the previous page (if available)
    pub prev: Option<String>,

    /// URL for the first page (if available)
    pub first: Option<String>,

    /// URL for the last page (if available)
    pub last: Option<String>,
}

impl Pagination {
    /// Check if there are more pages available.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// Parse pagination metadata from a `link` header.
///
/// GitLab returns link headers like:
/// `<https://gitlab.com/api/v4/projects?page=2>; rel="next", <https://gitlab.com/api/v4/projects?page=5>; rel="last"`
///
/// Segments that do not carry a recognized `rel` parameter are ignored, as
/// are malformed segments; pagination is advisory, never fatal.
///
/// # Examples
///
/// ```
/// use gitlab_bot_sdk::client::parse_link_header;
///
/// let header = r#"<https://gitlab.com/api/v4/projects?page=2>; rel="next""#;
/// let pagination = parse_link_header(Some(header));
///
/// assert!(pagination.has_next());
/// assert_eq!(
///     pagination.next.as_deref(),
///     Some("https://gitlab.com/api/v4/projects?page=2"),
/// );
/// ```
pub fn parse_link_header(link_header: Option<&str>) -> Pagination {
    let mut pagination = Pagination::default();

    if let Some(header) = link_header {
        for link in header.split(',') {
            let mut parts = link.splitn(2, ';');
            let (Some(url), Some(params)) = (parts.next(), parts.next()) else {
                continue;
            };

            let url = url.trim().trim_start_matches('<').trim_end_matches('>');
            let rel = params
                .trim()
                .trim_start_matches("rel=\"")
                .trim_end_matches('"');

            match rel {
                "next" => pagination.next = Some(url.to_string()),
                "prev" => pagination.prev = Some(url.to_string()),
                "first" => pagination.first = Some(url.to_string()),
                "last" => pagination.last = Some(url.to_string()),
                _ => {}
            }
        }
    }

    pagination
}

/// The URL of the next page advertised by a `link` header, if any.
///
/// This is the question [`decipher_response`] asks: `None` means there are
/// explicitly no more pages.
///
/// [`decipher_response`]: crate::client::decipher_response
pub fn next_page_url(link_header: Option<&str>) -> Option<String> {
    parse_link_header(link_header).next
}

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;
