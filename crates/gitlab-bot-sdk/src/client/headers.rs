//! Outgoing request header construction.
//!
//! GitLab asks that API requests identify their requester via the user agent
//! and authenticate with a personal access token in the `private-token`
//! header. This module builds that canonical header set; the caller-supplied
//! transport sends it.

use std::collections::HashMap;

use crate::error::ApiError;

/// Create the GitLab-specific header fields for an outgoing API request.
///
/// All keys in the returned map are lower-cased. The map always carries a
/// `user-agent` identifying the requester (GitLab asks for a username or
/// project name) and `accept: application/json`. When `access_token` is
/// given, `private-token` is set; unauthenticated requests are subject to
/// much tighter rate limits, which is the caller's concern.
///
/// # Precedence
///
/// `extra_headers` are merged last, with their keys lower-cased, so a
/// caller-supplied value overrides the defaults, including `user-agent`
/// and `private-token`. Nothing is silently dropped.
///
/// # Errors
///
/// An empty or whitespace-only `requester` is a caller error and yields
/// [`ApiError::InvalidFormat`].
///
/// # Examples
///
/// ```
/// use gitlab_bot_sdk::client::create_headers;
///
/// let headers = create_headers("alice", Some("tok123"), None).unwrap();
/// assert_eq!(headers["user-agent"], "alice");
/// assert_eq!(headers["accept"], "application/json");
/// assert_eq!(headers["private-token"], "tok123");
///
/// let anonymous = create_headers("alice", None, None).unwrap();
/// assert!(!anonymous.contains_key("private-token"));
/// ```
pub fn create_headers(
    requester: &str,
    access_token: Option<&str>,
    extra_headers: Option<&HashMap<String, String>>,
) -> Result<HashMap<String, String>, ApiError> {
    if requester.trim().is_empty() {
        return Err(ApiError::InvalidFormat {
            field: "requester".to_string(),
            message: "requester must be a non-empty string".to_string(),
        });
    }

    let mut headers = HashMap::from([
        ("user-agent".to_string(), requester.to_string()),
        ("accept".to_string(), "application/json".to_string()),
    ]);

    if let Some(token) = access_token {
        headers.insert("private-token".to_string(), token.to_string());
    }

    if let Some(extra) = extra_headers {
        for (name, value) in extra {
            headers.insert(name.to_ascii_lowercase(), value.clone());
        }
    }

    Ok(headers)
}

#[cfg(test)]
#[path = "headers_tests.rs"]
mod tests;
