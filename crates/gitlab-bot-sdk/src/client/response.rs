//! Response deciphering for GitLab API requests.
//!
//! [`decipher_response`] turns the three parts of a raw HTTP response
//! (status code, headers, body) into decoded data plus the bookkeeping the
//! caller needs: the rate limit snapshot the response carried (if any) and
//! the URL of the next page of results (if any). Error statuses become
//! [`ApiError`] values; the SDK itself never retries.

use std::collections::HashMap;

use serde_json::Value;

use crate::client::pagination::next_page_url;
use crate::client::rate_limit::RateLimit;
use crate::error::ApiError;

/// Status codes accepted as success by [`decipher_response`].
const SUCCESS_STATUSES: [u16; 4] = [200, 201, 202, 204];

/// The decoded parts of a successful GitLab API response.
///
/// `data` is the JSON-decoded body; `None` is the explicit "no content"
/// sentinel (a 204 response or an empty body) and is distinct from a body
/// that decoded to JSON `null`. `rate_limit` is present only when the
/// response carried the full quota header triple. `next_url` is present only
/// when the response advertises more paginated data.
///
/// The value has no ownership beyond the call that produced it; callers who
/// want rate limit history must store snapshots themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct DecipheredResponse {
    /// JSON-decoded body, or `None` for "no content".
    pub data: Option<Value>,

    /// Rate limit snapshot from the response headers, when complete.
    pub rate_limit: Option<RateLimit>,

    /// URL of the next page of results, when more data exists.
    pub next_url: Option<String>,
}

/// Decipher an HTTP response from a GitLab API request.
///
/// The header map is expected to use lower-case keys. Status codes 200,
/// 201, 202, and 204 are the only successes; anything else raises. Bodies
/// are decoded according to their `content-type`: JSON documents directly,
/// `application/x-www-form-urlencoded` bodies via their `payload` field,
/// and anything else as plain text.
///
/// # Errors
///
/// * [`ApiError::RateLimitExceeded`] - a 403 response whose rate limit
///   headers show the quota is used up
/// * [`ApiError::InvalidField`] - a 422 response; carries the body's
///   `errors` array when present
/// * [`ApiError::Http`] - any other non-success status, carrying that exact
///   status and the message extracted from the body (the body's `message`
///   field when it is a JSON object, otherwise the raw body text)
/// * [`ApiError::InvalidFormat`] - a rate limit header or success body that
///   is present but does not parse
///
/// # Examples
///
/// ```
/// use gitlab_bot_sdk::client::decipher_response;
/// use serde_json::json;
/// use std::collections::HashMap;
///
/// let headers = HashMap::from([
///     ("content-type".to_string(), "application/json".to_string()),
/// ]);
/// let body = br#"{"id": 42, "name": "demo"}"#;
///
/// let response = decipher_response(200, &headers, body).unwrap();
/// assert_eq!(response.data, Some(json!({"id": 42, "name": "demo"})));
/// assert!(response.rate_limit.is_none());
/// assert!(response.next_url.is_none());
/// ```
pub fn decipher_response(
    status: u16,
    headers: &HashMap<String, String>,
    body: &[u8],
) -> Result<DecipheredResponse, ApiError> {
    let content_type = headers.get("content-type").map(String::as_str);

    if SUCCESS_STATUSES.contains(&status) {
        // 204 means "no content" no matter what the body holds.
        let data = if status == 204 {
            None
        } else {
            decode_body(content_type, body)?
        };
        return Ok(DecipheredResponse {
            data,
            rate_limit: RateLimit::from_headers(headers)?,
            next_url: next_page_url(headers.get("link").map(String::as_str)),
        });
    }

    // Error statuses: decode leniently, the body is only used for context.
    let data = decode_body(content_type, body).ok().flatten();
    let message = extract_message(&data, body);

    if status == 403 {
        if let Some(rate_limit) = RateLimit::from_headers(headers)? {
            if rate_limit.is_exhausted() {
                return Err(ApiError::RateLimitExceeded {
                    rate_limit,
                    message,
                });
            }
        }
    }

    if status == 422 {
        let errors = data
            .as_ref()
            .and_then(|value| value.get("errors"))
            .cloned();
        return Err(ApiError::InvalidField { errors, message });
    }

    Err(ApiError::Http { status, message })
}

/// Decode an HTTP body based on its content type.
///
/// An empty body or a missing content type is "no content" (`None`). JSON
/// and form-urlencoded bodies decode to a JSON value; any other content
/// type decodes to a string.
fn decode_body(content_type: Option<&str>, body: &[u8]) -> Result<Option<Value>, ApiError> {
    let Some(content_type) = content_type else {
        return Ok(None);
    };
    if body.is_empty() {
        return Ok(None);
    }

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    match mime.as_str() {
        "application/json" => serde_json::from_slice(body).map(Some).map_err(body_error),
        "application/x-www-form-urlencoded" => {
            let payload = url::form_urlencoded::parse(body)
                .find(|(key, _)| key == "payload")
                .map(|(_, value)| value.into_owned())
                .ok_or_else(|| ApiError::InvalidFormat {
                    field: "body".to_string(),
                    message: "form body is missing the payload field".to_string(),
                })?;
            serde_json::from_str(&payload).map(Some).map_err(body_error)
        }
        _ => {
            let text = std::str::from_utf8(body).map_err(body_error)?;
            Ok(Some(Value::String(text.to_string())))
        }
    }
}

/// Pull a human-readable message out of an error response.
///
/// Prefers the `message` field of a JSON object body, falling back to the
/// raw body text.
fn extract_message(data: &Option<Value>, body: &[u8]) -> String {
    if let Some(Value::Object(map)) = data {
        if let Some(Value::String(message)) = map.get("message") {
            return message.clone();
        }
    }
    String::from_utf8_lossy(body).into_owned()
}

fn body_error(err: impl std::fmt::Display) -> ApiError {
    ApiError::InvalidFormat {
        field: "body".to_string(),
        message: err.to_string(),
    }
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
