//! Error types for GitLab Bot SDK operations.
//!
//! This module defines all error types used throughout the SDK, split by
//! concern: [`WebhookError`] for inbound webhook deliveries that cannot be
//! turned into an event, and [`ApiError`] for API responses that cannot be
//! deciphered. Each variant carries enough context for a caller to choose an
//! HTTP response status or a retry decision.

use thiserror::Error;

use crate::client::RateLimit;

/// Errors constructing an event from an inbound webhook delivery.
///
/// These errors map directly onto the HTTP status a webhook endpoint should
/// return to GitLab: see [`WebhookError::http_status`].
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The delivery lacks the `x-gitlab-event` header (non-retryable).
    #[error("missing x-gitlab-event header")]
    MissingEventType,

    /// A secret is configured but the `x-gitlab-token` header is absent or
    /// does not match.
    ///
    /// The message is deliberately fixed so that callers cannot distinguish
    /// a missing token from a mismatched one, and the underlying comparison
    /// is constant-time.
    #[error("webhook token validation failed")]
    ValidationFailure,

    /// The delivery body could not be decoded as a JSON document.
    #[error("invalid webhook body: {message}")]
    BadRequest { message: String },
}

impl WebhookError {
    /// The HTTP status a webhook endpoint should answer with for this error.
    ///
    /// Validation failures are `401 Unauthorized`; everything else about a
    /// malformed delivery is `400 Bad Request`.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::MissingEventType => 400,
            Self::ValidationFailure => 401,
            Self::BadRequest { .. } => 400,
        }
    }
}

/// Errors during GitLab API operations.
///
/// These errors represent failures when interpreting GitLab API responses or
/// handing requests to a transport, including HTTP error statuses, rate
/// limiting, and malformed headers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP error response from the GitLab API.
    ///
    /// Raised for any status outside the success set {200, 201, 202, 204}.
    /// The message is taken from the body's `message` field when the body is
    /// a JSON object, falling back to the raw body text.
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// Request rejected because the rate limit is exhausted.
    ///
    /// Carries the rate limit snapshot from the rejecting response so the
    /// caller knows when the quota resets.
    #[error("rate limit exceeded: {message}")]
    RateLimitExceeded {
        rate_limit: RateLimit,
        message: String,
    },

    /// One or more fields in the request were rejected (HTTP 422).
    ///
    /// `errors` holds the decoded `errors` array from the response body when
    /// the API provided one.
    #[error("invalid field(s): {message}")]
    InvalidField {
        errors: Option<serde_json::Value>,
        message: String,
    },

    /// A header or body that must be well-formed failed to parse.
    ///
    /// Signals a contract violation by the remote service or the transport;
    /// values are never silently coerced.
    #[error("malformed {field}: {message}")]
    InvalidFormat { field: String, message: String },

    /// The caller-supplied transport failed before a response was produced.
    #[error("transport error: {message}")]
    Transport { message: String },
}

impl ApiError {
    /// Check if this error represents a transient condition that may succeed
    /// if retried.
    ///
    /// Transient conditions are server errors (5xx), rate limiting (429 or
    /// an exhausted quota), and transport failures. The SDK itself never
    /// retries; this classification is for caller policy.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http { status, .. } => *status >= 500 || *status == 429,
            Self::RateLimitExceeded { .. } => true,
            Self::InvalidField { .. } => false,
            Self::InvalidFormat { .. } => false,
            Self::Transport { .. } => true,
        }
    }

    /// The HTTP status carried by this error, when it stems from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::RateLimitExceeded { .. } => Some(403),
            Self::InvalidField { .. } => Some(422),
            Self::InvalidFormat { .. } | Self::Transport { .. } => None,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
