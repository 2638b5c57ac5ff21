//! Rate limit tracking for GitLab API operations.
//!
//! GitLab surfaces its request quota in the `ratelimit-limit`,
//! `ratelimit-remaining`, and `ratelimit-reset` response headers. This module
//! parses that triple into an immutable snapshot. A snapshot describes one
//! response only; callers wanting history must store snapshots themselves.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// The rate limit imposed upon the requester, as of one response.
///
/// Field names stem from the names GitLab uses in its API documentation:
/// `limit` is the request capacity of the current window, `remaining` how
/// many requests are left in it, and `reset_at` the instant at which
/// `remaining` resets to `limit`.
///
/// Immutable once built and safe to share by reference across tasks.
///
/// # Examples
///
/// ```
/// use gitlab_bot_sdk::client::RateLimit;
/// use chrono::{Duration, Utc};
///
/// let rate_limit = RateLimit::new(600, 400, Utc::now() + Duration::hours(1)).unwrap();
///
/// assert!(!rate_limit.is_exhausted());
/// assert!(rate_limit.can_request());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLimit {
    limit: u64,
    remaining: u64,
    reset_at: DateTime<Utc>,
}

impl RateLimit {
    /// Create a rate limit snapshot.
    ///
    /// # Errors
    ///
    /// `remaining` greater than `limit` violates the quota invariant and
    /// yields [`ApiError::InvalidFormat`].
    pub fn new(limit: u64, remaining: u64, reset_at: DateTime<Utc>) -> Result<Self, ApiError> {
        if remaining > limit {
            return Err(ApiError::InvalidFormat {
                field: "ratelimit-remaining".to_string(),
                message: format!("remaining ({}) exceeds limit ({})", remaining, limit),
            });
        }
        Ok(Self {
            limit,
            remaining,
            reset_at,
        })
    }

    /// Gather rate limit information from response headers.
    ///
    /// The header map is expected to use lower-case keys. Returns `Ok(None)`
    /// when any of the three headers is absent; responses without quota
    /// information are normal, not an error. A header that is present but
    /// does not parse is a contract violation and yields
    /// [`ApiError::InvalidFormat`].
    ///
    /// # Examples
    ///
    /// ```
    /// use gitlab_bot_sdk::client::RateLimit;
    /// use std::collections::HashMap;
    ///
    /// let headers = HashMap::from([
    ///     ("ratelimit-limit".to_string(), "600".to_string()),
    ///     ("ratelimit-remaining".to_string(), "599".to_string()),
    ///     ("ratelimit-reset".to_string(), "1710000000".to_string()),
    /// ]);
    ///
    /// let rate_limit = RateLimit::from_headers(&headers).unwrap().unwrap();
    /// assert_eq!(rate_limit.limit(), 600);
    /// assert_eq!(rate_limit.remaining(), 599);
    ///
    /// assert!(RateLimit::from_headers(&HashMap::new()).unwrap().is_none());
    /// ```
    pub fn from_headers(headers: &HashMap<String, String>) -> Result<Option<Self>, ApiError> {
        let (limit, remaining, reset) = match (
            headers.get("ratelimit-limit"),
            headers.get("ratelimit-remaining"),
            headers.get("ratelimit-reset"),
        ) {
            (Some(limit), Some(remaining), Some(reset)) => (limit, remaining, reset),
            _ => return Ok(None),
        };

        let limit = parse_counter("ratelimit-limit", limit)?;
        let remaining = parse_counter("ratelimit-remaining", remaining)?;
        let reset_epoch = reset
            .parse::<i64>()
            .map_err(|err| ApiError::InvalidFormat {
                field: "ratelimit-reset".to_string(),
                message: err.to_string(),
            })?;
        let reset_at = Utc
            .timestamp_opt(reset_epoch, 0)
            .single()
            .ok_or_else(|| ApiError::InvalidFormat {
                field: "ratelimit-reset".to_string(),
                message: format!("{} is not a valid epoch timestamp", reset_epoch),
            })?;

        Self::new(limit, remaining, reset_at).map(Some)
    }

    /// The request capacity of the current window.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Requests remaining in the current window.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// When the quota resets to `limit`.
    pub fn reset_at(&self) -> DateTime<Utc> {
        self.reset_at
    }

    /// Check if the quota is used up (no requests remaining).
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Check if the reset instant has passed.
    pub fn has_reset(&self) -> bool {
        Utc::now() > self.reset_at
    }

    /// Check whether another request can be made: either quota remains or
    /// the window has already reset.
    pub fn can_request(&self) -> bool {
        self.remaining > 0 || self.has_reset()
    }
}

impl fmt::Display for RateLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} until {}",
            self.remaining, self.limit, self.reset_at
        )
    }
}

fn parse_counter(field: &str, value: &str) -> Result<u64, ApiError> {
    value.parse::<u64>().map_err(|err| ApiError::InvalidFormat {
        field: field.to_string(),
        message: err.to_string(),
    })
}

#[cfg(test)]
#[path = "rate_limit_tests.rs"]
mod tests;
