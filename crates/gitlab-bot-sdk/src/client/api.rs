//! Transport-agnostic GitLab API client.
//!
//! The SDK performs no network I/O of its own. Callers implement
//! [`HttpTransport`] on top of whatever HTTP library they prefer and hand it
//! to [`GitLabApi`], which takes care of the common details: building
//! headers, joining URLs against the instance's API root, serializing JSON
//! bodies, deciphering responses, following pagination, and tracking the
//! most recent rate limit snapshot.
//!
//! # Examples
//!
//! ```
//! use gitlab_bot_sdk::client::{GitLabApi, HttpTransport};
//! use serde_json::json;
//!
//! # async fn example(transport: impl HttpTransport) -> Result<(), gitlab_bot_sdk::ApiError> {
//! let mut api = GitLabApi::new(transport, "my-bot").with_access_token("tok123");
//!
//! // Single item
//! let user = api.getitem("/user", &[]).await?;
//!
//! // All pages of a list endpoint
//! let projects = api.get_all("/projects", &[("per_page", "100")]).await?;
//!
//! // Create an issue
//! let issue = api
//!     .post(
//!         "/projects/42/issues",
//!         &[],
//!         &json!({"title": "Found a bug"}),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::client::headers::create_headers;
use crate::client::rate_limit::RateLimit;
use crate::client::response::decipher_response;
use crate::error::ApiError;

/// Default GitLab instance URL.
const DEFAULT_INSTANCE_URL: &str = "https://gitlab.com";

/// Default GitLab REST API version.
const DEFAULT_API_VERSION: &str = "v4";

// ============================================================================
// Transport Capability
// ============================================================================

/// HTTP method of an [`ApiRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// The method as an uppercase wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully prepared outgoing API request.
///
/// Header keys are lower-cased and include the GitLab-specific fields plus
/// `content-length` (and `content-type` when a body is present).
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

/// A raw response as produced by a transport.
///
/// The header map is expected to use lower-case keys.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

/// Capability contract a concrete HTTP library adapter implements.
///
/// Adapters live outside this crate; the SDK depends only on this
/// interface. An implementation is expected to perform the request exactly
/// as given (no added headers, no redirect rewriting of the method) and
/// to report transport-level failures as [`ApiError::Transport`].
///
/// `sleep` exists so callers can wait out a rate limit window using the
/// same event loop the transport runs on.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform one HTTP request and return the raw response parts.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;

    /// Suspend the current task for the given duration.
    async fn sleep(&self, duration: Duration);
}

// ============================================================================
// GitLab API Client
// ============================================================================

/// Cached response parts for conditional requests.
#[derive(Debug, Clone)]
struct CacheEntry {
    etag: Option<String>,
    last_modified: Option<String>,
    data: Option<Value>,
    next_url: Option<String>,
}

/// High-level GitLab API client over a caller-supplied transport.
///
/// For methods that send data to GitLab there is a `data` argument
/// accepting a JSON value; because `null` is a legitimate JSON value,
/// `None` (not `Value::Null`) represents "no body".
///
/// The returned value for requests is the deciphered body per
/// [`decipher_response`]; any status outside 200/201/202/204 surfaces as an
/// [`ApiError`].
///
/// Methods take `&mut self`: the client records the most recent rate limit
/// snapshot and, when enabled, an etag/last-modified cache for conditional
/// `GET` requests. Wrap the client in your own synchronization if it must
/// be shared across tasks.
#[derive(Debug)]
pub struct GitLabApi<T> {
    transport: T,
    requester: String,
    access_token: Option<String>,
    api_url: Url,
    rate_limit: Option<RateLimit>,
    cache: Option<HashMap<String, CacheEntry>>,
}

impl<T: HttpTransport> GitLabApi<T> {
    /// Create a client for `https://gitlab.com` with the given requester
    /// identity (GitLab asks for a username or project name).
    pub fn new(transport: T, requester: impl Into<String>) -> Self {
        let api_url = api_root(DEFAULT_INSTANCE_URL, DEFAULT_API_VERSION)
            .expect("default instance URL is valid");
        Self {
            transport,
            requester: requester.into(),
            access_token: None,
            api_url,
            rate_limit: None,
            cache: None,
        }
    }

    /// Authenticate requests with a personal access token.
    ///
    /// Authenticated requests get the expanded rate limit.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Point the client at a self-hosted GitLab instance.
    pub fn with_instance_url(mut self, instance_url: &str) -> Result<Self, ApiError> {
        self.api_url = api_root(instance_url, DEFAULT_API_VERSION)?;
        Ok(self)
    }

    /// Enable the conditional-request cache.
    ///
    /// `GET` responses carrying an `etag` or `last-modified` header are
    /// remembered per URL; later requests send `if-none-match` /
    /// `if-modified-since` and a `304 Not Modified` answer replays the
    /// cached body without counting against the rate limit.
    pub fn with_cache(mut self) -> Self {
        self.cache = Some(HashMap::new());
        self
    }

    /// The most recent rate limit snapshot, replaced on every response.
    pub fn rate_limit(&self) -> Option<&RateLimit> {
        self.rate_limit.as_ref()
    }

    /// Suspend for the given duration via the transport's clock.
    pub async fn sleep(&self, duration: Duration) {
        self.transport.sleep(duration).await;
    }

    /// Construct a URL for the GitLab API.
    ///
    /// The URL may be absolute or relative; a relative one is joined onto
    /// the instance's API root, so paths can be copied straight from the
    /// GitLab documentation. `params` are appended as query string pairs.
    pub fn format_url(&self, url: &str, params: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut full =
            self.api_url
                .join(url.trim_start_matches('/'))
                .map_err(|err| ApiError::InvalidFormat {
                    field: "url".to_string(),
                    message: err.to_string(),
                })?;
        if !params.is_empty() {
            full.query_pairs_mut().extend_pairs(params);
        }
        Ok(full)
    }

    /// Get a single item from GitLab.
    ///
    /// For `GET` endpoints that return multiple values and may paginate,
    /// see [`GitLabApi::get_all`].
    pub async fn getitem(
        &mut self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<Option<Value>, ApiError> {
        let (data, _) = self.request(Method::Get, url, params, None).await?;
        Ok(data)
    }

    /// Get all items from a paginated GitLab endpoint.
    ///
    /// Follows `rel="next"` links until exhaustion and concatenates the
    /// array pages in order. A page whose body is not a JSON array is a
    /// contract violation ([`ApiError::InvalidFormat`]).
    pub async fn get_all(
        &mut self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<Value>, ApiError> {
        let mut items = Vec::new();
        let (mut data, mut more) = self.request(Method::Get, url, params, None).await?;

        loop {
            match data {
                Some(Value::Array(page)) => items.extend(page),
                None => {}
                Some(other) => {
                    return Err(ApiError::InvalidFormat {
                        field: "body".to_string(),
                        message: format!("expected a JSON array page, got {}", kind_of(&other)),
                    });
                }
            }
            // The next-page URL already carries the query parameters.
            match more {
                Some(next) => (data, more) = self.request(Method::Get, &next, &[], None).await?,
                None => break,
            }
        }

        Ok(items)
    }

    /// Send a `POST` request to GitLab.
    pub async fn post(
        &mut self,
        url: &str,
        params: &[(&str, &str)],
        data: &Value,
    ) -> Result<Option<Value>, ApiError> {
        let (data, _) = self.request(Method::Post, url, params, Some(data)).await?;
        Ok(data)
    }

    /// Send a `PUT` request to GitLab.
    pub async fn put(
        &mut self,
        url: &str,
        params: &[(&str, &str)],
        data: Option<&Value>,
    ) -> Result<Option<Value>, ApiError> {
        let (data, _) = self.request(Method::Put, url, params, data).await?;
        Ok(data)
    }

    /// Send a `PATCH` request to GitLab.
    pub async fn patch(
        &mut self,
        url: &str,
        params: &[(&str, &str)],
        data: &Value,
    ) -> Result<Option<Value>, ApiError> {
        let (data, _) = self.request(Method::Patch, url, params, Some(data)).await?;
        Ok(data)
    }

    /// Send a `DELETE` request to GitLab, discarding the response payload.
    pub async fn delete(&mut self, url: &str, params: &[(&str, &str)]) -> Result<(), ApiError> {
        self.request(Method::Delete, url, params, None).await?;
        Ok(())
    }

    /// Construct and perform one HTTP request through the transport.
    async fn request(
        &mut self,
        method: Method,
        url: &str,
        params: &[(&str, &str)],
        data: Option<&Value>,
    ) -> Result<(Option<Value>, Option<String>), ApiError> {
        let filled_url = self.format_url(url, params)?;
        let mut headers = create_headers(&self.requester, self.access_token.as_deref(), None)?;

        let cacheable = method == Method::Get && data.is_none() && self.cache.is_some();
        let mut cached_entry = None;

        let body = match data {
            None => {
                headers.insert("content-length".to_string(), "0".to_string());
                if cacheable {
                    if let Some(entry) = self
                        .cache
                        .as_ref()
                        .and_then(|cache| cache.get(filled_url.as_str()))
                    {
                        if let Some(etag) = &entry.etag {
                            headers.insert("if-none-match".to_string(), etag.clone());
                        }
                        if let Some(last_modified) = &entry.last_modified {
                            headers.insert("if-modified-since".to_string(), last_modified.clone());
                        }
                        cached_entry = Some(entry.clone());
                    }
                }
                Bytes::new()
            }
            Some(value) => {
                let encoded = serde_json::to_vec(value).map_err(|err| ApiError::InvalidFormat {
                    field: "data".to_string(),
                    message: err.to_string(),
                })?;
                headers.insert(
                    "content-type".to_string(),
                    "application/json; charset=utf-8".to_string(),
                );
                headers.insert("content-length".to_string(), encoded.len().to_string());
                Bytes::from(encoded)
            }
        };

        debug!(method = %method, url = %filled_url, "sending GitLab API request");
        let response = self
            .transport
            .send(ApiRequest {
                method,
                url: filled_url.to_string(),
                headers,
                body,
            })
            .await?;
        trace!(status = response.status, "received GitLab API response");

        if response.status == 304 {
            if let Some(entry) = cached_entry {
                trace!(url = %filled_url, "not modified, serving cached response");
                return Ok((entry.data, entry.next_url));
            }
        }

        let deciphered = decipher_response(response.status, &response.headers, &response.body)?;
        self.rate_limit = deciphered.rate_limit;

        if cacheable {
            let etag = response.headers.get("etag").cloned();
            let last_modified = response.headers.get("last-modified").cloned();
            if etag.is_some() || last_modified.is_some() {
                if let Some(cache) = &mut self.cache {
                    cache.insert(
                        filled_url.to_string(),
                        CacheEntry {
                            etag,
                            last_modified,
                            data: deciphered.data.clone(),
                            next_url: deciphered.next_url.clone(),
                        },
                    );
                }
            }
        }

        Ok((deciphered.data, deciphered.next_url))
    }
}

/// Join an instance URL and API version into the API root URL.
fn api_root(instance_url: &str, api_version: &str) -> Result<Url, ApiError> {
    let instance = Url::parse(instance_url).map_err(|err| ApiError::InvalidFormat {
        field: "url".to_string(),
        message: err.to_string(),
    })?;
    instance
        .join(&format!("/api/{}/", api_version))
        .map_err(|err| ApiError::InvalidFormat {
            field: "url".to_string(),
            message: err.to_string(),
        })
}

/// Short JSON type name for error messages.
fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
