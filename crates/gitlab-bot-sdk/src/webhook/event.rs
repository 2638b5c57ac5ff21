//! Webhook event parsing and construction.
//!
//! This module turns a raw webhook delivery (headers plus body bytes) into an
//! [`Event`], verifying the shared-secret token along the way. It performs no
//! I/O and no logging; failures surface synchronously as [`WebhookError`]
//! values that the embedding HTTP endpoint maps to response statuses.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::WebhookError;
use crate::webhook::validation::verify_token;

/// Header identifying the webhook kind (e.g. "Push Hook", "Issue Hook").
pub const EVENT_TYPE_HEADER: &str = "x-gitlab-event";

/// Header carrying the shared secret token for delivery authentication.
pub const TOKEN_HEADER: &str = "x-gitlab-token";

/// Details of a GitLab webhook event.
///
/// An `Event` is only constructible from a delivery that passed token
/// verification (when a secret is configured) and whose body decoded as
/// JSON. It is immutable after construction and safe to share by reference
/// across concurrent handlers.
///
/// The event type is kept as a string rather than an enum: GitLab provides
/// the value and may add new hook kinds at any time, so mirroring them here
/// would only create a maintenance burden.
///
/// # Examples
///
/// ```
/// use gitlab_bot_sdk::webhook::Event;
/// use serde_json::json;
///
/// let event = Event::new("Issue Hook", json!({
///     "object_kind": "issue",
///     "object_attributes": {"action": "open"},
///     "project": {"id": 42},
/// }));
///
/// assert_eq!(event.event_type(), "Issue Hook");
/// assert_eq!(event.object_kind(), Some("issue"));
/// assert_eq!(event.action(), Some("open"));
/// assert_eq!(event.project_id(), Some(42));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    event_type: String,
    data: Value,
}

impl Event {
    /// Create an event directly from an event type and decoded payload.
    ///
    /// Most callers should use [`Event::from_http`] instead, which verifies
    /// the delivery before construction.
    pub fn new(event_type: impl Into<String>, data: Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }

    /// Construct an event from HTTP headers and body bytes.
    ///
    /// The header map is expected to use lower-case keys. Verification runs
    /// before the body is decoded, so a tampered delivery fails with
    /// [`WebhookError::ValidationFailure`] even when its body is garbage,
    /// so callers can rely on the 401-versus-400 distinction.
    ///
    /// When `secret` is `None` no token verification is performed. This is
    /// an explicit opt-out that reduces security: anyone able to reach the
    /// endpoint can then forge deliveries.
    ///
    /// The body is decoded as a UTF-8 JSON document. A
    /// `application/x-www-form-urlencoded` body is accepted as well, with
    /// the JSON document carried in its `payload` field.
    ///
    /// # Errors
    ///
    /// * [`WebhookError::MissingEventType`] - no `x-gitlab-event` header
    /// * [`WebhookError::ValidationFailure`] - secret configured but the
    ///   `x-gitlab-token` header is absent or does not match
    /// * [`WebhookError::BadRequest`] - body is not decodable JSON
    ///
    /// # Examples
    ///
    /// ```
    /// use gitlab_bot_sdk::webhook::Event;
    /// use std::collections::HashMap;
    ///
    /// let headers = HashMap::from([
    ///     ("x-gitlab-event".to_string(), "Push Hook".to_string()),
    ///     ("x-gitlab-token".to_string(), "s3cret".to_string()),
    /// ]);
    /// let body = br#"{"object_kind":"push"}"#;
    ///
    /// let event = Event::from_http(&headers, body, Some("s3cret")).unwrap();
    /// assert_eq!(event.event_type(), "Push Hook");
    /// assert_eq!(event.object_kind(), Some("push"));
    /// ```
    pub fn from_http(
        headers: &HashMap<String, String>,
        body: &[u8],
        secret: Option<&str>,
    ) -> Result<Self, WebhookError> {
        let event_type = headers
            .get(EVENT_TYPE_HEADER)
            .ok_or(WebhookError::MissingEventType)?;

        if let Some(secret) = secret {
            let token = headers
                .get(TOKEN_HEADER)
                .ok_or(WebhookError::ValidationFailure)?;
            if !verify_token(secret, token) {
                return Err(WebhookError::ValidationFailure);
            }
        }

        let data = decode_body(headers.get("content-type").map(String::as_str), body)?;

        Ok(Self {
            event_type: event_type.clone(),
            data,
        })
    }

    /// The webhook kind, verbatim from the `x-gitlab-event` header.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// The decoded JSON payload of the delivery.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// The `object_kind` field of the payload, when present.
    pub fn object_kind(&self) -> Option<&str> {
        self.data.get("object_kind")?.as_str()
    }

    /// The `object_attributes` object of the payload, when present.
    pub fn object_attributes(&self) -> Option<&serde_json::Map<String, Value>> {
        self.data.get("object_attributes")?.as_object()
    }

    /// The action discriminant nested at `object_attributes.action`.
    ///
    /// Hook kinds without an action field (e.g. "Push Hook") yield `None`;
    /// the router then considers only wildcard registrations.
    pub fn action(&self) -> Option<&str> {
        self.object_attributes()?.get("action")?.as_str()
    }

    /// The numeric project id nested at `project.id`, when present.
    ///
    /// A missing or non-integer id is treated as absent rather than an
    /// error.
    pub fn project_id(&self) -> Option<i64> {
        self.data.get("project")?.get("id")?.as_i64()
    }
}

/// Decode a webhook delivery body into a JSON value.
///
/// Form-urlencoded deliveries carry the JSON document in their `payload`
/// field; everything else is decoded directly as UTF-8 JSON.
fn decode_body(content_type: Option<&str>, body: &[u8]) -> Result<Value, WebhookError> {
    let mime = content_type
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().to_ascii_lowercase());

    if mime.as_deref() == Some("application/x-www-form-urlencoded") {
        let payload = url::form_urlencoded::parse(body)
            .find(|(key, _)| key == "payload")
            .map(|(_, value)| value.into_owned())
            .ok_or_else(|| WebhookError::BadRequest {
                message: "form body is missing the payload field".to_string(),
            })?;
        return serde_json::from_str(&payload).map_err(|err| WebhookError::BadRequest {
            message: err.to_string(),
        });
    }

    serde_json::from_slice(body).map_err(|err| WebhookError::BadRequest {
        message: err.to_string(),
    })
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
