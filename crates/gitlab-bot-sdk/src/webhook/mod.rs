//! GitLab webhook intake: event construction and token verification.
//!
//! This module covers the inbound half of the SDK. An HTTP endpoint hands
//! the delivery's headers and raw body to [`Event::from_http`], which
//! verifies the shared-secret token (constant-time) and decodes the JSON
//! payload. The resulting [`Event`] is then typically passed to
//! [`crate::routing::Router::dispatch`].
//!
//! # Error Mapping
//!
//! Construction failures carry their intended HTTP response status:
//!
//! | Failure                      | Error                                | Status |
//! |------------------------------|--------------------------------------|--------|
//! | `x-gitlab-event` missing     | [`WebhookError::MissingEventType`]   | 400    |
//! | token absent or mismatched   | [`WebhookError::ValidationFailure`]  | 401    |
//! | body not decodable as JSON   | [`WebhookError::BadRequest`]         | 400    |
//!
//! [`WebhookError::MissingEventType`]: crate::error::WebhookError::MissingEventType
//! [`WebhookError::ValidationFailure`]: crate::error::WebhookError::ValidationFailure
//! [`WebhookError::BadRequest`]: crate::error::WebhookError::BadRequest
//!
//! # Examples
//!
//! ```
//! use gitlab_bot_sdk::webhook::Event;
//! use std::collections::HashMap;
//!
//! let headers = HashMap::from([
//!     ("x-gitlab-event".to_string(), "Issue Hook".to_string()),
//!     ("x-gitlab-token".to_string(), "s3cret".to_string()),
//! ]);
//! let body = br#"{"object_kind":"issue","object_attributes":{"action":"open"}}"#;
//!
//! match Event::from_http(&headers, body, Some("s3cret")) {
//!     Ok(event) => assert_eq!(event.action(), Some("open")),
//!     Err(err) => eprintln!("reject with {}", err.http_status()),
//! }
//! ```

pub mod event;
pub mod validation;

// Re-export main types
pub use event::{Event, EVENT_TYPE_HEADER, TOKEN_HEADER};
pub use validation::verify_token;
