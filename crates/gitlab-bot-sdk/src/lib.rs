//! # GitLab Bot SDK
//!
//! Sans-I/O building blocks for GitLab bots: webhook event parsing with
//! token verification, API request/response handling with pagination and
//! rate limit bookkeeping, and event routing to async handlers.
//!
//! This crate performs no network I/O of its own. It only builds requests,
//! parses responses, verifies webhook authenticity, and dispatches webhook
//! payloads to handlers; the HTTP transport is supplied by the caller
//! through the [`client::HttpTransport`] trait. That keeps the SDK usable
//! with any HTTP library and keeps every operation here a synchronous,
//! non-blocking data transformation (only user handlers and the transport
//! ever suspend).
//!
//! # Examples
//!
//! ## Receiving a webhook
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
//! let event = Event::from_http(&headers, body, Some("s3cret")).unwrap();
//! assert_eq!(event.event_type(), "Issue Hook");
//! assert_eq!(event.action(), Some("open"));
//! ```
//!
//! ## Routing events to handlers
//!
//! ```
//! use gitlab_bot_sdk::routing::{handler_fn, Router};
//!
//! let mut router: Router = Router::new();
//! router.register(
//!     "Issue Hook",
//!     Some("open"),
//!     handler_fn(|event, _context| {
//!         Box::pin(async move {
//!             println!("new issue in project {:?}", event.project_id());
//!             Ok(())
//!         })
//!     }),
//! );
//! ```
//!
//! ## Deciphering an API response
//!
//! ```
//! use gitlab_bot_sdk::client::decipher_response;
//! use std::collections::HashMap;
//!
//! let headers = HashMap::from([
//!     ("content-type".to_string(), "application/json".to_string()),
//!     ("ratelimit-limit".to_string(), "600".to_string()),
//!     ("ratelimit-remaining".to_string(), "599".to_string()),
//!     ("ratelimit-reset".to_string(), "1710000000".to_string()),
//! ]);
//!
//! let response = decipher_response(200, &headers, br#"[{"id": 1}]"#).unwrap();
//! assert_eq!(response.rate_limit.unwrap().remaining(), 599);
//! ```

// Public modules
pub mod client;
pub mod error;
pub mod routing;
pub mod webhook;

// Re-export commonly used types at crate root for convenience
pub use error::{ApiError, WebhookError};

pub use client::{
    create_headers, decipher_response, ApiRequest, ApiResponse, DecipheredResponse, GitLabApi,
    HttpTransport, Method, RateLimit,
};
pub use routing::{handler_fn, EventHandler, HandlerError, Router};
pub use webhook::Event;
