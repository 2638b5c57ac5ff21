//! GitLab API request construction and response deciphering.
//!
//! This module covers the outbound half of the SDK, all of it sans-I/O:
//!
//! - [`create_headers`] builds the canonical outgoing header set
//! - [`decipher_response`] turns a raw (status, headers, body) triple into
//!   decoded data, a [`RateLimit`] snapshot, and the next page URL
//! - [`GitLabApi`] ties the two together over a caller-supplied
//!   [`HttpTransport`], adding URL joining, JSON bodies, pagination
//!   following, and conditional-request caching
//!
//! The actual socket work (connection pooling, TLS, timeouts) is the
//! transport adapter's business, never this crate's.

mod api;
mod headers;
mod pagination;
mod rate_limit;
mod response;

pub use api::{ApiRequest, ApiResponse, GitLabApi, HttpTransport, Method};
pub use headers::create_headers;
pub use pagination::{next_page_url, parse_link_header, Pagination};
pub use rate_limit::RateLimit;
pub use response::{decipher_response, DecipheredResponse};
