//! Tests for outgoing header construction.

use super::*;
use crate::error::ApiError;

#[test]
fn test_common_case() {
    let headers = create_headers("alice", Some("tok123"), None).unwrap();

    assert_eq!(headers["user-agent"], "alice");
    assert_eq!(headers["accept"], "application/json");
    assert_eq!(headers["private-token"], "tok123");
    assert_eq!(headers.len(), 3);
}

#[test]
fn test_without_access_token() {
    let headers = create_headers("alice", None, None).unwrap();

    assert!(
        !headers.contains_key("private-token"),
        "unauthenticated headers must omit the authorization header entirely"
    );
    assert_eq!(headers.len(), 2);
}

#[test]
fn test_all_keys_lowercase() {
    let extra = HashMap::from([("X-Custom".to_string(), "yes".to_string())]);

    let headers = create_headers("alice", Some("tok123"), Some(&extra)).unwrap();

    for key in headers.keys() {
        assert_eq!(key, &key.to_lowercase(), "header keys must be lower-cased");
    }
    assert_eq!(headers["x-custom"], "yes");
}

#[test]
fn test_extra_headers_override_defaults() {
    // Extras are merged last and win over the defaults.
    let extra = HashMap::from([("Accept".to_string(), "text/plain".to_string())]);

    let headers = create_headers("alice", None, Some(&extra)).unwrap();

    assert_eq!(headers["accept"], "text/plain");
}

#[test]
fn test_empty_requester_is_rejected() {
    let result = create_headers("", None, None);
    assert!(matches!(result, Err(ApiError::InvalidFormat { .. })));

    let result = create_headers("   ", None, None);
    assert!(
        matches!(result, Err(ApiError::InvalidFormat { .. })),
        "whitespace-only requester is a caller error"
    );
}

#[test]
fn test_deterministic_for_identical_inputs() {
    let first = create_headers("bot", Some("t"), None).unwrap();
    let second = create_headers("bot", Some("t"), None).unwrap();

    assert_eq!(first, second);
}
