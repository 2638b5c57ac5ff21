//! Tests for response deciphering.

use super::*;
use serde_json::json;

fn json_headers() -> HashMap<String, String> {
    HashMap::from([("content-type".to_string(), "application/json".to_string())])
}

// ============================================================================
// Success Statuses
// ============================================================================

#[test]
fn test_200_decodes_json_body() {
    let body = br#"{"id": 42, "name": "demo"}"#;

    let response = decipher_response(200, &json_headers(), body).unwrap();

    assert_eq!(response.data, Some(json!({"id": 42, "name": "demo"})));
    assert_eq!(response.rate_limit, None);
    assert_eq!(response.next_url, None);
}

#[test]
fn test_201_decodes_json_body() {
    let response = decipher_response(201, &json_headers(), br#"{"created": true}"#).unwrap();

    assert_eq!(response.data, Some(json!({"created": true})));
}

#[test]
fn test_202_with_empty_body() {
    let response = decipher_response(202, &json_headers(), b"").unwrap();

    assert_eq!(response.data, None, "empty body is the no-content sentinel");
}

#[test]
fn test_204_ignores_body_content() {
    // 204 maps to no-content no matter what the body holds.
    let response = decipher_response(204, &json_headers(), br#"{"ignored": true}"#).unwrap();

    assert_eq!(response.data, None);
}

#[test]
fn test_no_content_sentinel_is_distinct_from_json_null() {
    let response = decipher_response(200, &json_headers(), b"null").unwrap();

    assert_eq!(
        response.data,
        Some(serde_json::Value::Null),
        "a body holding JSON null decodes to null, not to the sentinel"
    );
}

#[test]
fn test_missing_content_type_yields_no_content() {
    let response = decipher_response(200, &HashMap::new(), br#"{"id": 1}"#).unwrap();

    assert_eq!(response.data, None);
}

#[test]
fn test_text_content_type_decodes_to_string() {
    let headers = HashMap::from([("content-type".to_string(), "text/plain".to_string())]);

    let response = decipher_response(200, &headers, b"plain text answer").unwrap();

    assert_eq!(response.data, Some(json!("plain text answer")));
}

#[test]
fn test_form_urlencoded_body_decodes_payload_field() {
    let headers = HashMap::from([(
        "content-type".to_string(),
        "application/x-www-form-urlencoded; charset=utf-8".to_string(),
    )]);
    let body = b"payload=%7B%22id%22%3A7%7D";

    let response = decipher_response(200, &headers, body).unwrap();

    assert_eq!(response.data, Some(json!({"id": 7})));
}

#[test]
fn test_malformed_json_body_is_fatal() {
    let result = decipher_response(200, &json_headers(), b"{broken");

    assert!(matches!(result, Err(ApiError::InvalidFormat { .. })));
}

// ============================================================================
// Rate Limit and Pagination Bookkeeping
// ============================================================================

#[test]
fn test_success_with_rate_limit_headers() {
    let mut headers = json_headers();
    headers.insert("ratelimit-limit".to_string(), "600".to_string());
    headers.insert("ratelimit-remaining".to_string(), "598".to_string());
    headers.insert("ratelimit-reset".to_string(), "1710000000".to_string());

    let response = decipher_response(200, &headers, br#"[]"#).unwrap();

    let rate_limit = response.rate_limit.expect("full triple yields a snapshot");
    assert_eq!(rate_limit.limit(), 600);
    assert_eq!(rate_limit.remaining(), 598);
}

#[test]
fn test_success_with_malformed_rate_limit_header() {
    let mut headers = json_headers();
    headers.insert("ratelimit-limit".to_string(), "lots".to_string());
    headers.insert("ratelimit-remaining".to_string(), "598".to_string());
    headers.insert("ratelimit-reset".to_string(), "1710000000".to_string());

    let result = decipher_response(200, &headers, br#"[]"#);

    assert!(matches!(result, Err(ApiError::InvalidFormat { .. })));
}

#[test]
fn test_success_with_next_link() {
    let mut headers = json_headers();
    headers.insert(
        "link".to_string(),
        r#"<https://gitlab.com/api/v4/projects?page=2>; rel="next""#.to_string(),
    );

    let response = decipher_response(200, &headers, br#"[]"#).unwrap();

    assert_eq!(
        response.next_url.as_deref(),
        Some("https://gitlab.com/api/v4/projects?page=2")
    );
}

#[test]
fn test_success_without_link_has_no_next_url() {
    let mut headers = json_headers();
    headers.insert(
        "link".to_string(),
        r#"<http://example.com>; rel="unimportant""#.to_string(),
    );

    let response = decipher_response(200, &headers, br#"[]"#).unwrap();

    assert_eq!(response.next_url, None);
}

// ============================================================================
// Error Statuses
// ============================================================================

#[test]
fn test_404_carries_status_and_extracted_message() {
    let body = br#"{"message": "404 Not Found"}"#;

    let result = decipher_response(404, &json_headers(), body);

    match result {
        Err(ApiError::Http { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "404 Not Found");
        }
        other => panic!("expected Http error, got {:?}", other),
    }
}

#[test]
fn test_error_message_falls_back_to_raw_body() {
    let headers = HashMap::from([("content-type".to_string(), "text/html".to_string())]);

    let result = decipher_response(502, &headers, b"<html>Bad Gateway</html>");

    match result {
        Err(ApiError::Http { status, message }) => {
            assert_eq!(status, 502);
            assert_eq!(message, "<html>Bad Gateway</html>");
        }
        other => panic!("expected Http error, got {:?}", other),
    }
}

#[test]
fn test_3xx_is_an_error() {
    let result = decipher_response(301, &json_headers(), b"");

    assert!(matches!(result, Err(ApiError::Http { status: 301, .. })));
}

#[test]
fn test_403_with_exhausted_quota_is_rate_limit_exceeded() {
    let mut headers = json_headers();
    headers.insert("ratelimit-limit".to_string(), "600".to_string());
    headers.insert("ratelimit-remaining".to_string(), "0".to_string());
    headers.insert("ratelimit-reset".to_string(), "1710000000".to_string());

    let result = decipher_response(403, &headers, br#"{"message": "Forbidden"}"#);

    match result {
        Err(ApiError::RateLimitExceeded {
            rate_limit,
            message,
        }) => {
            assert!(rate_limit.is_exhausted());
            assert_eq!(message, "Forbidden");
        }
        other => panic!("expected RateLimitExceeded, got {:?}", other),
    }
}

#[test]
fn test_403_with_remaining_quota_is_plain_http_error() {
    let mut headers = json_headers();
    headers.insert("ratelimit-limit".to_string(), "600".to_string());
    headers.insert("ratelimit-remaining".to_string(), "12".to_string());
    headers.insert("ratelimit-reset".to_string(), "1710000000".to_string());

    let result = decipher_response(403, &headers, br#"{"message": "Forbidden"}"#);

    assert!(matches!(result, Err(ApiError::Http { status: 403, .. })));
}

#[test]
fn test_422_carries_errors_array() {
    let body = br#"{"message": "Validation failed", "errors": [{"field": "title"}]}"#;

    let result = decipher_response(422, &json_headers(), body);

    match result {
        Err(ApiError::InvalidField { errors, message }) => {
            assert_eq!(errors, Some(json!([{"field": "title"}])));
            assert_eq!(message, "Validation failed");
        }
        other => panic!("expected InvalidField, got {:?}", other),
    }
}

#[test]
fn test_422_without_errors_array() {
    let result = decipher_response(422, &json_headers(), br#"{"message": "nope"}"#);

    match result {
        Err(ApiError::InvalidField { errors, .. }) => assert_eq!(errors, None),
        other => panic!("expected InvalidField, got {:?}", other),
    }
}

#[test]
fn test_500_preserves_exact_status() {
    for status in [500u16, 502, 503] {
        let result = decipher_response(status, &json_headers(), b"");
        match result {
            Err(ApiError::Http {
                status: carried, ..
            }) => {
                assert_eq!(carried, status, "error must carry the exact status code");
            }
            other => panic!("expected Http error, got {:?}", other),
        }
    }
}
