//! Tests for error types.

use super::*;
use chrono::Utc;

/// Verify that WebhookError variants map to the HTTP statuses a webhook
/// endpoint should answer with: 401 for validation failures, 400 for
/// everything else about a malformed delivery.
#[test]
fn test_webhook_error_http_status() {
    assert_eq!(WebhookError::MissingEventType.http_status(), 400);
    assert_eq!(WebhookError::ValidationFailure.http_status(), 401);
    assert_eq!(
        WebhookError::BadRequest {
            message: "not json".to_string()
        }
        .http_status(),
        400
    );
}

/// Verify that the validation failure message is fixed and does not reveal
/// why verification failed.
#[test]
fn test_validation_failure_message_is_opaque() {
    let message = WebhookError::ValidationFailure.to_string();
    assert_eq!(message, "webhook token validation failed");
    assert!(!message.contains("missing"), "must not reveal the cause");
    assert!(!message.contains("mismatch"), "must not reveal the cause");
}

/// Verify that ApiError variants correctly classify transient vs
/// non-transient conditions.
#[test]
fn test_api_error_transience() {
    // Transient: server errors, rate limiting, transport failures
    assert!(ApiError::Http {
        status: 500,
        message: "server error".to_string()
    }
    .is_transient());
    assert!(ApiError::Http {
        status: 429,
        message: "slow down".to_string()
    }
    .is_transient());
    assert!(ApiError::RateLimitExceeded {
        rate_limit: RateLimit::new(600, 0, Utc::now()).unwrap(),
        message: "rate limit exceeded".to_string()
    }
    .is_transient());
    assert!(ApiError::Transport {
        message: "connection reset".to_string()
    }
    .is_transient());

    // Non-transient: client errors and contract violations
    assert!(!ApiError::Http {
        status: 404,
        message: "404 Not Found".to_string()
    }
    .is_transient());
    assert!(!ApiError::InvalidField {
        errors: None,
        message: "title is missing".to_string()
    }
    .is_transient());
    assert!(!ApiError::InvalidFormat {
        field: "ratelimit-limit".to_string(),
        message: "not a number".to_string()
    }
    .is_transient());
}

/// Verify that status() reports the response status behind each error kind.
#[test]
fn test_api_error_status() {
    assert_eq!(
        ApiError::Http {
            status: 502,
            message: "bad gateway".to_string()
        }
        .status(),
        Some(502)
    );
    assert_eq!(
        ApiError::RateLimitExceeded {
            rate_limit: RateLimit::new(600, 0, Utc::now()).unwrap(),
            message: "rate limit exceeded".to_string()
        }
        .status(),
        Some(403)
    );
    assert_eq!(
        ApiError::InvalidField {
            errors: None,
            message: "bad field".to_string()
        }
        .status(),
        Some(422)
    );
    assert_eq!(
        ApiError::Transport {
            message: "timeout".to_string()
        }
        .status(),
        None
    );
}
