//! Webhook token verification.
//!
//! GitLab authenticates webhook deliveries with a shared secret carried
//! verbatim in the `x-gitlab-token` header, not a payload signature. The
//! comparison uses constant-time equality to prevent timing attacks.

use subtle::ConstantTimeEq;

/// Compare a presented webhook token against the configured secret.
///
/// Uses the `subtle` crate for a constant-time comparison so that the
/// duration of the check reveals nothing about how much of the token
/// matched.
///
/// # Arguments
///
/// * `expected` - The secret configured for the webhook endpoint
/// * `presented` - The value of the `x-gitlab-token` header
///
/// # Examples
///
/// ```
/// use gitlab_bot_sdk::webhook::verify_token;
///
/// assert!(verify_token("s3cret", "s3cret"));
/// assert!(!verify_token("s3cret", "guess"));
/// ```
pub fn verify_token(expected: &str, presented: &str) -> bool {
    let expected = expected.as_bytes();
    let presented = presented.as_bytes();

    // Length check first (safe to do in non-constant time)
    if expected.len() != presented.len() {
        return false;
    }

    expected.ct_eq(presented).into()
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
