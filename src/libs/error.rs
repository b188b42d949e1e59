//! Failure taxonomy shared by the API client, transformer, and processor.
//!
//! Four conditions matter to callers and each gets its own variant:
//!
//! - [`PaymoError::Validation`] — a malformed timesheet entry; fatal to the
//!   file being processed.
//! - [`PaymoError::Api`] — a non-429 HTTP failure; the status and response
//!   body are preserved so the operator can diagnose without re-running.
//! - [`PaymoError::RateLimited`] — HTTP 429 carrying the provider's
//!   `Retry-After` in seconds. The client never retries; callers decide.
//! - [`PaymoError::NotFound`] — no project/task matched a matter name; the
//!   operator must fix the config mapping or the timesheet.
//!
//! Transport failures (timeouts, connection resets) ride along as
//! [`PaymoError::Request`] and abort the current call only.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaymoError {
    #[error("invalid timesheet entry: {0}")]
    Validation(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("rate limit exceeded, retry after {0}s")]
    RateLimited(u64),

    #[error("{0}")]
    NotFound(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl PaymoError {
    /// Seconds to wait before retrying, when the provider said so.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            PaymoError::RateLimited(secs) => Some(*secs),
            _ => None,
        }
    }
}
