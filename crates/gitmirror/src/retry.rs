//! Exponential-backoff retry around a single HTTP call.
//!
//! Every request either side of the migration goes through
//! [`send_with_retry`]. Status codes are sorted into an explicit
//! [`StatusClass`] so the retry/accept/fail decision is one exhaustive match
//! rather than scattered conditionals.

use std::time::Duration;

use thiserror::Error;

use crate::http::{HttpError, HttpRequest, HttpTransport};

/// First backoff delay.
pub const INITIAL_BACKOFF: Duration = Duration::from_secs(7);

/// Backoff ceiling; also the forced delay after a 429.
pub const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Total attempts before giving up on a retryable status.
pub const MAX_ATTEMPTS: u32 = 3;

/// Retry configuration.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Delay before the second attempt.
    pub initial_delay: Duration,
    /// Ceiling on the doubling delay.
    pub max_delay: Duration,
    /// Maximum number of attempts, counting the first.
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_delay: INITIAL_BACKOFF,
            max_delay: MAX_BACKOFF,
            max_attempts: MAX_ATTEMPTS,
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn new(initial_delay: Duration, max_delay: Duration, max_attempts: u32) -> Self {
        Self {
            initial_delay,
            max_delay,
            max_attempts,
        }
    }
}

/// How one HTTP status is handled by the retrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 200/201: return the body.
    Success,
    /// 409/422: the resource already exists on the destination. Treated as
    /// success so repeated runs stay idempotent; no error is surfaced.
    AlreadyExists,
    /// 429: retry after forcing the delay to the ceiling.
    RateLimited,
    /// 502/503/504: transient upstream failure, retry at the current delay.
    Transient,
    /// Everything else: abort immediately, surfacing the body.
    Fatal,
}

/// Sort a status code into its retry bucket.
#[must_use]
pub fn classify_status(status: u16) -> StatusClass {
    match status {
        200 | 201 => StatusClass::Success,
        409 | 422 => StatusClass::AlreadyExists,
        429 => StatusClass::RateLimited,
        502 | 503 | 504 => StatusClass::Transient,
        _ => StatusClass::Fatal,
    }
}

/// Double `current`, capped at `max`.
#[must_use]
pub fn next_delay(current: Duration, max: Duration) -> Duration {
    (current * 2).min(max)
}

/// A call that ended in one of the two accept buckets.
#[derive(Debug, Clone)]
pub struct Retried {
    pub status: u16,
    pub body: Vec<u8>,
    /// True when the accept came from a 409/422 "already exists" response.
    pub already_existed: bool,
}

#[derive(Debug, Error)]
pub enum RetryError {
    /// The transport itself failed (DNS, refused connection, timeout).
    /// Classification is status-based, so these are not retried.
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// A status outside every retry/accept bucket.
    #[error("unexpected HTTP status {status}: {body}")]
    Fatal { status: u16, body: String },

    /// All attempts consumed on retryable statuses.
    #[error("giving up after {attempts} attempts (last status {last_status})")]
    Exhausted { attempts: u32, last_status: u16 },
}

/// Execute `request`, retrying on rate-limit and transient upstream statuses.
///
/// The delay starts at `policy.initial_delay` and doubles after every sleep,
/// capped at `policy.max_delay`; a 429 forces the next sleep to the cap
/// regardless of where the doubling had got to. Success and already-exists
/// statuses return on the first qualifying attempt, fatal statuses abort
/// without sleeping.
pub async fn send_with_retry(
    transport: &dyn HttpTransport,
    request: HttpRequest,
    policy: &RetryPolicy,
) -> Result<Retried, RetryError> {
    let mut delay = policy.initial_delay;
    let mut attempt = 1u32;

    loop {
        let response = transport.send(request.clone()).await?;
        let status = response.status;

        match classify_status(status) {
            StatusClass::Success => {
                return Ok(Retried {
                    status,
                    body: response.body,
                    already_existed: false,
                });
            }
            StatusClass::AlreadyExists => {
                tracing::debug!(status, url = %request.url, "resource already exists, continuing");
                return Ok(Retried {
                    status,
                    body: response.body,
                    already_existed: true,
                });
            }
            StatusClass::RateLimited => {
                delay = policy.max_delay;
            }
            StatusClass::Transient => {}
            StatusClass::Fatal => {
                return Err(RetryError::Fatal {
                    status,
                    body: response.body_text(),
                });
            }
        }

        if attempt >= policy.max_attempts {
            return Err(RetryError::Exhausted {
                attempts: attempt,
                last_status: status,
            });
        }

        tracing::warn!(
            status,
            attempt,
            delay_secs = delay.as_secs_f64(),
            url = %request.url,
            "retrying after backoff"
        );
        tokio::time::sleep(delay).await;
        delay = next_delay(delay, policy.max_delay);
        attempt += 1;
    }
}
