//! Retry decisions with exponential backoff.
//!
//! The delay before retry `n` (zero-based count of prior attempts) is
//! `retry_backoff_factor * 2^n` seconds, optionally capped.

use std::time::Duration;

use crate::clients::errors::{DatalinkError, DatalinkErrorKind};
use crate::config::ApiConfig;

/// Outcome of [`RetryPolicy::should_retry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryDecision {
    /// Whether another attempt should be made.
    pub retry: bool,
    /// How long to wait before it. Zero when `retry` is false.
    pub delay: Duration,
}

impl RetryDecision {
    /// A decision to stop and surface the error.
    pub const STOP: Self = Self {
        retry: false,
        delay: Duration::ZERO,
    };
}

/// Decides whether a failed attempt is retried, and after how long.
///
/// # Example
///
/// ```rust
/// use datalink::{classify, ApiConfig, RetryPolicy};
/// use std::time::Duration;
///
/// let policy = RetryPolicy::from_config(&ApiConfig::default());
/// let error = classify(503, r#"{"datalink_error": {"code": "QEXx01", "message": "down"}}"#);
///
/// let decision = policy.should_retry(2, &error);
/// assert!(decision.retry);
/// assert_eq!(decision.delay, Duration::from_secs(2));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RetryPolicy {
    use_retries: bool,
    max_retries: u32,
    backoff_factor: f64,
    max_wait: Option<Duration>,
    retry_status_codes: Vec<u16>,
}

impl RetryPolicy {
    /// Creates a policy from the retry settings of a configuration.
    #[must_use]
    pub fn from_config(config: &ApiConfig) -> Self {
        Self {
            use_retries: config.use_retries(),
            max_retries: config.max_retries(),
            backoff_factor: config.retry_backoff_factor(),
            max_wait: config.max_wait_between_retries(),
            retry_status_codes: config.retry_status_codes().to_vec(),
        }
    }

    /// Returns `true` if the error describes a condition worth retrying.
    ///
    /// Transient kinds always qualify. Generic errors qualify only when their
    /// status is one of the configured retry status codes. Every other kind
    /// is permanent.
    #[must_use]
    pub fn is_retryable(&self, error: &DatalinkError) -> bool {
        error.kind.is_transient()
            || (error.kind == DatalinkErrorKind::Generic
                && self.retry_status_codes.contains(&error.status_code))
    }

    /// Returns the backoff delay before retry `attempt`.
    ///
    /// Non-positive or non-finite delays are treated as zero.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let secs = self.backoff_factor * 2f64.powf(f64::from(attempt));
        if secs.is_nan() || secs <= 0.0 {
            return Duration::ZERO;
        }
        let delay = Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX);
        self.max_wait.map_or(delay, |max| delay.min(max))
    }

    /// Decides whether to retry after attempt `attempt` failed with `error`.
    #[must_use]
    pub fn should_retry(&self, attempt: u32, error: &DatalinkError) -> RetryDecision {
        if !self.use_retries || attempt >= self.max_retries || !self.is_retryable(error) {
            return RetryDecision::STOP;
        }
        RetryDecision {
            retry: true,
            delay: self.delay_for(attempt),
        }
    }
}
