//! Retry policy for transport failures.

use std::num::NonZeroU32;
use std::time::Duration;

use crate::config::defaults;

/// Fixed-delay retry behavior for transport-level failures.
///
/// The same delay is used between every attempt (no backoff). By default
/// the number of attempts is unbounded; the loop only ends on success, on
/// a non-retryable error, or when the caller's cancellation token fires.
///
/// # Defaults
///
/// - `delay`: 5 seconds
/// - `max_attempts`: unbounded
///
/// # Example
///
/// ```
/// use emqx_admin::transport::RetryPolicy;
/// use std::num::NonZeroU32;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new()
///     .with_delay(Duration::from_secs(1))
///     .with_max_attempts(NonZeroU32::new(10));
/// assert!(policy.should_retry(9));
/// assert!(!policy.should_retry(10));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Delay slept between two attempts.
    ///
    /// Zero is allowed and produces a tight retry loop.
    pub delay: Duration,

    /// Maximum number of attempts including the first one.
    ///
    /// `None` retries until cancelled.
    pub max_attempts: Option<NonZeroU32>,
}

impl RetryPolicy {
    /// Default delay between attempts (5 seconds).
    pub const DEFAULT_DELAY: Duration = defaults::retry_delay();

    /// Creates a policy with the default delay and unbounded attempts.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delay: Self::DEFAULT_DELAY,
            max_attempts: None,
        }
    }

    /// Sets the delay between attempts.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Caps the number of attempts. `None` removes the cap.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: Option<NonZeroU32>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Returns true if another attempt is allowed after `attempt` attempts
    /// (1-indexed) have failed.
    #[must_use]
    pub const fn should_retry(&self, attempt: u32) -> bool {
        match self.max_attempts {
            Some(max) => attempt < max.get(),
            None => true,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}
