//! Time abstraction for testability.
//!
//! This module provides a [`Sleeper`] trait so retry delays can be
//! replaced in tests while the real Tokio timer is used in production.

use std::time::Duration;

/// Abstraction over asynchronous sleeping.
///
/// Implementations pause the current task for the given duration,
/// allowing tests to observe or skip delays instead of waiting.
///
/// # Example
///
/// ```
/// use emqx_admin::time::{InstantSleeper, Sleeper};
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// InstantSleeper.sleep(Duration::from_secs(3600)).await;
/// # }
/// ```
pub trait Sleeper: Send + Sync {
    /// Sleeps for the given duration.
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;
}

/// Production sleeper backed by [`tokio::time::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sleeper that returns immediately.
///
/// Useful in tests to exercise retry paths without real delays.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantSleeper;

impl Sleeper for InstantSleeper {
    async fn sleep(&self, _duration: Duration) {}
}
