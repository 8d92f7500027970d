//! Bounded fixed-interval polling, implemented once and scheduled two ways.
//!
//! `run_async` suspends between attempts (cancellation is possible at each
//! suspension point); `run_blocking` parks the calling thread. Both make at
//! most `max_attempts` attempts and never add backoff or jitter.

use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 20,
            interval: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
        }
    }

    /// Run `attempt` until it reports done or the attempt budget is spent.
    /// Returns true on the first successful attempt, false once exhausted.
    pub async fn run_async<F, Fut>(&self, mut attempt: F) -> bool
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = bool>,
    {
        for remaining in (0..self.max_attempts).rev() {
            if attempt().await {
                return true;
            }
            if remaining > 0 {
                tokio::time::sleep(self.interval).await;
            }
        }
        false
    }

    /// Blocking scheduling of the same policy, for callers without a runtime.
    pub fn run_blocking<F>(&self, mut attempt: F) -> bool
    where
        F: FnMut() -> bool,
    {
        for remaining in (0..self.max_attempts).rev() {
            if attempt() {
                return true;
            }
            if remaining > 0 {
                std::thread::sleep(self.interval);
            }
        }
        false
    }
}
