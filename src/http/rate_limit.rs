//! Sliding-window rate limiting
//!
//! Counts accepted calls within the trailing window and suspends the caller
//! until a new call is permitted. This is a sliding-window limiter evaluated
//! over a rolling exact window, not a token bucket: a burst is admitted until
//! the quota is reached, then each caller waits for the oldest timestamp in
//! the window to age out.

use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Configuration for rate limiting
#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Maximum number of calls within one period
    pub max_calls: u32,
    /// Sliding window length
    pub period: Duration,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            max_calls: 60,
            period: Duration::from_secs(60),
        }
    }
}

impl RateLimiterConfig {
    /// Create a new rate limiter config
    pub fn new(max_calls: u32, period: Duration) -> Self {
        Self { max_calls, period }
    }
}

/// Sliding-window rate limiter
///
/// Owns its timestamp log; never shared globally. Pass by reference to
/// whatever executes requests.
pub struct RateLimiter {
    config: RateLimiterConfig,
    calls: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given config
    ///
    /// A quota of zero is clamped to one so `admit` can always make progress.
    pub fn new(config: RateLimiterConfig) -> Self {
        let config = RateLimiterConfig {
            max_calls: config.max_calls.max(1),
            period: config.period,
        };
        let calls = Mutex::new(VecDeque::with_capacity(config.max_calls as usize));
        Self { config, calls }
    }

    /// Wait until a call is permitted, then record it as accepted.
    ///
    /// Never fails, only delays. Timestamps older than the window are pruned
    /// on every invocation; when the quota is exhausted the caller sleeps
    /// until the oldest remaining timestamp ages out and then re-checks.
    pub async fn admit(&self) {
        loop {
            let wait = {
                let mut calls = self.calls.lock().await;
                let now = Instant::now();
                while calls
                    .front()
                    .is_some_and(|t| now.duration_since(*t) >= self.config.period)
                {
                    calls.pop_front();
                }

                if (calls.len() as u32) < self.config.max_calls {
                    calls.push_back(now);
                    return;
                }

                match calls.front() {
                    Some(oldest) => self.config.period.saturating_sub(now.duration_since(*oldest)),
                    None => Duration::ZERO,
                }
            };

            // The window may already have elapsed by the time we computed it
            if wait.is_zero() {
                continue;
            }

            debug!(wait_ms = wait.as_millis() as u64, "rate limit reached, waiting");
            tokio::time::sleep(wait).await;
        }
    }

    /// Number of accepted calls still inside the current window
    pub async fn in_flight(&self) -> usize {
        let calls = self.calls.lock().await;
        let now = Instant::now();
        calls
            .iter()
            .filter(|t| now.duration_since(**t) < self.config.period)
            .count()
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
