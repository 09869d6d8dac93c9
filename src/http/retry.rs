//! Retry policy
//!
//! The policy is a first-class value, inspectable and testable independently
//! of the HTTP call it governs.

use crate::types::BackoffType;
use std::time::Duration;

/// Retry policy: attempt cap plus backoff schedule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per request, the first one included
    pub max_attempts: u32,
    /// Delay before the first retry
    pub initial_backoff: Duration,
    /// Upper bound for any computed delay
    pub max_backoff: Duration,
    /// How the delay grows between attempts
    pub backoff: BackoffType,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(2),
            max_backoff: Duration::from_secs(10),
            backoff: BackoffType::Exponential,
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the given attempt cap and default backoff
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Self::default()
        }
    }

    /// Set the backoff schedule
    #[must_use]
    pub fn with_backoff(mut self, backoff: BackoffType, initial: Duration, max: Duration) -> Self {
        self.backoff = backoff;
        self.initial_backoff = initial;
        self.max_backoff = max;
        self
    }

    /// Delay to sleep after a failed attempt, 0-indexed
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let delay = match self.backoff {
            BackoffType::Constant => self.initial_backoff,
            BackoffType::Linear => self.initial_backoff.saturating_mul(attempt + 1),
            BackoffType::Exponential => self
                .initial_backoff
                .saturating_mul(2u32.saturating_pow(attempt)),
        };

        std::cmp::min(delay, self.max_backoff)
    }
}
