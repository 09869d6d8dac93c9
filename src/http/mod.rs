//! HTTP client module
//!
//! Provides HTTP client with retry, rate limiting, and backoff strategies.
//!
//! # Features
//!
//! - **Sliding-Window Rate Limiting**: quota evaluated over a rolling window
//! - **Automatic Retries**: configurable retry policy with backoff
//! - **Backoff Strategies**: constant, linear, and exponential backoff

mod client;
mod rate_limit;
mod retry;

pub use client::{HttpClient, HttpClientConfig, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use retry::RetryPolicy;

#[cfg(test)]
mod tests;
