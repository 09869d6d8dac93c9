//! # sourcetap
//!
//! A minimal, Rust-native framework for building data connectors that pull
//! paginated records from REST-style HTTP APIs under rate limits, with
//! retry-on-failure semantics.
//!
//! ## Features
//!
//! - **Sliding-Window Rate Limiting**: quota evaluated over a rolling window,
//!   consulted before every attempt, retries included
//! - **Automatic Retries**: inspectable retry policy with constant, linear,
//!   or exponential backoff
//! - **Response Normalization**: bare arrays, `data`/`results`/`items`
//!   envelopes, and single objects all become flat record lists
//! - **Smart Pagination**: offset and cursor strategies as lazy, pull-driven
//!   page sequences
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sourcetap::{ConnectorConfig, ConnectorClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ConnectorConfig::new("https://api.example.com")
//!         .with_api_key("sk_test_...")
//!         .with_rate_limit(60, 60);
//!
//!     let client = ConnectorClient::new(config)?;
//!
//!     let mut pages = client.paginate_offset("/customers", 100);
//!     while let Some(page) = pages.next_page().await {
//!         // Process one page of records
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Connector Interface                      │
//! │  auth_headers() → map     extract(params) → records         │
//! │  validate_response(record) → bool                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────────┬─────────────┴─────────────┬─────────────────┐
//! │     HTTP     │         Paginate          │     Extract     │
//! ├──────────────┼───────────────────────────┼─────────────────┤
//! │ GET/POST     │ Offset (limit/offset)     │ Bare array      │
//! │ Retry        │ Cursor (opaque token)     │ data/results/   │
//! │ Rate Limit   │ Lazy page pulls           │ items envelope  │
//! │ Backoff      │ max_pages cutoff          │ Dotted paths    │
//! └──────────────┴───────────────────────────┴─────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the framework
pub mod error;

/// Common types and type aliases
pub mod types;

/// Connector configuration
pub mod config;

/// Response record extraction
pub mod extract;

/// HTTP client with retry and rate limiting
pub mod http;

/// Pagination strategies
pub mod pagination;

/// Connector contract and base client
pub mod connector;

/// Built-in connectors
pub mod connectors;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::ConnectorConfig;
pub use connector::{Connector, ConnectorClient};
pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
