//! Connector contract and base client
//!
//! `Connector` is the capability set every concrete connector exposes;
//! `ConnectorClient` carries the shared responsibilities so concrete
//! connectors stay thin: one long-lived HTTP session, auth header injection,
//! `get`/`post` convenience operations, and both paginators.

use crate::config::ConnectorConfig;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig, RateLimiterConfig, RequestConfig, RetryPolicy};
use crate::pagination::{CursorPagination, OffsetPagination};
use crate::types::StringMap;
use async_trait::async_trait;
use serde_json::Value;

/// Core trait that all connectors implement
///
/// Concrete connectors supply authentication headers and response
/// validation; the framework supplies everything else through
/// [`ConnectorClient`]. Whether an invalid record aborts an extraction or
/// is skipped is the connector's decision, `validate_response` is only the
/// hook.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Authentication headers for the upstream API
    fn auth_headers(&self) -> StringMap;

    /// Extract records from the source
    async fn extract(&self, params: &StringMap) -> Result<Vec<Value>>;

    /// Validate a single record against the connector's schema
    fn validate_response(&self, record: &Value) -> bool;
}

/// Shared base for concrete connectors
///
/// Owns the HTTP session for its entire lifetime; the session is released
/// exactly once when the client is dropped, on every exit path.
pub struct ConnectorClient {
    config: ConnectorConfig,
    http: HttpClient,
}

impl ConnectorClient {
    /// Create a client without auth headers
    pub fn new(config: ConnectorConfig) -> Result<Self> {
        Self::with_auth_headers(config, StringMap::new())
    }

    /// Create a client, injecting the given auth headers into the session
    /// when a credential is configured
    pub fn with_auth_headers(config: ConnectorConfig, auth_headers: StringMap) -> Result<Self> {
        config.validate()?;

        let mut builder = HttpClientConfig::builder()
            .base_url(config.base_url.as_str())
            .timeout(config.request_timeout())
            .retry(RetryPolicy::new(config.max_retries))
            .rate_limit(RateLimiterConfig::new(
                config.rate_limit_calls,
                config.rate_limit_window(),
            ));

        if config.auth_key().is_some() {
            for (key, value) in auth_headers {
                builder = builder.header(key, value);
            }
        }

        Ok(Self {
            http: HttpClient::with_config(builder.build()),
            config,
        })
    }

    /// The connector configuration
    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    /// The underlying HTTP client
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// GET an endpoint under the base URL, returning the JSON body
    pub async fn get(&self, endpoint: &str, request: RequestConfig) -> Result<Value> {
        self.http.get_json_with_config(endpoint, request).await
    }

    /// POST a JSON body to an endpoint under the base URL
    pub async fn post(&self, endpoint: &str, body: Value) -> Result<Value> {
        let response = self.http.post(endpoint, body).await?;
        response.json().await.map_err(Into::into)
    }

    /// Start offset-based pagination over an endpoint
    pub fn paginate_offset(&self, endpoint: &str, limit: u32) -> OffsetPagination<'_> {
        OffsetPagination::new(&self.http, endpoint, limit)
    }

    /// Start cursor-based pagination over an endpoint
    pub fn paginate_cursor(&self, endpoint: &str) -> CursorPagination<'_> {
        CursorPagination::new(&self.http, endpoint)
    }
}

impl std::fmt::Debug for ConnectorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectorClient")
            .field("base_url", &self.config.base_url)
            .field("has_credential", &self.config.auth_key().is_some())
            .finish_non_exhaustive()
    }
}
