//! Built-in connectors
//!
//! `GithubConnector` is the reference implementation of the [`Connector`]
//! contract: auth header injection from the configured credential, offset
//! pagination over a repository listing, and a per-record schema check.
//! Its policy for invalid records is skip-and-log; other connectors are
//! free to abort instead.

use crate::config::ConnectorConfig;
use crate::connector::{Connector, ConnectorClient};
use crate::error::{Error, Result};
use crate::types::StringMap;
use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

/// Fields every repository record must carry
const REQUIRED_REPO_FIELDS: [&str; 4] = ["id", "name", "full_name", "html_url"];

/// Default page size for repository listings
const DEFAULT_PAGE_SIZE: u32 = 100;

/// Connector for the GitHub REST API
///
/// Fetches repository records for a user. Configure with
/// `https://api.github.com` as the base URL; an `api_key` becomes a
/// `token` authorization header.
pub struct GithubConnector {
    client: ConnectorClient,
}

impl GithubConnector {
    /// Create a GitHub connector from a connector configuration
    pub fn new(config: ConnectorConfig) -> Result<Self> {
        let auth = token_auth_headers(config.auth_key());
        let client = ConnectorClient::with_auth_headers(config, auth)?;
        Ok(Self { client })
    }

    /// The underlying base client
    pub fn client(&self) -> &ConnectorClient {
        &self.client
    }
}

#[async_trait]
impl Connector for GithubConnector {
    fn auth_headers(&self) -> StringMap {
        token_auth_headers(self.client.config().auth_key())
    }

    /// Extract all repositories for the user named in `params["username"]`
    ///
    /// Optional `params["max_pages"]` bounds the pagination run. Records
    /// failing the schema check are skipped and logged, not fatal.
    async fn extract(&self, params: &StringMap) -> Result<Vec<Value>> {
        let username = params
            .get("username")
            .ok_or_else(|| Error::missing_field("username"))?;
        let endpoint = format!("users/{username}/repos");

        let mut pager = self
            .client
            .paginate_offset(&endpoint, DEFAULT_PAGE_SIZE);
        if let Some(max_pages) = params.get("max_pages") {
            let max_pages = max_pages
                .parse()
                .map_err(|_| Error::invalid_value("max_pages", "must be an integer"))?;
            pager = pager.with_max_pages(max_pages);
        }

        let mut repos = Vec::new();
        while let Some(page) = pager.next_page().await {
            for record in page {
                if self.validate_response(&record) {
                    repos.push(record);
                } else {
                    warn!("Skipping malformed repository record for user {username}");
                }
            }
        }
        Ok(repos)
    }

    fn validate_response(&self, record: &Value) -> bool {
        let Some(repo) = record.as_object() else {
            return false;
        };
        if !REQUIRED_REPO_FIELDS.iter().all(|f| repo.contains_key(*f)) {
            return false;
        }
        repo["id"].is_i64()
            && repo["name"].is_string()
            && repo["full_name"].is_string()
            && repo["html_url"].is_string()
    }
}

/// `Authorization: token …` headers for a configured credential
fn token_auth_headers(api_key: Option<String>) -> StringMap {
    let mut headers = StringMap::new();
    if let Some(key) = api_key {
        headers.insert("Authorization".to_string(), format!("token {key}"));
    }
    headers
}
