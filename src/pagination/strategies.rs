//! Pagination strategy implementations
//!
//! Each paginator is a lazy, pull-driven, finite, single-pass sequence of
//! record pages: `next_page` issues one rate-limited, retried fetch and
//! yields the extracted records, or `None` once the end of data is reached.
//! A paginator cannot be restarted; construct a fresh one per extraction.
//!
//! Any error during a fetch step terminates pagination: the event is logged
//! and the sequence ends, it is not re-raised past the paginator boundary.

use super::types::{Page, PaginationState};
use crate::extract::{nested_value, records_of};
use crate::http::{HttpClient, RequestConfig};
use crate::types::StringMap;
use futures::Stream;
use serde_json::Value;
use tracing::{debug, error};

/// Default query parameter carrying the cursor token
const DEFAULT_CURSOR_PARAM: &str = "cursor";
/// Default dotted path to the next cursor in the response body
const DEFAULT_CURSOR_PATH: &str = "next_cursor";

// ============================================================================
// Offset Pagination
// ============================================================================

/// Offset-based pagination (SQL-style `limit`/`offset` parameters)
///
/// Ends on an empty page, a short page, or the `max_pages` cutoff.
pub struct OffsetPagination<'a> {
    client: &'a HttpClient,
    endpoint: String,
    params: StringMap,
    limit: u32,
    max_pages: Option<u32>,
    state: PaginationState,
}

impl<'a> OffsetPagination<'a> {
    /// Create a new offset paginator for the given endpoint and page size
    pub fn new(client: &'a HttpClient, endpoint: impl Into<String>, limit: u32) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            params: StringMap::new(),
            limit,
            max_pages: None,
            state: PaginationState::new(),
        }
    }

    /// Merge caller-supplied query parameters into every page request
    #[must_use]
    pub fn with_params(mut self, params: StringMap) -> Self {
        self.params = params;
        self
    }

    /// Bound the number of pages fetched
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Current pagination state
    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// Fetch the next page of records
    ///
    /// `limit` and `offset` overwrite any caller-supplied parameters of the
    /// same name on every request.
    pub async fn next_page(&mut self) -> Option<Page> {
        if self.state.done {
            return None;
        }
        if self.max_pages.is_some_and(|max| self.state.page >= max) {
            self.state.mark_done();
            return None;
        }

        let mut request = RequestConfig::new();
        for (key, value) in &self.params {
            request = request.query(key, value);
        }
        request = request
            .query("limit", self.limit.to_string())
            .query("offset", self.state.offset.to_string());

        let response: Value = match self
            .client
            .get_json_with_config(&self.endpoint, request)
            .await
        {
            Ok(body) => body,
            Err(err) => {
                error!(
                    "Pagination failed at offset {}: {err}",
                    self.state.offset
                );
                self.state.mark_done();
                return None;
            }
        };

        let records = records_of(&response);
        if records.is_empty() {
            self.state.mark_done();
            return None;
        }
        self.state.add_fetched(records.len() as u64);
        debug!(
            "Fetched page {} ({} records) at offset {}",
            self.state.page,
            records.len(),
            self.state.offset
        );

        if (records.len() as u32) < self.limit {
            // Short page signals end-of-data
            self.state.mark_done();
        } else {
            self.state.add_offset(self.limit);
            self.state.next_page();
        }

        Some(records)
    }

    /// Drain the paginator into a flat record list
    pub async fn collect_records(mut self) -> Vec<Value> {
        let mut all = Vec::new();
        while let Some(page) = self.next_page().await {
            all.extend(page);
        }
        all
    }

    /// Adapt the paginator into a `Stream` of pages
    pub fn into_stream(self) -> impl Stream<Item = Page> + 'a {
        futures::stream::unfold(self, |mut pager| async move {
            pager.next_page().await.map(|page| (page, pager))
        })
    }
}

// ============================================================================
// Cursor Pagination
// ============================================================================

/// Cursor-based pagination (opaque token from each response)
///
/// The first request carries no cursor; each subsequent request injects the
/// token found at `cursor_path` in the previous response under the
/// `cursor_param` query parameter. Ends on an empty page, a missing or
/// falsy cursor, or the `max_pages` cutoff.
pub struct CursorPagination<'a> {
    client: &'a HttpClient,
    endpoint: String,
    params: StringMap,
    cursor_param: String,
    cursor_path: String,
    max_pages: Option<u32>,
    state: PaginationState,
}

impl<'a> CursorPagination<'a> {
    /// Create a new cursor paginator for the given endpoint
    ///
    /// Defaults: `cursor` as the query parameter, `next_cursor` as the
    /// response path.
    pub fn new(client: &'a HttpClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            params: StringMap::new(),
            cursor_param: DEFAULT_CURSOR_PARAM.to_string(),
            cursor_path: DEFAULT_CURSOR_PATH.to_string(),
            max_pages: None,
            state: PaginationState::new(),
        }
    }

    /// Set the query parameter name carrying the cursor
    #[must_use]
    pub fn with_cursor_param(mut self, param: impl Into<String>) -> Self {
        self.cursor_param = param.into();
        self
    }

    /// Set the dotted path to the next cursor in the response body
    #[must_use]
    pub fn with_cursor_path(mut self, path: impl Into<String>) -> Self {
        self.cursor_path = path.into();
        self
    }

    /// Merge caller-supplied query parameters into every page request
    #[must_use]
    pub fn with_params(mut self, params: StringMap) -> Self {
        self.params = params;
        self
    }

    /// Bound the number of pages fetched
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Current pagination state
    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// Fetch the next page of records
    pub async fn next_page(&mut self) -> Option<Page> {
        if self.state.done {
            return None;
        }
        if self.max_pages.is_some_and(|max| self.state.page >= max) {
            self.state.mark_done();
            return None;
        }

        let mut request = RequestConfig::new();
        for (key, value) in &self.params {
            request = request.query(key, value);
        }
        if let Some(cursor) = &self.state.cursor {
            request = request.query(&self.cursor_param, cursor);
        }

        let response: Value = match self
            .client
            .get_json_with_config(&self.endpoint, request)
            .await
        {
            Ok(body) => body,
            Err(err) => {
                error!("Pagination failed at page {}: {err}", self.state.page);
                self.state.mark_done();
                return None;
            }
        };

        let records = records_of(&response);
        if records.is_empty() {
            self.state.mark_done();
            return None;
        }
        self.state.add_fetched(records.len() as u64);
        debug!("Fetched page {} ({} records)", self.state.page, records.len());

        match nested_value(&response, &self.cursor_path).and_then(cursor_token) {
            Some(next) => {
                self.state.set_cursor(next);
                self.state.next_page();
            }
            None => self.state.mark_done(),
        }

        Some(records)
    }

    /// Drain the paginator into a flat record list
    pub async fn collect_records(mut self) -> Vec<Value> {
        let mut all = Vec::new();
        while let Some(page) = self.next_page().await {
            all.extend(page);
        }
        all
    }

    /// Adapt the paginator into a `Stream` of pages
    pub fn into_stream(self) -> impl Stream<Item = Page> + 'a {
        futures::stream::unfold(self, |mut pager| async move {
            pager.next_page().await.map(|page| (page, pager))
        })
    }
}

/// Convert a cursor value into a usable token
///
/// Null, empty strings, and non-scalar values end pagination.
fn cursor_token(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
