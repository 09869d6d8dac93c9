//! Pagination module
//!
//! Supports: offset-based and cursor-based pagination.
//!
//! # Overview
//!
//! Both strategies turn a sequence of HTTP calls into a uniform stream of
//! record pages. Pages are pulled lazily with `next_page`, adapted into a
//! `futures::Stream` with `into_stream`, or drained with `collect_records`.
//! Fetch errors end the sequence; they are logged and never propagated past
//! the paginator.

mod strategies;
mod types;

pub use strategies::{CursorPagination, OffsetPagination};
pub use types::{Page, PaginationState};
