//! Paging-specific error types
//!
//! This module defines the errors the paging client can return from
//! `fetch_next_page`. Only `Fetch` is expected in normal operation; the others
//! are rejections that happen before any request is sent.
//!
//! # Error Types
//!
//! - **`EmptyQuery`**: the session has no query text
//! - **`ConcurrentFetch`**: a fetch for this session is already outstanding
//! - **`SessionReplaced`**: the caller asked for a session that is no longer current
//! - **`Fetch`**: the transport failed (wraps `TransportError`)

use thiserror::Error;

use super::session::SessionId;
use crate::api::TransportError;

/// Errors from the paging client
#[derive(Debug, Error)]
pub enum PagingError {
    /// No query text is set for the current session
    #[error("Cannot fetch without a search query")]
    EmptyQuery,

    /// A fetch for the current session is still in flight
    #[error("A page fetch is already in progress for this session")]
    ConcurrentFetch,

    /// The session the caller expected was replaced before the fetch began
    #[error("Session {expected} was replaced by {current}")]
    SessionReplaced {
        /// Session the caller meant to fetch for
        expected: SessionId,
        /// Session that is current now
        current: SessionId,
    },

    /// The transport failed; the page cursor was not advanced
    #[error("Fetch failed: {0}")]
    Fetch(#[from] TransportError),
}

impl PagingError {
    /// Whether this error is a guard rejection rather than a transport failure
    #[must_use]
    pub const fn is_guard_violation(&self) -> bool {
        matches!(self, Self::EmptyQuery | Self::ConcurrentFetch)
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
