//! Query session state
//!
//! A [`QuerySession`] is the bookkeeping for one active search: the query
//! text, the next page to request, how many items have been delivered, and
//! the in-flight and exhaustion flags. Sessions are never reused. Starting a
//! new search replaces the whole value with a fresh one under a new
//! [`SessionId`].

use std::fmt;

use crate::api::SearchPage;

/// Page index of the first page of every session
pub const FIRST_PAGE: u32 = 1;

/// Generation number identifying one query session
///
/// Ids are allocated in increasing order by the paging client, so a fetch
/// result can be checked against the session that is current when it lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SessionId(u64);

impl SessionId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// State of one search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySession {
    /// Identity of this session
    pub id: SessionId,

    /// Trimmed query text; empty only for the placeholder session
    pub query: String,

    /// Next page to request
    pub page_index: u32,

    /// Items delivered to the renderer so far
    pub loaded_count: u64,

    /// Latest total reported by the remote, `None` before the first response
    pub total_available: Option<u64>,

    /// A fetch for this session is outstanding
    pub is_fetching: bool,

    /// No further items remain for this session
    pub is_exhausted: bool,
}

impl QuerySession {
    /// Fresh session positioned at the first page
    #[must_use]
    pub fn new(id: SessionId, query: impl Into<String>) -> Self {
        Self {
            id,
            query: query.into(),
            page_index: FIRST_PAGE,
            loaded_count: 0,
            total_available: None,
            is_fetching: false,
            is_exhausted: false,
        }
    }

    /// Apply a successful response for this session
    pub(crate) fn complete_fetch(&mut self, page: &SearchPage) {
        self.page_index += 1;
        self.is_fetching = false;
        self.total_available = Some(page.total_available);
        if page.is_empty() {
            self.is_exhausted = true;
        }
    }

    /// Add delivered items and re-check the total
    pub(crate) fn record_loaded(&mut self, count: u64) {
        self.loaded_count += count;
        if self.reached_total() {
            self.is_exhausted = true;
        }
    }

    /// Whether the loaded count has caught up with the latest reported total
    #[must_use]
    pub fn reached_total(&self) -> bool {
        self.total_available
            .is_some_and(|total| self.loaded_count >= total)
    }
}
