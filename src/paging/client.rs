//! Stateful paging client
//!
//! Wraps a [`SearchTransport`] and issues at most one page request at a time
//! for the current query session.
//!
//! # Workflow
//!
//! ```text
//! set_query("cats") → reset_session() → fetch_next_page() → record_loaded(n)
//!                                            ↑                     │
//!                                            └─────── scroll ──────┘
//! ```
//!
//! The session state sits behind a mutex that is only held for bookkeeping,
//! never across the transport call. That is what lets a second caller observe
//! `is_fetching` and be rejected with [`PagingError::ConcurrentFetch`] while
//! the first request is outstanding.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

use super::error::PagingError;
use super::session::{QuerySession, SessionId};
use crate::api::{ImageResult, SearchTransport};

/// Default number of items requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 40;

/// Result of one successful page fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Session the request was issued under
    pub session_id: SessionId,
    /// Page index that was requested
    pub page_index: u32,
    /// Items in arrival order
    pub items: Vec<ImageResult>,
    /// Total reported by the remote alongside this page
    pub total_available: u64,
}

struct ClientState {
    /// Query to use for the next session
    pending_query: String,
    session: QuerySession,
}

/// Paging client for one query session at a time
pub struct PagingClient {
    transport: Arc<dyn SearchTransport>,
    page_size: u32,
    state: Mutex<ClientState>,
}

impl PagingClient {
    /// Create a client with no active query
    #[must_use]
    pub fn new(transport: Arc<dyn SearchTransport>, page_size: u32) -> Self {
        Self {
            transport,
            page_size,
            state: Mutex::new(ClientState {
                pending_query: String::new(),
                session: QuerySession::new(SessionId::default(), ""),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ClientState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Items requested per page
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Store the query text for the next session
    ///
    /// Takes effect on the next [`reset_session`](Self::reset_session); the
    /// running session keeps its own query.
    pub fn set_query(&self, text: &str) {
        self.lock().pending_query = text.trim().to_string();
    }

    /// Start a fresh session for the stored query and return its id
    ///
    /// Page index, loaded count and exhaustion start over. A fetch still
    /// outstanding for the previous session no longer counts as in flight,
    /// and its completion will not touch the new session.
    pub fn reset_session(&self) -> SessionId {
        let mut state = self.lock();
        let id = state.session.id.next();
        let query = state.pending_query.clone();
        state.session = QuerySession::new(id, query);
        id
    }

    /// Fetch the next page for the current session
    ///
    /// On success the page index advances by one. On failure nothing but the
    /// in-flight flag changes, so the same page can be requested again.
    ///
    /// # Errors
    ///
    /// - `PagingError::EmptyQuery` if the session has no query text
    /// - `PagingError::ConcurrentFetch` if a fetch is already outstanding
    /// - `PagingError::Fetch` if the transport fails
    ///
    /// The first two are returned without contacting the transport.
    pub async fn fetch_next_page(&self) -> Result<FetchedPage, PagingError> {
        self.fetch(None).await
    }

    /// Fetch the next page only if `session_id` is still the current session
    ///
    /// The session check and the in-flight flag are taken under one lock, so
    /// a `reset_session` racing with the caller cannot hand it the page of a
    /// newer session.
    ///
    /// # Errors
    ///
    /// `PagingError::SessionReplaced` if another session is current, plus
    /// everything [`fetch_next_page`](Self::fetch_next_page) returns.
    pub async fn fetch_next_page_for(
        &self,
        session_id: SessionId,
    ) -> Result<FetchedPage, PagingError> {
        self.fetch(Some(session_id)).await
    }

    async fn fetch(&self, expected: Option<SessionId>) -> Result<FetchedPage, PagingError> {
        let (session_id, query, page_index) = {
            let mut state = self.lock();
            let session = &mut state.session;
            if let Some(expected) = expected
                && expected != session.id
            {
                return Err(PagingError::SessionReplaced {
                    expected,
                    current: session.id,
                });
            }
            if session.query.is_empty() {
                return Err(PagingError::EmptyQuery);
            }
            if session.is_fetching {
                return Err(PagingError::ConcurrentFetch);
            }
            session.is_fetching = true;
            (session.id, session.query.clone(), session.page_index)
        };

        debug!(session = %session_id, query = %query, page = page_index, "fetching page");

        let mut in_flight = InFlight {
            state: &self.state,
            session_id,
            armed: true,
        };
        let result = self
            .transport
            .search(&query, page_index, self.page_size)
            .await;
        in_flight.armed = false;

        let mut state = self.lock();
        let is_current = state.session.id == session_id;

        match result {
            Ok(page) => {
                if is_current {
                    state.session.complete_fetch(&page);
                } else {
                    debug!(session = %session_id, "page arrived for a replaced session");
                }
                Ok(FetchedPage {
                    session_id,
                    page_index,
                    items: page.items,
                    total_available: page.total_available,
                })
            }
            Err(e) => {
                if is_current {
                    state.session.is_fetching = false;
                }
                warn!(session = %session_id, page = page_index, error = %e, "page fetch failed");
                Err(PagingError::Fetch(e))
            }
        }
    }

    /// Add `count` delivered items to the current session
    pub fn record_loaded(&self, count: usize) {
        self.lock().session.record_loaded(count as u64);
    }

    /// Copy of the current session state
    #[must_use]
    pub fn snapshot(&self) -> QuerySession {
        self.lock().session.clone()
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.lock().session.id
    }

    #[must_use]
    pub fn query(&self) -> String {
        self.lock().session.query.clone()
    }

    #[must_use]
    pub fn page_index(&self) -> u32 {
        self.lock().session.page_index
    }

    #[must_use]
    pub fn loaded_count(&self) -> u64 {
        self.lock().session.loaded_count
    }

    #[must_use]
    pub fn total_available(&self) -> Option<u64> {
        self.lock().session.total_available
    }

    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.lock().session.is_fetching
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.lock().session.is_exhausted
    }
}

/// Clears the in-flight flag if a fetch future is dropped mid-request
struct InFlight<'a> {
    state: &'a Mutex<ClientState>,
    session_id: SessionId,
    armed: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.session.id == self.session_id {
            state.session.is_fetching = false;
        }
    }
}
