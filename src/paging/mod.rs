//! Query session paging
//!
//! The paging client owns the state of the active search (query text, page
//! cursor, loaded count, in-flight and exhaustion flags) and is the only
//! place that talks to the search transport.
//!
//! Invariants kept here:
//! - the page index advances by exactly one per successful fetch
//! - at most one fetch is outstanding per session
//! - a replaced session is never mutated by a late response

pub mod client;
pub mod error;
pub mod session;

pub use client::{DEFAULT_PAGE_SIZE, FetchedPage, PagingClient};
pub use error::PagingError;
pub use session::{FIRST_PAGE, QuerySession, SessionId};
