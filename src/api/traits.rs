//! Transport trait used by the paging client

use async_trait::async_trait;

use super::error::TransportError;
use super::types::SearchPage;

/// Trait for remote search backends
///
/// This trait abstracts away the provider, its URL layout and its
/// authentication, so the paging client can be driven by the real API or by
/// an in-memory script in tests.
///
/// Pages are 1-based.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    /// Fetch one page of results for `query`
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the request cannot be sent, the remote
    /// answers with an error status, or the body cannot be decoded.
    async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<SearchPage, TransportError>;
}
