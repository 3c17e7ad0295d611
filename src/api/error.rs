//! Transport error types
//!
//! Errors raised while performing a single search request. None of these is
//! fatal: the paging core recovers from every one of them by leaving the page
//! cursor untouched so the same page can be requested again.
//!
//! # Error Types
//!
//! - **`MissingApiKey`**: no API key configured; no request was sent
//! - **`Request`**: connection, TLS, or timeout failure from reqwest
//! - **`Status`**: the remote answered with a non-success HTTP status
//! - **`Decode`**: the body was not the expected JSON shape

use thiserror::Error;

/// Errors from the remote search transport
#[derive(Debug, Error)]
pub enum TransportError {
    /// No API key was configured
    #[error("No API key configured. Set one with 'pixfeed config set api_key=<KEY>' or PIXFEED_API_KEY")]
    MissingApiKey,

    /// The HTTP request could not be completed
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote signalled an error status
    #[error("Search API returned status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// First part of the response body
        body: String,
    },

    /// The response body could not be decoded
    #[error("Failed to decode search response: {0}")]
    Decode(#[from] serde_json::Error),
}
