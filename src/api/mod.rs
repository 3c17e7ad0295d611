//! Remote image-search API
//!
//! This module defines the response shape the paging core consumes and the
//! transport seam it fetches through. The core never builds URLs or handles
//! authentication itself; that lives behind [`SearchTransport`].
//!
//! # Components
//!
//! - **`ImageResult`** / **`SearchPage`**: decoded response data
//! - **`SearchTransport`**: async trait for "fetch page N of query Q"
//! - **`PixabayTransport`**: reqwest-backed implementation for the Pixabay API
//! - **`TransportError`**: failures of a single request

pub mod error;
pub mod pixabay;
pub mod traits;
pub mod types;

pub use error::TransportError;
pub use pixabay::{PixabayOptions, PixabayTransport};
pub use traits::SearchTransport;
pub use types::{ImageResult, SearchPage};
