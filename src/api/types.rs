//! Data types returned by the image-search API

use serde::{Deserialize, Serialize};

/// A single image hit
///
/// Field names follow the Pixabay JSON payload. The paging core passes these
/// through without interpreting them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResult {
    /// Provider-side image id
    #[serde(default)]
    pub id: u64,

    /// Medium-sized URL suitable for a gallery card
    #[serde(rename = "webformatURL")]
    pub preview_url: String,

    /// Full-size URL for the viewer
    #[serde(rename = "largeImageURL")]
    pub full_url: String,

    /// Comma separated label string
    #[serde(default)]
    pub tags: String,

    #[serde(default)]
    pub likes: u64,

    #[serde(default)]
    pub views: u64,

    #[serde(default)]
    pub comments: u64,

    #[serde(default)]
    pub downloads: u64,
}

impl ImageResult {
    /// Individual tags, trimmed, without empties
    pub fn tag_list(&self) -> impl Iterator<Item = &str> {
        self.tags.split(',').map(str::trim).filter(|t| !t.is_empty())
    }
}

/// One page of search results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    /// Items on this page, in provider order
    #[serde(rename = "hits", default)]
    pub items: Vec<ImageResult>,

    /// Number of hits reachable through paging for this query.
    ///
    /// Providers may report a slightly different number on each page.
    #[serde(rename = "totalHits", default)]
    pub total_available: u64,

    /// Raw match count, which may exceed what paging can reach
    #[serde(default)]
    pub total: u64,
}

impl SearchPage {
    /// Build a page from items and the reachable total
    #[must_use]
    pub const fn new(items: Vec<ImageResult>, total_available: u64) -> Self {
        Self {
            items,
            total_available,
            total: total_available,
        }
    }

    /// Whether this page carried no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
