//! Pixabay API client
//!
//! HTTP transport for <https://pixabay.com/api/>. Every request carries the
//! API key, the query, the page cursor and the fixed filter options from
//! configuration.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::error::TransportError;
use super::traits::SearchTransport;
use super::types::SearchPage;
use crate::config::PixfeedConfig;

/// Longest body excerpt kept in a status error
const MAX_ERROR_BODY: usize = 200;

/// Request options that stay fixed for the lifetime of a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixabayOptions {
    /// API key; requests fail with `MissingApiKey` when absent
    pub api_key: Option<String>,
    /// Endpoint, normally `https://pixabay.com/api/`
    pub base_url: String,
    /// `photo`, `illustration`, `vector` or `all`
    pub image_type: String,
    /// `horizontal`, `vertical` or `all`
    pub orientation: String,
    pub safesearch: bool,
    /// Per-request timeout
    pub timeout: Duration,
}

impl From<&PixfeedConfig> for PixabayOptions {
    fn from(config: &PixfeedConfig) -> Self {
        Self {
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            base_url: config.base_url.clone(),
            image_type: config.image_type.clone(),
            orientation: config.orientation.clone(),
            safesearch: config.safesearch,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

/// reqwest-backed [`SearchTransport`] for Pixabay
pub struct PixabayTransport {
    http: Client,
    options: PixabayOptions,
}

impl PixabayTransport {
    /// Create a transport with the given options
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Request` if the HTTP client cannot be built.
    pub fn new(options: PixabayOptions) -> Result<Self, TransportError> {
        let http = Client::builder().timeout(options.timeout).build()?;
        Ok(Self { http, options })
    }

    /// Query string pairs for one request
    fn query_params(
        &self,
        api_key: &str,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Vec<(&'static str, String)> {
        vec![
            ("key", api_key.to_string()),
            ("q", query.to_string()),
            ("image_type", self.options.image_type.clone()),
            ("orientation", self.options.orientation.clone()),
            ("safesearch", self.options.safesearch.to_string()),
            ("page", page.to_string()),
            ("per_page", page_size.to_string()),
        ]
    }
}

#[async_trait]
impl SearchTransport for PixabayTransport {
    async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<SearchPage, TransportError> {
        let api_key = self
            .options
            .api_key
            .as_deref()
            .ok_or(TransportError::MissingApiKey)?;

        debug!(query, page, page_size, "requesting pixabay page");

        let response = self
            .http
            .get(&self.options.base_url)
            .query(&self.query_params(api_key, query, page, page_size))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
