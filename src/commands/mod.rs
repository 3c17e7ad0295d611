//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI
//! args and drives a [`LoadController`] wired to terminal collaborators.

pub mod browse;
pub mod search;

pub use browse::execute as browse;
pub use search::execute as search;

use std::sync::Arc;

use crate::{
    PixfeedError,
    api::{PixabayOptions, PixabayTransport, SearchTransport, TransportError},
    config::PixfeedConfig,
    loader::LoadController,
    paging::PagingClient,
    ui::{OutputNotifier, OutputWriter, StdoutWriter, TerminalGallery},
};

type Result<T> = std::result::Result<T, PixfeedError>;

/// Controller plus the collaborators commands talk to directly
pub struct App {
    pub controller: LoadController,
    pub gallery: Arc<TerminalGallery>,
    pub writer: Arc<dyn OutputWriter>,
    pub quiet: bool,
}

impl App {
    /// Wire a controller over `transport`, printing through `writer`
    #[must_use]
    pub fn new(
        transport: Arc<dyn SearchTransport>,
        page_size: u32,
        writer: Arc<dyn OutputWriter>,
        quiet: bool,
        scroll_hint: Option<String>,
    ) -> Self {
        let gallery =
            Arc::new(TerminalGallery::new(writer.clone(), quiet).with_scroll_hint(scroll_hint));
        let notifier = Arc::new(OutputNotifier::new(writer.clone(), quiet));
        let client = PagingClient::new(transport, page_size);
        let controller = LoadController::new(client, gallery.clone(), gallery.clone(), notifier);

        Self {
            controller,
            gallery,
            writer,
            quiet,
        }
    }

    /// Pixabay-backed app printing to stdout
    ///
    /// # Errors
    ///
    /// Returns `PixfeedError::Transport` if no API key is configured or the
    /// HTTP client cannot be built.
    pub fn from_config(
        config: &PixfeedConfig,
        quiet: bool,
        scroll_hint: Option<String>,
    ) -> Result<Self> {
        if !config.has_api_key() {
            return Err(TransportError::MissingApiKey.into());
        }
        let transport = PixabayTransport::new(PixabayOptions::from(config))?;

        Ok(Self::new(
            Arc::new(transport),
            config.page_size,
            Arc::new(StdoutWriter::new()),
            quiet,
            scroll_hint,
        ))
    }
}
