//! Terminal gallery
//!
//! Renders image cards as text and keeps the viewer index used by the
//! browse loop's `:open N` command.
//!
//! The viewer index only changes on [`Viewer::refresh`], so a freshly
//! rendered card becomes openable once the controller raises it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

use super::error::{Result, UiError};
use super::output::OutputWriter;
use crate::api::ImageResult;
use crate::loader::{Renderer, Viewer};
use crate::output;

#[derive(Default)]
struct GalleryState {
    cards: Vec<ImageResult>,
    /// Full-size URLs as of the last refresh
    viewer_index: Vec<String>,
}

/// Hint printed after a scroll-triggered page in the browse loop
pub const BROWSE_SCROLL_HINT: &str = "── press Enter for more, or type a new search ──";

/// [`Renderer`] and [`Viewer`] for a line-oriented terminal
pub struct TerminalGallery {
    writer: Arc<dyn OutputWriter>,
    quiet: bool,
    scroll_hint: Option<String>,
    state: Mutex<GalleryState>,
}

impl TerminalGallery {
    #[must_use]
    pub fn new(writer: Arc<dyn OutputWriter>, quiet: bool) -> Self {
        Self {
            writer,
            quiet,
            scroll_hint: Some(BROWSE_SCROLL_HINT.to_string()),
            state: Mutex::new(GalleryState::default()),
        }
    }

    /// Replace the continuation hint; `None` prints nothing
    #[must_use]
    pub fn with_scroll_hint(mut self, hint: Option<String>) -> Self {
        self.scroll_hint = hint;
        self
    }

    fn lock(&self) -> MutexGuard<'_, GalleryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of cards currently shown
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Full-size URL of the card at 1-based `position`
    ///
    /// # Errors
    ///
    /// Returns `UiError::NoSuchImage` if the viewer has no such card.
    pub fn full_url(&self, position: usize) -> Result<String> {
        let state = self.lock();
        position
            .checked_sub(1)
            .and_then(|i| state.viewer_index.get(i))
            .cloned()
            .ok_or(UiError::NoSuchImage {
                position,
                available: state.viewer_index.len(),
            })
    }

    /// Open the card at 1-based `position` in the system image viewer
    ///
    /// # Errors
    ///
    /// Returns `UiError` if there is no such card or the viewer cannot start.
    pub fn open(&self, position: usize) -> Result<String> {
        let url = self.full_url(position)?;
        open::that(&url)?;
        Ok(url)
    }

    /// Print every card again from the top
    pub fn reprint(&self) {
        let cards = self.lock().cards.clone();
        for (i, card) in cards.iter().enumerate() {
            self.writer.write(&output::image_card(i + 1, card, self.quiet));
        }
    }
}

impl Renderer for TerminalGallery {
    fn render(&self, items: &[ImageResult], append: bool) {
        let start = {
            let mut state = self.lock();
            if !append {
                state.cards.clear();
                state.viewer_index.clear();
            }
            let start = state.cards.len();
            state.cards.extend_from_slice(items);
            start
        };

        if !append {
            self.writer.clear();
        }
        for (offset, item) in items.iter().enumerate() {
            self.writer
                .write(&output::image_card(start + offset + 1, item, self.quiet));
        }
    }

    fn continue_scroll(&self) {
        if let Some(hint) = self.scroll_hint.as_deref()
            && !self.quiet
        {
            self.writer.info(hint);
        }
    }
}

impl Viewer for TerminalGallery {
    fn refresh(&self) {
        let mut state = self.lock();
        state.viewer_index = state.cards.iter().map(|c| c.full_url.clone()).collect();
        debug!(images = state.viewer_index.len(), "viewer refreshed");
    }
}
