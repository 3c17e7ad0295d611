//! Notification display
//!
//! Maps the controller's closed set of notifications onto fixed texts and
//! writes them through an [`OutputWriter`].

use std::sync::Arc;

use super::output::OutputWriter;
use crate::loader::{FailureReason, Notification, Notifier};

/// Text shown when scrolling runs out of results
pub const END_OF_RESULTS: &str = "We're sorry, but you've reached the end of search results.";

/// Text shown for a blank query or an empty first page
pub const NO_MATCHES: &str =
    "Sorry, there are no images matching your search query. Please try again.";

/// Text shown when the first page could not be fetched
pub const REQUEST_FAILED: &str = "Search request failed. Please try again.";

/// Notifier that prints through an output writer
pub struct OutputNotifier {
    writer: Arc<dyn OutputWriter>,
    quiet: bool,
}

impl OutputNotifier {
    /// Quiet mode drops success and info messages; failures always print
    #[must_use]
    pub fn new(writer: Arc<dyn OutputWriter>, quiet: bool) -> Self {
        Self { writer, quiet }
    }

    /// Text for a notification
    #[must_use]
    pub fn message(notification: Notification) -> String {
        match notification {
            Notification::Success { total } => format!("Hooray! We found {total} images."),
            Notification::EndOfResults => END_OF_RESULTS.to_string(),
            Notification::Failure(FailureReason::EmptyQuery | FailureReason::NoResults) => {
                NO_MATCHES.to_string()
            }
            Notification::Failure(FailureReason::FetchFailed) => REQUEST_FAILED.to_string(),
        }
    }
}

impl Notifier for OutputNotifier {
    fn notify(&self, notification: Notification) {
        let text = Self::message(notification);
        match notification {
            Notification::Success { .. } if !self.quiet => self.writer.success(&text),
            Notification::EndOfResults if !self.quiet => self.writer.info(&text),
            Notification::Failure(_) => self.writer.error(&text),
            _ => {}
        }
    }
}
