//! Collaborator traits driven by the load controller
//!
//! The controller decides *what* happens; these traits decide *how* it shows
//! up. None of them receives markup or free-form text from the core.

use super::types::Notification;
use crate::api::ImageResult;

/// Trait for gallery renderers
pub trait Renderer: Send + Sync {
    /// Show `items` in arrival order
    ///
    /// `append == false` replaces whatever is shown; an empty slice with
    /// `append == false` clears the gallery.
    fn render(&self, items: &[ImageResult], append: bool);

    /// Hint that freshly appended items should be scrolled into view
    fn continue_scroll(&self);
}

/// Trait for the full-size image viewer
pub trait Viewer: Send + Sync {
    /// Re-index the gallery after new items were rendered
    fn refresh(&self);
}

/// Trait for user notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
