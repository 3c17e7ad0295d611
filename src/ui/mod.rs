//! Terminal collaborators for the load controller
//!
//! This module provides the CLI implementations of the controller's
//! [`Renderer`](crate::loader::Renderer), [`Viewer`](crate::loader::Viewer)
//! and [`Notifier`](crate::loader::Notifier) seams, built on a
//! backend-agnostic [`OutputWriter`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │      LoadController                     │
//! └────────────────┬────────────────────────┘
//!                  │ Renderer / Viewer / Notifier
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │  TerminalGallery      OutputNotifier    │
//! └────────────────┬────────────────────────┘
//!                  │ OutputWriter
//!         ┌────────┴────────┐
//!         ▼                 ▼
//! ┌───────────────┐  ┌───────────────────┐
//! │ StdoutWriter  │  │ MemoryWriter      │
//! └───────────────┘  └───────────────────┘
//! ```
//!
//! ## Output Messages
//!
//! ```
//! use pixfeed::ui::output::{OutputWriter, StdoutWriter};
//!
//! let output = StdoutWriter::new();
//! output.success("Hooray! We found 120 images.");
//! output.info("We're sorry, but you've reached the end of search results.");
//! ```

mod error;

pub mod gallery;
pub mod notify;
pub mod output;

pub use error::{Result, UiError};
pub use gallery::TerminalGallery;
pub use notify::OutputNotifier;
pub use output::{MemoryWriter, MessageLevel, OutputWriter, StdoutWriter};
