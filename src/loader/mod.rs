//! Load controller and its collaborator seams
//!
//! The controller reacts to three trigger sources (form submit, viewport
//! proximity and scroll-to-bottom) by driving the paging client and telling
//! a renderer, a viewer and a notifier what to do.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │  Trigger sources (browse loop, search) │
//! └───────────────────┬────────────────────┘
//!                     │ handle_trigger()
//!                     ▼
//! ┌────────────────────────────────────────┐
//! │  LoadController ──→ PagingClient       │
//! └───────────────────┬────────────────────┘
//!                     │ Renderer / Viewer / Notifier
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐      ┌──────────────────┐
//! │ Terminal      │      │ Test recorders   │
//! │ gallery       │      │                  │
//! └───────────────┘      └──────────────────┘
//! ```

pub mod controller;
pub mod traits;
pub mod types;

pub use controller::LoadController;
pub use traits::{Notifier, Renderer, Viewer};
pub use types::{FailureReason, LoadState, Notification, Trigger, TriggerOutcome};
