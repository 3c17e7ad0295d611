//! Pixfeed - incremental image search with on-demand page loading
//!
//! This library provides a paging client over a pluggable search transport
//! and a load controller that turns submit and scroll triggers into
//! render, viewer and notification instructions.

use thiserror::Error;

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod loader;
pub mod output;
pub mod paging;
pub mod ui;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum PixfeedError {
    /// Paging error
    #[error("Paging error: {0}")]
    Paging(#[from] paging::PagingError),
    /// Search transport error
    #[error("Search error: {0}")]
    Transport(#[from] api::TransportError),
    /// Gallery or viewer error
    #[error("{0}")]
    Ui(#[from] ui::UiError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
