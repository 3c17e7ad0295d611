//! Output abstraction layer
//!
//! This module provides a backend-agnostic interface for terminal output,
//! so the gallery and notifier can print to stdout in the CLI and into a
//! buffer in tests or embedding front ends.

use colored::Colorize;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// Trait for output operations
///
/// # Examples
///
/// ```no_run
/// use pixfeed::ui::output::{OutputWriter, StdoutWriter};
///
/// let output = StdoutWriter::new();
/// output.write("Normal message");
/// output.success("Operation completed!");
/// output.error("Something went wrong");
/// ```
pub trait OutputWriter: Send + Sync {
    /// Write a normal message
    fn write(&self, message: &str);

    /// Write an error message
    fn error(&self, message: &str);

    /// Write a success message
    fn success(&self, message: &str);

    /// Write an info message (dimmed/secondary)
    fn info(&self, message: &str);

    /// Clear previously written output where the backend supports it
    fn clear(&self);
}

/// CLI implementation - writes to stdout/stderr
///
/// # Examples
///
/// ```
/// use pixfeed::ui::output::{OutputWriter, StdoutWriter};
///
/// let output = StdoutWriter::new();
/// output.success("Found 120 images");
/// output.error("Search request failed");
/// ```
pub struct StdoutWriter;

impl StdoutWriter {
    /// Create a new stdout writer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Print one line, ignoring a closed pipe (e.g. `pixfeed -q search cats | head`)
    fn line(mut out: impl Write, text: std::fmt::Arguments<'_>) {
        let _ = writeln!(out, "{text}");
    }
}

impl Default for StdoutWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputWriter for StdoutWriter {
    fn write(&self, message: &str) {
        Self::line(io::stdout().lock(), format_args!("{message}"));
    }

    fn error(&self, message: &str) {
        Self::line(io::stderr().lock(), format_args!("{} {}", "❌".red(), message));
    }

    fn success(&self, message: &str) {
        Self::line(io::stdout().lock(), format_args!("{} {}", "✓".green(), message));
    }

    fn info(&self, message: &str) {
        Self::line(io::stdout().lock(), format_args!("{}", message.dimmed()));
    }

    fn clear(&self) {
        // Terminal scrollback is left alone; a new search starts numbering at 1
    }
}

/// Message level for categorizing output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Normal message
    Normal,
    /// Error message
    Error,
    /// Success message
    Success,
    /// Info message
    Info,
}

/// Buffered writer that keeps every message in memory
///
/// # Examples
///
/// ```
/// use pixfeed::ui::output::{MemoryWriter, MessageLevel, OutputWriter};
///
/// let writer = MemoryWriter::new();
/// writer.success("Found 120 images");
///
/// assert_eq!(writer.messages(), vec![(MessageLevel::Success, "Found 120 images".to_string())]);
/// ```
#[derive(Default)]
pub struct MemoryWriter {
    messages: Mutex<Vec<(MessageLevel, String)>>,
}

impl MemoryWriter {
    /// Create an empty buffer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages written since the last clear
    #[must_use]
    pub fn messages(&self) -> Vec<(MessageLevel, String)> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Only the text of messages at `level`
    #[must_use]
    pub fn texts(&self, level: MessageLevel) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, text)| text)
            .collect()
    }

    fn add_message(&self, level: MessageLevel, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, message.to_string()));
    }
}

impl OutputWriter for MemoryWriter {
    fn write(&self, message: &str) {
        self.add_message(MessageLevel::Normal, message);
    }

    fn error(&self, message: &str) {
        self.add_message(MessageLevel::Error, message);
    }

    fn success(&self, message: &str) {
        self.add_message(MessageLevel::Success, message);
    }

    fn info(&self, message: &str) {
        self.add_message(MessageLevel::Info, message);
    }

    fn clear(&self) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
