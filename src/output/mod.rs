//! Output formatting for CLI display
//!
//! This module provides utilities for formatting image cards and their
//! engagement counters in the terminal gallery.

use crate::api::ImageResult;
use colored::Colorize;

/// Format a counter compactly (`950`, `7.6k`, `1.2M`), truncating to one decimal
#[must_use]
pub fn compact_count(count: u64) -> String {
    match count {
        0..=999 => count.to_string(),
        1_000..=999_999 => format_scaled(count, 1_000, "k"),
        _ => format_scaled(count, 1_000_000, "M"),
    }
}

fn format_scaled(count: u64, unit: u64, suffix: &str) -> String {
    let tenths = count * 10 / unit;
    if tenths % 10 == 0 {
        format!("{}{suffix}", tenths / 10)
    } else {
        format!("{}.{}{suffix}", tenths / 10, tenths % 10)
    }
}

/// Format the four engagement counters of an image
#[must_use]
pub fn counters(image: &ImageResult) -> String {
    format!(
        "Likes {}  Views {}  Comments {}  Downloads {}",
        compact_count(image.likes),
        compact_count(image.views),
        compact_count(image.comments),
        compact_count(image.downloads)
    )
}

/// Format one gallery card
///
/// `position` is the 1-based place of the card in the gallery. Quiet mode
/// prints only the full-size URL, one per line, for piping.
#[must_use]
pub fn image_card(position: usize, image: &ImageResult, quiet: bool) -> String {
    if quiet {
        return image.full_url.clone();
    }

    let tags: Vec<&str> = image.tag_list().collect();
    let label = if tags.is_empty() {
        "(untagged)".to_string()
    } else {
        tags.join(", ")
    };

    format!(
        "{} {}\n      {}\n      {}",
        format!("[{position:>3}]").bold(),
        label.cyan(),
        counters(image).dimmed(),
        image.preview_url.underline()
    )
}
