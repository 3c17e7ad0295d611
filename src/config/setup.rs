//! Interactive setup wizard for first-time configuration
//!
//! This module handles the prompt for an API key when pixfeed is run for
//! the first time.

use super::PixfeedConfig;
use config::ConfigError;
use dialoguer::{Input, theme::ColorfulTheme};

/// Interactive first-time setup - prompts for the Pixabay API key
///
/// Guides the user through creating their configuration:
/// 1. Prompts for an API key (may be left empty and set later)
/// 2. Saves the configuration with defaults for everything else
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - User input cannot be read
/// - The configuration cannot be saved
///
/// # Examples
/// ```ignore
/// use pixfeed::config::first_time_setup;
///
/// let config = first_time_setup()?;
/// println!("API key configured: {}", config.has_api_key());
/// ```
pub fn first_time_setup() -> Result<PixfeedConfig, ConfigError> {
    println!("Welcome to pixfeed! Let's set up access to the Pixabay API.");
    println!("Get a free key at https://pixabay.com/api/docs/\n");

    let api_key: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Pixabay API key (leave empty to set later)")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let mut config = PixfeedConfig::default();
    config.set("api_key", &api_key)?;

    config.save()?;

    println!("\nConfiguration saved successfully!");
    Ok(config)
}
