//! Configuration module for pixfeed
//!
//! Manages the API key, endpoint and request options. Configuration is
//! stored as TOML in the user's config directory and can be overridden with
//! `PIXFEED_*` environment variables (e.g. `PIXFEED_API_KEY`).

mod setup;

pub use setup::first_time_setup;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "PIXFEED";

/// Keys accepted by `config get` / `config set`
pub const KEYS: &[&str] = &[
    "api_key",
    "base_url",
    "page_size",
    "image_type",
    "orientation",
    "safesearch",
    "timeout_secs",
    "quiet",
];

/// Smallest and largest `per_page` the Pixabay API accepts
const PAGE_SIZE_RANGE: std::ops::RangeInclusive<u32> = 3..=200;

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PixfeedConfig {
    /// Pixabay API key
    pub api_key: Option<String>,

    /// Search endpoint
    pub base_url: String,

    /// Items requested per page
    pub page_size: u32,

    /// `photo`, `illustration`, `vector` or `all`
    pub image_type: String,

    /// `horizontal`, `vertical` or `all`
    pub orientation: String,

    /// Only return images suitable for all ages
    pub safesearch: bool,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Suppress informational output by default
    pub quiet: bool,
}

impl Default for PixfeedConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://pixabay.com/api/".to_string(),
            page_size: crate::paging::DEFAULT_PAGE_SIZE,
            image_type: "photo".to_string(),
            orientation: "horizontal".to_string(),
            safesearch: true,
            timeout_secs: 30,
            quiet: false,
        }
    }
}

impl PixfeedConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("pixfeed").join("config.toml"))
    }

    /// Load configuration from the default location, creating it if missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::default().save_to(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from `path`, layered under environment overrides
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be parsed or the result is invalid.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, running first-time setup if it doesn't exist
    ///
    /// Setup is skipped when stdin is not interactive or an API key is
    /// already provided through the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if loading or creating the configuration fails.
    pub fn load_or_setup() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;
        let key_from_env = std::env::var_os(format!("{ENV_PREFIX}_API_KEY")).is_some();

        if config_path.exists() || key_from_env || !std::io::stdin().is_terminal() {
            Self::load()
        } else {
            first_time_setup()
        }
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config path cannot be determined or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `page_size` or `timeout_secs` is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !PAGE_SIZE_RANGE.contains(&self.page_size) {
            return Err(ConfigError::Message(format!(
                "page_size must be between {} and {}, got {}",
                PAGE_SIZE_RANGE.start(),
                PAGE_SIZE_RANGE.end(),
                self.page_size
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Message("timeout_secs must be greater than 0".to_string()));
        }
        Ok(())
    }

    /// Whether a non-blank API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Read a setting as display text
    ///
    /// The API key is masked.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `key` is unknown.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "api_key" => match self.api_key.as_deref() {
                Some(k) if !k.is_empty() => mask_key(k),
                _ => "(not set)".to_string(),
            },
            "base_url" => self.base_url.clone(),
            "page_size" => self.page_size.to_string(),
            "image_type" => self.image_type.clone(),
            "orientation" => self.orientation.clone(),
            "safesearch" => self.safesearch.to_string(),
            "timeout_secs" => self.timeout_secs.to_string(),
            "quiet" => self.quiet.to_string(),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    /// Update a setting from text
    ///
    /// Does not save; call [`save`](Self::save) afterwards.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `key` is unknown or `value` does not parse or
    /// is out of range.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let mut updated = self.clone();

        match key {
            "api_key" => {
                updated.api_key = (!value.is_empty()).then(|| value.to_string());
            }
            "base_url" => updated.base_url = value.to_string(),
            "page_size" => updated.page_size = parse_value(key, value)?,
            "image_type" => {
                updated.image_type = one_of(key, value, &["all", "photo", "illustration", "vector"])?;
            }
            "orientation" => {
                updated.orientation = one_of(key, value, &["all", "horizontal", "vertical"])?;
            }
            "safesearch" => updated.safesearch = parse_value(key, value)?,
            "timeout_secs" => updated.timeout_secs = parse_value(key, value)?,
            "quiet" => updated.quiet = parse_value(key, value)?,
            _ => return Err(unknown_key(key)),
        }

        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

fn unknown_key(key: &str) -> ConfigError {
    ConfigError::Message(format!(
        "Unknown configuration key: '{key}'. Available keys: {}",
        KEYS.join(", ")
    ))
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::Message(format!("Invalid value for {key}: '{value}'")))
}

fn one_of(key: &str, value: &str, allowed: &[&str]) -> Result<String, ConfigError> {
    if allowed.contains(&value) {
        Ok(value.to_string())
    } else {
        Err(ConfigError::Message(format!(
            "Invalid value for {key}: '{value}'. Use one of: {}",
            allowed.join(", ")
        )))
    }
}

/// Keep the last four characters of a key visible
fn mask_key(key: &str) -> String {
    let visible: String = key
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{visible}")
}
