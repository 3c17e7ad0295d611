//! Pixfeed CLI application entry point
//!
//! This is the main executable for pixfeed. It searches the Pixabay image
//! API and loads further result pages on demand.
//!
//! # Features
//!
//! - **Browse Mode**: Interactive gallery; an empty line loads the next page
//! - **Search**: Print one or more pages of results and exit
//! - **Configuration**: API key, page size and search filters
//! - **Quiet Mode**: Only print image URLs, for scripting
//!
//! # Usage
//!
//! ```bash
//! # Browse interactively (default command)
//! pixfeed
//! pixfeed browse "yellow flowers"
//!
//! # Print three pages of results
//! pixfeed search yellow flowers --pages 3
//!
//! # Print every result URL
//! pixfeed -q search mountains --all
//!
//! # Configure the API key
//! pixfeed config set api_key=<KEY>
//! ```
//!
//! # Configuration
//!
//! On first run, pixfeed will prompt for an API key. Configuration is stored
//! in the user's config directory (`~/.config/pixfeed/config.toml` on Linux)
//! and every key can be overridden with a `PIXFEED_<KEY>` environment variable.
//!
//! # Logging
//!
//! Diagnostics go to stderr. `PIXFEED_LOG` takes an `EnvFilter` directive
//! (e.g. `PIXFEED_LOG=pixfeed=trace`); without it the level is `warn`, or
//! `debug` with `--verbose`.

use pixfeed::{
    PixfeedError,
    cli::{Cli, Commands, ConfigCommands},
    commands::{self, App, search::PageLimit},
    config::PixfeedConfig,
    ui::gallery::BROWSE_SCROLL_HINT,
};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

type Result<T> = std::result::Result<T, PixfeedError>;

/// Environment variable holding the log filter
const LOG_ENV: &str = "PIXFEED_LOG";

/// Install the stderr tracing subscriber
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "pixfeed=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

/// Handle configuration subcommands
///
/// # Errors
///
/// Returns `PixfeedError` if the setting is malformed, unknown, invalid, or
/// the configuration cannot be saved.
fn handle_config_command(
    mut config: PixfeedConfig,
    command: &ConfigCommands,
    quiet: bool,
) -> Result<()> {
    match command {
        ConfigCommands::Set { setting } => {
            let Some((key, value)) = setting.split_once('=') else {
                return Err(PixfeedError::InvalidInput(
                    "Invalid format. Use: pixfeed config set key=value".into(),
                ));
            };
            let key = key.trim();

            config.set(key, value)?;
            config.save()?;
            if !quiet {
                println!("Set {key} = {}", config.get(key)?);
            }
        }
        ConfigCommands::Get { key } => {
            println!("{}", config.get(key)?);
        }
        ConfigCommands::Path => {
            println!("{}", PixfeedConfig::config_path()?.display());
        }
    }
    Ok(())
}

/// Main entry point for the pixfeed application
///
/// Parses command-line arguments, loads configuration, and dispatches to
/// the appropriate command handler.
///
/// # Errors
///
/// Returns `PixfeedError` if configuration loading fails, the search client
/// cannot be built, or a command handler returns an error.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    let command = cli.get_command();

    if let Commands::Config { command } = &command {
        let config = PixfeedConfig::load()?;
        let quiet = cli.quiet || config.quiet;
        return handle_config_command(config, command, quiet);
    }

    let config = PixfeedConfig::load_or_setup()?;
    let quiet = cli.quiet || config.quiet;

    match &command {
        Commands::Browse { query } => {
            let app = App::from_config(&config, quiet, Some(BROWSE_SCROLL_HINT.to_string()))?;
            commands::browse(Arc::new(app), query.clone()).await?;
        }
        Commands::Search { pages, all, .. } => {
            let query = command.search_query().unwrap_or_default();
            let limit = if *all {
                PageLimit::All
            } else {
                PageLimit::Pages(*pages)
            };
            let app = App::from_config(&config, quiet, None)?;
            let summary = commands::search(&app, &query, limit).await;
            if summary.failed {
                std::process::exit(1);
            }
        }
        Commands::Config { .. } => unreachable!(),
    }

    Ok(())
}
