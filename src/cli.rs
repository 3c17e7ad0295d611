//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for pixfeed using the `clap` crate.
//!
//! # Commands
//!
//! - **browse**: Interactive gallery that loads more results on demand (default)
//! - **search**: One-shot search that prints a fixed number of pages
//! - **config**: Read and change persistent settings
//!
//! # Examples
//!
//! ```no_run
//! use pixfeed::cli::Cli;
//!
//! let cli = Cli::parse_args();
//! let command = cli.get_command();
//! if let Some(query) = command.search_query() {
//!     println!("searching for {query}");
//! }
//! ```

use clap::{Parser, Subcommand};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "pixfeed", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print image URLs and errors)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Log paging activity to stderr (overridden by PIXFEED_LOG)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Interactive gallery: type a search, press Enter to load more (default)
    #[command(visible_alias = "b")]
    Browse {
        /// Search to run on start
        #[arg(value_name = "QUERY")]
        query: Option<String>,
    },

    /// Search once and print the results
    #[command(visible_alias = "s")]
    Search {
        /// Search terms
        #[arg(value_name = "QUERY", required = true, num_args = 1..)]
        terms: Vec<String>,

        /// Number of pages to load
        #[arg(
            short = 'p',
            long = "pages",
            default_value_t = 1,
            value_parser = clap::value_parser!(u32).range(1..),
            conflicts_with = "all"
        )]
        pages: u32,

        /// Keep loading until the results are exhausted
        #[arg(short = 'a', long = "all")]
        all: bool,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

impl Commands {
    /// Joined query text of a `search` command
    #[must_use]
    pub fn search_query(&self) -> Option<String> {
        match self {
            Self::Search { terms, .. } => Some(terms.join(" ")),
            _ => None,
        }
    }
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., page_size=20)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., safesearch)
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// Print the path of the configuration file
    Path,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Browse if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Browse { query: None })
    }
}
