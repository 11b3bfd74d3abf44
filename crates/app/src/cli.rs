//! Command-line interface definition

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "byt",
    version = env!("CARGO_PKG_VERSION"),
    about = "Compose FOAAS messages over Unsplash backgrounds",
    long_about = None
)]
pub struct Cli {
    /// Config file (TOML or JSON); default locations are searched when omitted
    #[arg(long, global = true, env = "BYT_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Load a `.env` file into the environment, then parse `args`.
    ///
    /// The file must be loaded first: `--config` falls back to `BYT_CONFIG`
    /// while parsing. `dotenv_path` of `None` searches for the nearest
    /// `.env`. Variables already set are not overwritten. The `.env` outcome
    /// is returned for logging once tracing is up.
    pub fn parse_with_dotenv<I, T>(
        dotenv_path: Option<&Path>,
        args: I,
    ) -> (Self, dotenvy::Result<PathBuf>)
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let dotenv = match dotenv_path {
            Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
            None => dotenvy::dotenv(),
        };
        (Self::parse_from(args), dotenv)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available FOAAS operations
    Operations {
        /// Ignore the stored list and fetch it again
        #[arg(long)]
        refresh: bool,
    },
    /// Render a message from an operation template
    Compose {
        /// Operation name or short name (e.g. `bus`)
        operation: String,
        /// Placeholder value, repeatable: `--field name=Tom`
        #[arg(long = "field", short = 'f', value_parser = parse_field)]
        fields: Vec<(String, String)>,
        /// Print the request URL instead of fetching the message
        #[arg(long)]
        dry_run: bool,
    },
    /// Message of the day
    Motd,
    /// Show a random background image
    Image,
    /// Manage the local image library
    Images {
        #[command(subcommand)]
        action: ImagesAction,
    },
    /// Show or record the application version
    Version {
        /// Record a new version
        #[arg(long)]
        set: Option<String>,
        /// Release note stored with `--set`
        #[arg(long, requires = "set")]
        message: Option<String>,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagesAction {
    /// Restore stored images or download a fresh batch
    Init,
    /// List cached images, fetching a batch when empty
    List,
    /// Delete downloaded images and stored metadata
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    // Human-readable multi-line output
    Pretty,

    // JSON format for machine parsing
    Json,

    // Compact single-line format
    Compact,
}

/// `key=value` pair for `--field`.
fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) =
        raw.split_once('=').ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
