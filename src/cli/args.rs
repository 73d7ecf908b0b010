//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// memodisk - persistent function-result cache
///
/// Inspect cache folders and derive cache keys from the command line.
#[derive(Parser, Debug)]
#[command(name = "memodisk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "MEMODISK_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Derive the cache key for a function and its arguments
    Key(KeyArgs),

    /// List entries in a cache folder
    List(ListArgs),

    /// Show where the entry for a key lives and whether it exists
    Inspect(InspectArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the key command
#[derive(Parser, Debug)]
pub struct KeyArgs {
    /// Qualified function name (e.g., reports::build)
    #[arg(short, long)]
    pub name: String,

    /// File holding the function's source text
    #[arg(short, long)]
    pub source: PathBuf,

    /// Keyword arguments (NAME=VALUE)
    #[arg(short, long, value_parser = parse_kwarg)]
    pub kw: Vec<(String, String)>,

    /// Positional arguments; JSON literals, anything else is taken as a string
    #[arg(allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Cache folder (defaults to cache.folder from config)
    #[arg(short, long)]
    pub folder: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the inspect command
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Cache key (64 hex characters)
    pub key: String,

    /// Cache folder (defaults to cache.folder from config)
    #[arg(short, long)]
    pub folder: Option<PathBuf>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., cache.folder)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Output format for list command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one key per line)
    Plain,
}

/// Parse a keyword argument in NAME=VALUE format
fn parse_kwarg(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid NAME=VALUE format: no '=' found in '{s}'"))?;
    if pos == 0 {
        return Err(format!("invalid NAME=VALUE format: empty name in '{s}'"));
    }
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}
