use super::app_config::LogLevel;
use crate::presentation::commands::PluginCommand;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "thumbstore",
    version,
    about = "Query the plugin store API",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Plugin store API base URL.
    #[arg(long, env = "THUMBSTORE_API_ENDPOINT", value_name = "URL")]
    pub api_endpoint: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Extra request header, as `Name: value`. Repeatable.
    #[arg(long = "header", value_name = "HEADER")]
    pub headers: Vec<String>,

    /// Plugin store query to run.
    #[command(subcommand)]
    pub command: PluginCommand,
}
