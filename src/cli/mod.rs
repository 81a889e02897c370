//! CLI subcommand definitions and handlers.
//!
//! - `electroscan serve` - Run the web interface (default)
//! - `electroscan scan` - Scan the local subnet from the terminal
//! - `electroscan decode <value>` - Decode a raw serial register value

mod decode;
mod scan;
mod serve;

pub use decode::DecodeCommand;
pub use scan::ScanCommand;
pub use serve::ServeCommand;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Electroscan - find electrolyser controllers on the local subnet.
///
/// Probes each address in a last-octet range for a Modbus/TCP endpoint and
/// reads the controller's serial number from input register 14.
#[derive(Parser, Debug)]
#[command(name = "electroscan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Discover electrolyser controllers over Modbus/TCP", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to custom configuration file
    #[arg(long, global = true, value_name = "PATH", env = "ELECTROSCAN_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the web interface
    Serve(ServeCommand),

    /// Scan the local subnet for electrolysers
    #[command(alias = "s")]
    Scan(ScanCommand),

    /// Decode a raw 64-bit serial value
    #[command(alias = "d")]
    Decode(DecodeCommand),
}

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    Plain,
    /// JSON structured output
    Json,
    /// CSV format for data analysis
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}
