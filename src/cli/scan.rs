//! Scan subcommand implementation.
//!
//! Handles `electroscan scan`, a one-off sweep printed to the terminal.

use crate::cli::OutputFormat;
use crate::config::AppSettings;
use crate::error::CliResult;
use crate::net::BaseAddress;
use crate::output;
use crate::scanner::SubnetScanner;
use crate::types::OctetRange;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::net::Ipv4Addr;
use std::time::Duration;

/// Scan the local subnet for electrolysers.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// First last-octet to scan (inclusive, default from settings)
    #[arg(short, long)]
    pub from: Option<String>,

    /// Last-octet to stop at (exclusive, default from settings)
    #[arg(short, long)]
    pub to: Option<String>,

    /// Scan this address's /24 instead of the local subnet
    #[arg(short, long, value_name = "IP")]
    pub base: Option<Ipv4Addr>,

    /// Modbus/TCP port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Liveness probe timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub probe_timeout: Option<u64>,

    /// Modbus connect/read timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub read_timeout: Option<u64>,

    /// Output format for results
    #[arg(short, long, value_enum, default_value = "plain")]
    pub output: OutputFormat,

    /// List addresses where nothing was found
    #[arg(long)]
    pub show_absent: bool,
}

impl ScanCommand {
    /// Execute the scan command.
    pub async fn execute(&self, settings: &AppSettings, verbose: bool, quiet: bool) -> CliResult<()> {
        let from = self
            .from
            .clone()
            .unwrap_or_else(|| settings.default_from.to_string());
        let to = self
            .to
            .clone()
            .unwrap_or_else(|| settings.default_to.to_string());
        let range = OctetRange::parse(&from, &to)?;

        let base = match self.base {
            Some(ip) => BaseAddress::Fixed(ip),
            None => settings.base(),
        };
        let subnet = base.resolve().await?;

        let mut config = settings.scan_config();
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(ms) = self.probe_timeout {
            config = config.with_probe_timeout(Duration::from_millis(ms));
        }
        if let Some(ms) = self.read_timeout {
            config = config.with_read_timeout(Duration::from_millis(ms));
        }

        let plain = self.output == OutputFormat::Plain;
        if range.is_empty() && !quiet {
            output::print_warning(&format!("Range {range} is empty, no addresses to scan"));
        }
        if !quiet && plain {
            output::print_scan_header(
                &subnet.to_string(),
                &range.to_string(),
                config.port,
                range.len(),
            );
            if verbose {
                output::print_info(&format!(
                    "Worst case duration {:.1}s",
                    config.worst_case(&range).as_secs_f64()
                ));
            }
        }

        let mut scanner = SubnetScanner::from_config(&config);
        if verbose && plain {
            scanner = scanner.with_progress(progress_bar());
        }

        let report = scanner.scan(subnet, range).await;
        output::print_report(&report, self.output, self.show_absent)?;

        Ok(())
    }
}

fn progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
    ) {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb
}
