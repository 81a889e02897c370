//! Plain text output formatting.
//!
//! Produces human-readable output with colors and formatting.

use crate::scanner::{HostOutcome, ScanReport};
use crate::serial::SerialCode;
use console::{style, Style};
use std::io::{self, Write};

const RULE: &str = "═══════════════════════════════════════════════════════════════";
const THIN_RULE: &str = "───────────────────────────────────────────────────────────────";

/// Print a scan report in human-readable plain text format.
///
/// Absent hosts are listed only when `show_absent` is set.
pub fn print_plain(report: &ScanReport, show_absent: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out)?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(
        out,
        "                {} Scan Results",
        style("Electroscan").cyan().bold()
    )?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(out)?;

    writeln!(out, "  {} {}", style("Subnet:").bold(), report.subnet)?;
    writeln!(out, "  {} {}", style("Range:").bold(), report.range)?;
    writeln!(
        out,
        "  {} {} addresses in {:.2}s, {} found",
        style("Statistics:").bold(),
        report.results.len(),
        report.duration_ms as f64 / 1000.0,
        style(report.found_count()).green().bold()
    )?;
    writeln!(out)?;

    let rows: Vec<_> = report
        .results
        .iter()
        .filter(|r| show_absent || r.outcome.is_found())
        .collect();

    if report.found_count() == 0 {
        writeln!(out, "  {}", style(report.absence_summary()).yellow())?;
    }

    if !rows.is_empty() {
        writeln!(out, "  {}", style(THIN_RULE).dim())?;
        writeln!(
            out,
            "  {:<16}  {:<14}  {}",
            style("ADDRESS").bold(),
            style("STATE").bold(),
            style("SERIAL").bold()
        )?;
        writeln!(out, "  {}", style(THIN_RULE).dim())?;

        for result in rows {
            let (state_style, detail) = match &result.outcome {
                HostOutcome::Found { serial } => (Style::new().green().bold(), serial.to_string()),
                HostOutcome::NotListening => (Style::new().dim(), String::new()),
                HostOutcome::NoSerial { reason } => (Style::new().yellow(), reason.clone()),
            };

            writeln!(
                out,
                "  {:<16}  {:<14}  {}",
                result.address.to_string(),
                state_style.apply_to(result.outcome.to_string()),
                detail
            )?;
        }

        writeln!(out, "  {}", style(THIN_RULE).dim())?;
    }

    writeln!(out)?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(out)?;

    Ok(())
}

/// Print the fields of a decoded serial.
pub fn print_serial(raw: u64, serial: &SerialCode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "  {} {:#018x}", style("Raw:").bold(), raw)?;
    writeln!(out, "  {} {}", style("Serial:").bold(), style(serial).green().bold())?;
    writeln!(out, "  {}", style(THIN_RULE).dim())?;
    writeln!(out, "  {:<10} {}", "product", serial.product())?;
    writeln!(out, "  {:<10} {}", "year", serial.year)?;
    writeln!(out, "  {:<10} {} (zero-based)", "month", serial.month)?;
    writeln!(out, "  {:<10} {}", "day", serial.day)?;
    writeln!(out, "  {:<10} {}", "chassis", serial.chassis)?;
    writeln!(out, "  {:<10} {}", "order", serial.order)?;
    writeln!(out, "  {:<10} {}", "site", serial.site)?;

    Ok(())
}

/// Print a scan header before scanning begins.
pub fn print_scan_header(subnet: &str, range: &str, port: u16, hosts: usize) {
    println!();
    println!(
        "{} {} v{}",
        style("Starting").cyan(),
        style("Electroscan").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{} Subnet: {}", style("•").dim(), style(subnet).white().bold());
    println!(
        "{} Range: {} on Modbus port {}",
        style("•").dim(),
        style(range).yellow(),
        port
    );
    println!(
        "{} Scanning {} addresses...",
        style("•").dim(),
        style(hosts).white().bold()
    );
    println!();
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print an info message.
pub fn print_info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}
