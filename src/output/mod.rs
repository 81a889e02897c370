//! Output formatting module.
//!
//! Provides formatters for plain text, JSON, and CSV output of scan reports.

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::{print_csv, write_csv};
pub use json_format::print_json;
pub use plain::{
    print_error, print_info, print_plain, print_scan_header, print_serial, print_warning,
};

use crate::cli::OutputFormat;
use crate::scanner::ScanReport;
use std::io;

/// Format and print a scan report according to the specified format.
pub fn print_report(report: &ScanReport, format: OutputFormat, show_absent: bool) -> io::Result<()> {
    match format {
        OutputFormat::Plain => plain::print_plain(report, show_absent),
        OutputFormat::Json => json_format::print_json(report),
        OutputFormat::Csv => csv_format::print_csv(report),
    }
}
