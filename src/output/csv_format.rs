//! CSV output formatting.

use crate::scanner::{HostOutcome, ScanReport};
use std::io;

/// Write one row per scanned address.
pub fn write_csv<W: io::Write>(report: &ScanReport, writer: W) -> io::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(["address", "status", "serial", "detail"])?;

    for result in &report.results {
        let detail = match &result.outcome {
            HostOutcome::NoSerial { reason } => reason.as_str(),
            _ => "",
        };
        let address = result.address.to_string();
        let status = result.outcome.to_string();
        let serial = result.serial_string().unwrap_or_default();
        wtr.write_record([address.as_str(), status.as_str(), serial.as_str(), detail])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Print results in CSV format.
pub fn print_csv(report: &ScanReport) -> io::Result<()> {
    write_csv(report, io::stdout().lock())
}
