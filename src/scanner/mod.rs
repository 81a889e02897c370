//! Subnet scanner - sweeps the last octet looking for controllers.
//!
//! Every candidate goes through the prober first and the Modbus reader only
//! if something is listening. Addresses are handled strictly one after the
//! other in ascending order; the report relies on that ordering to cite a
//! contiguous range when nothing is found.

pub mod modbus;
pub mod probe;
pub mod traits;

use crate::serial::SerialCode;
use crate::types::{OctetRange, ScanTarget, Subnet, MODBUS_PORT};
use chrono::Utc;
use indicatif::ProgressBar;
use std::net::Ipv4Addr;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub use modbus::{ModbusSerialReader, SERIAL_REGISTER};
pub use probe::TcpProber;
pub use traits::{
    BoxedProber, BoxedReader, HostOutcome, HostResult, Prober, ScanReport, SerialReader,
};

/// Configuration for building a scanner.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Port the Modbus endpoint listens on.
    pub port: u16,
    /// Deadline for the liveness probe.
    pub probe_timeout: Duration,
    /// Deadline for the Modbus session open and register read.
    pub read_timeout: Duration,
    /// Input register holding the serial.
    pub register: u16,
    /// Modbus unit identifier.
    pub unit_id: u8,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            port: MODBUS_PORT,
            probe_timeout: probe::DEFAULT_PROBE_TIMEOUT,
            read_timeout: modbus::DEFAULT_READ_TIMEOUT,
            register: SERIAL_REGISTER,
            unit_id: modbus::DEFAULT_UNIT_ID,
        }
    }
}

impl ScanConfig {
    /// Set the Modbus port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the probe timeout.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Set the read timeout.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Worst-case time for one pass over `range`.
    pub fn worst_case(&self, range: &OctetRange) -> Duration {
        let per_host = self.probe_timeout + self.read_timeout * 2;
        per_host * range.len() as u32
    }
}

/// Sequential prober-then-reader sweep over a subnet.
pub struct SubnetScanner {
    prober: BoxedProber,
    reader: BoxedReader,
    port: u16,
    progress: Option<ProgressBar>,
}

impl SubnetScanner {
    /// Create a scanner from explicit collaborators.
    pub fn new(prober: BoxedProber, reader: BoxedReader, port: u16) -> Self {
        Self {
            prober,
            reader,
            port,
            progress: None,
        }
    }

    /// Create the TCP/Modbus scanner described by `config`.
    pub fn from_config(config: &ScanConfig) -> Self {
        let reader = ModbusSerialReader::new(config.read_timeout)
            .with_register(config.register)
            .with_unit_id(config.unit_id);

        Self::new(
            Box::new(TcpProber::new(config.probe_timeout)),
            Box::new(reader),
            config.port,
        )
    }

    /// Report progress to a bar, one tick per address.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Check a single address.
    pub async fn check_host(&self, ip: Ipv4Addr) -> HostOutcome {
        let target = ScanTarget::new(ip, self.port);

        if !self.prober.is_reachable(target).await {
            return HostOutcome::NotListening;
        }

        match self.reader.read_serial(target).await {
            Ok(serial) => found(target, serial),
            Err(e) => {
                debug!(%target, error = %e, "no serial read");
                HostOutcome::NoSerial {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Scan `[range.start(), range.end())` on `subnet`, one address at a time.
    ///
    /// Failures are recorded per address and never stop the sweep.
    pub async fn scan(&self, subnet: Subnet, range: OctetRange) -> ScanReport {
        let started_at = Utc::now();
        let start = Instant::now();

        info!(%subnet, %range, port = self.port, "starting electrolyser scan");

        if let Some(pb) = &self.progress {
            pb.set_length(range.len() as u64);
        }

        let mut results = Vec::with_capacity(range.len());
        for octet in range.octets() {
            let ip = subnet.host(octet);
            let outcome = self.check_host(ip).await;

            if let Some(pb) = &self.progress {
                pb.inc(1);
                if let Some(serial) = outcome.serial() {
                    pb.set_message(format!("Found {serial} at {ip}"));
                }
            }

            results.push(HostResult::new(ip, outcome));
        }

        if let Some(pb) = &self.progress {
            pb.finish_with_message("Scan complete");
        }

        let report = ScanReport {
            subnet,
            range,
            started_at,
            duration_ms: start.elapsed().as_millis() as u64,
            results,
        };

        info!(
            found = report.found_count(),
            scanned = report.results.len(),
            duration_ms = report.duration_ms,
            "scan finished"
        );

        report
    }
}

fn found(target: ScanTarget, serial: SerialCode) -> HostOutcome {
    info!(%target, %serial, "found electrolyser");
    HostOutcome::Found { serial }
}
