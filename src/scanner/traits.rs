//! Scanner seams and result types.
//!
//! The subnet scanner drives two collaborators: a [`Prober`] that cheaply
//! rejects addresses with nothing listening, and a [`SerialReader`] that
//! pays for the full Modbus session. Both are traits so the scan loop can be
//! exercised without a network.

use crate::error::ScanResult;
use crate::serial::SerialCode;
use crate::types::{OctetRange, ScanTarget, Subnet};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::net::Ipv4Addr;

/// What was found at one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HostOutcome {
    /// A controller answered with its serial number.
    Found { serial: SerialCode },
    /// Nothing accepted a connection on the Modbus port.
    NotListening,
    /// Something listened, but no serial number could be read.
    NoSerial { reason: String },
}

impl HostOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    pub fn serial(&self) -> Option<&SerialCode> {
        match self {
            Self::Found { serial } => Some(serial),
            _ => None,
        }
    }
}

impl fmt::Display for HostOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found { .. } => write!(f, "found"),
            Self::NotListening => write!(f, "not listening"),
            Self::NoSerial { .. } => write!(f, "no serial"),
        }
    }
}

/// Outcome for a single scanned address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostResult {
    pub address: Ipv4Addr,
    #[serde(flatten)]
    pub outcome: HostOutcome,
}

impl HostResult {
    pub fn new(address: Ipv4Addr, outcome: HostOutcome) -> Self {
        Self { address, outcome }
    }

    /// Canonical serial string, if a controller was found.
    pub fn serial_string(&self) -> Option<String> {
        self.outcome.serial().map(ToString::to_string)
    }
}

/// Results of one pass over a subnet range, in ascending address order.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub subnet: Subnet,
    pub range: OctetRange,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub results: Vec<HostResult>,
}

impl ScanReport {
    /// Addresses where a controller was found.
    pub fn found(&self) -> impl Iterator<Item = &HostResult> {
        self.results.iter().filter(|r| r.outcome.is_found())
    }

    pub fn found_count(&self) -> usize {
        self.found().count()
    }

    /// Sentence reported when nothing was found, citing the requested bounds.
    pub fn absence_summary(&self) -> String {
        let prefix = self.subnet.prefix();
        format!(
            "No electrolysers were found between {prefix}.{} and {prefix}.{}.",
            self.range.start(),
            self.range.end()
        )
    }
}

/// Cheap reachability check run before opening a Modbus session.
#[async_trait]
pub trait Prober: Send + Sync {
    /// True only if a transport connection could be made.
    async fn is_reachable(&self, target: ScanTarget) -> bool;
}

/// Reads and decodes the serial number of a controller.
#[async_trait]
pub trait SerialReader: Send + Sync {
    async fn read_serial(&self, target: ScanTarget) -> ScanResult<SerialCode>;
}

/// A boxed prober for dynamic dispatch.
pub type BoxedProber = Box<dyn Prober>;

/// A boxed reader for dynamic dispatch.
pub type BoxedReader = Box<dyn SerialReader>;
