//! # Electroscan - Electrolyser Discovery over Modbus/TCP
//!
//! Electroscan sweeps the last octet of the local /24 looking for
//! electrolyser controllers. Each candidate is probed with a short TCP
//! connect; anything listening on the Modbus port is asked for its serial
//! number, a packed 64-bit value in input registers 14-17, which is decoded
//! into the vendor's printed form.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use electroscan::scanner::{ScanConfig, SubnetScanner};
//! use electroscan::types::{OctetRange, Subnet};
//! use std::net::Ipv4Addr;
//!
//! #[tokio::main]
//! async fn main() {
//!     let scanner = SubnetScanner::from_config(&ScanConfig::default());
//!     let subnet = Subnet::containing(Ipv4Addr::new(192, 168, 1, 10));
//!     let range = OctetRange::new(200, 254).unwrap();
//!
//!     let report = scanner.scan(subnet, range).await;
//!     for host in report.found() {
//!         println!("{} {}", host.address, host.serial_string().unwrap());
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`serial`] - Bit-field codec for the packed serial number
//! - [`scanner`] - Liveness prober, Modbus register reader and subnet sweep
//! - [`types`] - Scan targets, subnets and octet ranges
//! - [`net`] - Local subnet detection
//! - [`web`] - HTML search form and results
//! - [`config`] - Settings file handling
//! - [`error`] - Error types
//! - [`output`] - Terminal output formatting

pub mod cli;
pub mod config;
pub mod error;
pub mod net;
pub mod output;
pub mod scanner;
pub mod serial;
pub mod types;
pub mod web;

// Re-export commonly used types
pub use error::{CliError, ScanError};
pub use scanner::{HostOutcome, HostResult, ScanReport, SubnetScanner};
pub use serial::{SerialCode, Site};
pub use types::{OctetRange, ScanTarget, Subnet};
