//! Core type definitions.
//!
//! Newtypes for what a scan is aimed at: the candidate device and the
//! last-octet range swept on the local subnet.

mod range;
mod target;

pub use range::{OctetRange, RangeError};
pub use target::{ScanTarget, Subnet, MODBUS_PORT};
