//! Error types for electroscan.
//!
//! Uses `thiserror` for ergonomic error definitions.

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

use crate::types::RangeError;

/// Errors raised while probing or reading a single device.
///
/// Inside a subnet scan these never abort the scan; they are folded into
/// the per-address outcome.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("failed to connect to {addr}: {reason}")]
    Connect { addr: SocketAddr, reason: String },

    #[error("connection to {addr} timed out after {timeout_ms}ms")]
    ConnectTimeout { addr: SocketAddr, timeout_ms: u64 },

    #[error("failed to read input register {register} from {addr}: {reason}")]
    Read {
        addr: SocketAddr,
        register: u16,
        reason: String,
    },

    #[error("malformed register data from {addr}: expected {expected} words, got {actual}")]
    MalformedData {
        addr: SocketAddr,
        expected: usize,
        actual: usize,
    },

    #[error("could not determine local IPv4 address: {0}")]
    LocalAddress(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    /// The session or connection could not be established.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Connect { .. } | Self::ConnectTimeout { .. })
    }

    /// The session was open but the serial register could not be read.
    pub fn is_read(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::MalformedData { .. })
    }
}

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings file: {0}")]
    InvalidFormat(String),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level error for CLI commands.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error("invalid serial value '{0}': expected a decimal or 0x-prefixed hex integer")]
    InvalidSerial(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        let addr: SocketAddr = "10.0.0.5:502".parse().unwrap();
        let connect = ScanError::ConnectTimeout {
            addr,
            timeout_ms: 100,
        };
        let read = ScanError::MalformedData {
            addr,
            expected: 4,
            actual: 2,
        };

        assert!(connect.is_connect());
        assert!(!connect.is_read());
        assert!(read.is_read());
        assert!(!read.is_connect());
    }

    #[test]
    fn test_error_display() {
        let addr: SocketAddr = "10.0.0.5:502".parse().unwrap();
        let err = ScanError::Read {
            addr,
            register: 14,
            reason: "Illegal data address".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to read input register 14 from 10.0.0.5:502: Illegal data address"
        );
    }
}
