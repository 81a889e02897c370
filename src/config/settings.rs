//! Application settings and paths.
//!
//! Settings live in a JSON file under the XDG config directory. A missing
//! file means defaults.

use crate::error::{ConfigError, ConfigResult};
use crate::net::BaseAddress;
use crate::scanner::ScanConfig;
use crate::types::{OctetRange, RangeError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/electroscan)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Locate the XDG directories. Nothing is created.
    pub fn new() -> ConfigResult<Self> {
        let project = ProjectDirs::from("com", "electroscan", "electroscan")
            .ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Address the web interface binds to.
    pub bind_address: IpAddr,
    /// Port the web interface listens on.
    pub http_port: u16,
    /// Port controllers expose Modbus/TCP on.
    pub modbus_port: u16,
    /// Modbus unit identifier.
    pub unit_id: u8,
    /// Input register holding the serial number.
    pub serial_register: u16,
    /// Liveness probe timeout in milliseconds.
    pub probe_timeout_ms: u64,
    /// Modbus connect/read timeout in milliseconds.
    pub read_timeout_ms: u64,
    /// Default first octet offered by the search form.
    pub default_from: u16,
    /// Default (exclusive) last octet offered by the search form.
    pub default_to: u16,
    /// Scan this address's /24 instead of detecting the local one.
    pub base_address: Option<Ipv4Addr>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            http_port: 8080,
            modbus_port: 502,
            unit_id: 1,
            serial_register: 14,
            probe_timeout_ms: 100,
            read_timeout_ms: 100,
            default_from: 200,
            default_to: 254,
            base_address: None,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location.
    pub fn load() -> ConfigResult<Self> {
        let file = Paths::new()?.settings_file();

        if !file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }

    /// Load from `path` if given, else from the default location.
    pub fn resolve(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        }
    }

    /// Scanner configuration derived from these settings.
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            port: self.modbus_port,
            probe_timeout: Duration::from_millis(self.probe_timeout_ms),
            read_timeout: Duration::from_millis(self.read_timeout_ms),
            register: self.serial_register,
            unit_id: self.unit_id,
        }
    }

    pub fn base(&self) -> BaseAddress {
        BaseAddress::from_option(self.base_address)
    }

    /// Range pre-filled in the search form.
    pub fn default_range(&self) -> Result<OctetRange, RangeError> {
        OctetRange::new(self.default_from, self.default_to)
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.http_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.http_port, 8080);
        assert_eq!(settings.modbus_port, 502);
        assert_eq!(settings.serial_register, 14);
        assert_eq!(settings.listen_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(settings.base(), BaseAddress::Detect);

        let range = settings.default_range().unwrap();
        assert_eq!((range.start(), range.end()), (200, 254));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "http_port": 9000, "base_address": "10.1.2.3" }"#).unwrap();

        let settings = AppSettings::load_from(&path).unwrap();
        assert_eq!(settings.http_port, 9000);
        assert_eq!(settings.modbus_port, 502);
        assert_eq!(
            settings.base(),
            BaseAddress::Fixed(Ipv4Addr::new(10, 1, 2, 3))
        );
    }

    #[test]
    fn test_full_file_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let settings = AppSettings {
            probe_timeout_ms: 250,
            ..AppSettings::default()
        };
        fs::write(&path, serde_json::to_string_pretty(&settings).unwrap()).unwrap();

        let loaded = AppSettings::resolve(Some(path.as_path())).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(
            loaded.scan_config().probe_timeout,
            Duration::from_millis(250)
        );
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            AppSettings::load_from(&path),
            Err(ConfigError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempdir().unwrap();
        let result = AppSettings::load_from(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(ConfigError::ReadFailed { .. })));
    }
}
