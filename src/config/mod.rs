//! Configuration management for electroscan.
//!
//! Provides XDG-compliant settings storage for the web interface and the
//! scanner.

mod settings;

pub use settings::{AppSettings, Paths};
