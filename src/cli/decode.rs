//! Decode subcommand implementation.
//!
//! Handles `electroscan decode <value>` for checking a register value read
//! by other tools against the canonical serial string.

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output;
use crate::serial::SerialCode;
use clap::Parser;
use serde::Serialize;

/// Decode a raw 64-bit serial value.
#[derive(Parser, Debug)]
pub struct DecodeCommand {
    /// Raw value, decimal or 0x-prefixed hex
    #[arg(value_name = "VALUE")]
    pub value: String,

    /// Output format (csv prints the serial only)
    #[arg(short, long, value_enum, default_value = "plain")]
    pub output: OutputFormat,
}

#[derive(Serialize)]
struct Decoded<'a> {
    raw: u64,
    code: String,
    #[serde(flatten)]
    fields: &'a SerialCode,
}

impl DecodeCommand {
    /// Execute the decode command.
    pub fn execute(&self) -> CliResult<()> {
        let raw = parse_raw(&self.value)?;
        let serial = SerialCode::decode(raw);

        match self.output {
            OutputFormat::Plain => output::print_serial(raw, &serial)?,
            OutputFormat::Json => output::print_json(&Decoded {
                raw,
                code: serial.to_string(),
                fields: &serial,
            })?,
            OutputFormat::Csv => println!("{serial}"),
        }

        Ok(())
    }
}

/// Parse a decimal or `0x` hex integer, allowing `_` separators.
pub fn parse_raw(value: &str) -> CliResult<u64> {
    let cleaned: String = value.trim().chars().filter(|c| *c != '_').collect();
    let parsed = match cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => cleaned.parse(),
    };
    parsed.map_err(|_| CliError::InvalidSerial(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_raw() {
        assert_eq!(parse_raw("42").unwrap(), 42);
        assert_eq!(parse_raw("0x2a").unwrap(), 42);
        assert_eq!(parse_raw("0X2A").unwrap(), 42);
        assert_eq!(parse_raw("0xffff_ffff_ffff_ffff").unwrap(), u64::MAX);
        assert!(matches!(parse_raw("zz"), Err(CliError::InvalidSerial(_))));
        assert!(parse_raw("-1").is_err());
    }

    #[test]
    fn test_decoded_json_shape() {
        let serial = SerialCode::decode(1);
        let json = serde_json::to_value(Decoded {
            raw: 1,
            code: serial.to_string(),
            fields: &serial,
        })
        .unwrap();

        assert_eq!(json["code"], "@@00000000@SA");
        assert_eq!(json["site"], "SA");
        assert_eq!(json["chassis"], 0);
    }
}
