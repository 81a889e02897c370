//! Last-octet scan ranges.
//!
//! Operators enter the bounds as plain numbers. They are parsed as signed
//! 16-bit integers, then checked against the octet space. `to` is exclusive,
//! so `256` is accepted to reach `.255`.

use serde::Serialize;
use std::fmt;

/// Half-open range `[from, to)` over the last address octet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OctetRange {
    from: u16,
    to: u16,
}

/// Error type for range bounds supplied by an operator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("invalid value for '{field}': {value:?} is not a 16-bit integer")]
    InvalidNumber { field: &'static str, value: String },
    #[error("'{field}' = {value} is outside 0-{max}")]
    OutOfBounds {
        field: &'static str,
        value: i16,
        max: u16,
    },
}

impl OctetRange {
    /// Largest accepted `from`.
    pub const MAX_FROM: u16 = 255;
    /// Largest accepted (exclusive) `to`.
    pub const MAX_TO: u16 = 256;

    /// Create a range. `from >= to` is allowed and yields no addresses.
    pub fn new(from: u16, to: u16) -> Result<Self, RangeError> {
        check("from", from, Self::MAX_FROM)?;
        check("to", to, Self::MAX_TO)?;
        Ok(Self { from, to })
    }

    /// Parse operator-supplied bounds.
    pub fn parse(from: &str, to: &str) -> Result<Self, RangeError> {
        let from = parse_bound("from", from, Self::MAX_FROM)?;
        let to = parse_bound("to", to, Self::MAX_TO)?;
        Ok(Self { from, to })
    }

    pub const fn start(&self) -> u16 {
        self.from
    }

    pub const fn end(&self) -> u16 {
        self.to
    }

    pub fn len(&self) -> usize {
        usize::from(self.to.saturating_sub(self.from))
    }

    pub fn is_empty(&self) -> bool {
        self.from >= self.to
    }

    /// Octets in ascending order.
    pub fn octets(&self) -> impl Iterator<Item = u8> {
        (self.from..self.to).filter_map(|octet| u8::try_from(octet).ok())
    }
}

impl fmt::Display for OctetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.from, self.to)
    }
}

fn check(field: &'static str, value: u16, max: u16) -> Result<(), RangeError> {
    if value > max {
        return Err(RangeError::OutOfBounds {
            field,
            value: i16::try_from(value).unwrap_or(i16::MAX),
            max,
        });
    }
    Ok(())
}

fn parse_bound(field: &'static str, raw: &str, max: u16) -> Result<u16, RangeError> {
    let value: i16 = raw.trim().parse().map_err(|_| RangeError::InvalidNumber {
        field,
        value: raw.to_string(),
    })?;

    match u16::try_from(value) {
        Ok(v) if v <= max => Ok(v),
        _ => Err(RangeError::OutOfBounds { field, value, max }),
    }
}
