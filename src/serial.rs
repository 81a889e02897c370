//! Electrolyser serial number codec.
//!
//! Controllers expose their serial number as a single packed 64-bit value.
//! Decoding is total: every `u64` maps to some [`SerialCode`], so there is no
//! error type here. Out-of-range bit patterns show up as an unknown site or
//! unusual letters rather than a failure.
//!
//! ## Layout (bit 0 = least significant)
//!
//! | Field      | Bits  | Width |
//! |------------|-------|-------|
//! | site       | 0-7   | 8     |
//! | order      | 8-12  | 5     |
//! | chassis    | 13-36 | 24    |
//! | day        | 37-41 | 5     |
//! | year/month | 42-52 | 11    |
//! | product    | 53-62 | 10    |
//! | reserved   | 63    | 1     |
//!
//! The month is zero-based (0-11) and is rendered without an offset. Keep
//! that in mind when comparing decoded codes against printed unit labels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Offset of the 5-bit letter codes in ASCII (`0` maps to `'@'`, `1` to `'A'`).
const LETTER_BASE: u8 = 64;

/// Location and width of one field inside the packed serial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitField {
    pub offset: u32,
    pub width: u32,
}

impl BitField {
    pub const fn new(offset: u32, width: u32) -> Self {
        Self { offset, width }
    }

    /// Mask covering `width` low bits.
    #[inline]
    pub const fn mask(self) -> u64 {
        (1u64 << self.width) - 1
    }

    /// Extract this field from a raw value.
    #[inline]
    pub const fn extract(self, raw: u64) -> u64 {
        (raw >> self.offset) & self.mask()
    }

    /// Place `value` into this field's position, dropping bits that don't fit.
    #[inline]
    pub const fn pack(self, value: u64) -> u64 {
        (value & self.mask()) << self.offset
    }
}

pub const SITE: BitField = BitField::new(0, 8);
pub const ORDER: BitField = BitField::new(8, 5);
pub const CHASSIS: BitField = BitField::new(13, 24);
pub const DAY: BitField = BitField::new(37, 5);
pub const YEAR_MONTH: BitField = BitField::new(42, 11);
pub const PRODUCT: BitField = BitField::new(53, 10);

/// Half of the product field; one letter each.
const PRODUCT_LETTER: BitField = BitField::new(0, 5);

/// Manufacturing site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Site {
    Pi,
    Sa,
    Unknown,
}

impl Site {
    pub const fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Pi,
            1 => Self::Sa,
            _ => Self::Unknown,
        }
    }

    /// Two-letter form used in the rendered serial.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pi => "PI",
            Self::Sa => "SA",
            Self::Unknown => "XX",
        }
    }

    /// Raw site byte. `Unknown` packs as `0xff`.
    pub const fn code(self) -> u8 {
        match self {
            Self::Pi => 0,
            Self::Sa => 1,
            Self::Unknown => 0xff,
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded electrolyser serial number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SerialCode {
    pub site: Site,
    pub order: char,
    pub chassis: u32,
    pub day: u8,
    /// Zero-based month, 0-11.
    pub month: u8,
    /// Offset year, not a calendar year.
    pub year: u16,
    pub product: [char; 2],
}

impl SerialCode {
    /// Decode a packed serial. Never fails.
    pub fn decode(raw: u64) -> Self {
        let year_month = YEAR_MONTH.extract(raw);
        let product = PRODUCT.extract(raw);

        Self {
            site: Site::from_code(SITE.extract(raw) as u8),
            order: letter(ORDER.extract(raw)),
            chassis: CHASSIS.extract(raw) as u32,
            day: DAY.extract(raw) as u8,
            month: (year_month % 12) as u8,
            year: (year_month / 12) as u16,
            product: [
                letter(product >> PRODUCT_LETTER.width),
                letter(PRODUCT_LETTER.extract(product)),
            ],
        }
    }

    /// Pack this code back into its 64-bit form. The reserved bit is zero.
    pub fn to_raw(&self) -> u64 {
        let year_month = u64::from(self.year) * 12 + u64::from(self.month);
        let product = (letter_code(self.product[0]) << PRODUCT_LETTER.width)
            | letter_code(self.product[1]);

        SITE.pack(u64::from(self.site.code()))
            | ORDER.pack(letter_code(self.order))
            | CHASSIS.pack(u64::from(self.chassis))
            | DAY.pack(u64::from(self.day))
            | YEAR_MONTH.pack(year_month)
            | PRODUCT.pack(product)
    }

    /// The two-letter product code.
    pub fn product(&self) -> String {
        self.product.iter().collect()
    }
}

impl fmt::Display for SerialCode {
    /// Canonical form: product, year, month, day, chassis, order, site.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{:02}{:02}{:02}{:02}{}{}",
            self.product[0],
            self.product[1],
            self.year,
            self.month,
            self.day,
            self.chassis,
            self.order,
            self.site
        )
    }
}

/// Map a 5-bit value to its letter.
fn letter(value: u64) -> char {
    char::from(LETTER_BASE + (value & PRODUCT_LETTER.mask()) as u8)
}

fn letter_code(c: char) -> u64 {
    u64::from(u32::from(c).wrapping_sub(u32::from(LETTER_BASE))) & PRODUCT_LETTER.mask()
}
