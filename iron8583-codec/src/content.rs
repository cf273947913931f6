/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Content-class codecs for ISO 8583 field values.
//!
//! This module provides:
//! - [`ContentCodec`]: Trait between domain values and raw wire bytes
//! - Concrete classes: [`Numeric`], [`AlphaNum`], [`AlphaNumSpecial`],
//!   [`RawBinary`], [`PackedBcd`], [`HexString`], [`DateTimeNumeric`]
//! - [`Padding`]: The fill rule applied at fixed lengths
//!
//! A content codec validates the character class and packs/unpacks the value;
//! length discipline (fixed, LLVAR, LLLVAR) is layered on top by
//! [`FieldCodec`](crate::FieldCodec).

use bytes::Bytes;
use chrono::{DateTime, Utc};
use iron8583_core::error::CodecError;
use iron8583_core::field::FieldValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the value padding is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PadSide {
    /// No padding; under-length fixed values are rejected.
    None,
    /// Fill bytes are prepended.
    Left,
    /// Fill bytes are appended.
    Right,
}

/// Padding rule for fixed-length fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padding {
    /// The side the fill bytes go on.
    pub side: PadSide,
    /// The fill byte.
    pub byte: u8,
}

impl Padding {
    /// No padding.
    pub const NONE: Self = Self {
        side: PadSide::None,
        byte: 0,
    };

    /// Left padding with the given fill byte.
    #[inline]
    #[must_use]
    pub const fn left(byte: u8) -> Self {
        Self {
            side: PadSide::Left,
            byte,
        }
    }

    /// Right padding with the given fill byte.
    #[inline]
    #[must_use]
    pub const fn right(byte: u8) -> Self {
        Self {
            side: PadSide::Right,
            byte,
        }
    }

    /// Returns true if no padding is applied.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self.side, PadSide::None)
    }
}

/// Conversion between domain values and raw wire bytes for one content class.
///
/// Implementations validate the character class on both directions and
/// perform any packing (BCD nibbles). They know nothing about field lengths.
pub trait ContentCodec: fmt::Debug + Send + Sync {
    /// Converts a domain value into raw wire bytes.
    ///
    /// # Errors
    /// Returns `CodecError::InvalidValue` if the value violates the
    /// content class.
    fn encode(&self, value: &FieldValue) -> Result<Bytes, CodecError>;

    /// Converts raw wire bytes back into a domain value.
    ///
    /// # Errors
    /// Returns `CodecError::InvalidValue` if the bytes violate the
    /// content class.
    fn decode(&self, bytes: &[u8]) -> Result<FieldValue, CodecError>;

    /// Default padding rule when this class is used at a fixed length.
    fn padding(&self) -> Padding {
        Padding::NONE
    }

    /// Strips padding from a decoded value.
    ///
    /// Only invoked when the layout view requests padding removal; raw
    /// binary and BCD values are returned unchanged.
    fn strip(&self, value: FieldValue) -> FieldValue {
        value
    }
}

/// Returns the text content of a value or an `InvalidValue` naming the class.
fn require_text<'a>(value: &'a FieldValue, class: &str) -> Result<&'a str, CodecError> {
    value
        .as_str()
        .ok_or_else(|| CodecError::InvalidValue(format!("{class} field expects a text value")))
}

/// Validates every byte of `bytes` against `valid`, naming the class on failure.
fn check_bytes(bytes: &[u8], class: &str, valid: fn(u8) -> bool) -> Result<(), CodecError> {
    match bytes.iter().find(|&&b| !valid(b)) {
        None => Ok(()),
        Some(&b) => Err(CodecError::InvalidValue(format!(
            "byte 0x{b:02X} not allowed in {class} field"
        ))),
    }
}

/// Numeric ASCII content (class N): decimal digits only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Numeric;

impl ContentCodec for Numeric {
    fn encode(&self, value: &FieldValue) -> Result<Bytes, CodecError> {
        let text = require_text(value, "numeric")?;
        check_bytes(text.as_bytes(), "numeric", |b| b.is_ascii_digit())?;
        Ok(Bytes::copy_from_slice(text.as_bytes()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<FieldValue, CodecError> {
        check_bytes(bytes, "numeric", |b| b.is_ascii_digit())?;
        Ok(FieldValue::Text(
            String::from_utf8_lossy(bytes).into_owned(),
        ))
    }

    fn padding(&self) -> Padding {
        Padding::left(b'0')
    }

    fn strip(&self, value: FieldValue) -> FieldValue {
        match value {
            FieldValue::Text(s) => {
                let trimmed = s.trim_start_matches('0');
                if trimmed.is_empty() && !s.is_empty() {
                    FieldValue::Text("0".to_string())
                } else {
                    FieldValue::Text(trimmed.to_string())
                }
            }
            other => other,
        }
    }
}

/// Alphanumeric content (class AN): letters, digits, and the space fill byte.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlphaNum;

impl ContentCodec for AlphaNum {
    fn encode(&self, value: &FieldValue) -> Result<Bytes, CodecError> {
        let text = require_text(value, "alphanumeric")?;
        check_bytes(text.as_bytes(), "alphanumeric", |b| {
            b.is_ascii_alphanumeric() || b == b' '
        })?;
        Ok(Bytes::copy_from_slice(text.as_bytes()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<FieldValue, CodecError> {
        check_bytes(bytes, "alphanumeric", |b| {
            b.is_ascii_alphanumeric() || b == b' '
        })?;
        Ok(FieldValue::Text(
            String::from_utf8_lossy(bytes).into_owned(),
        ))
    }

    fn padding(&self) -> Padding {
        Padding::right(b' ')
    }

    fn strip(&self, value: FieldValue) -> FieldValue {
        match value {
            FieldValue::Text(s) => FieldValue::Text(s.trim_end_matches(' ').to_string()),
            other => other,
        }
    }
}

/// Alphanumeric-plus-special content (class ANS): any printable ASCII.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlphaNumSpecial;

impl ContentCodec for AlphaNumSpecial {
    fn encode(&self, value: &FieldValue) -> Result<Bytes, CodecError> {
        let text = require_text(value, "ans")?;
        check_bytes(text.as_bytes(), "ans", |b| (0x20..=0x7E).contains(&b))?;
        Ok(Bytes::copy_from_slice(text.as_bytes()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<FieldValue, CodecError> {
        check_bytes(bytes, "ans", |b| (0x20..=0x7E).contains(&b))?;
        Ok(FieldValue::Text(
            String::from_utf8_lossy(bytes).into_owned(),
        ))
    }

    fn padding(&self) -> Padding {
        Padding::right(b' ')
    }

    fn strip(&self, value: FieldValue) -> FieldValue {
        match value {
            FieldValue::Text(s) => FieldValue::Text(s.trim_end_matches(' ').to_string()),
            other => other,
        }
    }
}

/// Raw binary content (class B): bytes pass through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawBinary;

impl ContentCodec for RawBinary {
    fn encode(&self, value: &FieldValue) -> Result<Bytes, CodecError> {
        match value {
            FieldValue::Binary(b) => Ok(b.clone()),
            FieldValue::Text(_) => Err(CodecError::InvalidValue(
                "binary field expects a byte value".to_string(),
            )),
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<FieldValue, CodecError> {
        Ok(FieldValue::Binary(Bytes::copy_from_slice(bytes)))
    }
}

/// Hexadecimal ASCII content: hex digit characters on the wire.
#[derive(Debug, Clone, Copy, Default)]
pub struct HexString;

impl ContentCodec for HexString {
    fn encode(&self, value: &FieldValue) -> Result<Bytes, CodecError> {
        let text = require_text(value, "hex")?;
        check_bytes(text.as_bytes(), "hex", |b| b.is_ascii_hexdigit())?;
        Ok(Bytes::copy_from_slice(text.as_bytes()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<FieldValue, CodecError> {
        check_bytes(bytes, "hex", |b| b.is_ascii_hexdigit())?;
        Ok(FieldValue::Text(
            String::from_utf8_lossy(bytes).into_owned(),
        ))
    }
}

/// Packed BCD content: two decimal digits per byte, high nibble first.
///
/// A digit string with an odd digit count gains a zero high nibble, so
/// `"123"` packs to `0x01 0x23` and decodes back as `"0123"`. Even digit
/// counts round-trip exactly. BCD values are never padding-stripped.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackedBcd;

impl ContentCodec for PackedBcd {
    fn encode(&self, value: &FieldValue) -> Result<Bytes, CodecError> {
        let text = require_text(value, "bcd")?;
        let digits = text.as_bytes();
        check_bytes(digits, "bcd", |b| b.is_ascii_digit())?;

        let mut packed = Vec::with_capacity(digits.len().div_ceil(2));
        let mut idx = 0;
        if digits.len() % 2 == 1 {
            packed.push(digits[0] - b'0');
            idx = 1;
        }
        while idx < digits.len() {
            packed.push(((digits[idx] - b'0') << 4) | (digits[idx + 1] - b'0'));
            idx += 2;
        }
        Ok(Bytes::from(packed))
    }

    fn decode(&self, bytes: &[u8]) -> Result<FieldValue, CodecError> {
        let mut digits = String::with_capacity(bytes.len() * 2);
        for &byte in bytes {
            let hi = byte >> 4;
            let lo = byte & 0x0F;
            if hi > 9 || lo > 9 {
                return Err(CodecError::InvalidValue(format!(
                    "byte 0x{byte:02X} is not packed decimal"
                )));
            }
            digits.push((b'0' + hi) as char);
            digits.push((b'0' + lo) as char);
        }
        Ok(FieldValue::Text(digits))
    }

    fn padding(&self) -> Padding {
        Padding::left(0x00)
    }
}

/// Datetime wire shapes used by ISO 8583 time fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateTimeKind {
    /// `YYMMDDhhmmss` - 12 digits (field 7 style local transmission time).
    YyMmDdHhMmSs,
    /// `MMDDhhmmss` - 10 digits.
    MmDdHhMmSs,
    /// `YYMM` - 4 digits (expiration dates).
    YyMm,
    /// `MMDD` - 4 digits (settlement and capture dates).
    MmDd,
    /// `hhmmss` - 6 digits (local transaction time).
    HhMmSs,
}

impl DateTimeKind {
    /// Wire width of this shape in digits.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::YyMmDdHhMmSs => 12,
            Self::MmDdHhMmSs => 10,
            Self::YyMm | Self::MmDd => 4,
            Self::HhMmSs => 6,
        }
    }

    /// The `chrono` format pattern for this shape.
    const fn pattern(self) -> &'static str {
        match self {
            Self::YyMmDdHhMmSs => "%y%m%d%H%M%S",
            Self::MmDdHhMmSs => "%m%d%H%M%S",
            Self::YyMm => "%y%m",
            Self::MmDd => "%m%d",
            Self::HhMmSs => "%H%M%S",
        }
    }

    /// Formats a timestamp into this shape's digit string.
    #[must_use]
    pub fn format(self, at: &DateTime<Utc>) -> String {
        at.format(self.pattern()).to_string()
    }
}

/// Fixed-width numeric datetime content.
///
/// Structural validation of component ranges (month 1-12 and so on) is left
/// to the caller; the codec enforces the digit class only.
#[derive(Debug, Clone, Copy)]
pub struct DateTimeNumeric {
    kind: DateTimeKind,
}

impl DateTimeNumeric {
    /// Creates a datetime codec of the given shape.
    #[inline]
    #[must_use]
    pub const fn new(kind: DateTimeKind) -> Self {
        Self { kind }
    }

    /// Returns the wire shape.
    #[inline]
    #[must_use]
    pub const fn kind(self) -> DateTimeKind {
        self.kind
    }
}

impl ContentCodec for DateTimeNumeric {
    fn encode(&self, value: &FieldValue) -> Result<Bytes, CodecError> {
        let text = require_text(value, "datetime")?;
        check_bytes(text.as_bytes(), "datetime", |b| b.is_ascii_digit())?;
        Ok(Bytes::copy_from_slice(text.as_bytes()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<FieldValue, CodecError> {
        check_bytes(bytes, "datetime", |b| b.is_ascii_digit())?;
        Ok(FieldValue::Text(
            String::from_utf8_lossy(bytes).into_owned(),
        ))
    }

    fn padding(&self) -> Padding {
        Padding::left(b'0')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_numeric_rejects_non_digits() {
        let err = Numeric.encode(&FieldValue::from("12a4")).unwrap_err();
        assert!(matches!(err, CodecError::InvalidValue(_)));
    }

    #[test]
    fn test_numeric_strip() {
        let stripped = Numeric.strip(FieldValue::from("000123"));
        assert_eq!(stripped.as_str(), Some("123"));
        let all_zero = Numeric.strip(FieldValue::from("000"));
        assert_eq!(all_zero.as_str(), Some("0"));
    }

    #[test]
    fn test_alphanum_strip() {
        let stripped = AlphaNum.strip(FieldValue::from("ABC   "));
        assert_eq!(stripped.as_str(), Some("ABC"));
    }

    #[test]
    fn test_ans_accepts_specials() {
        let encoded = AlphaNumSpecial.encode(&FieldValue::from("A-1/B_2!")).unwrap();
        assert_eq!(&encoded[..], b"A-1/B_2!");
    }

    #[test]
    fn test_ans_rejects_control_bytes() {
        let err = AlphaNumSpecial
            .encode(&FieldValue::Text("tab\there".to_string()))
            .unwrap_err();
        assert!(matches!(err, CodecError::InvalidValue(_)));
    }

    #[test]
    fn test_binary_requires_bytes() {
        let err = RawBinary.encode(&FieldValue::from("text")).unwrap_err();
        assert!(matches!(err, CodecError::InvalidValue(_)));

        let encoded = RawBinary.encode(&FieldValue::from(vec![0xDE, 0xAD])).unwrap();
        assert_eq!(&encoded[..], &[0xDE, 0xAD]);
    }

    #[test]
    fn test_bcd_even_round_trip() {
        let packed = PackedBcd.encode(&FieldValue::from("1234")).unwrap();
        assert_eq!(&packed[..], &[0x12, 0x34]);
        let decoded = PackedBcd.decode(&packed).unwrap();
        assert_eq!(decoded.as_str(), Some("1234"));
    }

    #[test]
    fn test_bcd_odd_gains_leading_zero() {
        let packed = PackedBcd.encode(&FieldValue::from("123")).unwrap();
        assert_eq!(&packed[..], &[0x01, 0x23]);
        let decoded = PackedBcd.decode(&packed).unwrap();
        assert_eq!(decoded.as_str(), Some("0123"));
    }

    #[test]
    fn test_bcd_rejects_non_decimal_nibbles() {
        let err = PackedBcd.decode(&[0x1A]).unwrap_err();
        assert!(matches!(err, CodecError::InvalidValue(_)));
    }

    #[test]
    fn test_hex_class() {
        let encoded = HexString.encode(&FieldValue::from("00A1FF")).unwrap();
        assert_eq!(&encoded[..], b"00A1FF");
        let err = HexString.encode(&FieldValue::from("00G1")).unwrap_err();
        assert!(matches!(err, CodecError::InvalidValue(_)));
    }

    #[test]
    fn test_datetime_format() {
        let at = Utc.with_ymd_and_hms(2026, 1, 27, 9, 15, 30).unwrap();
        assert_eq!(DateTimeKind::YyMmDdHhMmSs.format(&at), "260127091530");
        assert_eq!(DateTimeKind::HhMmSs.format(&at), "091530");
        assert_eq!(DateTimeKind::MmDd.format(&at), "0127");
    }

    #[test]
    fn test_datetime_width() {
        assert_eq!(DateTimeKind::YyMmDdHhMmSs.width(), 12);
        assert_eq!(DateTimeKind::MmDdHhMmSs.width(), 10);
        assert_eq!(DateTimeKind::HhMmSs.width(), 6);
        assert_eq!(DateTimeKind::YyMm.width(), 4);
    }

    #[test]
    fn test_padding_constructors() {
        assert!(Padding::NONE.is_none());
        assert_eq!(Padding::left(b'0').side, PadSide::Left);
        assert_eq!(Padding::right(b' ').byte, b' ');
    }
}
