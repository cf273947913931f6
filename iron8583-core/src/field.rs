/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Field identity and value types for ISO 8583 messages.
//!
//! This module provides:
//! - [`FieldNumber`]: Type-safe wrapper for bitmap field numbers
//! - [`FieldKey`]: Number-or-name key used for message set/get lookups
//! - [`FieldValue`]: Enumeration of possible field value representations

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO 8583 data field number.
///
/// Data fields occupy numbers 2 through 128. Number 1 is the structural
/// secondary-bitmap marker and never carries data; numbers 2..=64 are
/// selected by the primary bitmap and 65..=128 by the secondary bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct FieldNumber(u8);

impl FieldNumber {
    /// Creates a new field number.
    ///
    /// # Arguments
    /// * `number` - The field number (1-128; 1 is the bitmap marker)
    #[inline]
    #[must_use]
    pub const fn new(number: u8) -> Self {
        Self(number)
    }

    /// Returns the raw field number.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns true if this is the secondary-bitmap marker (bit 1).
    #[inline]
    #[must_use]
    pub const fn is_bitmap_marker(self) -> bool {
        self.0 == 1
    }

    /// Returns true if this number is selected by the primary bitmap (2-64).
    #[inline]
    #[must_use]
    pub const fn is_primary(self) -> bool {
        self.0 >= 2 && self.0 <= 64
    }

    /// Returns true if this number requires the secondary bitmap (65-128).
    #[inline]
    #[must_use]
    pub const fn needs_secondary(self) -> bool {
        self.0 >= 65 && self.0 <= 128
    }

    /// Returns true if this number may carry data (2-128).
    #[inline]
    #[must_use]
    pub const fn is_data(self) -> bool {
        self.0 >= 2 && self.0 <= 128
    }
}

impl From<u8> for FieldNumber {
    fn from(number: u8) -> Self {
        Self(number)
    }
}

impl From<FieldNumber> for u8 {
    fn from(number: FieldNumber) -> Self {
        number.0
    }
}

impl fmt::Display for FieldNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lookup key for message set/get operations.
///
/// A key is either a data-field number or a symbolic name. Names resolve
/// first through the dialect's alias table (to a data field), then through
/// the header-field definitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKey {
    /// Data field addressed by number.
    Number(FieldNumber),
    /// Alias or header field addressed by name.
    Name(String),
}

impl From<u8> for FieldKey {
    fn from(number: u8) -> Self {
        Self::Number(FieldNumber::new(number))
    }
}

impl From<FieldNumber> for FieldKey {
    fn from(number: FieldNumber) -> Self {
        Self::Number(number)
    }
}

impl From<&str> for FieldKey {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for FieldKey {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Name(s) => write!(f, "{s}"),
        }
    }
}

/// A field value as held by a message instance.
///
/// Textual classes (N, AN, ANS, Hex, BCD digit strings, datetimes) use
/// [`FieldValue::Text`]; raw binary fields use [`FieldValue::Binary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Textual value (digit strings, alphanumerics, hex characters).
    Text(String),
    /// Raw byte value.
    Binary(Bytes),
}

impl FieldValue {
    /// Returns an empty textual value.
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self::Text(String::new())
    }

    /// Returns the value as a string slice, if it is textual.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Binary(_) => None,
        }
    }

    /// Returns the underlying bytes of the value.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(s) => s.as_bytes(),
            Self::Binary(b) => b,
        }
    }

    /// Returns the value length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Returns true if the value is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Bytes> for FieldValue {
    fn from(b: Bytes) -> Self {
        Self::Binary(b)
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(b: Vec<u8>) -> Self {
        Self::Binary(Bytes::from(b))
    }
}

impl From<&[u8]> for FieldValue {
    fn from(b: &[u8]) -> Self {
        Self::Binary(Bytes::copy_from_slice(b))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Binary(b) => {
                for byte in b.iter() {
                    write!(f, "{byte:02X}")?;
                }
                Ok(())
            }
        }
    }
}
