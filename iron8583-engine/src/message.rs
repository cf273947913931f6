/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Message assembly and disassembly.
//!
//! A [`Message`] is an ephemeral instance bound to one shared
//! [`Dialect`]: it holds the current MTI and the header and data values,
//! and drives serialization ([`to_bytes`](Message::to_bytes)) and parsing
//! ([`parse`](Message::parse)) through the dialect's codecs in the order
//! given by the [`Layout`] view.
//!
//! Definitions stay in the dialect; the instance owns only its value maps,
//! so construction and teardown are cheap and instances of one family can
//! coexist freely.

use bytes::{BufMut, Bytes, BytesMut};
use iron8583_codec::{Bitmap, BitmapMode};
use iron8583_core::error::MessageError;
use iron8583_core::field::{FieldKey, FieldNumber, FieldValue};
use iron8583_core::layout::{Layout, Section};
use iron8583_core::mti::{Mti, MtiRef};
use iron8583_dictionary::{Dialect, Resolved};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// One ISO 8583 message instance.
#[derive(Debug, Clone)]
pub struct Message {
    dialect: Arc<Dialect>,
    mti: Option<Mti>,
    fields: BTreeMap<FieldNumber, FieldValue>,
    header: BTreeMap<String, FieldValue>,
}

impl Message {
    /// Creates an empty message bound to a dialect.
    #[must_use]
    pub fn new(dialect: Arc<Dialect>) -> Self {
        Self {
            dialect,
            mti: None,
            fields: BTreeMap::new(),
            header: BTreeMap::new(),
        }
    }

    /// Creates a message with the MTI already assigned.
    ///
    /// # Errors
    /// Returns `MessageError::UnknownMti` if the code or name is not
    /// registered with the dialect.
    pub fn with_mti(dialect: Arc<Dialect>, mti: impl Into<MtiRef>) -> Result<Self, MessageError> {
        let mut message = Self::new(dialect);
        message.set_mti(mti)?;
        Ok(message)
    }

    /// Returns the dialect this message is bound to.
    #[inline]
    #[must_use]
    pub fn dialect(&self) -> &Arc<Dialect> {
        &self.dialect
    }

    /// Returns the current MTI, if assigned.
    #[inline]
    #[must_use]
    pub const fn mti(&self) -> Option<Mti> {
        self.mti
    }

    /// Returns the registered name of the current MTI.
    #[must_use]
    pub fn mti_name(&self) -> Option<&str> {
        self.mti.and_then(|mti| self.dialect.mti_name(mti))
    }

    /// Assigns the MTI by numeric code or registered name.
    ///
    /// The stored form is always the numeric code.
    ///
    /// # Errors
    /// Returns `MessageError::UnknownMti` for an unregistered code or name.
    pub fn set_mti(&mut self, mti: impl Into<MtiRef>) -> Result<(), MessageError> {
        let code = match mti.into() {
            MtiRef::Code(code) => {
                if !self.dialect.is_known_mti(code) {
                    return Err(MessageError::UnknownMti {
                        value: code.to_string(),
                    });
                }
                code
            }
            MtiRef::Name(name) => {
                self.dialect
                    .mti_code(&name)
                    .ok_or(MessageError::UnknownMti { value: name })?
            }
        };
        self.mti = Some(code);
        Ok(())
    }

    /// Stores a value under a data-field number, alias, or header key.
    ///
    /// # Errors
    /// Returns `MessageError::UnknownField` if the dialect has no
    /// definition for the key.
    pub fn set(
        &mut self,
        key: impl Into<FieldKey>,
        value: impl Into<FieldValue>,
    ) -> Result<(), MessageError> {
        let key = key.into();
        match self.dialect.resolve(&key) {
            Some(Resolved::Data(def)) => {
                self.fields.insert(def.number, value.into());
                Ok(())
            }
            Some(Resolved::Header(def)) => {
                self.header.insert(def.key.clone(), value.into());
                Ok(())
            }
            None => Err(MessageError::UnknownField {
                key: key.to_string(),
            }),
        }
    }

    /// Removes the value stored under a key, if any.
    ///
    /// # Errors
    /// Returns `MessageError::UnknownField` if the dialect has no
    /// definition for the key.
    pub fn unset(&mut self, key: impl Into<FieldKey>) -> Result<(), MessageError> {
        let key = key.into();
        match self.dialect.resolve(&key) {
            Some(Resolved::Data(def)) => {
                self.fields.remove(&def.number);
                Ok(())
            }
            Some(Resolved::Header(def)) => {
                self.header.remove(&def.key);
                Ok(())
            }
            None => Err(MessageError::UnknownField {
                key: key.to_string(),
            }),
        }
    }

    /// Returns the value stored under a key, or `None` if unset.
    ///
    /// # Errors
    /// Returns `MessageError::UnknownField` if the dialect has no
    /// definition for the key.
    pub fn get(&self, key: impl Into<FieldKey>) -> Result<Option<&FieldValue>, MessageError> {
        let key = key.into();
        match self.dialect.resolve(&key) {
            Some(Resolved::Data(def)) => Ok(self.fields.get(&def.number)),
            Some(Resolved::Header(def)) => Ok(self.header.get(&def.key)),
            None => Err(MessageError::UnknownField {
                key: key.to_string(),
            }),
        }
    }

    /// Iterates the present data fields in ascending number order.
    pub fn fields(&self) -> impl Iterator<Item = (FieldNumber, &FieldValue)> {
        self.fields.iter().map(|(&number, value)| (number, value))
    }

    /// Number of present data fields.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Returns the bitmap implied by the present data fields.
    #[must_use]
    pub fn bitmap(&self) -> Bitmap {
        let mut bitmap = Bitmap::new();
        for &number in self.fields.keys() {
            bitmap.set(number.value());
        }
        bitmap
    }

    /// Serializes the message using the dialect's default layout.
    ///
    /// # Errors
    /// Returns `MessageError::MissingMti` if no MTI is set, or a wrapped
    /// codec failure.
    pub fn to_bytes(&self) -> Result<Bytes, MessageError> {
        let layout = *self.dialect.layout();
        self.to_bytes_with(&layout)
    }

    /// Serializes the message using an explicit layout snapshot.
    ///
    /// # Errors
    /// Returns `MessageError::MissingMti` if no MTI is set, or a wrapped
    /// codec failure.
    pub fn to_bytes_with(&self, layout: &Layout) -> Result<Bytes, MessageError> {
        let mti = self.mti.ok_or(MessageError::MissingMti)?;
        let mut out = BytesMut::with_capacity(256);
        for section in layout.sections() {
            match section {
                Section::Mti => self.encode_mti(mti, &mut out)?,
                Section::Header => self.encode_header(&mut out)?,
                Section::BitmapAndData => self.encode_bitmap_and_data(layout, &mut out)?,
            }
        }
        Ok(out.freeze())
    }

    fn encode_mti(&self, mti: Mti, out: &mut BytesMut) -> Result<(), MessageError> {
        let offset = out.len();
        let value = FieldValue::Text(mti.to_string());
        self.dialect
            .mti_codec()
            .encode(&value, out)
            .map_err(|source| MessageError::Codec {
                section: "mti".to_string(),
                offset,
                source,
            })
    }

    fn encode_header(&self, out: &mut BytesMut) -> Result<(), MessageError> {
        for def in self.dialect.header_fields() {
            let offset = out.len();
            // Unset header fields encode as the padded empty value, keeping
            // the header section's byte length deterministic.
            let empty = FieldValue::empty();
            let value = self.header.get(&def.key).unwrap_or(&empty);
            def.codec
                .encode(value, out)
                .map_err(|source| MessageError::Codec {
                    section: def.label(),
                    offset,
                    source,
                })?;
        }
        Ok(())
    }

    fn encode_bitmap_and_data(
        &self,
        layout: &Layout,
        out: &mut BytesMut,
    ) -> Result<(), MessageError> {
        let bitmap = self.bitmap();
        out.put_slice(&bitmap.to_wire(bitmap_mode(layout)));
        for (&number, value) in &self.fields {
            let def = self
                .dialect
                .field(number)
                .ok_or_else(|| MessageError::UnknownField {
                    key: number.to_string(),
                })?;
            let offset = out.len();
            def.codec
                .encode(value, out)
                .map_err(|source| MessageError::Codec {
                    section: def.label(),
                    offset,
                    source,
                })?;
        }
        Ok(())
    }

    /// Parses a message using the dialect's default layout.
    ///
    /// # Errors
    /// Returns the first section failure; no instance is produced unless
    /// every section succeeds and the input is fully consumed.
    pub fn parse(dialect: &Arc<Dialect>, input: &[u8]) -> Result<Self, MessageError> {
        let layout = *dialect.layout();
        Self::parse_with(dialect, input, &layout)
    }

    /// Parses a message using an explicit layout snapshot.
    ///
    /// # Errors
    /// Returns the first section failure; trailing bytes after the last
    /// section produce `MessageError::TrailingData`.
    pub fn parse_with(
        dialect: &Arc<Dialect>,
        input: &[u8],
        layout: &Layout,
    ) -> Result<Self, MessageError> {
        let mut message = Self::new(Arc::clone(dialect));
        let total = input.len();
        let mut rest = input;
        for section in layout.sections() {
            rest = match section {
                Section::Mti => message.parse_mti(rest, total)?,
                Section::Header => message.parse_header(rest, total, layout)?,
                Section::BitmapAndData => message.parse_bitmap_and_data(rest, total, layout)?,
            };
        }
        if !rest.is_empty() {
            return Err(MessageError::TrailingData {
                remaining: rest.len(),
            });
        }
        Ok(message)
    }

    fn parse_mti<'a>(&mut self, input: &'a [u8], total: usize) -> Result<&'a [u8], MessageError> {
        let offset = total - input.len();
        let (value, rest) = self
            .dialect
            .mti_codec()
            .parse(input, false)
            .map_err(|source| MessageError::Codec {
                section: "mti".to_string(),
                offset,
                source,
            })?;
        let mti = value
            .as_str()
            .and_then(Mti::from_digits)
            .ok_or_else(|| MessageError::UnknownMti {
                value: value.to_string(),
            })?;
        if !self.dialect.is_known_mti(mti) {
            return Err(MessageError::UnknownMti {
                value: mti.to_string(),
            });
        }
        trace!(mti = %mti, "parsed message type");
        self.mti = Some(mti);
        Ok(rest)
    }

    fn parse_header<'a>(
        &mut self,
        mut input: &'a [u8],
        total: usize,
        layout: &Layout,
    ) -> Result<&'a [u8], MessageError> {
        for def in self.dialect.header_fields() {
            let offset = total - input.len();
            let (value, rest) = def
                .codec
                .parse(input, layout.remove_padding_on_parse)
                .map_err(|source| MessageError::Codec {
                    section: def.label(),
                    offset,
                    source,
                })?;
            self.header.insert(def.key.clone(), value);
            input = rest;
        }
        trace!(fields = self.header.len(), "parsed header section");
        Ok(input)
    }

    fn parse_bitmap_and_data<'a>(
        &mut self,
        input: &'a [u8],
        total: usize,
        layout: &Layout,
    ) -> Result<&'a [u8], MessageError> {
        let offset = total - input.len();
        let (bitmap, mut rest) =
            Bitmap::parse(input, bitmap_mode(layout)).map_err(|source| MessageError::Codec {
                section: "bitmap".to_string(),
                offset,
                source,
            })?;
        for number in bitmap.iter() {
            let def = self
                .dialect
                .field(number)
                .ok_or_else(|| MessageError::UnknownField {
                    key: number.to_string(),
                })?;
            let offset = total - rest.len();
            let (value, remaining) = def
                .codec
                .parse(rest, layout.remove_padding_on_parse)
                .map_err(|source| MessageError::Codec {
                    section: def.label(),
                    offset,
                    source,
                })?;
            self.fields.insert(number, value);
            rest = remaining;
        }
        trace!(fields = self.fields.len(), "parsed data section");
        Ok(rest)
    }

    /// Returns a printable, line-per-field rendering of the message.
    #[must_use]
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

const fn bitmap_mode(layout: &Layout) -> BitmapMode {
    if layout.use_hex_bitmap {
        BitmapMode::Hex
    } else {
        BitmapMode::Binary
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mti {
            Some(mti) => match self.dialect.mti_name(mti) {
                Some(name) => writeln!(f, "{} {} ({})", self.dialect.name(), mti, name)?,
                None => writeln!(f, "{} {}", self.dialect.name(), mti)?,
            },
            None => writeln!(f, "{} (no MTI)", self.dialect.name())?,
        }
        for def in self.dialect.header_fields() {
            if let Some(value) = self.header.get(&def.key) {
                writeln!(f, "  {:<4} {:<32} {}", def.key, def.name, value)?;
            }
        }
        for (number, value) in &self.fields {
            let name = self
                .dialect
                .field(*number)
                .map_or("?", |def| def.name.as_str());
            writeln!(f, "  {:>4} {:<32} {}", number, name, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iron8583_codec::codecs;
    use iron8583_codec::FieldOptions;

    fn auth_dialect() -> Arc<Dialect> {
        let mut dialect = Dialect::new("ISO 8583:1993");
        dialect.declare_mti(1100u16, "Authorization Request").unwrap();
        dialect.declare_mti(1110u16, "Authorization Response").unwrap();
        dialect.declare_field(
            2,
            "Primary Account Number",
            &codecs::llvar_n(19),
            FieldOptions::new(),
        );
        dialect.declare_field(3, "Processing Code", &codecs::n(6), FieldOptions::new());
        dialect.declare_field(44, "Additional Response Data", &codecs::llvar_ans(25), FieldOptions::new());
        dialect.declare_field(70, "Network Management Code", &codecs::n(3), FieldOptions::new());
        dialect.declare_alias("pan", 2).unwrap();
        Arc::new(dialect)
    }

    #[test]
    fn test_set_get_by_number_and_alias() {
        let dialect = auth_dialect();
        let mut message = Message::new(Arc::clone(&dialect));
        message.set(2, "474747474747").unwrap();
        assert_eq!(
            message.get("pan").unwrap().and_then(FieldValue::as_str),
            Some("474747474747")
        );
        message.set("pan", "4242").unwrap();
        assert_eq!(
            message.get(2).unwrap().and_then(FieldValue::as_str),
            Some("4242")
        );
    }

    #[test]
    fn test_set_unknown_field() {
        let dialect = auth_dialect();
        let mut message = Message::new(dialect);
        let err = message.set(99, "x").unwrap_err();
        assert_eq!(
            err,
            MessageError::UnknownField {
                key: "99".to_string()
            }
        );
        let err = message.get("nope").unwrap_err();
        assert!(matches!(err, MessageError::UnknownField { .. }));
    }

    #[test]
    fn test_unset_removes_value() {
        let dialect = auth_dialect();
        let mut message = Message::new(dialect);
        message.set(3, "000000").unwrap();
        message.unset(3).unwrap();
        assert_eq!(message.get(3).unwrap(), None);
        assert_eq!(message.field_count(), 0);
    }

    #[test]
    fn test_mti_by_code_and_name() {
        let dialect = auth_dialect();
        let mut message = Message::new(Arc::clone(&dialect));
        message.set_mti(1100u16).unwrap();
        assert_eq!(message.mti(), Some(Mti::new(1100)));

        message.set_mti("Authorization Response").unwrap();
        assert_eq!(message.mti(), Some(Mti::new(1110)));
        assert_eq!(message.mti_name(), Some("Authorization Response"));
    }

    #[test]
    fn test_unknown_mti_rejected() {
        let dialect = auth_dialect();
        let mut message = Message::new(dialect);
        let err = message.set_mti(9999u16).unwrap_err();
        assert_eq!(
            err,
            MessageError::UnknownMti {
                value: "9999".to_string()
            }
        );
        assert_eq!(message.mti(), None);
    }

    #[test]
    fn test_to_bytes_requires_mti() {
        let dialect = auth_dialect();
        let message = Message::new(dialect);
        assert_eq!(message.to_bytes().unwrap_err(), MessageError::MissingMti);
    }

    #[test]
    fn test_serialize_mti_bitmap_data() {
        let dialect = auth_dialect();
        let mut message = Message::with_mti(dialect, 1100u16).unwrap();
        message.set(2, "474747474747").unwrap();
        message.set(3, "000000").unwrap();

        let wire = message.to_bytes().unwrap();
        let mut expected = Vec::new();
        expected.extend_from_slice(b"1100");
        expected.extend_from_slice(&[0x60, 0, 0, 0, 0, 0, 0, 0]);
        expected.extend_from_slice(b"12474747474747");
        expected.extend_from_slice(b"000000");
        assert_eq!(&wire[..], expected.as_slice());
    }

    #[test]
    fn test_round_trip_preserves_values() {
        let dialect = auth_dialect();
        let mut message = Message::with_mti(Arc::clone(&dialect), 1100u16).unwrap();
        message.set(2, "474747474747").unwrap();
        message.set(3, "000000").unwrap();
        message.set(44, "APPROVED").unwrap();

        let wire = message.to_bytes().unwrap();
        let parsed = Message::parse(&dialect, &wire).unwrap();
        assert_eq!(parsed.mti(), Some(Mti::new(1100)));
        assert_eq!(
            parsed.get(2).unwrap().and_then(FieldValue::as_str),
            Some("474747474747")
        );
        assert_eq!(
            parsed.get(44).unwrap().and_then(FieldValue::as_str),
            Some("APPROVED")
        );
        assert_eq!(parsed.field_count(), 3);
    }

    #[test]
    fn test_secondary_bitmap_field() {
        let dialect = auth_dialect();
        let mut message = Message::with_mti(Arc::clone(&dialect), 1100u16).unwrap();
        message.set(70, "301").unwrap();

        let wire = message.to_bytes().unwrap();
        // MTI (4) + 16-byte bitmap + 3-byte field.
        assert_eq!(wire.len(), 4 + 16 + 3);
        assert_eq!(wire[4], 0x80);

        let parsed = Message::parse(&dialect, &wire).unwrap();
        assert_eq!(
            parsed.get(70).unwrap().and_then(FieldValue::as_str),
            Some("301")
        );
    }

    #[test]
    fn test_parse_trailing_data() {
        let dialect = auth_dialect();
        let mut message = Message::with_mti(Arc::clone(&dialect), 1100u16).unwrap();
        message.set(3, "000000").unwrap();
        let mut wire = message.to_bytes().unwrap().to_vec();
        wire.extend_from_slice(b"junk");

        let err = Message::parse(&dialect, &wire).unwrap_err();
        assert_eq!(err, MessageError::TrailingData { remaining: 4 });
    }

    #[test]
    fn test_parse_truncated_mid_field() {
        let dialect = auth_dialect();
        let mut message = Message::with_mti(Arc::clone(&dialect), 1100u16).unwrap();
        message.set(2, "474747474747").unwrap();
        let wire = message.to_bytes().unwrap();

        let err = Message::parse(&dialect, &wire[..wire.len() - 5]).unwrap_err();
        match err {
            MessageError::Codec {
                section, source, ..
            } => {
                assert_eq!(section, "field 2 (Primary Account Number)");
                assert!(matches!(
                    source,
                    iron8583_core::error::CodecError::Truncated { .. }
                ));
            }
            other => panic!("expected codec error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_unknown_mti() {
        let dialect = auth_dialect();
        // 1200 is well-formed but not registered.
        let mut wire = Vec::new();
        wire.extend_from_slice(b"1200");
        wire.extend_from_slice(&[0u8; 8]);
        let err = Message::parse(&dialect, &wire).unwrap_err();
        assert_eq!(
            err,
            MessageError::UnknownMti {
                value: "1200".to_string()
            }
        );
    }

    #[test]
    fn test_hex_bitmap_layout() {
        let dialect = auth_dialect();
        let layout = Layout::new().with_hex_bitmap(true);
        let mut message = Message::with_mti(Arc::clone(&dialect), 1100u16).unwrap();
        message.set(3, "101010").unwrap();

        let wire = message.to_bytes_with(&layout).unwrap();
        assert_eq!(&wire[4..20], b"2000000000000000");

        let parsed = Message::parse_with(&dialect, &wire, &layout).unwrap();
        assert_eq!(
            parsed.get(3).unwrap().and_then(FieldValue::as_str),
            Some("101010")
        );
    }

    #[test]
    fn test_describe_lists_fields() {
        let dialect = auth_dialect();
        let mut message = Message::with_mti(dialect, 1100u16).unwrap();
        message.set(2, "4242").unwrap();
        let text = message.describe();
        assert!(text.contains("1100"));
        assert!(text.contains("Authorization Request"));
        assert!(text.contains("Primary Account Number"));
        assert!(text.contains("4242"));
    }
}
