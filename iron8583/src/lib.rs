/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # iron8583
//!
//! A declarative ISO 8583 message codec engine for Rust.
//!
//! iron8583 turns a declarative description of a message family (MTIs,
//! optional header fields, and up to 128 numbered data fields, each with its
//! own encoding discipline) into a bidirectional parser/serializer whose
//! output is byte-exact against the ISO 8583 wire format.
//!
//! ## Features
//!
//! - **Declarative schemas**: declare a dialect once, share it everywhere
//! - **Composable codecs**: content classes (N, AN, ANS, B, BCD, Hex,
//!   datetime) combined with FIXED/LLVAR/LLLVAR length discipline
//! - **Bit-exact bitmaps**: binary or hex transcription, automatic
//!   secondary-bitmap handling
//! - **Typed errors**: every failure carries the failing section and byte
//!   offset
//!
//! ## Quick Start
//!
//! ```rust
//! use iron8583::prelude::*;
//! use std::sync::Arc;
//!
//! let mut dialect = Dialect::new("demo");
//! dialect.declare_mti(1100u16, "Authorization Request").unwrap();
//! dialect.declare_field(2, "PAN", &codecs::llvar_n(19), FieldOptions::new());
//! dialect.declare_field(3, "Processing Code", &codecs::n(6), FieldOptions::new());
//! let dialect = Arc::new(dialect);
//!
//! let mut message = Message::with_mti(Arc::clone(&dialect), 1100u16).unwrap();
//! message.set(2, "474747474747").unwrap();
//! message.set(3, "000000").unwrap();
//!
//! let wire = message.to_bytes().unwrap();
//! let parsed = Message::parse(&dialect, &wire).unwrap();
//! assert_eq!(parsed.get(2).unwrap().and_then(FieldValue::as_str), Some("474747474747"));
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`]: Fundamental types, the layout view, and error definitions
//! - [`codec`]: Field codec primitives and the presence bitmap
//! - [`dictionary`]: Dialect schema registry
//! - [`engine`]: Message assembly and disassembly

pub mod core {
    //! Fundamental types, the layout view, and error definitions.
    pub use iron8583_core::*;
}

pub mod codec {
    //! Field codec primitives and the presence bitmap.
    pub use iron8583_codec::*;
}

pub mod dictionary {
    //! Dialect schema registry.
    pub use iron8583_dictionary::*;
}

pub mod engine {
    //! Message assembly and disassembly.
    pub use iron8583_engine::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    // Core types
    pub use iron8583_core::{
        CodecError, FieldKey, FieldNumber, FieldValue, IsoError, Layout, MessageError, Mti,
        MtiRef, Result, SchemaError, Section,
    };

    // Codec primitives
    pub use iron8583_codec::{
        codecs, Bitmap, BitmapMode, ContentCodec, DateTimeKind, FieldCodec, FieldOptions,
        LengthRule, OptionValue, Padding,
    };

    // Dictionary
    pub use iron8583_dictionary::{Dialect, FieldDef, HeaderDef};

    // Engine
    pub use iron8583_engine::Message;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use std::sync::Arc;

    /// An authorization-style dialect shared by the scenario tests.
    fn scenario_dialect() -> Arc<Dialect> {
        let mut dialect = Dialect::new("ISO 8583:1993");
        dialect.declare_mti_codec(&codecs::n(4), FieldOptions::new());
        dialect.declare_mti(1100u16, "Authorization Request").unwrap();
        dialect.declare_mti(1110u16, "Authorization Response").unwrap();
        dialect.declare_mti(1804u16, "Network Management Request").unwrap();
        dialect.declare_field(
            2,
            "Primary Account Number",
            &codecs::llvar_n(19),
            FieldOptions::new(),
        );
        dialect.declare_field(3, "Processing Code", &codecs::n(6), FieldOptions::new());
        dialect.declare_field(
            4,
            "Amount, Transaction",
            &codecs::n(12),
            FieldOptions::new(),
        );
        dialect.declare_field(7, "Transmission Date and Time", &codecs::mmddhhmmss(), FieldOptions::new());
        dialect.declare_field(
            70,
            "Network Management Information Code",
            &codecs::n(3),
            FieldOptions::new(),
        );
        dialect.declare_alias("pan", 2).unwrap();
        Arc::new(dialect)
    }

    fn header_dialect() -> Arc<Dialect> {
        let mut dialect = Dialect::new("acquirer");
        dialect.declare_mti(1100u16, "Authorization Request").unwrap();
        dialect.declare_field(3, "Processing Code", &codecs::n(6), FieldOptions::new());
        dialect.declare_header("h0", "Product Indicator", &codecs::an(3), FieldOptions::new());
        dialect.declare_header("h1", "Release Number", &codecs::n(2), FieldOptions::new());
        dialect.declare_header("h2", "Status", &codecs::n(2), FieldOptions::new());
        dialect.declare_header("h3", "Originator Code", &codecs::an(3), FieldOptions::new());
        dialect.declare_header("h4", "Responder Code", &codecs::an(1), FieldOptions::new());
        dialect.declare_header("h5", "Reserved", &codecs::n(1), FieldOptions::new());
        Arc::new(dialect)
    }

    // E1: serialize MTI + bitmap(2,3) + LLVAR PAN + fixed processing code.
    #[test]
    fn test_scenario_serialize_authorization() {
        let dialect = scenario_dialect();
        let mut message = Message::with_mti(dialect, 1100u16).unwrap();
        message.set(2, "474747474747").unwrap();
        message.set(3, "000000").unwrap();

        let wire = message.to_bytes().unwrap();
        let mut expected = Vec::new();
        expected.extend_from_slice(b"1100");
        expected.extend_from_slice(&0x6000000000000000u64.to_be_bytes());
        expected.extend_from_slice(b"12474747474747");
        expected.extend_from_slice(b"000000");
        assert_eq!(&wire[..], expected.as_slice());
    }

    // E2: parsing E1's bytes reconstructs the message exactly.
    #[test]
    fn test_scenario_parse_authorization() {
        let dialect = scenario_dialect();
        let mut original = Message::with_mti(Arc::clone(&dialect), 1100u16).unwrap();
        original.set(2, "474747474747").unwrap();
        original.set(3, "000000").unwrap();

        let parsed = Message::parse(&dialect, &original.to_bytes().unwrap()).unwrap();
        assert_eq!(parsed.mti(), Some(Mti::new(1100)));
        assert_eq!(
            parsed.get(2).unwrap().and_then(FieldValue::as_str),
            Some("474747474747")
        );
        assert_eq!(
            parsed.get(3).unwrap().and_then(FieldValue::as_str),
            Some("000000")
        );
        assert_eq!(parsed.field_count(), 2);
    }

    // E3: a field above 64 forces the 16-byte (or 32-hex-char) bitmap.
    #[test]
    fn test_scenario_secondary_bitmap() {
        let dialect = scenario_dialect();
        let mut message = Message::with_mti(Arc::clone(&dialect), 1804u16).unwrap();
        message.set(70, "301").unwrap();

        let binary = message.to_bytes().unwrap();
        assert_eq!(binary.len(), 4 + 16 + 3);
        assert_eq!(binary[4] & 0x80, 0x80);

        let hex_layout = Layout::new().with_hex_bitmap(true);
        let hex = message.to_bytes_with(&hex_layout).unwrap();
        assert_eq!(hex.len(), 4 + 32 + 3);
    }

    // E4: hex transcription of bits 2 and 4.
    #[test]
    fn test_scenario_hex_bitmap_transcription() {
        let dialect = scenario_dialect();
        let layout = Layout::new().with_hex_bitmap(true);
        let mut message = Message::with_mti(Arc::clone(&dialect), 1100u16).unwrap();
        message.set(2, "42").unwrap();
        message.set(4, "000000001000").unwrap();

        let wire = message.to_bytes_with(&layout).unwrap();
        assert_eq!(&wire[4..20], b"5000000000000000");

        let parsed = Message::parse_with(&dialect, &wire, &layout).unwrap();
        assert_eq!(
            parsed.get(4).unwrap().and_then(FieldValue::as_str),
            Some("000000001000")
        );
    }

    // E5: truncation mid-LLVAR fails with Truncated and yields no instance.
    #[test]
    fn test_scenario_truncated_llvar() {
        let dialect = scenario_dialect();
        let mut message = Message::with_mti(Arc::clone(&dialect), 1100u16).unwrap();
        message.set(2, "474747474747").unwrap();
        let wire = message.to_bytes().unwrap();

        let err = Message::parse(&dialect, &wire[..wire.len() - 4]).unwrap_err();
        assert!(matches!(
            err,
            MessageError::Codec {
                source: CodecError::Truncated { .. },
                ..
            }
        ));
    }

    // E6: assignment of an unregistered MTI code.
    #[test]
    fn test_scenario_unknown_mti() {
        let dialect = scenario_dialect();
        let mut message = Message::new(Arc::clone(&dialect));
        let err = message.set_mti(9999u16).unwrap_err();
        assert_eq!(
            err,
            MessageError::UnknownMti {
                value: "9999".to_string()
            }
        );
    }

    // E7: six fixed header fields serialize to exactly 12 bytes and parse back.
    #[test]
    fn test_scenario_header_section() {
        let dialect = header_dialect();
        let layout = Layout::new().with_header(true);
        let mut message = Message::with_mti(Arc::clone(&dialect), 1100u16).unwrap();
        message.set("h0", "POS").unwrap();
        message.set("h1", "01").unwrap();
        message.set("h2", "00").unwrap();
        message.set("h3", "ACQ").unwrap();
        message.set("h4", "R").unwrap();
        message.set("h5", "0").unwrap();
        message.set(3, "003000").unwrap();

        let wire = message.to_bytes_with(&layout).unwrap();
        // MTI (4) + header (3+2+2+3+1+1 = 12) + bitmap (8) + field 3 (6).
        assert_eq!(wire.len(), 4 + 12 + 8 + 6);
        assert_eq!(&wire[4..16], b"POS0100ACQR0");

        let parsed = Message::parse_with(&dialect, &wire, &layout).unwrap();
        for (key, expected) in [
            ("h0", "POS"),
            ("h1", "01"),
            ("h2", "00"),
            ("h3", "ACQ"),
            ("h4", "R"),
            ("h5", "0"),
        ] {
            assert_eq!(
                parsed.get(key).unwrap().and_then(FieldValue::as_str),
                Some(expected),
                "header {key}"
            );
        }
    }

    // Property 2: repeated serialization is byte-identical.
    #[test]
    fn test_property_determinism() {
        let dialect = scenario_dialect();
        let mut message = Message::with_mti(dialect, 1100u16).unwrap();
        message.set(2, "474747474747").unwrap();
        message.set(4, "000000012345").unwrap();
        message.set(7, "0127091530").unwrap();

        assert_eq!(message.to_bytes().unwrap(), message.to_bytes().unwrap());
    }

    // Property 3: the parsed bitmap equals the present-field set, and bit 1
    // is set iff any field above 64 is present.
    #[test]
    fn test_property_bitmap_matches_fields() {
        let dialect = scenario_dialect();
        let mut message = Message::with_mti(Arc::clone(&dialect), 1100u16).unwrap();
        message.set(2, "42").unwrap();
        message.set(7, "0127091530").unwrap();

        let bitmap = message.bitmap();
        let from_fields: Vec<u8> = message.fields().map(|(n, _)| n.value()).collect();
        let from_bitmap: Vec<u8> = bitmap.iter().map(FieldNumber::value).collect();
        assert_eq!(from_fields, from_bitmap);
        assert!(!bitmap.has_secondary_fields());

        message.set(70, "301").unwrap();
        assert!(message.bitmap().has_secondary_fields());
        let wire = message.to_bytes().unwrap();
        assert_eq!(wire[4] & 0x80, 0x80);
    }

    // Round trip across every content class and both length disciplines.
    #[test]
    fn test_property_round_trip_mixed_classes() {
        let mut dialect = Dialect::new("mixed");
        dialect.declare_mti(800u16, "Echo").unwrap();
        dialect.declare_field(2, "N fixed", &codecs::n(6), FieldOptions::new());
        dialect.declare_field(3, "AN fixed", &codecs::an(4), FieldOptions::new());
        dialect.declare_field(4, "ANS var", &codecs::lllvar_ans(120), FieldOptions::new());
        dialect.declare_field(5, "Binary", &codecs::b(4), FieldOptions::new());
        dialect.declare_field(6, "BCD", &codecs::bcd(3), FieldOptions::new());
        dialect.declare_field(7, "Hex", &codecs::hex(6), FieldOptions::new());
        dialect.declare_field(8, "Binary var", &codecs::llvar_b(20), FieldOptions::new());
        let dialect = Arc::new(dialect);

        let mut message = Message::with_mti(Arc::clone(&dialect), 800u16).unwrap();
        message.set(2, "123456").unwrap();
        message.set(3, "AB12").unwrap();
        message.set(4, "ID=77;RC=00").unwrap();
        message.set(5, vec![0xDE, 0xAD, 0xBE, 0xEF]).unwrap();
        message.set(6, "123456").unwrap();
        message.set(7, "00A1FF").unwrap();
        message.set(8, vec![0x01, 0x02, 0x03]).unwrap();

        let wire = message.to_bytes().unwrap();
        let parsed = Message::parse(&dialect, &wire).unwrap();
        for number in [2u8, 3, 4, 5, 6, 7, 8] {
            assert_eq!(
                parsed.get(number).unwrap(),
                message.get(number).unwrap(),
                "field {number}"
            );
        }
    }

    // Padding removal on parse strips left zeros from N and right spaces
    // from AN fields.
    #[test]
    fn test_padding_removed_when_layout_asks() {
        let mut dialect = Dialect::new("stripping");
        dialect.declare_mti(800u16, "Echo").unwrap();
        dialect.declare_field(2, "N fixed", &codecs::n(8), FieldOptions::new());
        dialect.declare_field(3, "AN fixed", &codecs::an(6), FieldOptions::new());
        let dialect = Arc::new(dialect);

        let mut message = Message::with_mti(Arc::clone(&dialect), 800u16).unwrap();
        message.set(2, "42").unwrap();
        message.set(3, "AB").unwrap();
        let wire = message.to_bytes().unwrap();

        let strict = Message::parse(&dialect, &wire).unwrap();
        assert_eq!(
            strict.get(2).unwrap().and_then(FieldValue::as_str),
            Some("00000042")
        );

        let layout = Layout::new().with_remove_padding(true);
        let relaxed = Message::parse_with(&dialect, &wire, &layout).unwrap();
        assert_eq!(
            relaxed.get(2).unwrap().and_then(FieldValue::as_str),
            Some("42")
        );
        assert_eq!(
            relaxed.get(3).unwrap().and_then(FieldValue::as_str),
            Some("AB")
        );
    }

    // Reordered sections serialize and parse symmetrically.
    #[test]
    fn test_reordered_layout_round_trip() {
        let dialect = header_dialect();
        let layout = Layout::new().with_header(true).with_positions(2, 0, 1);
        let mut message = Message::with_mti(Arc::clone(&dialect), 1100u16).unwrap();
        message.set("h0", "POS").unwrap();
        message.set(3, "003000").unwrap();

        let wire = message.to_bytes_with(&layout).unwrap();
        // Header first, then bitmap+data, MTI last.
        assert_eq!(&wire[..3], b"POS");
        assert_eq!(&wire[wire.len() - 4..], b"1100");

        let parsed = Message::parse_with(&dialect, &wire, &layout).unwrap();
        assert_eq!(parsed.mti(), Some(Mti::new(1100)));
        assert_eq!(
            parsed.get(3).unwrap().and_then(FieldValue::as_str),
            Some("003000")
        );
    }

    #[test]
    fn test_prelude_imports() {
        let _mti = Mti::new(1100);
        let _layout = Layout::default();
        let _bitmap = Bitmap::new();
        let _options = FieldOptions::new();
    }
}
