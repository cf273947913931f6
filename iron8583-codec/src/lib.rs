/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # iron8583 Codec
//!
//! Field codec primitives and bitmap handling for the iron8583 engine.
//!
//! This crate provides:
//! - **Content classes**: N, AN, ANS, B, BCD, Hex, and datetime codecs
//!   behind the [`ContentCodec`] trait
//! - **Length discipline**: [`FieldCodec`] wraps a content class as FIXED,
//!   LLVAR, or LLLVAR with independent padding
//! - **Bitmap**: the presence [`Bitmap`] with binary and hex wire forms
//! - **Options**: declaration-time [`FieldOptions`] with diagnostic-sink
//!   reporting of unknown keys
//!
//! ## Composition
//!
//! The content class and the length discipline vary independently, so the
//! crate composes them instead of enumerating the cross-product; the
//! [`codecs`] module exposes the usual named combinations.

pub mod bitmap;
pub mod codecs;
pub mod content;
pub mod field;
pub mod options;

pub use bitmap::{Bitmap, BitmapMode, Bits};
pub use content::{
    AlphaNum, AlphaNumSpecial, ContentCodec, DateTimeKind, DateTimeNumeric, HexString, Numeric,
    PackedBcd, PadSide, Padding, RawBinary,
};
pub use field::{FieldCodec, LengthRule, PrefixWidth};
pub use options::{FieldOptions, OptionValue};
