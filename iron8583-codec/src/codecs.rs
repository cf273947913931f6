/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Named codec prototypes.
//!
//! The standard ISO 8583 field vocabulary as ready-made [`FieldCodec`]
//! values. These are thin constructors over the content/length composition;
//! dialects clone and specialize them through declaration options.

use crate::content::{
    AlphaNum, AlphaNumSpecial, DateTimeKind, DateTimeNumeric, HexString, Numeric, PackedBcd,
    RawBinary,
};
use crate::field::FieldCodec;

/// Fixed-length numeric ASCII (class N), left zero padded.
#[must_use]
pub fn n(length: usize) -> FieldCodec {
    FieldCodec::fixed(Numeric, length)
}

/// Fixed-length alphanumeric (class AN), right space padded.
#[must_use]
pub fn an(length: usize) -> FieldCodec {
    FieldCodec::fixed(AlphaNum, length)
}

/// Fixed-length alphanumeric plus specials (class ANS), right space padded.
#[must_use]
pub fn ans(length: usize) -> FieldCodec {
    FieldCodec::fixed(AlphaNumSpecial, length)
}

/// Fixed-length raw binary (class B), no padding.
#[must_use]
pub fn b(length: usize) -> FieldCodec {
    FieldCodec::fixed(RawBinary, length)
}

/// Fixed-length packed BCD; `length` is the byte length on the wire.
#[must_use]
pub fn bcd(length: usize) -> FieldCodec {
    FieldCodec::fixed(PackedBcd, length)
}

/// Fixed-length hexadecimal ASCII.
#[must_use]
pub fn hex(length: usize) -> FieldCodec {
    FieldCodec::fixed(HexString, length)
}

/// LLVAR numeric with the given upper bound.
#[must_use]
pub fn llvar_n(max: usize) -> FieldCodec {
    FieldCodec::llvar(Numeric).with_max(max)
}

/// LLLVAR numeric with the given upper bound.
#[must_use]
pub fn lllvar_n(max: usize) -> FieldCodec {
    FieldCodec::lllvar(Numeric).with_max(max)
}

/// LLVAR alphanumeric with the given upper bound.
#[must_use]
pub fn llvar_an(max: usize) -> FieldCodec {
    FieldCodec::llvar(AlphaNum).with_max(max)
}

/// LLLVAR alphanumeric with the given upper bound.
#[must_use]
pub fn lllvar_an(max: usize) -> FieldCodec {
    FieldCodec::lllvar(AlphaNum).with_max(max)
}

/// LLVAR alphanumeric plus specials with the given upper bound.
#[must_use]
pub fn llvar_ans(max: usize) -> FieldCodec {
    FieldCodec::llvar(AlphaNumSpecial).with_max(max)
}

/// LLLVAR alphanumeric plus specials with the given upper bound.
#[must_use]
pub fn lllvar_ans(max: usize) -> FieldCodec {
    FieldCodec::lllvar(AlphaNumSpecial).with_max(max)
}

/// LLVAR raw binary with the given upper bound.
#[must_use]
pub fn llvar_b(max: usize) -> FieldCodec {
    FieldCodec::llvar(RawBinary).with_max(max)
}

/// LLLVAR raw binary with the given upper bound.
#[must_use]
pub fn lllvar_b(max: usize) -> FieldCodec {
    FieldCodec::lllvar(RawBinary).with_max(max)
}

/// `YYMMDDhhmmss` transmission datetime, 12 digits.
#[must_use]
pub fn yymmddhhmmss() -> FieldCodec {
    datetime(DateTimeKind::YyMmDdHhMmSs)
}

/// `MMDDhhmmss` transmission datetime, 10 digits.
#[must_use]
pub fn mmddhhmmss() -> FieldCodec {
    datetime(DateTimeKind::MmDdHhMmSs)
}

/// `hhmmss` local time, 6 digits.
#[must_use]
pub fn hhmmss() -> FieldCodec {
    datetime(DateTimeKind::HhMmSs)
}

/// `MMDD` local date, 4 digits.
#[must_use]
pub fn mmdd() -> FieldCodec {
    datetime(DateTimeKind::MmDd)
}

/// `YYMM` expiration date, 4 digits.
#[must_use]
pub fn yymm() -> FieldCodec {
    datetime(DateTimeKind::YyMm)
}

/// Fixed-width datetime codec of an arbitrary shape.
#[must_use]
pub fn datetime(kind: DateTimeKind) -> FieldCodec {
    FieldCodec::fixed(DateTimeNumeric::new(kind), kind.width())
}
