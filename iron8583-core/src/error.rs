/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Error types for the iron8583 ISO 8583 engine.
//!
//! This module provides a unified error hierarchy using `thiserror` for typed,
//! domain-specific errors across all iron8583 operations.

use thiserror::Error;

/// Result type alias using [`IsoError`] as the error type.
pub type Result<T> = std::result::Result<T, IsoError>;

/// Top-level error type for all iron8583 operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IsoError {
    /// Error in a field-level codec primitive.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Error during message assembly or disassembly.
    #[error("message error: {0}")]
    Message(#[from] MessageError),

    /// Error at dialect declaration time.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
}

/// Errors raised by field-level encoding and decoding primitives.
///
/// Codec errors carry no field identity; the message engine wraps them in
/// [`MessageError::Codec`] together with the section label and byte offset.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Value violates the codec's content class.
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// Value is longer than the declared length bound.
    #[error("value is {length} bytes, exceeds maximum {max}")]
    LengthOverflow {
        /// Actual encoded length of the value.
        length: usize,
        /// Maximum length allowed by the codec.
        max: usize,
    },

    /// Value is shorter than a fixed length and no padding rule applies.
    #[error("value is {length} bytes, below declared length {expected}")]
    LengthUnderflow {
        /// Actual encoded length of the value.
        length: usize,
        /// Fixed length declared for the field.
        expected: usize,
    },

    /// Input ended before the field was fully consumed.
    #[error("truncated input: need {needed} bytes, have {available}")]
    Truncated {
        /// Bytes required to finish the field.
        needed: usize,
        /// Bytes actually available.
        available: usize,
    },
}

/// Errors raised while assembling or disassembling a message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessageError {
    /// Set/get against a key with no definition in the dialect.
    #[error("no definition for field {key}")]
    UnknownField {
        /// The key that failed to resolve.
        key: String,
    },

    /// MTI assignment or parse hit a code or name outside the registry.
    #[error("unknown message type {value}")]
    UnknownMti {
        /// The offending code or name.
        value: String,
    },

    /// Serialization requested with no MTI set.
    #[error("message type not set")]
    MissingMti,

    /// Parse consumed every section but bytes remained.
    #[error("{remaining} trailing bytes after message end")]
    TrailingData {
        /// Number of unconsumed bytes.
        remaining: usize,
    },

    /// A codec primitive failed; carries the section label and byte offset.
    #[error("{section} at byte {offset}: {source}")]
    Codec {
        /// Section or field label, e.g. `mti` or `field 2 (PAN)`.
        section: String,
        /// Byte offset where the failure occurred.
        offset: usize,
        /// The underlying codec failure.
        #[source]
        source: CodecError,
    },
}

/// Errors raised while declaring a dialect.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Duplicate MTI code or name at declaration time.
    #[error("duplicate declaration: {what}")]
    Conflict {
        /// Description of the colliding declaration.
        what: String,
    },

    /// An alias was bound to a field number with no definition.
    #[error("no field definition for number {number}")]
    UnknownFieldNumber {
        /// The unresolved field number.
        number: u8,
    },
}
