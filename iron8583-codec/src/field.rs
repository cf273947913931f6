/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Field codecs: length discipline layered over a content class.
//!
//! A [`FieldCodec`] pairs a shared [`ContentCodec`] with a [`LengthRule`]
//! (fixed, LLVAR, or LLLVAR) and a [`Padding`] rule. Cloning a codec is
//! cheap; the content codec is shared behind an `Arc`, so the schema can
//! hand out per-field copies without deep-copying anything.

use crate::content::{ContentCodec, PadSide, Padding};
use bytes::{BufMut, Bytes, BytesMut};
use iron8583_core::error::CodecError;
use iron8583_core::field::FieldValue;
use std::sync::Arc;

/// Width of the decimal-ASCII length prefix of a variable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixWidth {
    /// Two-digit prefix (LLVAR), values up to 99 bytes.
    Ll,
    /// Three-digit prefix (LLLVAR), values up to 999 bytes.
    Lll,
}

impl PrefixWidth {
    /// Number of prefix digits on the wire.
    #[inline]
    #[must_use]
    pub const fn digits(self) -> usize {
        match self {
            Self::Ll => 2,
            Self::Lll => 3,
        }
    }

    /// Largest value length the prefix can express.
    #[inline]
    #[must_use]
    pub const fn capacity(self) -> usize {
        match self {
            Self::Ll => 99,
            Self::Lll => 999,
        }
    }
}

/// Length discipline of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthRule {
    /// The encoded value occupies exactly `length` bytes.
    Fixed {
        /// Declared byte length on the wire.
        length: usize,
    },
    /// The encoded value is preceded by a decimal-ASCII length prefix.
    Variable {
        /// Prefix width (LL or LLL).
        prefix: PrefixWidth,
        /// Optional upper bound on the value byte length.
        max: Option<usize>,
    },
}

/// A complete field codec: content class plus length discipline.
#[derive(Debug, Clone)]
pub struct FieldCodec {
    pub(crate) content: Arc<dyn ContentCodec>,
    pub(crate) rule: LengthRule,
    pub(crate) padding: Padding,
}

impl FieldCodec {
    /// Creates a fixed-length codec over a content class.
    ///
    /// The content class's default padding rule applies; override it with
    /// [`with_padding`](Self::with_padding).
    ///
    /// # Arguments
    /// * `content` - The content class
    /// * `length` - Declared byte length on the wire
    #[must_use]
    pub fn fixed<C: ContentCodec + 'static>(content: C, length: usize) -> Self {
        let padding = content.padding();
        Self {
            content: Arc::new(content),
            rule: LengthRule::Fixed { length },
            padding,
        }
    }

    /// Creates an LLVAR codec (two-digit length prefix) over a content class.
    #[must_use]
    pub fn llvar<C: ContentCodec + 'static>(content: C) -> Self {
        Self {
            content: Arc::new(content),
            rule: LengthRule::Variable {
                prefix: PrefixWidth::Ll,
                max: None,
            },
            padding: Padding::NONE,
        }
    }

    /// Creates an LLLVAR codec (three-digit length prefix) over a content class.
    #[must_use]
    pub fn lllvar<C: ContentCodec + 'static>(content: C) -> Self {
        Self {
            content: Arc::new(content),
            rule: LengthRule::Variable {
                prefix: PrefixWidth::Lll,
                max: None,
            },
            padding: Padding::NONE,
        }
    }

    /// Sets the upper bound on the value byte length.
    ///
    /// A no-op for fixed-length codecs.
    #[must_use]
    pub fn with_max(mut self, max: usize) -> Self {
        if let LengthRule::Variable { prefix, .. } = self.rule {
            self.rule = LengthRule::Variable {
                prefix,
                max: Some(max),
            };
        }
        self
    }

    /// Overrides the padding rule.
    #[must_use]
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Returns the length rule.
    #[inline]
    #[must_use]
    pub const fn rule(&self) -> LengthRule {
        self.rule
    }

    /// Returns the padding rule.
    #[inline]
    #[must_use]
    pub const fn padding(&self) -> Padding {
        self.padding
    }

    /// Encodes a value into `out`.
    ///
    /// Fixed-length codecs pad (or reject) under-length values and reject
    /// over-length ones; variable-length codecs emit the decimal prefix
    /// followed by the value bytes.
    ///
    /// # Errors
    /// `InvalidValue` for content-class violations, `LengthOverflow` past
    /// the declared length, `max`, or the prefix capacity, and
    /// `LengthUnderflow` when no padding rule rescues a short fixed value.
    pub fn encode(&self, value: &FieldValue, out: &mut BytesMut) -> Result<(), CodecError> {
        let raw = self.content.encode(value)?;
        match self.rule {
            LengthRule::Fixed { length } => {
                if raw.len() > length {
                    return Err(CodecError::LengthOverflow {
                        length: raw.len(),
                        max: length,
                    });
                }
                let missing = length - raw.len();
                match self.padding.side {
                    _ if missing == 0 => out.put_slice(&raw),
                    PadSide::None => {
                        return Err(CodecError::LengthUnderflow {
                            length: raw.len(),
                            expected: length,
                        });
                    }
                    PadSide::Left => {
                        out.put_bytes(self.padding.byte, missing);
                        out.put_slice(&raw);
                    }
                    PadSide::Right => {
                        out.put_slice(&raw);
                        out.put_bytes(self.padding.byte, missing);
                    }
                }
            }
            LengthRule::Variable { prefix, max } => {
                if let Some(max) = max {
                    if raw.len() > max {
                        return Err(CodecError::LengthOverflow {
                            length: raw.len(),
                            max,
                        });
                    }
                }
                if raw.len() > prefix.capacity() {
                    return Err(CodecError::LengthOverflow {
                        length: raw.len(),
                        max: prefix.capacity(),
                    });
                }
                let mut digits = itoa::Buffer::new();
                let formatted = digits.format(raw.len());
                out.put_bytes(b'0', prefix.digits() - formatted.len());
                out.put_slice(formatted.as_bytes());
                out.put_slice(&raw);
            }
        }
        Ok(())
    }

    /// Encodes a value into a fresh buffer.
    ///
    /// # Errors
    /// Same as [`encode`](Self::encode).
    pub fn encode_value(&self, value: &FieldValue) -> Result<Bytes, CodecError> {
        let mut out = BytesMut::new();
        self.encode(value, &mut out)?;
        Ok(out.freeze())
    }

    /// Parses exactly this field's bytes from the front of `input`.
    ///
    /// Returns the decoded value and the unconsumed remainder. When `strip`
    /// is set, fixed-length values lose their padding (left zeros for N,
    /// right spaces for AN/ANS; binary and BCD are untouched).
    ///
    /// # Errors
    /// `Truncated` if `input` is too short, `InvalidValue` for
    /// content-class or prefix violations, `LengthOverflow` if a prefix
    /// exceeds `max`.
    pub fn parse<'a>(
        &self,
        input: &'a [u8],
        strip: bool,
    ) -> Result<(FieldValue, &'a [u8]), CodecError> {
        match self.rule {
            LengthRule::Fixed { length } => {
                if input.len() < length {
                    return Err(CodecError::Truncated {
                        needed: length,
                        available: input.len(),
                    });
                }
                let (head, rest) = input.split_at(length);
                let mut value = self.content.decode(head)?;
                if strip {
                    value = self.content.strip(value);
                }
                Ok((value, rest))
            }
            LengthRule::Variable { prefix, max } => {
                let width = prefix.digits();
                if input.len() < width {
                    return Err(CodecError::Truncated {
                        needed: width,
                        available: input.len(),
                    });
                }
                let (prefix_bytes, rest) = input.split_at(width);
                let length = parse_prefix(prefix_bytes)?;
                if let Some(max) = max {
                    if length > max {
                        return Err(CodecError::LengthOverflow { length, max });
                    }
                }
                if rest.len() < length {
                    return Err(CodecError::Truncated {
                        needed: length,
                        available: rest.len(),
                    });
                }
                let (head, rest) = rest.split_at(length);
                let value = self.content.decode(head)?;
                Ok((value, rest))
            }
        }
    }
}

/// Parses a decimal-ASCII length prefix.
#[inline]
fn parse_prefix(bytes: &[u8]) -> Result<usize, CodecError> {
    let mut result = 0usize;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return Err(CodecError::InvalidValue(format!(
                "byte 0x{b:02X} in length prefix is not a digit"
            )));
        }
        result = result * 10 + (b - b'0') as usize;
    }
    Ok(result)
}
