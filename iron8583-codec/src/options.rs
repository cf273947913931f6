/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Declaration-time codec options.
//!
//! Field declarations carry an options map that specializes the cloned
//! codec: `length` for fixed codecs, `max` for variable codecs, `padding`
//! for either. Unknown or mis-scoped options are reported through
//! `tracing` and ignored; they never abort schema construction.

use crate::content::Padding;
use crate::field::{FieldCodec, LengthRule};
use tracing::warn;

/// Value of a single declaration option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionValue {
    /// An integer-valued option (`length`, `max`).
    Int(usize),
    /// A padding-valued option (`padding`).
    Pad(Padding),
}

/// Options applied to a codec at field-declaration time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldOptions {
    /// Declared fixed byte length (fixed codecs only).
    pub length: Option<usize>,
    /// Upper bound on the value byte length (variable codecs only).
    pub max: Option<usize>,
    /// Padding override.
    pub padding: Option<Padding>,
}

impl FieldOptions {
    /// Creates an empty option set.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            length: None,
            max: None,
            padding: None,
        }
    }

    /// Sets the fixed byte length.
    #[must_use]
    pub const fn length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Sets the variable-length upper bound.
    #[must_use]
    pub const fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Sets the padding override.
    #[must_use]
    pub const fn padding(mut self, padding: Padding) -> Self {
        self.padding = Some(padding);
        self
    }

    /// Builds an option set from key/value pairs.
    ///
    /// Recognized keys are `length`, `max`, and `padding`. Unrecognized
    /// keys, and recognized keys with a mismatched value type, are logged
    /// at warn level and skipped.
    #[must_use]
    pub fn from_pairs(pairs: &[(&str, OptionValue)]) -> Self {
        let mut options = Self::new();
        for &(key, value) in pairs {
            match (key, value) {
                ("length", OptionValue::Int(v)) => options.length = Some(v),
                ("max", OptionValue::Int(v)) => options.max = Some(v),
                ("padding", OptionValue::Pad(p)) => options.padding = Some(p),
                ("length" | "max" | "padding", _) => {
                    warn!(option = key, "field option has mismatched value type, ignoring");
                }
                (other, _) => {
                    warn!(option = other, "ignoring unrecognized field option");
                }
            }
        }
        options
    }

    /// Returns true if no option is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length.is_none() && self.max.is_none() && self.padding.is_none()
    }

    /// Applies these options to a clone of `codec`.
    ///
    /// Options scoped to the other length discipline are logged and
    /// ignored, matching declaration-time diagnostics elsewhere.
    #[must_use]
    pub fn apply(&self, codec: &FieldCodec) -> FieldCodec {
        let mut codec = codec.clone();
        if let Some(length) = self.length {
            match codec.rule {
                LengthRule::Fixed { .. } => codec.rule = LengthRule::Fixed { length },
                LengthRule::Variable { .. } => {
                    warn!(length, "length option only applies to fixed-length codecs, ignoring");
                }
            }
        }
        if let Some(max) = self.max {
            match codec.rule {
                LengthRule::Variable { prefix, .. } => {
                    codec.rule = LengthRule::Variable {
                        prefix,
                        max: Some(max),
                    };
                }
                LengthRule::Fixed { .. } => {
                    warn!(max, "max option only applies to variable-length codecs, ignoring");
                }
            }
        }
        if let Some(padding) = self.padding {
            codec.padding = padding;
        }
        codec
    }
}
