/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Schema definitions for ISO 8583 dialects.
//!
//! This module defines the structures that represent one message family:
//! - [`FieldDef`]: Data-field definitions with number, name, and codec
//! - [`HeaderDef`]: Fixed-length header-field definitions keyed by string
//! - [`Dialect`]: The per-family registry of MTIs, fields, headers, and
//!   aliases
//!
//! A dialect is populated once at family-declaration time and is read-only
//! afterwards: build it with the `declare_*` methods, then share it as
//! `Arc<Dialect>` across message instances and threads.

use iron8583_codec::codecs;
use iron8583_codec::{FieldCodec, FieldOptions};
use iron8583_core::error::SchemaError;
use iron8583_core::field::{FieldKey, FieldNumber};
use iron8583_core::layout::Layout;
use iron8583_core::mti::Mti;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Definition of one data field.
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Field number (2-128).
    pub number: FieldNumber,
    /// Human-readable field name.
    pub name: String,
    /// The codec, already specialized by declaration options.
    pub codec: FieldCodec,
}

impl FieldDef {
    /// Label used in error context and pretty printing, e.g. `field 2 (PAN)`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("field {} ({})", self.number, self.name)
    }
}

/// Definition of one header field.
///
/// Header fields are fixed-length; their order of declaration is their wire
/// order.
#[derive(Debug, Clone)]
pub struct HeaderDef {
    /// String key used for set/get lookups.
    pub key: String,
    /// Human-readable field name.
    pub name: String,
    /// The codec, already specialized by declaration options.
    pub codec: FieldCodec,
}

impl HeaderDef {
    /// Label used in error context and pretty printing.
    #[must_use]
    pub fn label(&self) -> String {
        format!("header {} ({})", self.key, self.name)
    }
}

/// Resolution of a [`FieldKey`] against a dialect.
#[derive(Debug, Clone, Copy)]
pub enum Resolved<'a> {
    /// The key addresses a data field.
    Data(&'a FieldDef),
    /// The key addresses a header field.
    Header(&'a HeaderDef),
}

/// Schema registry for one ISO 8583 message family.
#[derive(Debug, Clone)]
pub struct Dialect {
    name: String,
    mti_codec: FieldCodec,
    mtis: BTreeMap<u16, String>,
    mtis_by_name: HashMap<String, u16>,
    fields: BTreeMap<FieldNumber, FieldDef>,
    header: Vec<HeaderDef>,
    header_index: HashMap<String, usize>,
    aliases: HashMap<String, FieldNumber>,
    layout: Layout,
}

impl Dialect {
    /// Creates an empty dialect.
    ///
    /// The MTI codec defaults to four-digit fixed numeric ASCII and the
    /// layout to [`Layout::default`]; both can be redeclared.
    ///
    /// # Arguments
    /// * `name` - Display name of the family (e.g., "ISO 8583:1993")
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mti_codec: codecs::n(4),
            mtis: BTreeMap::new(),
            mtis_by_name: HashMap::new(),
            fields: BTreeMap::new(),
            header: Vec::new(),
            header_index: HashMap::new(),
            aliases: HashMap::new(),
            layout: Layout::default(),
        }
    }

    /// Sets the per-family default layout.
    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Declares the family-level MTI codec.
    pub fn declare_mti_codec(&mut self, codec: &FieldCodec, options: FieldOptions) {
        self.mti_codec = options.apply(codec);
    }

    /// Registers an MTI code/name pair.
    ///
    /// # Errors
    /// Returns `SchemaError::Conflict` if the code or the name is already
    /// registered.
    pub fn declare_mti(
        &mut self,
        code: impl Into<Mti>,
        name: impl Into<String>,
    ) -> Result<(), SchemaError> {
        let code = code.into().value();
        let name = name.into();
        if self.mtis.contains_key(&code) {
            return Err(SchemaError::Conflict {
                what: format!("MTI {}", Mti::new(code)),
            });
        }
        if self.mtis_by_name.contains_key(&name) {
            return Err(SchemaError::Conflict {
                what: format!("MTI name {name:?}"),
            });
        }
        self.mtis_by_name.insert(name.clone(), code);
        self.mtis.insert(code, name);
        Ok(())
    }

    /// Declares a data field.
    ///
    /// The codec is cloned and specialized by `options`. Redeclaring a
    /// number replaces the earlier definition silently; that is developer
    /// error at family-definition time, not a runtime failure.
    ///
    /// # Panics
    /// Panics if `number` is outside the data range 2..=128.
    pub fn declare_field(
        &mut self,
        number: u8,
        name: impl Into<String>,
        codec: &FieldCodec,
        options: FieldOptions,
    ) {
        let number = FieldNumber::new(number);
        assert!(
            number.is_data(),
            "data fields occupy numbers 2..=128, got {number}"
        );
        let def = FieldDef {
            number,
            name: name.into(),
            codec: options.apply(codec),
        };
        if self.fields.insert(number, def).is_some() {
            debug!(field = %number, "field redeclared, replacing earlier definition");
        }
    }

    /// Declares a header field.
    ///
    /// Declaration order is wire order. Redeclaring a key replaces the
    /// earlier definition in place, keeping its position.
    pub fn declare_header(
        &mut self,
        key: impl Into<String>,
        name: impl Into<String>,
        codec: &FieldCodec,
        options: FieldOptions,
    ) {
        let key = key.into();
        let def = HeaderDef {
            key: key.clone(),
            name: name.into(),
            codec: options.apply(codec),
        };
        match self.header_index.get(&key) {
            Some(&position) => {
                debug!(header = %key, "header field redeclared, replacing earlier definition");
                self.header[position] = def;
            }
            None => {
                self.header_index.insert(key, self.header.len());
                self.header.push(def);
            }
        }
    }

    /// Binds a symbolic alias to a data-field number.
    ///
    /// # Errors
    /// Returns `SchemaError::UnknownFieldNumber` if no field with that
    /// number has been declared.
    pub fn declare_alias(
        &mut self,
        alias: impl Into<String>,
        number: u8,
    ) -> Result<(), SchemaError> {
        let number = FieldNumber::new(number);
        if !self.fields.contains_key(&number) {
            return Err(SchemaError::UnknownFieldNumber {
                number: number.value(),
            });
        }
        self.aliases.insert(alias.into(), number);
        Ok(())
    }

    /// Returns the family display name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the family-level MTI codec.
    #[inline]
    #[must_use]
    pub const fn mti_codec(&self) -> &FieldCodec {
        &self.mti_codec
    }

    /// Returns the per-family default layout.
    #[inline]
    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Returns the name registered for an MTI code.
    #[must_use]
    pub fn mti_name(&self, code: Mti) -> Option<&str> {
        self.mtis.get(&code.value()).map(String::as_str)
    }

    /// Returns the code registered for an MTI name.
    #[must_use]
    pub fn mti_code(&self, name: &str) -> Option<Mti> {
        self.mtis_by_name.get(name).copied().map(Mti::new)
    }

    /// Returns true if the MTI code is registered.
    #[must_use]
    pub fn is_known_mti(&self, code: Mti) -> bool {
        self.mtis.contains_key(&code.value())
    }

    /// Gets a data-field definition by number.
    #[must_use]
    pub fn field(&self, number: FieldNumber) -> Option<&FieldDef> {
        self.fields.get(&number)
    }

    /// Gets a header-field definition by key.
    #[must_use]
    pub fn header(&self, key: &str) -> Option<&HeaderDef> {
        self.header_index.get(key).map(|&i| &self.header[i])
    }

    /// Returns the header definitions in declaration (wire) order.
    #[inline]
    #[must_use]
    pub fn header_fields(&self) -> &[HeaderDef] {
        &self.header
    }

    /// Iterates the data-field definitions in ascending number order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.values()
    }

    /// Resolves a set/get key against the registry.
    ///
    /// Numbers address data fields directly. Names resolve through the
    /// alias table (to a data field) first, then through the header keys.
    #[must_use]
    pub fn resolve(&self, key: &FieldKey) -> Option<Resolved<'_>> {
        match key {
            FieldKey::Number(number) => self.fields.get(number).map(Resolved::Data),
            FieldKey::Name(name) => {
                if let Some(number) = self.aliases.get(name) {
                    return self.fields.get(number).map(Resolved::Data);
                }
                self.header(name).map(Resolved::Header)
            }
        }
    }
}
