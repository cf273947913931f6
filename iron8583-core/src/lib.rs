/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # iron8583 Core
//!
//! Core types, traits, and error definitions for the iron8583 ISO 8583 engine.
//!
//! This crate provides the fundamental building blocks used across all
//! iron8583 crates:
//! - **Error types**: Unified error handling with `thiserror`
//! - **Field types**: `FieldNumber`, `FieldKey`, and `FieldValue`
//! - **MTI types**: `Mti` and the `MtiRef` assignment reference
//! - **Layout view**: the `Layout` configuration snapshot read at each
//!   serialize/parse call
//!
//! ## Layering
//!
//! Codec primitives report context-free [`CodecError`]s; the message engine
//! wraps them with the failing section and byte offset. Schemas are declared
//! once and shared immutably, so every type here is cheap to clone or copy.

pub mod error;
pub mod field;
pub mod layout;
pub mod mti;

pub use error::{CodecError, IsoError, MessageError, Result, SchemaError};
pub use field::{FieldKey, FieldNumber, FieldValue};
pub use layout::{Layout, Section};
pub use mti::{Mti, MtiRef};
