/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # iron8583 Dictionary
//!
//! Dialect schema registry for the iron8583 ISO 8583 engine.
//!
//! This crate provides:
//! - **Schema definitions**: data-field and header-field definitions
//! - **MTI registry**: the per-family code/name bijection and MTI codec
//! - **Alias binding**: symbolic names resolving to field numbers
//!
//! A [`Dialect`] is declared once at startup and then shared read-only
//! (typically as `Arc<Dialect>`) with every message instance of the family.

pub mod schema;

pub use schema::{Dialect, FieldDef, HeaderDef, Resolved};
