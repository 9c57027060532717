//! Ordered field descriptors shared by snapshot writers and readers.
//!
//! A snapshot is a positional byte stream: nothing in it says which field a
//! byte belongs to. This crate holds the one description of that order so
//! encode and decode paths can be driven from the same list.
//!
//! - Field kinds and their wire sizes
//! - Ordered schema model with validation
//! - Deterministic schema hashing
//!
//! # Design Principles
//!
//! - **Explicit schemas** - No reflection on arbitrary Rust types.
//! - **Order is the contract** - Reordering fields changes the layout and the hash.
//! - **Deterministic hashing** - Schema hash is stable given the same definition.

mod error;
mod field;
mod hash;
mod schema;

pub use error::{SchemaError, SchemaResult};
pub use field::{FieldDef, FieldKind};
pub use hash::schema_hash;
pub use schema::{Schema, SchemaBuilder};
