//! Schema-driven snapshot encoding and decoding for arena state.
//!
//! This crate ties the snapshot buffer to the schema: dynamic values are
//! checked against a schema before a pass, and typed state implementing
//! [`SnapshotState`] is captured and restored with a size check against its
//! own schema.
//!
//! # Features
//!
//! - Encode/decode of [`FieldValue`] sequences against a [`schema::Schema`]
//! - Typed capture/restore through [`SnapshotState`]
//! - Codec limits checked before any byte is written
//!
//! # Design Principles
//!
//! - **Schema is the contract** - Encode and decode walk the same field list.
//! - **Reject early** - Kind and count mismatches are caught before the pass starts.
//! - **Reuse buffers** - Callers own the `SnapshotBuffer` and reuse it across ticks.

mod error;
mod limits;
mod snapshot;
mod state;
mod value;

pub use buffer::{Handle, SnapshotBuffer, DEFAULT_CAPACITY};
pub use error::{CodecError, CodecResult, LimitKind, ValueReason};
pub use limits::CodecLimits;
pub use snapshot::{decode_values, decode_values_from_bytes, encode_values, read_value, write_value};
pub use state::{capture, capture_values, restore, restore_from_bytes, SnapshotState};
pub use value::FieldValue;
