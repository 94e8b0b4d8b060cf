//! # dan-core
//!
//! Pure-Rust decoder and encoder for **DAN (Data Advanced Notation)**, a
//! line-oriented configuration/data notation with nested blocks, typed arrays
//! and declared-column tables.
//!
//! ```text
//! # Configuration file
//! app {
//!   name: "MyApp"
//!   settings {
//!     debug: true
//!     hosts: ["localhost", "127.0.0.1"]
//!   }
//! }
//! users: table(id, name) [
//!   1, "Alice"
//!   2, "Bob"
//! ]
//! ```
//!
//! ## Quick start
//!
//! ```rust
//! use dan_core::{decode, encode, Value};
//!
//! let doc = decode("users: table(name, age) [\n  \"Alice\", 25\n]\nactive: true");
//! assert_eq!(doc["active"], Value::Bool(true));
//!
//! let users = doc["users"].as_table().unwrap();
//! assert_eq!(users.rows()[0]["age"], Value::Number(25.0));
//!
//! // Canonical re-encoding
//! assert_eq!(
//!     encode(&doc),
//!     "users: table(name, age) [\n  \"Alice\", 25\n]\nactive: true"
//! );
//! ```
//!
//! ## Modules
//!
//! - [`decoder`]: DAN text → [`Object`], plus diagnostics for tolerated input
//! - [`scalar`]: single-token scalar grammar
//! - [`encoder`]: [`Object`] → canonical DAN text
//! - [`json`]: JSON transcoding
//! - [`value`]: the value model
//! - [`error`]: error types

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod json;
pub mod scalar;
pub mod value;

pub use decoder::{
    decode, decode_bytes, decode_bytes_with_diagnostics, decode_with_diagnostics, Decoded,
    Diagnostic, DiagnosticKind,
};
pub use encoder::{encode, encode_with_options, format_scalar, EncodeOptions};
pub use error::{DanError, Result};
pub use json::{from_json_slice, from_json_str, to_json, to_json_string_pretty};
pub use scalar::parse_scalar;
pub use value::{Object, Table, Value, ValueKind};
