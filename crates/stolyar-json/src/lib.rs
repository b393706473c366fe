#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! JSON codec over the reflective message model.
//!
//! Both directions walk the accessor layer generically, driven by field
//! definitions from the descriptor pool; no per-type code anywhere. The
//! mapping follows the protobuf JSON conventions: lowerCamelCase names
//! (switchable), 64-bit integers as strings, non-finite floats as strings,
//! bytes as base64, enums as symbolic names (switchable).

mod decode;
mod encode;


pub use decode::decode;
pub use encode::{encode, encode_into, encode_value};

use stolyar_runtime::ArenaFull;

/// Decode-side options.
#[derive(Clone, Copy, Debug, Default)]
pub struct DecodeOptions {
    /// Skip unrecognized JSON keys instead of failing on them.
    pub ignore_unknown: bool,
}

/// Encode-side options.
#[derive(Clone, Copy, Debug, Default)]
pub struct EncodeOptions {
    /// Serialize unset/zero fields at their default value instead of
    /// omitting them.
    pub emit_defaults: bool,
    /// Emit the schema's declared field names instead of lowerCamelCase.
    pub use_proto_names: bool,
    /// Emit enum fields as numbers instead of symbolic names.
    pub format_enums_as_integers: bool,
}

/// Codec failures. `path` is the dotted field path where the problem was
/// found, rooted at the message's fully-qualified type name.
#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    #[error("invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("{path}: unknown field {name:?}")]
    UnknownField { path: String, name: String },

    #[error("{path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{path}: unknown enum value {value:?}")]
    UnknownEnumValue { path: String, value: String },

    #[error("{path}: invalid base64")]
    InvalidBase64 { path: String },

    #[error("{path}: number out of range for {kind}")]
    NumberOutOfRange { path: String, kind: &'static str },

    #[error(transparent)]
    Arena(#[from] ArenaFull),
}

/// JSON type name for diagnostics.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
