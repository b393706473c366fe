#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! The descriptor pool: schema registration and mini-table compilation.
//!
//! A pool is an append-only registry mapping fully-qualified type names to
//! message and enum definitions. Serialized `FileDescriptorProto` input (the
//! schema-of-schema produced by a descriptor compiler) is decoded through
//! `prost` and registered file by file; every message's mini-table is
//! computed eagerly at registration time, so lookups never build anything.
//!
//! Registration is transactional: a file that fails to register leaves the
//! pool exactly as it was.

mod defs;
mod names;
mod pool;
mod register;


pub use defs::{EnumDef, EnumId, FieldDef, FileDef, FileId, MessageDef, MessageId};
pub use names::to_json_name;
pub use pool::DescriptorPool;

/// Errors reported by descriptor registration.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    /// The input bytes are not a valid serialized file descriptor.
    #[error("failed to decode descriptor: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("file {0:?} is already registered")]
    DuplicateFile(String),

    #[error("type {0:?} is already registered")]
    DuplicateType(String),

    /// A field references a message or enum type the pool does not know.
    /// Dependencies must be added before their dependents.
    #[error("field {field}: type {type_name:?} is not registered")]
    TypeNotFound { field: String, type_name: String },

    #[error("file descriptor has no name")]
    MissingName,

    #[error("field {field}: {reason}")]
    UnsupportedField { field: String, reason: &'static str },
}
