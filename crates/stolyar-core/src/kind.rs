//! Declared field kinds.

/// The declared kind of a field's value.
///
/// `Enum` values are carried as their numeric `i32` representation; symbolic
/// names live in the schema layer, not here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Bool,
    Int32,
    Int64,
    UInt32,
    UInt64,
    Float,
    Double,
    String,
    Bytes,
    Enum,
    Message,
}

impl FieldKind {
    /// Fixed-width kinds that live entirely inside one slot, with no
    /// arena-resident backing data.
    pub fn is_scalar(self) -> bool {
        !matches!(self, FieldKind::String | FieldKind::Bytes | FieldKind::Message)
    }

    /// Lowercase display name, matching the serde rename.
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Bool => "bool",
            FieldKind::Int32 => "int32",
            FieldKind::Int64 => "int64",
            FieldKind::UInt32 => "uint32",
            FieldKind::UInt64 => "uint64",
            FieldKind::Float => "float",
            FieldKind::Double => "double",
            FieldKind::String => "string",
            FieldKind::Bytes => "bytes",
            FieldKind::Enum => "enum",
            FieldKind::Message => "message",
        }
    }
}
