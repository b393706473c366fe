//! The transient value union.

use crate::{ArrayRef, BytesRef, FieldKind, MessageRef, Slot, StrRef};

/// Kind-tagged carrier for one field value.
///
/// Produced fresh on every get and consumed on every set/append; never
/// persisted. String, bytes, and message variants carry arena handles, not
/// the data itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Int32(i32),
    Int64(i64),
    UInt32(u32),
    UInt64(u64),
    Float(f32),
    Double(f64),
    Str(StrRef),
    Bytes(BytesRef),
    Enum(i32),
    Message(MessageRef),
}

impl Value {
    pub fn kind(self) -> FieldKind {
        match self {
            Value::Bool(_) => FieldKind::Bool,
            Value::Int32(_) => FieldKind::Int32,
            Value::Int64(_) => FieldKind::Int64,
            Value::UInt32(_) => FieldKind::UInt32,
            Value::UInt64(_) => FieldKind::UInt64,
            Value::Float(_) => FieldKind::Float,
            Value::Double(_) => FieldKind::Double,
            Value::Str(_) => FieldKind::String,
            Value::Bytes(_) => FieldKind::Bytes,
            Value::Enum(_) => FieldKind::Enum,
            Value::Message(_) => FieldKind::Message,
        }
    }

    /// Lower into untyped storage. Lossless for every variant.
    pub fn to_slot(self) -> Slot {
        match self {
            Value::Bool(v) => Slot::from_bool(v),
            Value::Int32(v) | Value::Enum(v) => Slot::from_i32(v),
            Value::Int64(v) => Slot::from_i64(v),
            Value::UInt32(v) => Slot::from_u32(v),
            Value::UInt64(v) => Slot::from_u64(v),
            Value::Float(v) => Slot::from_f32(v),
            Value::Double(v) => Slot::from_f64(v),
            Value::Str(r) => Slot::from_handle_bits(r.bits()),
            Value::Bytes(r) => Slot::from_handle_bits(r.bits()),
            Value::Message(r) => Slot::from_handle_bits(r.bits()),
        }
    }

    /// Reinterpret untyped storage under a declared kind.
    ///
    /// The caller supplies the kind, exactly as accessor callers supply the
    /// field descriptor; the slot itself cannot be interrogated.
    pub fn from_slot(kind: FieldKind, slot: Slot) -> Self {
        match kind {
            FieldKind::Bool => Value::Bool(slot.as_bool()),
            FieldKind::Int32 => Value::Int32(slot.as_i32()),
            FieldKind::Int64 => Value::Int64(slot.as_i64()),
            FieldKind::UInt32 => Value::UInt32(slot.as_u32()),
            FieldKind::UInt64 => Value::UInt64(slot.as_u64()),
            FieldKind::Float => Value::Float(slot.as_f32()),
            FieldKind::Double => Value::Double(slot.as_f64()),
            FieldKind::String => Value::Str(StrRef::from_bits(slot.handle_bits())),
            FieldKind::Bytes => Value::Bytes(BytesRef::from_bits(slot.handle_bits())),
            FieldKind::Enum => Value::Enum(slot.as_i32()),
            FieldKind::Message => Value::Message(MessageRef::from_bits(slot.handle_bits())),
        }
    }

    /// The zero value for a scalar kind (what freshly created storage reads
    /// as). Reference kinds have no zero `Value`: their zero state is the
    /// null handle, observable only as `None` from the accessors, and this
    /// panics for them.
    pub fn zero(kind: FieldKind) -> Self {
        assert!(kind.is_scalar(), "reference kinds have no zero value");
        Value::from_slot(kind, Slot::ZERO)
    }
}

impl ArrayRef {
    pub fn to_slot(self) -> Slot {
        Slot::from_handle_bits(self.bits())
    }

    pub fn from_slot(slot: Slot) -> Self {
        Self::from_bits(slot.handle_bits())
    }
}
