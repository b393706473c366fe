//! The repeated-field layer.
//!
//! An array is a growable, arena-backed sequence of slots of one element
//! kind. The kind distinction exists only at the API surface; storage is
//! uniform. Out-of-range indexing panics (bounds-checked contract), and
//! append is the sole fallible accessor operation.

use stolyar_core::{ArrayRef, BytesRef, FieldKind, MessageRef, MiniTableField, Slot, StrRef, Value};

use crate::{Arena, ArenaFull};

impl Arena {
    /// Read-only array lookup; `None` if the repeated field was never
    /// populated.
    pub fn get_array(&self, msg: MessageRef, field: &MiniTableField) -> Option<ArrayRef> {
        debug_assert!(field.repeated, "singular field; use the scalar accessors");
        let slot = self.read_slot(msg, field);
        (slot != Slot::ZERO).then(|| ArrayRef::from_slot(slot))
    }

    /// Idempotent: returns the existing array, or allocates an empty one and
    /// attaches it to the message. The only allocating accessor besides
    /// message creation and append itself.
    pub fn get_or_create_array(
        &mut self,
        msg: MessageRef,
        field: &MiniTableField,
    ) -> Result<ArrayRef, ArenaFull> {
        if let Some(existing) = self.get_array(msg, field) {
            return Ok(existing);
        }
        let handle = self.push_array()?;
        self.write_slot(msg, field, handle.to_slot());
        Ok(handle)
    }

    pub fn array_len(&self, arr: ArrayRef) -> usize {
        self.array(arr).elems.len()
    }

    /// Indexed read under a declared element kind.
    pub fn array_get_value(&self, arr: ArrayRef, kind: FieldKind, index: usize) -> Value {
        Value::from_slot(kind, self.array(arr).elems[index])
    }

    /// Append one element; grows backing storage geometrically from the
    /// arena. Fails only on budget exhaustion.
    pub fn array_append_value(&mut self, arr: ArrayRef, value: Value) -> Result<(), ArenaFull> {
        self.charge(std::mem::size_of::<Slot>())?;
        self.array_mut(arr).elems.push(value.to_slot());
        Ok(())
    }

    // ------------------------------------------------------------------
    // Typed surface
    // ------------------------------------------------------------------

    pub fn array_get_bool(&self, arr: ArrayRef, index: usize) -> bool {
        self.array(arr).elems[index].as_bool()
    }

    pub fn array_get_int32(&self, arr: ArrayRef, index: usize) -> i32 {
        self.array(arr).elems[index].as_i32()
    }

    pub fn array_get_int64(&self, arr: ArrayRef, index: usize) -> i64 {
        self.array(arr).elems[index].as_i64()
    }

    pub fn array_get_uint32(&self, arr: ArrayRef, index: usize) -> u32 {
        self.array(arr).elems[index].as_u32()
    }

    pub fn array_get_uint64(&self, arr: ArrayRef, index: usize) -> u64 {
        self.array(arr).elems[index].as_u64()
    }

    pub fn array_get_float(&self, arr: ArrayRef, index: usize) -> f32 {
        self.array(arr).elems[index].as_f32()
    }

    pub fn array_get_double(&self, arr: ArrayRef, index: usize) -> f64 {
        self.array(arr).elems[index].as_f64()
    }

    pub fn array_get_enum_value(&self, arr: ArrayRef, index: usize) -> i32 {
        self.array(arr).elems[index].as_i32()
    }

    pub fn array_get_str(&self, arr: ArrayRef, index: usize) -> &str {
        match self.array_get_value(arr, FieldKind::String, index) {
            Value::Str(r) => self.str(r),
            _ => unreachable!(),
        }
    }

    pub fn array_get_bytes(&self, arr: ArrayRef, index: usize) -> &[u8] {
        match self.array_get_value(arr, FieldKind::Bytes, index) {
            Value::Bytes(r) => self.bytes(r),
            _ => unreachable!(),
        }
    }

    pub fn array_get_message(&self, arr: ArrayRef, index: usize) -> MessageRef {
        match self.array_get_value(arr, FieldKind::Message, index) {
            Value::Message(m) => m,
            _ => unreachable!(),
        }
    }

    pub fn array_append_bool(&mut self, arr: ArrayRef, v: bool) -> Result<(), ArenaFull> {
        self.array_append_value(arr, Value::Bool(v))
    }

    pub fn array_append_int32(&mut self, arr: ArrayRef, v: i32) -> Result<(), ArenaFull> {
        self.array_append_value(arr, Value::Int32(v))
    }

    pub fn array_append_int64(&mut self, arr: ArrayRef, v: i64) -> Result<(), ArenaFull> {
        self.array_append_value(arr, Value::Int64(v))
    }

    pub fn array_append_uint32(&mut self, arr: ArrayRef, v: u32) -> Result<(), ArenaFull> {
        self.array_append_value(arr, Value::UInt32(v))
    }

    pub fn array_append_uint64(&mut self, arr: ArrayRef, v: u64) -> Result<(), ArenaFull> {
        self.array_append_value(arr, Value::UInt64(v))
    }

    pub fn array_append_float(&mut self, arr: ArrayRef, v: f32) -> Result<(), ArenaFull> {
        self.array_append_value(arr, Value::Float(v))
    }

    pub fn array_append_double(&mut self, arr: ArrayRef, v: f64) -> Result<(), ArenaFull> {
        self.array_append_value(arr, Value::Double(v))
    }

    pub fn array_append_enum_value(&mut self, arr: ArrayRef, v: i32) -> Result<(), ArenaFull> {
        self.array_append_value(arr, Value::Enum(v))
    }

    pub fn array_append_str(&mut self, arr: ArrayRef, v: StrRef) -> Result<(), ArenaFull> {
        self.array_append_value(arr, Value::Str(v))
    }

    pub fn array_append_bytes(&mut self, arr: ArrayRef, v: BytesRef) -> Result<(), ArenaFull> {
        self.array_append_value(arr, Value::Bytes(v))
    }

    pub fn array_append_message(&mut self, arr: ArrayRef, v: MessageRef) -> Result<(), ArenaFull> {
        self.array_append_value(arr, Value::Message(v))
    }
}
