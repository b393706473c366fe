//! The generic accessor layer: get/set/has/clear dispatched by field layout.
//!
//! A field descriptor is only valid against messages created from the
//! mini-table that contains it; a foreign descriptor whose slot index falls
//! outside the instance panics on the bounds check rather than reading
//! unrelated storage.

use stolyar_core::{
    BytesRef, FieldKind, MessageRef, MiniTableField, Presence, Slot, StrRef, Value,
};

use crate::Arena;

impl Arena {
    /// Read a field generically. `None` means unset: the presence indicator
    /// is clear, or a reference field holds no handle. Implicit-presence
    /// scalars always read as `Some` of whatever is stored (zero included);
    /// "unset" is not observable for them.
    pub fn get_value(&self, msg: MessageRef, field: &MiniTableField) -> Option<Value> {
        debug_assert!(!field.repeated, "repeated field; use the array accessors");
        if field.has_presence() && !self.has_field(msg, field) {
            return None;
        }
        let slot = self.read_slot(msg, field);
        if !field.kind.is_scalar() && slot == Slot::ZERO {
            return None;
        }
        Some(Value::from_slot(field.kind, slot))
    }

    /// Write a field generically and record presence. Reference values must
    /// already be arena-resident; nothing is copied here.
    pub fn set_value(&mut self, msg: MessageRef, field: &MiniTableField, value: Value) {
        debug_assert!(!field.repeated, "repeated field; use the array accessors");
        debug_assert_eq!(value.kind(), field.kind, "value kind does not match field");
        self.write_slot(msg, field, value.to_slot());
        self.mark_present(msg, field);
    }

    /// True iff the field's presence indicator is set. Uniform over hasbits,
    /// oneof cases, and message fields; always false for implicit-presence
    /// fields, set or not.
    pub fn has_field(&self, msg: MessageRef, field: &MiniTableField) -> bool {
        match field.presence {
            Presence::Implicit => false,
            Presence::Hasbit(bit) => {
                let word = self.msg(msg).hasbits[usize::from(bit / 32)];
                word & (1 << (bit % 32)) != 0
            }
            Presence::Oneof { case_slot } => {
                self.msg(msg).slots[usize::from(case_slot)].as_u32() == field.number
            }
        }
    }

    /// Clear presence and zero the field's storage. For a oneof member this
    /// is a no-op unless that member is the active one; for a repeated field
    /// it detaches the array handle.
    pub fn clear_field(&mut self, msg: MessageRef, field: &MiniTableField) {
        match field.presence {
            Presence::Implicit => {}
            Presence::Hasbit(bit) => {
                self.msg_mut(msg).hasbits[usize::from(bit / 32)] &= !(1 << (bit % 32));
            }
            Presence::Oneof { case_slot } => {
                let storage = self.msg_mut(msg);
                if storage.slots[usize::from(case_slot)].as_u32() != field.number {
                    return;
                }
                storage.slots[usize::from(case_slot)] = Slot::ZERO;
            }
        }
        self.msg_mut(msg).slots[usize::from(field.slot)] = Slot::ZERO;
    }

    // ------------------------------------------------------------------
    // Typed surface
    // ------------------------------------------------------------------

    pub fn get_bool(&self, msg: MessageRef, field: &MiniTableField, default: bool) -> bool {
        match self.get_value(msg, field) {
            Some(Value::Bool(v)) => v,
            _ => default,
        }
    }

    pub fn get_int32(&self, msg: MessageRef, field: &MiniTableField, default: i32) -> i32 {
        match self.get_value(msg, field) {
            Some(Value::Int32(v)) => v,
            _ => default,
        }
    }

    pub fn get_int64(&self, msg: MessageRef, field: &MiniTableField, default: i64) -> i64 {
        match self.get_value(msg, field) {
            Some(Value::Int64(v)) => v,
            _ => default,
        }
    }

    pub fn get_uint32(&self, msg: MessageRef, field: &MiniTableField, default: u32) -> u32 {
        match self.get_value(msg, field) {
            Some(Value::UInt32(v)) => v,
            _ => default,
        }
    }

    pub fn get_uint64(&self, msg: MessageRef, field: &MiniTableField, default: u64) -> u64 {
        match self.get_value(msg, field) {
            Some(Value::UInt64(v)) => v,
            _ => default,
        }
    }

    pub fn get_float(&self, msg: MessageRef, field: &MiniTableField, default: f32) -> f32 {
        match self.get_value(msg, field) {
            Some(Value::Float(v)) => v,
            _ => default,
        }
    }

    pub fn get_double(&self, msg: MessageRef, field: &MiniTableField, default: f64) -> f64 {
        match self.get_value(msg, field) {
            Some(Value::Double(v)) => v,
            _ => default,
        }
    }

    pub fn get_enum_value(&self, msg: MessageRef, field: &MiniTableField, default: i32) -> i32 {
        match self.get_value(msg, field) {
            Some(Value::Enum(v)) => v,
            _ => default,
        }
    }

    /// Non-owning view into arena memory; valid as long as the arena is.
    pub fn get_str<'a>(
        &'a self,
        msg: MessageRef,
        field: &MiniTableField,
        default: &'a str,
    ) -> &'a str {
        match self.get_value(msg, field) {
            Some(Value::Str(r)) => self.str(r),
            _ => default,
        }
    }

    pub fn get_bytes<'a>(
        &'a self,
        msg: MessageRef,
        field: &MiniTableField,
        default: &'a [u8],
    ) -> &'a [u8] {
        match self.get_value(msg, field) {
            Some(Value::Bytes(r)) => self.bytes(r),
            _ => default,
        }
    }

    /// Nested message fields are always reference-valued; `None` when unset.
    pub fn get_message(&self, msg: MessageRef, field: &MiniTableField) -> Option<MessageRef> {
        match self.get_value(msg, field) {
            Some(Value::Message(m)) => Some(m),
            _ => None,
        }
    }

    pub fn set_bool(&mut self, msg: MessageRef, field: &MiniTableField, v: bool) {
        self.set_value(msg, field, Value::Bool(v));
    }

    pub fn set_int32(&mut self, msg: MessageRef, field: &MiniTableField, v: i32) {
        self.set_value(msg, field, Value::Int32(v));
    }

    pub fn set_int64(&mut self, msg: MessageRef, field: &MiniTableField, v: i64) {
        self.set_value(msg, field, Value::Int64(v));
    }

    pub fn set_uint32(&mut self, msg: MessageRef, field: &MiniTableField, v: u32) {
        self.set_value(msg, field, Value::UInt32(v));
    }

    pub fn set_uint64(&mut self, msg: MessageRef, field: &MiniTableField, v: u64) {
        self.set_value(msg, field, Value::UInt64(v));
    }

    pub fn set_float(&mut self, msg: MessageRef, field: &MiniTableField, v: f32) {
        self.set_value(msg, field, Value::Float(v));
    }

    pub fn set_double(&mut self, msg: MessageRef, field: &MiniTableField, v: f64) {
        self.set_value(msg, field, Value::Double(v));
    }

    pub fn set_enum_value(&mut self, msg: MessageRef, field: &MiniTableField, v: i32) {
        self.set_value(msg, field, Value::Enum(v));
    }

    /// Store a string handle. The backing text must already live in this
    /// arena ([`Arena::alloc_str`]); the setter copies nothing.
    pub fn set_str(&mut self, msg: MessageRef, field: &MiniTableField, v: StrRef) {
        self.set_value(msg, field, Value::Str(v));
    }

    pub fn set_bytes(&mut self, msg: MessageRef, field: &MiniTableField, v: BytesRef) {
        self.set_value(msg, field, Value::Bytes(v));
    }

    /// Store a sub-message reference and mark presence.
    pub fn set_message(&mut self, msg: MessageRef, field: &MiniTableField, sub: MessageRef) {
        self.set_value(msg, field, Value::Message(sub));
    }

    // ------------------------------------------------------------------
    // Storage plumbing
    // ------------------------------------------------------------------

    pub(crate) fn read_slot(&self, msg: MessageRef, field: &MiniTableField) -> Slot {
        self.msg(msg).slots[usize::from(field.slot)]
    }

    pub(crate) fn write_slot(&mut self, msg: MessageRef, field: &MiniTableField, slot: Slot) {
        self.msg_mut(msg).slots[usize::from(field.slot)] = slot;
    }

    fn mark_present(&mut self, msg: MessageRef, field: &MiniTableField) {
        match field.presence {
            Presence::Implicit => {}
            Presence::Hasbit(bit) => {
                self.msg_mut(msg).hasbits[usize::from(bit / 32)] |= 1 << (bit % 32);
            }
            Presence::Oneof { case_slot } => {
                self.msg_mut(msg).slots[usize::from(case_slot)] = Slot::from_u32(field.number);
            }
        }
    }
}
