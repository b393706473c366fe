//! Per-message-type layout tables.
//!
//! A mini-table is computed once when a message type is registered and shared
//! by every instance of that type. Fields are kept sorted by field number so
//! the number lookup (the hot path of every reflective access) is a binary
//! search, never a linear scan.

use crate::FieldKind;

/// How a field's presence is tracked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    /// No tracking; the zero value is indistinguishable from "unset".
    Implicit,
    /// Explicit presence bit at this index into the hasbit words.
    Hasbit(u16),
    /// Oneof member: present iff the case slot holds this field's number.
    Oneof { case_slot: u16 },
}

/// Layout of one field within its message type.
#[derive(Clone, Copy, Debug)]
pub struct MiniTableField {
    pub number: u32,
    pub kind: FieldKind,
    pub repeated: bool,
    /// Storage index. Oneof members share one slot; repeated fields store an
    /// array handle here.
    pub slot: u16,
    pub presence: Presence,
}

impl MiniTableField {
    /// Explicit-presence fields answer has/clear; implicit ones do not.
    pub fn has_presence(&self) -> bool {
        !matches!(self.presence, Presence::Implicit)
    }
}

/// Complete layout for one message type: every field plus the instance size
/// in slots and hasbit words. Immutable once built.
#[derive(Clone, Debug, Default)]
pub struct MiniTable {
    /// Sorted by field number for binary search.
    fields: Vec<MiniTableField>,
    slot_count: u16,
    hasbit_words: u16,
}

impl MiniTable {
    /// Look up a field by its wire-format number.
    pub fn find_field_by_number(&self, number: u32) -> Option<&MiniTableField> {
        self.fields
            .binary_search_by_key(&number, |f| f.number)
            .ok()
            .map(|idx| &self.fields[idx])
    }

    /// All fields in field-number order.
    pub fn fields(&self) -> &[MiniTableField] {
        &self.fields
    }

    pub fn slot_count(&self) -> u16 {
        self.slot_count
    }

    pub fn hasbit_words(&self) -> u16 {
        self.hasbit_words
    }
}

/// Assigns slots, hasbits, and oneof case slots, then freezes the table.
#[derive(Debug, Default)]
pub struct MiniTableBuilder {
    fields: Vec<MiniTableField>,
    next_slot: u16,
    next_hasbit: u16,
}

impl MiniTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a singular field. Message-kind fields always get a hasbit;
    /// scalars get one only when the schema declares explicit presence.
    pub fn singular(&mut self, number: u32, kind: FieldKind, explicit_presence: bool) -> &mut Self {
        let presence = if explicit_presence || kind == FieldKind::Message {
            Presence::Hasbit(self.alloc_hasbit())
        } else {
            Presence::Implicit
        };
        let slot = self.alloc_slot();
        self.fields.push(MiniTableField {
            number,
            kind,
            repeated: false,
            slot,
            presence,
        });
        self
    }

    /// Add a repeated field. One slot for the array handle, no presence bit;
    /// "never populated" is the null array handle state.
    pub fn repeated(&mut self, number: u32, kind: FieldKind) -> &mut Self {
        let slot = self.alloc_slot();
        self.fields.push(MiniTableField {
            number,
            kind,
            repeated: true,
            slot,
            presence: Presence::Implicit,
        });
        self
    }

    /// Add a oneof: one case slot holding the active member's field number
    /// (zero when none), plus one data slot shared by every member.
    pub fn oneof(&mut self, members: &[(u32, FieldKind)]) -> &mut Self {
        let case_slot = self.alloc_slot();
        let data_slot = self.alloc_slot();
        for &(number, kind) in members {
            self.fields.push(MiniTableField {
                number,
                kind,
                repeated: false,
                slot: data_slot,
                presence: Presence::Oneof { case_slot },
            });
        }
        self
    }

    /// Sort by field number and freeze. Duplicate numbers are a schema bug
    /// and fail fast here.
    pub fn build(mut self) -> MiniTable {
        self.fields.sort_unstable_by_key(|f| f.number);
        for pair in self.fields.windows(2) {
            assert!(
                pair[0].number != pair[1].number,
                "duplicate field number {}",
                pair[0].number
            );
        }
        MiniTable {
            fields: self.fields,
            slot_count: self.next_slot,
            hasbit_words: self.next_hasbit.div_ceil(32),
        }
    }

    fn alloc_slot(&mut self) -> u16 {
        let slot = self.next_slot;
        self.next_slot = self.next_slot.checked_add(1).expect("slot index overflow");
        slot
    }

    fn alloc_hasbit(&mut self) -> u16 {
        let bit = self.next_hasbit;
        self.next_hasbit = self.next_hasbit.checked_add(1).expect("hasbit index overflow");
        bit
    }
}
