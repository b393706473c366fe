//! Registered definitions: files, messages, fields, enums.
//!
//! Definitions are owned by the pool and addressed by plain index ids;
//! dropping the pool invalidates every id it issued.

use std::collections::HashMap;

use stolyar_core::{FieldKind, MiniTable, MiniTableField};

macro_rules! def_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub struct $name(pub(crate) u32);

        impl $name {
            pub(crate) fn new(index: usize) -> Self {
                Self(u32::try_from(index).expect("pool index overflow"))
            }

            pub(crate) fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

def_id! {
    /// Id of a registered file.
    FileId
}

def_id! {
    /// Id of a registered message definition.
    MessageId
}

def_id! {
    /// Id of a registered enum definition.
    EnumId
}

/// One registered schema file.
#[derive(Debug)]
pub struct FileDef {
    pub(crate) name: String,
    pub(crate) package: String,
    /// Every message defined in this file, nested ones included.
    pub(crate) messages: Vec<MessageId>,
    pub(crate) enums: Vec<EnumId>,
}

impl FileDef {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn messages(&self) -> &[MessageId] {
        &self.messages
    }

    pub fn enums(&self) -> &[EnumId] {
        &self.enums
    }
}

/// One field of a message definition.
///
/// Schema-level metadata only; the storage layout lives in the owning
/// message's mini-table, keyed by field number.
#[derive(Debug)]
pub struct FieldDef {
    pub(crate) name: String,
    pub(crate) json_name: String,
    pub(crate) number: u32,
    pub(crate) kind: FieldKind,
    pub(crate) repeated: bool,
    pub(crate) message_type: Option<MessageId>,
    pub(crate) enum_type: Option<EnumId>,
}

impl FieldDef {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn json_name(&self) -> &str {
        &self.json_name
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn is_repeated(&self) -> bool {
        self.repeated
    }

    /// The referenced message type, for `FieldKind::Message` fields.
    pub fn message_type(&self) -> Option<MessageId> {
        self.message_type
    }

    /// The referenced enum type, for `FieldKind::Enum` fields.
    pub fn enum_type(&self) -> Option<EnumId> {
        self.enum_type
    }
}

/// A registered message definition plus its eagerly computed mini-table.
#[derive(Debug)]
pub struct MessageDef {
    pub(crate) full_name: String,
    pub(crate) name: String,
    /// Declaration order.
    pub(crate) fields: Vec<FieldDef>,
    pub(crate) minitable: MiniTable,
    /// Sorted (number, field index) pairs for binary search.
    pub(crate) by_number: Vec<(u32, usize)>,
    pub(crate) by_name: HashMap<String, usize>,
    pub(crate) by_json_name: HashMap<String, usize>,
}

impl MessageDef {
    /// Fully-qualified dotted name, e.g. `"pkg.Outer.Inner"`.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Short name, e.g. `"Inner"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Look up a field by wire number.
    pub fn field(&self, number: u32) -> Option<&FieldDef> {
        self.by_number
            .binary_search_by_key(&number, |(n, _)| *n)
            .ok()
            .map(|idx| &self.fields[self.by_number[idx].1])
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldDef> {
        self.by_name.get(name).map(|&idx| &self.fields[idx])
    }

    pub fn field_by_json_name(&self, json_name: &str) -> Option<&FieldDef> {
        self.by_json_name.get(json_name).map(|&idx| &self.fields[idx])
    }

    /// The layout table shared by every instance of this type. Always
    /// present; computed when the message was registered.
    pub fn minitable(&self) -> &MiniTable {
        &self.minitable
    }

    /// Layout entry for one of this message's fields.
    ///
    /// Never `None` for a `FieldDef` obtained from this definition.
    pub fn layout(&self, field: &FieldDef) -> &MiniTableField {
        self.minitable
            .find_field_by_number(field.number)
            .expect("field has no layout entry")
    }
}

/// A registered enum definition with name and number lookups both ways.
#[derive(Debug)]
pub struct EnumDef {
    pub(crate) full_name: String,
    pub(crate) name: String,
    /// Declaration order.
    pub(crate) values: Vec<(String, i32)>,
    pub(crate) by_name: HashMap<String, i32>,
    /// First declaration wins for aliased numbers.
    pub(crate) by_number: HashMap<i32, usize>,
}

impl EnumDef {
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[(String, i32)] {
        &self.values
    }

    pub fn number_by_name(&self, name: &str) -> Option<i32> {
        self.by_name.get(name).copied()
    }

    pub fn name_by_number(&self, number: i32) -> Option<&str> {
        self.by_number
            .get(&number)
            .map(|&idx| self.values[idx].0.as_str())
    }
}
