//! Per-file registration: two-phase build, then commit.
//!
//! Phase 1 walks the file's type tree collecting fully-qualified names and
//! assigning prospective ids, so fields may reference types declared later
//! in the same file. Phase 2 builds every definition and mini-table against
//! those names plus the pool's existing registry. Nothing touches the pool
//! until both phases succeed.

use std::collections::HashMap;

use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorProto};
use stolyar_core::{FieldKind, MiniTableBuilder};

use crate::names::to_json_name;
use crate::pool::{DescriptorPool, TypeEntry};
use crate::{EnumDef, EnumId, FieldDef, FileDef, FileId, MessageDef, MessageId, PoolError};

/// A fully-built file, ready to commit.
pub(crate) struct FileRegistration {
    file: FileDef,
    /// In id order, starting at the pool's current message count.
    messages: Vec<MessageDef>,
    enums: Vec<EnumDef>,
}

struct PendingMessage<'a> {
    full_name: String,
    name: String,
    descriptor: &'a DescriptorProto,
}

struct PendingEnum<'a> {
    full_name: String,
    name: String,
    descriptor: &'a EnumDescriptorProto,
}

impl FileRegistration {
    pub(crate) fn build(
        pool: &DescriptorPool,
        proto: &FileDescriptorProto,
    ) -> Result<Self, PoolError> {
        let file_name = proto.name.clone().ok_or(PoolError::MissingName)?;
        if pool.files_by_name.contains_key(&file_name) {
            return Err(PoolError::DuplicateFile(file_name));
        }
        let proto3 = proto.syntax() == "proto3";
        let package = proto.package().to_string();

        // Phase 1: names and prospective ids.
        let mut pending_messages = Vec::new();
        let mut pending_enums = Vec::new();
        collect_types(
            &package,
            &proto.message_type,
            &proto.enum_type,
            &mut pending_messages,
            &mut pending_enums,
        );

        let mut pending_names: HashMap<&str, TypeEntry> = HashMap::new();
        for (idx, pm) in pending_messages.iter().enumerate() {
            let id = MessageId::new(pool.messages.len() + idx);
            check_fresh(pool, &pending_names, &pm.full_name)?;
            pending_names.insert(&pm.full_name, TypeEntry::Message(id));
        }
        for (idx, pe) in pending_enums.iter().enumerate() {
            let id = EnumId::new(pool.enums.len() + idx);
            check_fresh(pool, &pending_names, &pe.full_name)?;
            pending_names.insert(&pe.full_name, TypeEntry::Enum(id));
        }

        // Phase 2: definitions and mini-tables.
        let messages = pending_messages
            .iter()
            .map(|pm| build_message(pool, &pending_names, pm, proto3))
            .collect::<Result<Vec<_>, _>>()?;
        let enums = pending_enums.iter().map(build_enum).collect();

        let file = FileDef {
            name: file_name,
            package,
            messages: (0..pending_messages.len())
                .map(|idx| MessageId::new(pool.messages.len() + idx))
                .collect(),
            enums: (0..pending_enums.len())
                .map(|idx| EnumId::new(pool.enums.len() + idx))
                .collect(),
        };

        Ok(Self {
            file,
            messages,
            enums,
        })
    }

    /// Move everything into the pool. Infallible; ids assigned in phase 1
    /// line up because definitions are pushed in the same order.
    pub(crate) fn commit(self, pool: &mut DescriptorPool) -> FileId {
        for def in self.messages {
            let id = MessageId::new(pool.messages.len());
            pool.types_by_name
                .insert(def.full_name.clone(), TypeEntry::Message(id));
            pool.messages.push(def);
        }
        for def in self.enums {
            let id = EnumId::new(pool.enums.len());
            pool.types_by_name
                .insert(def.full_name.clone(), TypeEntry::Enum(id));
            pool.enums.push(def);
        }
        let id = FileId::new(pool.files.len());
        pool.files_by_name.insert(self.file.name.clone(), id);
        pool.files.push(self.file);
        id
    }
}

fn check_fresh(
    pool: &DescriptorPool,
    pending: &HashMap<&str, TypeEntry>,
    full_name: &str,
) -> Result<(), PoolError> {
    if pool.types_by_name.contains_key(full_name) || pending.contains_key(full_name) {
        return Err(PoolError::DuplicateType(full_name.to_string()));
    }
    Ok(())
}

/// Depth-first walk over a scope's messages and enums, nested types
/// included, in declaration order.
fn collect_types<'a>(
    prefix: &str,
    messages: &'a [DescriptorProto],
    enums: &'a [EnumDescriptorProto],
    out_messages: &mut Vec<PendingMessage<'a>>,
    out_enums: &mut Vec<PendingEnum<'a>>,
) {
    for descriptor in messages {
        let name = descriptor.name().to_string();
        let full_name = qualify(prefix, &name);
        collect_types(
            &full_name,
            &descriptor.nested_type,
            &descriptor.enum_type,
            out_messages,
            out_enums,
        );
        out_messages.push(PendingMessage {
            full_name,
            name,
            descriptor,
        });
    }
    for descriptor in enums {
        let name = descriptor.name().to_string();
        out_enums.push(PendingEnum {
            full_name: qualify(prefix, &name),
            name,
            descriptor,
        });
    }
}

fn qualify(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

fn build_message(
    pool: &DescriptorPool,
    pending: &HashMap<&str, TypeEntry>,
    pm: &PendingMessage<'_>,
    proto3: bool,
) -> Result<MessageDef, PoolError> {
    let mut fields = Vec::with_capacity(pm.descriptor.field.len());
    let mut builder = MiniTableBuilder::new();
    let mut oneofs: Vec<Vec<(u32, FieldKind)>> =
        vec![Vec::new(); pm.descriptor.oneof_decl.len()];

    for f in &pm.descriptor.field {
        let path = format!("{}.{}", pm.full_name, f.name());
        let number = field_number(f, &path)?;
        let (kind, message_type, enum_type) = resolve_kind(pool, pending, f, &path)?;
        let repeated = f.label() == Label::Repeated;

        if repeated {
            builder.repeated(number, kind);
        } else if let Some(oneof) = real_oneof_index(f) {
            oneofs
                .get_mut(oneof)
                .ok_or(PoolError::UnsupportedField {
                    field: path.clone(),
                    reason: "oneof index out of range",
                })?
                .push((number, kind));
        } else {
            let explicit = !proto3 || f.proto3_optional();
            builder.singular(number, kind, explicit);
        }

        let json_name = if f.json_name.is_some() {
            f.json_name().to_string()
        } else {
            to_json_name(f.name())
        };
        fields.push(FieldDef {
            name: f.name().to_string(),
            json_name,
            number,
            kind,
            repeated,
            message_type,
            enum_type,
        });
    }

    for members in &oneofs {
        if !members.is_empty() {
            builder.oneof(members);
        }
    }

    let mut by_number: Vec<(u32, usize)> =
        fields.iter().enumerate().map(|(idx, f)| (f.number, idx)).collect();
    by_number.sort_unstable_by_key(|(n, _)| *n);
    let by_name = fields
        .iter()
        .enumerate()
        .map(|(idx, f)| (f.name.clone(), idx))
        .collect();
    let by_json_name = fields
        .iter()
        .enumerate()
        .map(|(idx, f)| (f.json_name.clone(), idx))
        .collect();

    Ok(MessageDef {
        full_name: pm.full_name.clone(),
        name: pm.name.clone(),
        fields,
        minitable: builder.build(),
        by_number,
        by_name,
        by_json_name,
    })
}

fn build_enum(pe: &PendingEnum<'_>) -> EnumDef {
    let values: Vec<(String, i32)> = pe
        .descriptor
        .value
        .iter()
        .map(|v| (v.name().to_string(), v.number()))
        .collect();
    let by_name = values.iter().map(|(n, v)| (n.clone(), *v)).collect();
    let mut by_number = HashMap::new();
    for (idx, (_, number)) in values.iter().enumerate() {
        by_number.entry(*number).or_insert(idx);
    }
    EnumDef {
        full_name: pe.full_name.clone(),
        name: pe.name.clone(),
        values,
        by_name,
        by_number,
    }
}

fn field_number(f: &FieldDescriptorProto, path: &str) -> Result<u32, PoolError> {
    match u32::try_from(f.number()) {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(PoolError::UnsupportedField {
            field: path.to_string(),
            reason: "field number must be positive",
        }),
    }
}

/// Oneof membership, with proto3 `optional` synthetic oneofs filtered out;
/// those fields are ordinary explicit-presence singulars.
fn real_oneof_index(f: &FieldDescriptorProto) -> Option<usize> {
    if f.proto3_optional() {
        return None;
    }
    f.oneof_index.map(|idx| idx as usize)
}

fn resolve_kind(
    pool: &DescriptorPool,
    pending: &HashMap<&str, TypeEntry>,
    f: &FieldDescriptorProto,
    path: &str,
) -> Result<(FieldKind, Option<MessageId>, Option<EnumId>), PoolError> {
    let kind = match f.r#type() {
        Type::Bool => FieldKind::Bool,
        Type::Int32 | Type::Sint32 | Type::Sfixed32 => FieldKind::Int32,
        Type::Int64 | Type::Sint64 | Type::Sfixed64 => FieldKind::Int64,
        Type::Uint32 | Type::Fixed32 => FieldKind::UInt32,
        Type::Uint64 | Type::Fixed64 => FieldKind::UInt64,
        Type::Float => FieldKind::Float,
        Type::Double => FieldKind::Double,
        Type::String => FieldKind::String,
        Type::Bytes => FieldKind::Bytes,
        Type::Enum => FieldKind::Enum,
        Type::Message => FieldKind::Message,
        Type::Group => {
            return Err(PoolError::UnsupportedField {
                field: path.to_string(),
                reason: "group fields are not supported",
            });
        }
    };

    match kind {
        FieldKind::Message => match resolve_name(pool, pending, f.type_name()) {
            Some(TypeEntry::Message(id)) => Ok((kind, Some(id), None)),
            _ => Err(PoolError::TypeNotFound {
                field: path.to_string(),
                type_name: f.type_name().to_string(),
            }),
        },
        FieldKind::Enum => match resolve_name(pool, pending, f.type_name()) {
            Some(TypeEntry::Enum(id)) => Ok((kind, None, Some(id))),
            _ => Err(PoolError::TypeNotFound {
                field: path.to_string(),
                type_name: f.type_name().to_string(),
            }),
        },
        _ => Ok((kind, None, None)),
    }
}

/// Exact-match lookup of a (possibly dot-prefixed) fully-qualified type
/// name, first against this file's pending types, then the pool.
fn resolve_name(
    pool: &DescriptorPool,
    pending: &HashMap<&str, TypeEntry>,
    type_name: &str,
) -> Option<TypeEntry> {
    let key = type_name.strip_prefix('.').unwrap_or(type_name);
    pending
        .get(key)
        .copied()
        .or_else(|| pool.types_by_name.get(key).copied())
}
