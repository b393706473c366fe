//! The pool itself: append-only registry with name lookups.

use indexmap::IndexMap;
use prost::Message as _;
use prost_types::{FileDescriptorProto, FileDescriptorSet};

use crate::register::FileRegistration;
use crate::{EnumDef, EnumId, FileDef, FileId, MessageDef, MessageId, PoolError};

/// What a fully-qualified name resolves to.
#[derive(Clone, Copy, Debug)]
pub(crate) enum TypeEntry {
    Message(MessageId),
    Enum(EnumId),
}

/// Registry of message and enum definitions across registered schema files.
///
/// Build-once, read-many: `add_file` takes `&mut self`, every lookup is a
/// shared borrow. Definitions are never mutated or removed once registered.
#[derive(Default)]
pub struct DescriptorPool {
    pub(crate) files: Vec<FileDef>,
    pub(crate) messages: Vec<MessageDef>,
    pub(crate) enums: Vec<EnumDef>,
    pub(crate) types_by_name: IndexMap<String, TypeEntry>,
    pub(crate) files_by_name: IndexMap<String, FileId>,
}

impl DescriptorPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a serialized `FileDescriptorProto`.
    ///
    /// prost's transient decode allocations play the role of the original
    /// design's private scratch arena: nothing of the decoded proto survives
    /// the commit; registered definitions own their own storage.
    pub fn add_file(&mut self, bytes: &[u8]) -> Result<FileId, PoolError> {
        let proto = FileDescriptorProto::decode(bytes)?;
        self.add_file_proto(&proto)
    }

    /// Register an already-decoded file descriptor.
    ///
    /// All-or-nothing: on error the pool is left exactly as before the call.
    pub fn add_file_proto(&mut self, proto: &FileDescriptorProto) -> Result<FileId, PoolError> {
        let registration = FileRegistration::build(self, proto)?;
        Ok(registration.commit(self))
    }

    /// Register every file of a serialized `FileDescriptorSet`, in order.
    ///
    /// Transactional per file, not per set: files registered before a
    /// failing one stay registered.
    pub fn add_file_set(&mut self, bytes: &[u8]) -> Result<Vec<FileId>, PoolError> {
        let set = FileDescriptorSet::decode(bytes)?;
        let mut ids = Vec::with_capacity(set.file.len());
        for proto in &set.file {
            ids.push(self.add_file_proto(proto)?);
        }
        Ok(ids)
    }

    /// Exact-match lookup by fully-qualified dotted name
    /// (`"package.Outer.Inner"`).
    pub fn find_message_by_name(&self, full_name: &str) -> Option<&MessageDef> {
        match self.types_by_name.get(full_name)? {
            TypeEntry::Message(id) => Some(self.message(*id)),
            TypeEntry::Enum(_) => None,
        }
    }

    pub fn find_enum_by_name(&self, full_name: &str) -> Option<&EnumDef> {
        match self.types_by_name.get(full_name)? {
            TypeEntry::Enum(id) => Some(self.enum_def(*id)),
            TypeEntry::Message(_) => None,
        }
    }

    pub fn message(&self, id: MessageId) -> &MessageDef {
        &self.messages[id.index()]
    }

    pub fn enum_def(&self, id: EnumId) -> &EnumDef {
        &self.enums[id.index()]
    }

    pub fn file(&self, id: FileId) -> &FileDef {
        &self.files[id.index()]
    }

    /// Registered files, in registration order.
    pub fn files(&self) -> &[FileDef] {
        &self.files
    }

    /// Every registered message, in registration order.
    pub fn all_messages(&self) -> &[MessageDef] {
        &self.messages
    }
}
