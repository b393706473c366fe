//! The arena: bulk ownership of all runtime message data.

use stolyar_core::{BytesRef, MessageRef, MiniTable, Slot, StrRef};

/// Arena budget exhausted.
///
/// Only returned by allocating operations, and only when the arena was built
/// with [`Arena::with_budget`]. An unbudgeted arena never reports this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("arena budget exhausted")]
pub struct ArenaFull;

pub(crate) struct MessageStorage {
    pub slots: Box<[Slot]>,
    pub hasbits: Box<[u32]>,
}

#[derive(Default)]
pub(crate) struct ArrayStorage {
    pub elems: Vec<Slot>,
}

/// Region allocator for message data.
///
/// Issues lightweight index handles; nothing is freed individually. Dropping
/// the arena invalidates every handle it issued at once. An optional byte
/// budget turns exhaustion into a reportable [`ArenaFull`] instead of an
/// unobservable allocator abort.
#[derive(Default)]
pub struct Arena {
    messages: Vec<MessageStorage>,
    arrays: Vec<ArrayStorage>,
    strings: Vec<Box<str>>,
    byte_blobs: Vec<Box<[u8]>>,
    used: usize,
    budget: Option<usize>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arena that refuses allocations once `bytes` of payload are resident.
    pub fn with_budget(bytes: usize) -> Self {
        Self {
            budget: Some(bytes),
            ..Self::default()
        }
    }

    /// Payload bytes allocated so far (storage cells and interned data;
    /// bookkeeping overhead is not counted).
    pub fn used(&self) -> usize {
        self.used
    }

    /// Create a zeroed message instance laid out per `minitable`.
    ///
    /// Every slot reads as the kind's zero value, every hasbit is clear, and
    /// every reference field is null.
    pub fn new_message(&mut self, minitable: &MiniTable) -> Result<MessageRef, ArenaFull> {
        let slots = minitable.slot_count() as usize;
        let words = minitable.hasbit_words() as usize;
        self.charge(slots * std::mem::size_of::<Slot>() + words * std::mem::size_of::<u32>())?;
        let handle = MessageRef::new(self.messages.len());
        self.messages.push(MessageStorage {
            slots: vec![Slot::ZERO; slots].into_boxed_slice(),
            hasbits: vec![0u32; words].into_boxed_slice(),
        });
        Ok(handle)
    }

    /// Intern string data; the returned handle is what string setters store.
    pub fn alloc_str(&mut self, value: &str) -> Result<StrRef, ArenaFull> {
        self.charge(value.len())?;
        let handle = StrRef::new(self.strings.len());
        self.strings.push(value.into());
        Ok(handle)
    }

    /// Read interned string data. Non-owning view; lives as long as the arena.
    pub fn str(&self, handle: StrRef) -> &str {
        &self.strings[handle.index()]
    }

    /// Intern bytes data.
    pub fn alloc_bytes(&mut self, value: &[u8]) -> Result<BytesRef, ArenaFull> {
        self.charge(value.len())?;
        let handle = BytesRef::new(self.byte_blobs.len());
        self.byte_blobs.push(value.into());
        Ok(handle)
    }

    /// Read interned bytes data.
    pub fn bytes(&self, handle: BytesRef) -> &[u8] {
        &self.byte_blobs[handle.index()]
    }

    pub(crate) fn msg(&self, handle: MessageRef) -> &MessageStorage {
        &self.messages[handle.index()]
    }

    pub(crate) fn msg_mut(&mut self, handle: MessageRef) -> &mut MessageStorage {
        &mut self.messages[handle.index()]
    }

    pub(crate) fn push_array(&mut self) -> Result<stolyar_core::ArrayRef, ArenaFull> {
        self.charge(std::mem::size_of::<ArrayStorage>())?;
        let handle = stolyar_core::ArrayRef::new(self.arrays.len());
        self.arrays.push(ArrayStorage::default());
        Ok(handle)
    }

    pub(crate) fn array(&self, handle: stolyar_core::ArrayRef) -> &ArrayStorage {
        &self.arrays[handle.index()]
    }

    pub(crate) fn array_mut(&mut self, handle: stolyar_core::ArrayRef) -> &mut ArrayStorage {
        &mut self.arrays[handle.index()]
    }

    pub(crate) fn charge(&mut self, bytes: usize) -> Result<(), ArenaFull> {
        let next = self.used.saturating_add(bytes);
        if let Some(budget) = self.budget
            && next > budget
        {
            return Err(ArenaFull);
        }
        self.used = next;
        Ok(())
    }
}
