#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Arena-backed message instances and the reflective accessor layer.
//!
//! Everything variable-length (messages, repeated-field arrays, interned
//! strings and bytes) is owned by an [`Arena`] and freed in bulk when the
//! arena drops. Accessors are methods on the arena, dispatched by
//! [`MiniTableField`](stolyar_core::MiniTableField) layout metadata rather
//! than per-type generated code. Shared borrows read, the single mutable
//! borrow writes; the borrow checker enforces the readers-xor-writer rule
//! directly.

mod arena;
mod array;
mod message;

#[cfg(test)]
mod message_tests;

pub use arena::{Arena, ArenaFull};

// The handle and value types cross this crate's API constantly; re-export
// them so callers rarely need stolyar-core directly.
pub use stolyar_core::{ArrayRef, BytesRef, MessageRef, StrRef, Value};
