#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core value and layout types for the Stolyar message runtime.
//!
//! Three layers, bottom-up:
//! - **Slot**: a single untyped 64-bit storage cell; interpretation always
//!   comes from field metadata, never from the cell itself
//! - **Value**: a kind-tagged transient carrier passed between accessor calls
//! - **MiniTable**: the precomputed per-message-type layout (slot indices,
//!   presence bits, field numbers) shared by every instance of that type

mod handle;
mod kind;
mod minitable;
mod slot;
mod value;

#[cfg(test)]
mod value_tests;

pub use handle::{ArrayRef, BytesRef, MessageRef, StrRef};
pub use kind::FieldKind;
pub use minitable::{MiniTable, MiniTableBuilder, MiniTableField, Presence};
pub use slot::Slot;
pub use value::Value;
