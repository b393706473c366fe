//! The untyped storage cell.

/// A single 64-bit storage cell.
///
/// Every field kind round-trips through exactly these bits: floats via their
/// IEEE bit patterns (NaN payloads survive), `i32` sign-extended through
/// `u32`, handles in the low 32 bits. A slot has no kind tag; whoever reads
/// it must supply the field's declared kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Slot(u64);

const _: () = assert!(std::mem::size_of::<Slot>() == 8);

impl Slot {
    pub const ZERO: Self = Self(0);

    pub fn from_bool(v: bool) -> Self {
        Self(u64::from(v))
    }

    pub fn as_bool(self) -> bool {
        self.0 != 0
    }

    pub fn from_i32(v: i32) -> Self {
        Self(u64::from(v as u32))
    }

    pub fn as_i32(self) -> i32 {
        self.0 as u32 as i32
    }

    pub fn from_i64(v: i64) -> Self {
        Self(v as u64)
    }

    pub fn as_i64(self) -> i64 {
        self.0 as i64
    }

    pub fn from_u32(v: u32) -> Self {
        Self(u64::from(v))
    }

    pub fn as_u32(self) -> u32 {
        self.0 as u32
    }

    pub fn from_u64(v: u64) -> Self {
        Self(v)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }

    pub fn from_f32(v: f32) -> Self {
        Self(u64::from(v.to_bits()))
    }

    pub fn as_f32(self) -> f32 {
        f32::from_bits(self.0 as u32)
    }

    pub fn from_f64(v: f64) -> Self {
        Self(v.to_bits())
    }

    pub fn as_f64(self) -> f64 {
        f64::from_bits(self.0)
    }

    pub(crate) fn from_handle_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub(crate) fn handle_bits(self) -> u64 {
        self.0
    }
}
