//! Arena handles.
//!
//! Handles are plain indices into an arena's storage, biased by one so the
//! all-zero storage cell reads as "no handle" (a freshly created message has
//! every reference field null without any initialization pass). They carry
//! no generation tag: a handle is only meaningful against the arena that
//! issued it, and equality between handles from the same arena is identity.
//! Using a handle against a foreign arena is a contract violation that fails
//! fast on the out-of-range index rather than aliasing unrelated data
//! silently.

use std::num::NonZeroU32;

macro_rules! handle {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub struct $name(NonZeroU32);

        impl $name {
            pub fn new(index: usize) -> Self {
                let biased = u32::try_from(index)
                    .ok()
                    .and_then(|i| i.checked_add(1))
                    .expect("arena index overflow");
                Self(NonZeroU32::new(biased).unwrap())
            }

            pub fn index(self) -> usize {
                self.0.get() as usize - 1
            }

            pub(crate) fn bits(self) -> u64 {
                u64::from(self.0.get())
            }

            /// Rebuild from storage bits. Zero bits mean "no handle" and are
            /// the caller's responsibility to check first.
            pub(crate) fn from_bits(bits: u64) -> Self {
                Self(NonZeroU32::new(bits as u32).expect("null handle bits"))
            }
        }
    };
}

handle! {
    /// Reference to a message instance owned by an arena.
    MessageRef
}

handle! {
    /// Reference to a repeated-field array owned by an arena.
    ArrayRef
}

handle! {
    /// Reference to arena-interned string data.
    StrRef
}

handle! {
    /// Reference to arena-interned bytes data.
    BytesRef
}
