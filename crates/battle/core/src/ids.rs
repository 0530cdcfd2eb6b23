//! Stable arena identifiers.
//!
//! Characters and abilities live in arenas owned by [`crate::Battle`] and are
//! never removed during a battle, so their ids double as indices. Modifiers use
//! these ids for their "already processed" bookkeeping instead of object
//! identity.

use std::fmt;

/// Index of a character inside a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterId(pub u32);

impl CharacterId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "char#{}", self.0)
    }
}

/// Index of an ability inside a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityId(pub u32);

impl AbilityId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for AbilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ability#{}", self.0)
    }
}

/// Handle to a buff attached to one character.
///
/// Unique within the owning character's buff list only; always pair it with the
/// [`CharacterId`] it was issued for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BuffId(pub u32);

/// Handle to one installed interceptor layer.
///
/// Issued by the battle when a layer is installed; the installer keeps it to
/// remove exactly its own layer later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(pub u64);
