//! Common error infrastructure for battle-core.
//!
//! Domain errors live next to the code that raises them ([`AbilityError`] for
//! ability use, [`StageError`] for stage numbering, and
//! [`crate::modifier::ModifierError`] for talent hooks). They all implement
//! [`CoreError`] so callers can decide how loudly to report them.

use crate::ids::{AbilityId, CharacterId};

/// Severity level of an error, used for logging and recovery decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Expected during normal play (ability on cooldown, caster frozen).
    Recoverable,

    /// Invalid input that should be rejected without retry.
    ///
    /// Examples: unknown ability id, stage number out of range
    Validation,

    /// Unexpected state inconsistency; indicates a bug.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all battle-core errors.
pub trait CoreError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Reasons an ability could not be used.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AbilityError {
    #[error("ability {0} does not exist")]
    UnknownAbility(AbilityId),

    #[error("caster {0} does not exist")]
    UnknownCaster(CharacterId),

    #[error("caster {0} is down")]
    CasterDown(CharacterId),

    #[error("caster {0} is frozen")]
    Frozen(CharacterId),

    #[error("ability {ability} is cooling down ({remaining} turns left)")]
    OnCooldown { ability: AbilityId, remaining: u32 },

    #[error("not enough mana: need {needed}, have {available}")]
    NotEnoughMana { needed: i32, available: i32 },
}

impl CoreError for AbilityError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownAbility(_) | Self::UnknownCaster(_) => ErrorSeverity::Validation,
            Self::CasterDown(_)
            | Self::Frozen(_)
            | Self::OnCooldown { .. }
            | Self::NotEnoughMana { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownAbility(_) => "ABILITY_UNKNOWN",
            Self::UnknownCaster(_) => "ABILITY_UNKNOWN_CASTER",
            Self::CasterDown(_) => "ABILITY_CASTER_DOWN",
            Self::Frozen(_) => "ABILITY_CASTER_FROZEN",
            Self::OnCooldown { .. } => "ABILITY_ON_COOLDOWN",
            Self::NotEnoughMana { .. } => "ABILITY_NOT_ENOUGH_MANA",
        }
    }
}

/// Invalid stage numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StageError {
    #[error("stage {number} is outside the run (expected 1..=5)")]
    OutOfRange { number: u8 },
}

impl CoreError for StageError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "STAGE_OUT_OF_RANGE"
    }
}
