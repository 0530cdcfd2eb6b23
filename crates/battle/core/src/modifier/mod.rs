//! The modifier (talent) contract.
//!
//! A [`Talent`] is the behavior: four lifecycle hooks that receive a
//! [`BattleContext`]. A [`Modifier`] wraps a talent with its identity, rarity
//! and activation flag. Dispatch always goes through [`Modifier::dispatch`],
//! which keeps an inactive modifier inert.
//!
//! # Hook contract
//!
//! - Hooks may fire more than once for the same logical event (turn start also
//!   serves as "catch characters that joined late"), so they must be idempotent.
//! - A hook whose preconditions are unmet (no living target, nothing to bind)
//!   returns `Ok(())`.
//! - Anything a talent installs (interceptor layers, buffs, added ability
//!   effects) must be removed again in `on_battle_end`.

mod catalog;
mod schedule;

pub use catalog::{CatalogEntry, ModifierCatalog, TalentFactory};
pub use schedule::TurnSchedule;

use std::fmt;

use crate::context::BattleContext;
use crate::error::{CoreError, ErrorSeverity};
use crate::ids::{AbilityId, CharacterId};
use crate::rarity::Rarity;

/// Result type of lifecycle hooks.
pub type HookResult = Result<(), ModifierError>;

/// Failure reported by a talent hook.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ModifierError {
    #[error("character {0} is not part of the battle")]
    MissingCharacter(CharacterId),

    #[error("ability {0} is not part of the battle")]
    MissingAbility(AbilityId),

    #[error("{talent}: {message}")]
    Failed {
        talent: &'static str,
        message: String,
    },
}

impl CoreError for ModifierError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingCharacter(_) => "MODIFIER_MISSING_CHARACTER",
            Self::MissingAbility(_) => "MODIFIER_MISSING_ABILITY",
            Self::Failed { .. } => "MODIFIER_FAILED",
        }
    }
}

/// Lifecycle events dispatched to modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum LifecycleEvent {
    BattleStart,
    TurnStart,
    TurnEnd,
    BattleEnd,
}

/// Behavior of a modifier.
pub trait Talent {
    fn on_battle_start(&mut self, _cx: &mut BattleContext<'_>) -> HookResult {
        Ok(())
    }

    fn on_turn_start(&mut self, _cx: &mut BattleContext<'_>) -> HookResult {
        Ok(())
    }

    fn on_turn_end(&mut self, _cx: &mut BattleContext<'_>) -> HookResult {
        Ok(())
    }

    fn on_battle_end(&mut self, _cx: &mut BattleContext<'_>) -> HookResult {
        Ok(())
    }
}

/// Identity and presentation data of a talent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TalentInfo {
    /// Stable identifier, also the persisted key.
    pub name: &'static str,
    pub description: &'static str,
    pub rarity: Rarity,
    /// Icon file name relative to the asset root.
    pub icon: Option<&'static str>,
}

impl TalentInfo {
    pub const fn new(name: &'static str, description: &'static str, rarity: Rarity) -> Self {
        Self {
            name,
            description,
            rarity,
            icon: None,
        }
    }

    #[must_use]
    pub const fn with_icon(mut self, icon: &'static str) -> Self {
        self.icon = Some(icon);
        self
    }
}

/// A talent plus its identity and activation state.
pub struct Modifier {
    info: TalentInfo,
    active: bool,
    talent: Box<dyn Talent>,
}

impl Modifier {
    /// Creates an inactive modifier.
    pub fn new(info: TalentInfo, talent: Box<dyn Talent>) -> Self {
        Self {
            info,
            active: false,
            talent,
        }
    }

    pub fn info(&self) -> &TalentInfo {
        &self.info
    }

    pub fn name(&self) -> &'static str {
        self.info.name
    }

    pub fn description(&self) -> &'static str {
        self.info.description
    }

    pub fn rarity(&self) -> Rarity {
        self.info.rarity
    }

    pub fn icon(&self) -> Option<&'static str> {
        self.info.icon
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Runs the hook for `event`. No-op while inactive.
    pub fn dispatch(&mut self, event: LifecycleEvent, cx: &mut BattleContext<'_>) -> HookResult {
        if !self.active {
            return Ok(());
        }
        match event {
            LifecycleEvent::BattleStart => self.talent.on_battle_start(cx),
            LifecycleEvent::TurnStart => self.talent.on_turn_start(cx),
            LifecycleEvent::TurnEnd => self.talent.on_turn_end(cx),
            LifecycleEvent::BattleEnd => self.talent.on_battle_end(cx),
        }
    }
}

impl fmt::Debug for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Modifier")
            .field("name", &self.info.name)
            .field("rarity", &self.info.rarity)
            .field("active", &self.active)
            .finish()
    }
}
