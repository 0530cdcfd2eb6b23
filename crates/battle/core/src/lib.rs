//! Combat rules and the talent (modifier) contract shared by content and runtime.
//!
//! `battle-core` defines the battle arena (characters, abilities, buffs), the
//! damage pipeline, the ability interception chain and the [`modifier::Talent`]
//! lifecycle contract. Everything here is synchronous and deterministic given a
//! seed; collaborators such as the battle log or the visual-effects sink are
//! passed in explicitly through [`context::BattleContext`].
pub mod ability;
pub mod battle;
pub mod buff;
pub mod character;
pub mod combat;
pub mod config;
pub mod context;
pub mod error;
pub mod ids;
pub mod modifier;
pub mod rarity;
pub mod stage;
pub mod stats;

pub use ability::{
    Ability, AbilityBehavior, AbilityCall, AbilityEffect, DamageKind, EntryPoint, Interceptor,
    InterceptorChain, Next,
};
pub use battle::{Battle, Team};
pub use buff::{
    BuffEffect, BuffKind, BuffList, BuffOrigin, BuffRecord, DamageModifier, Duration,
    TurnTickable,
};
pub use character::Character;
pub use config::BattleConfig;
pub use context::{
    BattleContext, BattleLog, EffectSink, LogColor, MemoryBattleLog, NullEffects,
    RecordingEffects, VisualCue,
};
pub use error::{AbilityError, CoreError, ErrorSeverity, StageError};
pub use ids::{AbilityId, BuffId, CharacterId, LayerId};
pub use modifier::{
    HookResult, LifecycleEvent, Modifier, ModifierCatalog, ModifierError, Talent, TalentInfo,
    TurnSchedule,
};
pub use rarity::{Color, Rarity, RarityWeights};
pub use stage::Stage;
pub use stats::CharacterStats;
