//! Abilities and their execution entry points.
//!
//! Every ability has a *use* entry point. Multi-hit abilities additionally
//! expose a *hit* entry point that the use behavior calls once per hit per
//! target. Both entry points are [`InterceptorChain`]s, so modifiers can wrap
//! either one independently.

mod behavior;
mod chain;

pub use behavior::{Mend, MultiHit, SingleHit, Strike};
pub use chain::{AbilityBehavior, Interceptor, InterceptorChain, Next};

use std::rc::Rc;

use crate::ids::{AbilityId, CharacterId};

/// Damage type of an ability effect.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageKind {
    Physical,
    Fire,
    Frost,
    Arcane,
    /// Restores HP instead of removing it.
    Healing,
}

/// One typed damage (or healing) descriptor of an ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AbilityEffect {
    pub kind: DamageKind,
    pub amount: i32,
    /// Set when a modifier added the effect, so it can remove exactly its own.
    pub tag: Option<&'static str>,
}

impl AbilityEffect {
    pub const fn new(kind: DamageKind, amount: i32) -> Self {
        Self {
            kind,
            amount,
            tag: None,
        }
    }

    pub const fn physical(amount: i32) -> Self {
        Self::new(DamageKind::Physical, amount)
    }

    pub const fn healing(amount: i32) -> Self {
        Self::new(DamageKind::Healing, amount)
    }

    #[must_use]
    pub const fn tagged(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }
}

/// Which entry point of an ability an interceptor wraps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum EntryPoint {
    /// Whole ability use (`use(caster, targets)`).
    Use,
    /// Single hit of a multi-hit ability.
    Hit,
}

/// Arguments of one execution of an entry point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbilityCall {
    pub ability: AbilityId,
    pub caster: CharacterId,
    pub targets: Vec<CharacterId>,
}

impl AbilityCall {
    pub fn new(ability: AbilityId, caster: CharacterId, targets: Vec<CharacterId>) -> Self {
        Self {
            ability,
            caster,
            targets,
        }
    }

    /// First target, if any.
    pub fn target(&self) -> Option<CharacterId> {
        self.targets.first().copied()
    }
}

/// An ability owned by one character.
#[derive(Clone, Debug)]
pub struct Ability {
    pub(crate) id: AbilityId,
    pub(crate) owner: CharacterId,
    pub name: String,
    pub effects: Vec<AbilityEffect>,
    pub mana_cost: i32,
    pub cooldown: u32,
    pub current_cooldown: u32,
    hits: u32,
    pub(crate) use_chain: InterceptorChain,
    pub(crate) hit_chain: Option<InterceptorChain>,
}

impl Ability {
    /// Ability with a custom base behavior and no hit entry point.
    pub fn custom(name: impl Into<String>, behavior: Rc<dyn AbilityBehavior>) -> Self {
        Self {
            id: AbilityId(0),
            owner: CharacterId(0),
            name: name.into(),
            effects: Vec::new(),
            mana_cost: 0,
            cooldown: 0,
            current_cooldown: 0,
            hits: 1,
            use_chain: InterceptorChain::new(behavior),
            hit_chain: None,
        }
    }

    /// Single blow against every target.
    pub fn strike(name: impl Into<String>, effects: Vec<AbilityEffect>) -> Self {
        let mut ability = Self::custom(name, Rc::new(Strike));
        ability.effects = effects;
        ability
    }

    /// `hits` separate blows per target, each going through the hit entry point.
    pub fn multi_hit(name: impl Into<String>, hits: u32, effects: Vec<AbilityEffect>) -> Self {
        let mut ability = Self::custom(name, Rc::new(MultiHit));
        ability.effects = effects;
        ability.hits = hits.max(1);
        ability.hit_chain = Some(InterceptorChain::new(Rc::new(SingleHit)));
        ability
    }

    /// Heals every target by the ability's healing effects.
    pub fn mend(name: impl Into<String>, amount: i32) -> Self {
        let mut ability = Self::custom(name, Rc::new(Mend));
        ability.effects = vec![AbilityEffect::healing(amount)];
        ability
    }

    #[must_use]
    pub fn with_mana_cost(mut self, mana_cost: i32) -> Self {
        self.mana_cost = mana_cost;
        self
    }

    #[must_use]
    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn id(&self) -> AbilityId {
        self.id
    }

    pub fn owner(&self) -> CharacterId {
        self.owner
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    /// Damage of one blow: sum of non-healing effects.
    pub fn damage(&self) -> i32 {
        self.effects
            .iter()
            .filter(|e| e.kind != DamageKind::Healing)
            .map(|e| e.amount)
            .sum()
    }

    pub fn healing(&self) -> i32 {
        self.effects
            .iter()
            .filter(|e| e.kind == DamageKind::Healing)
            .map(|e| e.amount)
            .sum()
    }

    pub fn is_damaging(&self) -> bool {
        self.damage() > 0
    }

    pub fn has_hit_entry(&self) -> bool {
        self.hit_chain.is_some()
    }

    pub fn chain(&self, entry: EntryPoint) -> Option<&InterceptorChain> {
        match entry {
            EntryPoint::Use => Some(&self.use_chain),
            EntryPoint::Hit => self.hit_chain.as_ref(),
        }
    }

    pub(crate) fn chain_mut(&mut self, entry: EntryPoint) -> Option<&mut InterceptorChain> {
        match entry {
            EntryPoint::Use => Some(&mut self.use_chain),
            EntryPoint::Hit => self.hit_chain.as_mut(),
        }
    }

    /// Total installed layers across both entry points.
    pub fn interceptor_depth(&self) -> usize {
        self.use_chain.depth() + self.hit_chain.as_ref().map_or(0, InterceptorChain::depth)
    }

    /// Removes every effect carrying `tag`. Returns how many were removed.
    pub fn remove_tagged(&mut self, tag: &'static str) -> usize {
        let before = self.effects.len();
        self.effects.retain(|e| e.tag != Some(tag));
        before - self.effects.len()
    }
}
