//! Buff records attached to characters.
//!
//! A [`BuffRecord`] is owned by the character it is attached to. Modifiers that
//! need to remove a buff later keep only the [`BuffId`] handle returned on
//! attach, keyed by the character's id.

mod effect;

pub use effect::{
    ArmorBonus, BuffEffect, BuffKind, Crystallized, DamageBoost, DamageModifier, Frozen, Shield,
    TurnTickable, Vulnerability,
};

use crate::ids::BuffId;

/// Remaining lifetime of a buff.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Duration {
    /// Expires after this many turn ticks.
    Turns(u32),
    /// Lasts until removed explicitly.
    Infinite,
}

impl Duration {
    /// Counts one tick down. Returns whether the buff is still alive.
    fn tick(&mut self) -> bool {
        match self {
            Duration::Turns(remaining) => {
                *remaining = remaining.saturating_sub(1);
                *remaining > 0
            }
            Duration::Infinite => true,
        }
    }

    /// Legacy numeric form: `-1` for infinite.
    pub fn as_turns(&self) -> i32 {
        match self {
            Duration::Turns(n) => i32::try_from(*n).unwrap_or(i32::MAX),
            Duration::Infinite => -1,
        }
    }
}

/// Whether the buff is one the buff display knows natively or a talent-defined one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum BuffOrigin {
    Builtin,
    Custom,
}

/// A status effect attached to a character.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuffRecord {
    pub name: String,
    pub description: String,
    pub origin: BuffOrigin,
    pub effect: BuffEffect,
    pub duration: Duration,
    pub icon: Option<String>,
    /// Identifier of the modifier that produced this buff, if any.
    pub source: Option<&'static str>,
}

impl BuffRecord {
    pub fn new(name: impl Into<String>, effect: BuffEffect) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            origin: BuffOrigin::Builtin,
            effect,
            duration: Duration::Infinite,
            icon: None,
            source: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn lasting(mut self, turns: u32) -> Self {
        self.duration = Duration::Turns(turns);
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Marks the buff as produced by a modifier (custom origin).
    #[must_use]
    pub fn from_source(mut self, source: &'static str) -> Self {
        self.source = Some(source);
        self.origin = BuffOrigin::Custom;
        self
    }

    pub fn kind(&self) -> BuffKind {
        self.effect.kind()
    }

    pub fn magnitude(&self) -> i32 {
        self.effect.magnitude()
    }

    /// One turn tick: capability update first, then duration countdown.
    pub fn update(&mut self) -> bool {
        let alive = match self.effect.tickable_mut() {
            Some(tickable) => tickable.update(),
            None => true,
        };
        let remaining = self.duration.tick();
        alive && remaining
    }
}

/// Buffs currently attached to one character, in attach order.
#[derive(Clone, Debug, Default)]
pub struct BuffList {
    entries: Vec<(BuffId, BuffRecord)>,
    next_id: u32,
}

impl BuffList {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, record: BuffRecord) -> BuffId {
        let id = BuffId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, record));
        id
    }

    pub(crate) fn remove(&mut self, id: BuffId) -> Option<BuffRecord> {
        let index = self.entries.iter().position(|(entry, _)| *entry == id)?;
        Some(self.entries.remove(index).1)
    }

    /// Ticks every buff, removing the ones that expire.
    ///
    /// Walks indices in reverse so removal never disturbs entries still to visit.
    pub(crate) fn tick(&mut self) -> Vec<BuffRecord> {
        let mut expired = Vec::new();
        for index in (0..self.entries.len()).rev() {
            if !self.entries[index].1.update() {
                expired.push(self.entries.remove(index).1);
            }
        }
        expired.reverse();
        expired
    }

    pub fn get(&self, id: BuffId) -> Option<&BuffRecord> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == id)
            .map(|(_, record)| record)
    }

    /// Handle of the buff of `kind` produced by `source`, if attached.
    pub fn find(&self, source: &'static str, kind: BuffKind) -> Option<BuffId> {
        self.entries
            .iter()
            .find(|(_, record)| record.source == Some(source) && record.kind() == kind)
            .map(|(id, _)| *id)
    }

    pub fn has_kind(&self, kind: BuffKind) -> bool {
        self.entries.iter().any(|(_, record)| record.kind() == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuffRecord> {
        self.entries.iter().map(|(_, record)| record)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn apply_damage_increase(&self, amount: i32) -> i32 {
        self.iter()
            .filter_map(|record| record.effect.damage_modifier())
            .fold(amount, |acc, modifier| modifier.apply_damage_increase(acc))
    }

    pub(crate) fn apply_damage_taken_increase(&self, amount: i32) -> i32 {
        self.iter()
            .filter_map(|record| record.effect.damage_modifier())
            .fold(amount, |acc, modifier| modifier.apply_damage_taken_increase(acc))
    }

    pub(crate) fn on_damage_taken(&mut self, amount: i32) -> i32 {
        self.entries
            .iter_mut()
            .filter_map(|(_, record)| record.effect.damage_modifier_mut())
            .fold(amount, |acc, modifier| modifier.on_damage_taken(acc))
    }
}
