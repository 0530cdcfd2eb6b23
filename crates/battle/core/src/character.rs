//! Combatants.

use crate::battle::Team;
use crate::buff::{BuffKind, BuffList, BuffRecord};
use crate::ids::{AbilityId, BuffId, CharacterId};
use crate::stats::CharacterStats;

/// A combatant in a battle.
///
/// Characters are owned by the battle arena and addressed by [`CharacterId`].
/// They own their buffs; attaching or detaching an armor buff keeps the
/// aggregate `stats.defense` in sync.
#[derive(Clone, Debug)]
pub struct Character {
    pub(crate) id: CharacterId,
    pub name: String,
    pub team: Team,
    pub stats: CharacterStats,
    pub(crate) buffs: BuffList,
    pub(crate) abilities: Vec<AbilityId>,
    pub(crate) summoned: bool,
}

impl Character {
    pub fn new(name: impl Into<String>, team: Team, stats: CharacterStats) -> Self {
        Self {
            id: CharacterId(0),
            name: name.into(),
            team,
            stats,
            buffs: BuffList::new(),
            abilities: Vec::new(),
            summoned: false,
        }
    }

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn is_alive(&self) -> bool {
        self.stats.hp > 0
    }

    /// Whether the character joined mid-battle (summoned companion).
    pub fn is_summoned(&self) -> bool {
        self.summoned
    }

    pub fn is_frozen(&self) -> bool {
        self.buffs.has_kind(BuffKind::Frozen)
    }

    pub fn abilities(&self) -> &[AbilityId] {
        &self.abilities
    }

    pub fn buffs(&self) -> &BuffList {
        &self.buffs
    }

    /// Restores HP up to the maximum. Returns the amount actually healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if !self.is_alive() || amount <= 0 {
            return 0;
        }
        let healed = amount.min(self.stats.max_hp - self.stats.hp).max(0);
        self.stats.hp += healed;
        healed
    }

    /// Removes HP, never below zero. Returns the HP actually lost.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let lost = amount.clamp(0, self.stats.hp.max(0));
        self.stats.hp -= lost;
        lost
    }

    /// Restores mana up to the maximum. Returns the amount restored.
    pub fn restore_mana(&mut self, amount: i32) -> i32 {
        let restored = amount.min(self.stats.max_mana - self.stats.mana).max(0);
        self.stats.mana += restored;
        restored
    }

    /// Attaches a buff and applies its aggregate stat contribution.
    pub fn add_buff(&mut self, record: BuffRecord) -> BuffId {
        self.stats.defense += record.effect.defense_delta();
        self.buffs.push(record)
    }

    /// Detaches a buff and reverts its aggregate stat contribution.
    ///
    /// Unknown handles (already expired or removed) are ignored.
    pub fn remove_buff(&mut self, id: BuffId) -> Option<BuffRecord> {
        let record = self.buffs.remove(id)?;
        self.stats.defense -= record.effect.defense_delta();
        Some(record)
    }

    /// Detaches the buff of the same kind from the same source, then attaches `record`.
    ///
    /// Keeps at most one current instance per logical kind per source.
    pub fn replace_buff(&mut self, record: BuffRecord) -> BuffId {
        if let Some(source) = record.source {
            if let Some(previous) = self.buffs.find(source, record.kind()) {
                self.remove_buff(previous);
            }
        }
        self.add_buff(record)
    }

    /// Ticks every buff and reverts the contribution of the ones that expired.
    pub fn tick_buffs(&mut self) -> Vec<BuffRecord> {
        let expired = self.buffs.tick();
        for record in &expired {
            self.stats.defense -= record.effect.defense_delta();
        }
        expired
    }
}
