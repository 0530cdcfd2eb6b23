//! Bookkeeping shared by talents: which abilities they wrapped and which buffs
//! they attached.
//!
//! Both trackers are keyed by arena ids and remember only what the owning
//! talent installed itself, so releasing one talent never touches another
//! talent's layers or buffs.

use std::collections::HashMap;
use std::rc::Rc;

use battle_core::{
    AbilityId, Battle, BuffId, BuffRecord, CharacterId, EntryPoint, Interceptor, LayerId, Team,
};

/// Interceptor layers one talent installed, keyed by ability.
///
/// Doubles as the "already processed" set: an ability with an entry here is
/// never wrapped twice by the same talent.
#[derive(Debug)]
pub struct AbilityBindings {
    entry: EntryPoint,
    layers: HashMap<AbilityId, LayerId>,
}

impl AbilityBindings {
    pub fn new(entry: EntryPoint) -> Self {
        Self {
            entry,
            layers: HashMap::new(),
        }
    }

    pub fn is_bound(&self, ability: AbilityId) -> bool {
        self.layers.contains_key(&ability)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Wraps every party ability not bound yet. Returns how many were newly bound.
    ///
    /// Abilities lacking the entry point are skipped.
    pub fn bind_party(&mut self, battle: &mut Battle, interceptor: &Rc<dyn Interceptor>) -> usize {
        let mut bound = 0;
        for ability in battle.team_abilities(Team::Party) {
            if self.is_bound(ability) {
                continue;
            }
            if let Some(layer) = battle.intercept(ability, self.entry, Rc::clone(interceptor)) {
                self.layers.insert(ability, layer);
                bound += 1;
            }
        }
        bound
    }

    /// Removes every layer this tracker installed. Returns how many were removed.
    pub fn release(&mut self, battle: &mut Battle) -> usize {
        let entry = self.entry;
        self.layers
            .drain()
            .filter(|(ability, layer)| battle.remove_interceptor(*ability, entry, *layer))
            .count()
    }
}

/// Buffs one talent attached, keyed by character.
#[derive(Debug, Default)]
pub struct BuffSlots {
    slots: HashMap<CharacterId, BuffId>,
}

impl BuffSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, character: CharacterId) -> bool {
        self.slots.contains_key(&character)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Attaches a buff to `character` unless this tracker already did.
    ///
    /// Returns whether a buff was attached.
    pub fn ensure(
        &mut self,
        battle: &mut Battle,
        character: CharacterId,
        make: impl FnOnce() -> BuffRecord,
    ) -> bool {
        if self.contains(character) {
            return false;
        }
        let Some(target) = battle.character_mut(character) else {
            return false;
        };
        let id = target.add_buff(make());
        self.slots.insert(character, id);
        true
    }

    /// Detaches the previous instance (reverting its stat contribution), then
    /// attaches `record`.
    pub fn replace(
        &mut self,
        battle: &mut Battle,
        character: CharacterId,
        record: BuffRecord,
    ) -> Option<BuffId> {
        self.detach(battle, character);
        let id = battle.character_mut(character)?.add_buff(record);
        self.slots.insert(character, id);
        Some(id)
    }

    /// Detaches this tracker's buff from `character`, if still attached.
    pub fn detach(&mut self, battle: &mut Battle, character: CharacterId) -> Option<BuffRecord> {
        let id = self.slots.remove(&character)?;
        battle.character_mut(character)?.remove_buff(id)
    }

    /// Detaches every buff and forgets all characters.
    pub fn release(&mut self, battle: &mut Battle) -> usize {
        let characters: Vec<CharacterId> = self.slots.keys().copied().collect();
        characters
            .into_iter()
            .filter_map(|character| self.detach(battle, character))
            .count()
    }
}
