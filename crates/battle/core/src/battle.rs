//! Battle arena: characters, abilities, turn counter and the combat RNG.
//!
//! Characters and abilities are stored in arenas and never removed while the
//! battle lasts, so [`CharacterId`] and [`AbilityId`] stay valid as indices.

use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ability::{Ability, AbilityCall, EntryPoint, Interceptor};
use crate::buff::BuffRecord;
use crate::character::Character;
use crate::combat;
use crate::error::AbilityError;
use crate::ids::{AbilityId, CharacterId, LayerId};

/// Side of the battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Team {
    /// The player's side; talents target this team.
    Party,
    Enemy,
}

impl Team {
    pub const fn opponent(self) -> Self {
        match self {
            Team::Party => Team::Enemy,
            Team::Enemy => Team::Party,
        }
    }
}

/// State of one battle.
#[derive(Debug)]
pub struct Battle {
    characters: Vec<Character>,
    abilities: Vec<Ability>,
    turn: u32,
    next_layer: u64,
    rng: StdRng,
}

impl Battle {
    pub fn new(seed: u64) -> Self {
        Self {
            characters: Vec::new(),
            abilities: Vec::new(),
            turn: 0,
            next_layer: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    // ===== roster =====

    /// Adds a character present from the start of the battle.
    pub fn add_character(&mut self, mut character: Character) -> CharacterId {
        let id = CharacterId(self.characters.len() as u32);
        character.id = id;
        self.characters.push(character);
        id
    }

    /// Adds a character mid-battle (summoned companion).
    pub fn summon(&mut self, mut character: Character) -> CharacterId {
        character.summoned = true;
        self.add_character(character)
    }

    /// Gives `ability` to `owner`. Returns `None` when the owner does not exist.
    pub fn add_ability(&mut self, owner: CharacterId, mut ability: Ability) -> Option<AbilityId> {
        let id = AbilityId(self.abilities.len() as u32);
        let character = self.characters.get_mut(owner.index())?;
        character.abilities.push(id);
        ability.id = id;
        ability.owner = owner;
        self.abilities.push(ability);
        Some(id)
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(id.index())
    }

    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(id.index())
    }

    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }

    pub fn ability(&self, id: AbilityId) -> Option<&Ability> {
        self.abilities.get(id.index())
    }

    pub fn ability_mut(&mut self, id: AbilityId) -> Option<&mut Ability> {
        self.abilities.get_mut(id.index())
    }

    pub fn abilities(&self) -> impl Iterator<Item = &Ability> {
        self.abilities.iter()
    }

    pub fn is_alive(&self, id: CharacterId) -> bool {
        self.character(id).is_some_and(Character::is_alive)
    }

    /// Every member of `team`, living or not, in arena order.
    pub fn members(&self, team: Team) -> Vec<CharacterId> {
        self.characters
            .iter()
            .filter(|c| c.team == team)
            .map(|c| c.id)
            .collect()
    }

    /// Living members of `team`.
    pub fn living(&self, team: Team) -> Vec<CharacterId> {
        self.characters
            .iter()
            .filter(|c| c.team == team && c.is_alive())
            .map(|c| c.id)
            .collect()
    }

    /// Living opponents of `id`.
    pub fn opponents_of(&self, id: CharacterId) -> Vec<CharacterId> {
        match self.character(id) {
            Some(c) => self.living(c.team.opponent()),
            None => Vec::new(),
        }
    }

    /// Abilities owned by members of `team`.
    pub fn team_abilities(&self, team: Team) -> Vec<AbilityId> {
        self.abilities
            .iter()
            .filter(|a| self.character(a.owner).is_some_and(|c| c.team == team))
            .map(|a| a.id)
            .collect()
    }

    // ===== turns =====

    /// Current turn, 1-based. Zero before the first turn starts.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn advance_turn(&mut self) -> u32 {
        self.turn += 1;
        self.turn
    }

    /// Ticks every character's buffs. Returns expired buffs with their owners.
    pub fn tick_buffs(&mut self) -> Vec<(CharacterId, BuffRecord)> {
        let mut expired = Vec::new();
        for character in &mut self.characters {
            let id = character.id;
            expired.extend(character.tick_buffs().into_iter().map(|b| (id, b)));
        }
        expired
    }

    /// Counts every ability's cooldown down by one.
    pub fn tick_cooldowns(&mut self) {
        for ability in &mut self.abilities {
            ability.current_cooldown = ability.current_cooldown.saturating_sub(1);
        }
    }

    // ===== randomness =====

    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Returns true with `chance` percent probability.
    pub fn roll_percent(&mut self, chance: u32) -> bool {
        chance > 0 && self.rng.gen_range(0..100) < chance
    }

    // ===== abilities =====

    /// Checks whether `call` may run right now.
    pub fn can_use(&self, call: &AbilityCall) -> Result<(), AbilityError> {
        let ability = self
            .ability(call.ability)
            .ok_or(AbilityError::UnknownAbility(call.ability))?;
        let caster = self
            .character(call.caster)
            .ok_or(AbilityError::UnknownCaster(call.caster))?;
        if !caster.is_alive() {
            return Err(AbilityError::CasterDown(call.caster));
        }
        if caster.is_frozen() {
            return Err(AbilityError::Frozen(call.caster));
        }
        if ability.current_cooldown > 0 {
            return Err(AbilityError::OnCooldown {
                ability: call.ability,
                remaining: ability.current_cooldown,
            });
        }
        if caster.stats.mana < ability.mana_cost {
            return Err(AbilityError::NotEnoughMana {
                needed: ability.mana_cost,
                available: caster.stats.mana,
            });
        }
        Ok(())
    }

    /// Validates `call`, pays its mana cost and starts its cooldown.
    ///
    /// Returns the per-blow damage of the ability.
    pub fn begin_use(&mut self, call: &AbilityCall) -> Result<i32, AbilityError> {
        self.can_use(call)?;
        let (mana_cost, cooldown, damage) = {
            let ability = &self.abilities[call.ability.index()];
            (ability.mana_cost, ability.cooldown, ability.damage())
        };
        self.characters[call.caster.index()].stats.mana -= mana_cost;
        self.abilities[call.ability.index()].current_cooldown = cooldown;
        Ok(damage)
    }

    /// Runs the damage pipeline from `attacker` onto `target`.
    ///
    /// Returns the HP the target actually lost.
    pub fn deal_damage(&mut self, attacker: CharacterId, target: CharacterId, base: i32) -> i32 {
        if base <= 0 {
            return 0;
        }
        let amount = combat::outgoing(self.character(attacker), base);
        match self.character_mut(target) {
            Some(target) => combat::receive(target, amount),
            None => 0,
        }
    }

    // ===== interception =====

    /// Installs `interceptor` as the outermost layer of an entry point.
    ///
    /// Returns `None` when the ability does not exist or lacks that entry point.
    pub fn intercept(
        &mut self,
        ability: AbilityId,
        entry: EntryPoint,
        interceptor: Rc<dyn Interceptor>,
    ) -> Option<LayerId> {
        let chain = self.abilities.get_mut(ability.index())?.chain_mut(entry)?;
        let id = LayerId(self.next_layer);
        self.next_layer += 1;
        chain.push(id, interceptor);
        Some(id)
    }

    /// Removes one previously installed layer. Returns whether it was found.
    pub fn remove_interceptor(
        &mut self,
        ability: AbilityId,
        entry: EntryPoint,
        layer: LayerId,
    ) -> bool {
        self.abilities
            .get_mut(ability.index())
            .and_then(|a| a.chain_mut(entry))
            .is_some_and(|chain| chain.remove(layer))
    }

    /// Total installed layers across all abilities.
    pub fn interceptor_count(&self) -> usize {
        self.abilities.iter().map(Ability::interceptor_depth).sum()
    }

    /// Drops every installed layer. Returns how many were removed.
    pub fn strip_interceptors(&mut self) -> usize {
        let mut removed = 0;
        for ability in &mut self.abilities {
            removed += ability.use_chain.clear();
            if let Some(hit) = ability.hit_chain.as_mut() {
                removed += hit.clear();
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::AbilityEffect;
    use crate::buff::{BuffEffect, Frozen};
    use crate::stats::CharacterStats;

    fn arena() -> (Battle, CharacterId, CharacterId, AbilityId) {
        let mut battle = Battle::new(7);
        let hero = battle.add_character(Character::new(
            "Hero",
            Team::Party,
            CharacterStats::new(100, 20, 0),
        ));
        let slime = battle.add_character(Character::new(
            "Slime",
            Team::Enemy,
            CharacterStats::new(50, 0, 0),
        ));
        let slash = battle
            .add_ability(
                hero,
                Ability::strike("Slash", vec![AbilityEffect::physical(10)])
                    .with_mana_cost(5)
                    .with_cooldown(2),
            )
            .unwrap();
        (battle, hero, slime, slash)
    }

    #[test]
    fn begin_use_pays_costs() {
        let (mut battle, hero, slime, slash) = arena();
        let call = AbilityCall::new(slash, hero, vec![slime]);
        assert_eq!(battle.begin_use(&call), Ok(10));
        assert_eq!(battle.character(hero).unwrap().stats.mana, 15);
        assert_eq!(
            battle.begin_use(&call),
            Err(AbilityError::OnCooldown {
                ability: slash,
                remaining: 2
            })
        );
        battle.tick_cooldowns();
        battle.tick_cooldowns();
        assert!(battle.can_use(&call).is_ok());
    }

    #[test]
    fn frozen_casters_cannot_act() {
        let (mut battle, hero, slime, slash) = arena();
        battle
            .character_mut(hero)
            .unwrap()
            .add_buff(BuffRecord::new("Frozen", BuffEffect::Frozen(Frozen)).lasting(1));
        let call = AbilityCall::new(slash, hero, vec![slime]);
        assert_eq!(battle.can_use(&call), Err(AbilityError::Frozen(hero)));
        battle.tick_buffs();
        assert!(battle.can_use(&call).is_ok());
    }

    #[test]
    fn summons_are_flagged_and_join_their_team() {
        let (mut battle, _, _, _) = arena();
        let wolf =
            battle.summon(Character::new("Wolf", Team::Party, CharacterStats::new(30, 0, 0)));
        assert!(battle.character(wolf).unwrap().is_summoned());
        assert_eq!(battle.living(Team::Party).len(), 2);
    }

    #[test]
    fn team_abilities_follow_owner_team() {
        let (battle, _, _, slash) = arena();
        assert_eq!(battle.team_abilities(Team::Party), vec![slash]);
        assert!(battle.team_abilities(Team::Enemy).is_empty());
    }
}
