//! Encounter rosters loaded from RON.

use std::path::Path;

use battle_core::{
    Ability, AbilityEffect, Battle, Character, CharacterId, CharacterStats, DamageKind, Team,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

const SAMPLE: &str = include_str!("../../data/encounters/sample.ron");

/// One ability in a roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilitySpec {
    Strike {
        name: String,
        damage: i32,
        #[serde(default)]
        kind: Option<DamageKind>,
        #[serde(default)]
        mana_cost: i32,
        #[serde(default)]
        cooldown: u32,
    },
    MultiHit {
        name: String,
        hits: u32,
        damage: i32,
        #[serde(default)]
        mana_cost: i32,
        #[serde(default)]
        cooldown: u32,
    },
    Mend {
        name: String,
        amount: i32,
        #[serde(default)]
        mana_cost: i32,
        #[serde(default)]
        cooldown: u32,
    },
}

impl AbilitySpec {
    pub fn build(&self) -> Ability {
        match self {
            Self::Strike {
                name,
                damage,
                kind,
                mana_cost,
                cooldown,
            } => {
                let effect = AbilityEffect::new(kind.unwrap_or(DamageKind::Physical), *damage);
                Ability::strike(name.clone(), vec![effect])
                    .with_mana_cost(*mana_cost)
                    .with_cooldown(*cooldown)
            }
            Self::MultiHit {
                name,
                hits,
                damage,
                mana_cost,
                cooldown,
            } => Ability::multi_hit(name.clone(), *hits, vec![AbilityEffect::physical(*damage)])
                .with_mana_cost(*mana_cost)
                .with_cooldown(*cooldown),
            Self::Mend {
                name,
                amount,
                mana_cost,
                cooldown,
            } => Ability::mend(name.clone(), *amount)
                .with_mana_cost(*mana_cost)
                .with_cooldown(*cooldown),
        }
    }
}

/// One combatant in a roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSpec {
    pub name: String,
    pub max_hp: i32,
    #[serde(default)]
    pub max_mana: i32,
    #[serde(default)]
    pub defense: i32,
    #[serde(default)]
    pub abilities: Vec<AbilitySpec>,
}

impl CharacterSpec {
    fn character(&self, team: Team) -> Character {
        Character::new(
            self.name.clone(),
            team,
            CharacterStats::new(self.max_hp, self.max_mana, self.defense),
        )
    }

    fn equip(&self, battle: &mut Battle, id: CharacterId) {
        for ability in &self.abilities {
            battle.add_ability(id, ability.build());
        }
    }

    pub fn spawn(&self, battle: &mut Battle, team: Team) -> CharacterId {
        let id = battle.add_character(self.character(team));
        self.equip(battle, id);
        id
    }

    /// Adds the character as a late-joining summon.
    pub fn summon(&self, battle: &mut Battle, team: Team) -> CharacterId {
        let id = battle.summon(self.character(team));
        self.equip(battle, id);
        id
    }
}

/// A party ally that joins mid-battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummonSpec {
    pub turn: u32,
    pub character: CharacterSpec,
}

/// A full encounter: both sides plus scheduled party summons.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterSpec {
    pub name: String,
    pub party: Vec<CharacterSpec>,
    pub enemies: Vec<CharacterSpec>,
    #[serde(default)]
    pub summons: Vec<SummonSpec>,
}

impl EncounterSpec {
    /// Places both sides into `battle`.
    pub fn spawn(&self, battle: &mut Battle) -> Encounter {
        let party = self.party.iter().map(|c| c.spawn(battle, Team::Party)).collect();
        let enemies = self.enemies.iter().map(|c| c.spawn(battle, Team::Enemy)).collect();
        Encounter {
            party,
            enemies,
            pending: self.summons.clone(),
        }
    }
}

/// A spawned encounter.
#[derive(Clone, Debug)]
pub struct Encounter {
    pub party: Vec<CharacterId>,
    pub enemies: Vec<CharacterId>,
    pending: Vec<SummonSpec>,
}

impl Encounter {
    /// Summons every ally scheduled for `turn` or earlier.
    pub fn summon_due(&mut self, battle: &mut Battle, turn: u32) -> Vec<CharacterId> {
        let (due, pending): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.pending).into_iter().partition(|s| s.turn <= turn);
        self.pending = pending;
        due.iter()
            .map(|s| {
                let id = s.character.summon(battle, Team::Party);
                self.party.push(id);
                id
            })
            .collect()
    }

    pub fn pending_summons(&self) -> usize {
        self.pending.len()
    }
}

/// Loader for [`EncounterSpec`] from RON files.
pub struct EncounterLoader;

impl EncounterLoader {
    pub fn load(path: &Path) -> LoadResult<EncounterSpec> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EncounterSpec> {
        let spec: EncounterSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter RON: {}", e))?;
        if spec.party.is_empty() || spec.enemies.is_empty() {
            anyhow::bail!("Encounter '{}' needs at least one member per side", spec.name);
        }
        Ok(spec)
    }

    /// The bundled sample encounter.
    pub fn sample() -> LoadResult<EncounterSpec> {
        Self::parse(SAMPLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_encounter_parses() {
        let spec = EncounterLoader::sample().unwrap();
        assert!(!spec.party.is_empty());
        assert!(!spec.enemies.is_empty());
        assert!(!spec.summons.is_empty());
    }

    #[test]
    fn spawn_places_both_sides() {
        let spec = EncounterLoader::sample().unwrap();
        let mut battle = Battle::new(1);
        let encounter = spec.spawn(&mut battle);

        assert_eq!(encounter.party.len(), spec.party.len());
        assert_eq!(battle.living(Team::Enemy).len(), spec.enemies.len());
        assert!(!battle.team_abilities(Team::Party).is_empty());
    }

    #[test]
    fn summons_join_on_their_turn() {
        let spec = EncounterLoader::sample().unwrap();
        let mut battle = Battle::new(1);
        let mut encounter = spec.spawn(&mut battle);
        let due_turn = spec.summons[0].turn;

        assert!(encounter.summon_due(&mut battle, due_turn - 1).is_empty());
        let joined = encounter.summon_due(&mut battle, due_turn);
        assert_eq!(joined.len(), 1);
        assert!(battle.character(joined[0]).unwrap().is_summoned());
        assert_eq!(encounter.pending_summons(), spec.summons.len() - 1);
    }

    #[test]
    fn one_sided_encounter_is_rejected() {
        let ron = r#"EncounterSpec(name: "empty", party: [], enemies: [])"#;
        assert!(EncounterLoader::parse(ron).is_err());
    }
}
