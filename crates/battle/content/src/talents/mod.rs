//! The standard talent roster.
//!
//! Talents fall into a few families:
//!
//! - **Armor** (`iron_skin`, `hardening`, `last_stand`, `guardian_spirit`): buffs
//!   attached to party members, some recomputed each turn.
//! - **Offense** (`berserker_blood`, `glass_cannon`, `pack_leader`): damage buffs.
//! - **Recovery** (`mana_spring`, `second_wind`): turn-driven restoration.
//! - **Interceptors** (`vampiric_edge`, `split_shot`, `quickened_mind`,
//!   `frost_crystals`, `arcane_efficiency`, `fickle_fate`): layers wrapped around
//!   party abilities.
//! - **Timed** (`frozen_time`, `runic_enchant`): effects on scheduled turns.
//!
//! Every talent cleans up what it installed in `on_battle_end`.

pub mod armor;
pub mod binding;
pub mod interceptors;
pub mod offense;
pub mod recovery;
pub mod timed;

use battle_core::ModifierCatalog;

pub use binding::{AbilityBindings, BuffSlots};
pub use interceptors::Wrapping;

/// Builds the catalog holding all 17 standard talents.
pub fn standard_catalog() -> ModifierCatalog {
    let mut catalog = ModifierCatalog::new();
    catalog
        .register(armor::IronSkin::INFO, armor::iron_skin)
        .register(recovery::ManaSpring::INFO, recovery::mana_spring)
        .register(interceptors::ArcaneEfficiency::INFO, interceptors::arcane_efficiency)
        .register(armor::Hardening::INFO, armor::hardening)
        .register(interceptors::VampiricEdge::INFO, interceptors::vampiric_edge)
        .register(interceptors::QuickenedMind::INFO, interceptors::quickened_mind)
        .register(offense::BerserkerBlood::INFO, offense::berserker_blood)
        .register(armor::LastStand::INFO, armor::last_stand)
        .register(interceptors::SplitShot::INFO, interceptors::split_shot)
        .register(interceptors::FickleFate::INFO, interceptors::fickle_fate)
        .register(recovery::SecondWind::INFO, recovery::second_wind)
        .register(interceptors::FrostCrystals::INFO, interceptors::frost_crystals)
        .register(offense::GlassCannon::INFO, offense::glass_cannon)
        .register(timed::RunicEnchant::INFO, timed::runic_enchant)
        .register(offense::PackLeader::INFO, offense::pack_leader)
        .register(timed::FrozenTime::INFO, timed::frozen_time)
        .register(armor::GuardianSpirit::INFO, armor::guardian_spirit);
    catalog
}

#[cfg(test)]
pub(crate) mod testing {
    //! Small arena shared by talent tests.

    use battle_core::{
        Ability, AbilityEffect, AbilityId, Battle, BattleContext, Character, CharacterId,
        CharacterStats, MemoryBattleLog, RecordingEffects, Stage, Team,
    };

    pub struct Arena {
        pub battle: Battle,
        pub log: MemoryBattleLog,
        pub effects: RecordingEffects,
        pub hero: CharacterId,
        pub ogre: CharacterId,
        pub goblin: CharacterId,
        pub slash: AbilityId,
        pub flurry: AbilityId,
    }

    impl Arena {
        pub fn new() -> Self {
            let mut battle = Battle::new(7);
            let hero = battle.add_character(Character::new(
                "Hero",
                Team::Party,
                CharacterStats::new(100, 50, 0),
            ));
            let ogre = battle.add_character(Character::new(
                "Ogre",
                Team::Enemy,
                CharacterStats::new(500, 0, 0),
            ));
            let goblin = battle.add_character(Character::new(
                "Goblin",
                Team::Enemy,
                CharacterStats::new(500, 0, 0),
            ));
            let slash = battle
                .add_ability(
                    hero,
                    Ability::strike("Slash", vec![AbilityEffect::physical(20)])
                        .with_mana_cost(8)
                        .with_cooldown(2),
                )
                .expect("hero exists");
            let flurry = battle
                .add_ability(
                    hero,
                    Ability::multi_hit("Flurry", 3, vec![AbilityEffect::physical(4)]),
                )
                .expect("hero exists");
            Self {
                battle,
                log: MemoryBattleLog::new(),
                effects: RecordingEffects::default(),
                hero,
                ogre,
                goblin,
                slash,
                flurry,
            }
        }

        pub fn cx(&mut self) -> BattleContext<'_> {
            BattleContext::new(&mut self.battle, &mut self.log, &mut self.effects, Stage::FIRST)
        }

        /// Advances the turn counter to `turn`.
        pub fn at_turn(&mut self, turn: u32) {
            while self.battle.turn() < turn {
                self.battle.advance_turn();
            }
        }
    }
}
