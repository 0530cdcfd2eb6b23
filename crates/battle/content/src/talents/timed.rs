//! Talents that fire on scheduled turns.

use std::collections::HashSet;

use battle_core::buff::Frozen;
use battle_core::{
    AbilityEffect, AbilityId, BattleContext, BuffEffect, BuffRecord, DamageKind, HookResult,
    LogColor, Rarity, Talent, TalentInfo, Team, TurnSchedule, VisualCue,
};

// ===== frozen_time =====

/// Freezes every living enemy on a fixed set of turns.
#[derive(Debug)]
pub struct FrozenTime {
    schedule: TurnSchedule,
}

impl Default for FrozenTime {
    fn default() -> Self {
        Self {
            schedule: TurnSchedule::on_turns([2, 5, 10, 20, 30]),
        }
    }
}

impl FrozenTime {
    pub const NAME: &'static str = "frozen_time";
    pub const INFO: TalentInfo = TalentInfo::new(
        Self::NAME,
        "On turns 2, 5, 10, 20 and 30, all enemies are frozen for a turn.",
        Rarity::Legendary,
    )
    .with_icon("frozen_time.png");
}

impl Talent for FrozenTime {
    fn on_turn_start(&mut self, cx: &mut BattleContext<'_>) -> HookResult {
        if !self.schedule.fires_on(cx.battle.turn()) {
            return Ok(());
        }
        let enemies = cx.battle.living(Team::Enemy);
        for &id in &enemies {
            let record = BuffRecord::new("Frozen", BuffEffect::Frozen(Frozen))
                .with_description("Cannot act")
                .lasting(1)
                .from_source(Self::NAME);
            if let Some(enemy) = cx.battle.character_mut(id) {
                enemy.replace_buff(record);
                cx.cue(VisualCue::Freeze { target: id });
            }
        }
        if !enemies.is_empty() {
            cx.log(
                format!("Time freezes around {} enemies", enemies.len()),
                LogColor::Talent,
            );
        }
        Ok(())
    }
}

pub fn frozen_time() -> Box<dyn Talent> {
    Box::new(FrozenTime::default())
}

// ===== runic_enchant =====

/// Adds an arcane rune to every party ability on scheduled turns.
#[derive(Debug)]
pub struct RunicEnchant {
    schedule: TurnSchedule,
    enchanted: HashSet<AbilityId>,
    last_fired: Option<u32>,
}

impl Default for RunicEnchant {
    fn default() -> Self {
        Self {
            schedule: TurnSchedule::on_turn_indices([9, 19, 24, 34, 44]).then_every(10),
            enchanted: HashSet::new(),
            last_fired: None,
        }
    }
}

impl RunicEnchant {
    pub const NAME: &'static str = "runic_enchant";
    pub const RUNE_DAMAGE: i32 = 3;
    pub const INFO: TalentInfo = TalentInfo::new(
        Self::NAME,
        "On turns 10, 20, 25, 35, 45 and every 10 after, party abilities gain +3 arcane damage.",
        Rarity::Epic,
    )
    .with_icon("runic_enchant.png");

    pub fn rune() -> AbilityEffect {
        AbilityEffect::new(DamageKind::Arcane, Self::RUNE_DAMAGE).tagged(Self::NAME)
    }
}

impl Talent for RunicEnchant {
    fn on_turn_start(&mut self, cx: &mut BattleContext<'_>) -> HookResult {
        let turn = cx.battle.turn();
        if !self.schedule.fires_on(turn) || self.last_fired == Some(turn) {
            return Ok(());
        }
        self.last_fired = Some(turn);
        let abilities = cx.battle.team_abilities(Team::Party);
        for &id in &abilities {
            if let Some(ability) = cx.battle.ability_mut(id) {
                ability.effects.push(Self::rune());
                self.enchanted.insert(id);
                cx.cue(VisualCue::Enchant { ability: id });
            }
        }
        if !abilities.is_empty() {
            cx.log("Runes flare across the party's abilities", LogColor::Talent);
        }
        Ok(())
    }

    fn on_battle_end(&mut self, cx: &mut BattleContext<'_>) -> HookResult {
        self.last_fired = None;
        for id in self.enchanted.drain() {
            if let Some(ability) = cx.battle.ability_mut(id) {
                ability.remove_tagged(Self::NAME);
            }
        }
        Ok(())
    }
}

pub fn runic_enchant() -> Box<dyn Talent> {
    Box::new(RunicEnchant::default())
}

#[cfg(test)]
mod tests {
    use battle_core::BuffKind;

    use super::*;
    use crate::talents::testing::Arena;

    fn runes(arena: &Arena) -> usize {
        arena
            .battle
            .ability(arena.slash)
            .unwrap()
            .effects
            .iter()
            .filter(|e| e.tag == Some(RunicEnchant::NAME))
            .count()
    }

    #[test]
    fn frozen_time_freezes_enemies_on_listed_turns() {
        let mut arena = Arena::new();
        let mut talent = FrozenTime::default();

        arena.at_turn(1);
        talent.on_turn_start(&mut arena.cx()).unwrap();
        assert!(!arena.battle.character(arena.ogre).unwrap().is_frozen());

        arena.at_turn(2);
        talent.on_turn_start(&mut arena.cx()).unwrap();
        assert!(arena.battle.character(arena.ogre).unwrap().is_frozen());
        assert!(arena.battle.character(arena.goblin).unwrap().is_frozen());
        assert!(!arena.battle.character(arena.hero).unwrap().buffs().has_kind(BuffKind::Frozen));

        arena.battle.tick_buffs();
        assert!(!arena.battle.character(arena.ogre).unwrap().is_frozen());
    }

    #[test]
    fn runic_enchant_fires_on_scheduled_turns_only() {
        let mut arena = Arena::new();
        let mut talent = RunicEnchant::default();
        let mut fired = Vec::new();
        for turn in 1..=65 {
            arena.at_turn(turn);
            let before = runes(&arena);
            talent.on_turn_start(&mut arena.cx()).unwrap();
            if runes(&arena) > before {
                fired.push(turn);
            }
        }
        assert_eq!(fired, vec![10, 20, 25, 35, 45, 55, 65]);
    }

    #[test]
    fn runic_enchant_adds_damage_until_battle_end() {
        let mut arena = Arena::new();
        let mut talent = RunicEnchant::default();
        arena.at_turn(10);
        talent.on_turn_start(&mut arena.cx()).unwrap();
        assert_eq!(arena.battle.ability(arena.slash).unwrap().damage(), 23);

        talent.on_battle_end(&mut arena.cx()).unwrap();
        assert_eq!(runes(&arena), 0);
        assert_eq!(arena.battle.ability(arena.slash).unwrap().damage(), 20);
    }

    #[test]
    fn runic_enchant_applies_once_per_turn() {
        let mut arena = Arena::new();
        let mut talent = RunicEnchant::default();
        arena.at_turn(10);
        talent.on_turn_start(&mut arena.cx()).unwrap();
        talent.on_turn_start(&mut arena.cx()).unwrap();
        assert_eq!(runes(&arena), 1);
        assert_eq!(arena.battle.ability(arena.slash).unwrap().damage(), 23);

        arena.at_turn(20);
        talent.on_turn_start(&mut arena.cx()).unwrap();
        assert_eq!(runes(&arena), 2);
    }
}
