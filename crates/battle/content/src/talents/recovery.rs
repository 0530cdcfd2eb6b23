//! Turn-driven restoration.

use std::collections::HashSet;

use battle_core::{
    BattleContext, CharacterId, HookResult, LogColor, Rarity, Talent, TalentInfo, Team,
    VisualCue,
};

// ===== mana_spring =====

#[derive(Debug, Default)]
pub struct ManaSpring {
    last_turn: Option<u32>,
}

impl ManaSpring {
    pub const NAME: &'static str = "mana_spring";
    pub const MANA: i32 = 5;
    pub const INFO: TalentInfo = TalentInfo::new(
        Self::NAME,
        "Party members regain 5 mana at the start of each turn.",
        Rarity::Common,
    )
    .with_icon("mana_spring.png");
}

impl Talent for ManaSpring {
    fn on_turn_start(&mut self, cx: &mut BattleContext<'_>) -> HookResult {
        let turn = cx.battle.turn();
        if self.last_turn == Some(turn) {
            return Ok(());
        }
        self.last_turn = Some(turn);

        let mut restored = 0;
        for id in cx.battle.living(Team::Party) {
            if let Some(member) = cx.battle.character_mut(id) {
                restored += member.restore_mana(Self::MANA);
            }
        }
        if restored > 0 {
            cx.log(format!("Mana Spring restores {restored} mana"), LogColor::Talent);
        }
        Ok(())
    }

    fn on_battle_end(&mut self, _cx: &mut BattleContext<'_>) -> HookResult {
        self.last_turn = None;
        Ok(())
    }
}

pub fn mana_spring() -> Box<dyn Talent> {
    Box::new(ManaSpring::default())
}

// ===== second_wind =====

/// One emergency heal per character per battle.
#[derive(Debug, Default)]
pub struct SecondWind {
    used: HashSet<CharacterId>,
}

impl SecondWind {
    pub const NAME: &'static str = "second_wind";
    pub const THRESHOLD_PERCENT: i32 = 30;
    pub const HEAL_PERCENT: i32 = 25;
    pub const INFO: TalentInfo = TalentInfo::new(
        Self::NAME,
        "Once per battle, a party member below 30% health recovers 25% of it.",
        Rarity::Rare,
    )
    .with_icon("second_wind.png");
}

impl Talent for SecondWind {
    fn on_turn_end(&mut self, cx: &mut BattleContext<'_>) -> HookResult {
        for id in cx.battle.living(Team::Party) {
            if self.used.contains(&id) {
                continue;
            }
            let Some(member) = cx.battle.character_mut(id) else {
                continue;
            };
            if member.stats.hp_percent() >= Self::THRESHOLD_PERCENT {
                continue;
            }
            let amount = (member.stats.max_hp * Self::HEAL_PERCENT / 100).max(1);
            let healed = member.heal(amount);
            let name = member.name.clone();
            self.used.insert(id);
            cx.log(format!("{name} catches a second wind (+{healed} HP)"), LogColor::Heal);
            cx.cue(VisualCue::Heal { target: id, amount: healed });
        }
        Ok(())
    }

    fn on_battle_end(&mut self, _cx: &mut BattleContext<'_>) -> HookResult {
        self.used.clear();
        Ok(())
    }
}

pub fn second_wind() -> Box<dyn Talent> {
    Box::new(SecondWind::default())
}
