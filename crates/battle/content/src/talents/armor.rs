//! Defensive talents: flat armor, recomputed armor and shields.

use battle_core::{
    BattleContext, BuffEffect, BuffRecord, HookResult, LogColor, Rarity, Talent, TalentInfo,
    Team, VisualCue,
};

use super::binding::BuffSlots;

// ===== iron_skin =====

/// Flat armor for every party member, including late joiners.
#[derive(Debug, Default)]
pub struct IronSkin {
    slots: BuffSlots,
}

impl IronSkin {
    pub const NAME: &'static str = "iron_skin";
    pub const ARMOR: i32 = 5;
    pub const INFO: TalentInfo = TalentInfo::new(
        Self::NAME,
        "Party members gain 5 armor for the whole battle.",
        Rarity::Common,
    )
    .with_icon("iron_skin.png");

    fn bind(&mut self, cx: &mut BattleContext<'_>) {
        let mut bound = 0;
        for id in cx.battle.living(Team::Party) {
            let attached = self.slots.ensure(cx.battle, id, || {
                BuffRecord::new("Iron Skin", BuffEffect::armor(Self::ARMOR))
                    .with_description("+5 armor")
                    .from_source(Self::NAME)
            });
            if attached {
                bound += 1;
            }
        }
        if bound > 0 {
            cx.log(
                format!("Iron Skin hardens {bound} allies (+{} armor)", Self::ARMOR),
                LogColor::Buff,
            );
        }
    }
}

impl Talent for IronSkin {
    fn on_battle_start(&mut self, cx: &mut BattleContext<'_>) -> HookResult {
        self.bind(cx);
        Ok(())
    }

    fn on_turn_start(&mut self, cx: &mut BattleContext<'_>) -> HookResult {
        self.bind(cx);
        Ok(())
    }

    fn on_battle_end(&mut self, cx: &mut BattleContext<'_>) -> HookResult {
        self.slots.release(cx.battle);
        Ok(())
    }
}

pub fn iron_skin() -> Box<dyn Talent> {
    Box::new(IronSkin::default())
}

// ===== hardening =====

/// Armor that grows with the turn counter.
#[derive(Debug, Default)]
pub struct Hardening {
    slots: BuffSlots,
}

impl Hardening {
    pub const NAME: &'static str = "hardening";
    pub const PER_TURN: i32 = 2;
    pub const CAP: i32 = 20;
    pub const INFO: TalentInfo = TalentInfo::new(
        Self::NAME,
        "Party members gain 2 armor per elapsed turn, up to 20.",
        Rarity::Uncommon,
    )
    .with_icon("hardening.png");

    pub fn armor_at(turn: u32) -> i32 {
        let turn = i32::try_from(turn).unwrap_or(i32::MAX);
        turn.saturating_mul(Self::PER_TURN).min(Self::CAP)
    }
}

impl Talent for Hardening {
    fn on_turn_start(&mut self, cx: &mut BattleContext<'_>) -> HookResult {
        let amount = Self::armor_at(cx.battle.turn());
        if amount <= 0 {
            return Ok(());
        }
        for id in cx.battle.living(Team::Party) {
            let record = BuffRecord::new("Hardening", BuffEffect::armor(amount))
                .with_description(format!("+{amount} armor"))
                .from_source(Self::NAME);
            self.slots.replace(cx.battle, id, record);
        }
        Ok(())
    }

    fn on_battle_end(&mut self, cx: &mut BattleContext<'_>) -> HookResult {
        self.slots.release(cx.battle);
        Ok(())
    }
}

pub fn hardening() -> Box<dyn Talent> {
    Box::new(Hardening::default())
}

// ===== last_stand =====

/// Armor proportional to missing health.
#[derive(Debug, Default)]
pub struct LastStand {
    slots: BuffSlots,
}

impl LastStand {
    pub const NAME: &'static str = "last_stand";
    pub const INFO: TalentInfo = TalentInfo::new(
        Self::NAME,
        "Party members gain armor equal to half their missing health percent.",
        Rarity::Rare,
    )
    .with_icon("last_stand.png");
}

impl Talent for LastStand {
    fn on_turn_start(&mut self, cx: &mut BattleContext<'_>) -> HookResult {
        for id in cx.battle.living(Team::Party) {
            let Some(missing) = cx.battle.character(id).map(|c| c.stats.missing_hp_percent())
            else {
                continue;
            };
            let amount = missing / 2;
            if amount > 0 {
                let record = BuffRecord::new("Last Stand", BuffEffect::armor(amount))
                    .with_description(format!("+{amount} armor"))
                    .from_source(Self::NAME);
                self.slots.replace(cx.battle, id, record);
            } else {
                self.slots.detach(cx.battle, id);
            }
        }
        Ok(())
    }

    fn on_battle_end(&mut self, cx: &mut BattleContext<'_>) -> HookResult {
        self.slots.release(cx.battle);
        Ok(())
    }
}

pub fn last_stand() -> Box<dyn Talent> {
    Box::new(LastStand::default())
}

// ===== guardian_spirit =====

/// A damage-absorbing shield on each party member.
#[derive(Debug, Default)]
pub struct GuardianSpirit {
    slots: BuffSlots,
}

impl GuardianSpirit {
    pub const NAME: &'static str = "guardian_spirit";
    pub const SHIELD: i32 = 30;
    pub const INFO: TalentInfo = TalentInfo::new(
        Self::NAME,
        "Party members start the battle behind a 30-point shield.",
        Rarity::Legendary,
    )
    .with_icon("guardian_spirit.png");

    fn bind(&mut self, cx: &mut BattleContext<'_>) {
        for id in cx.battle.living(Team::Party) {
            let attached = self.slots.ensure(cx.battle, id, || {
                BuffRecord::new("Guardian Spirit", BuffEffect::shield(Self::SHIELD))
                    .with_description("Absorbs 30 damage")
                    .from_source(Self::NAME)
            });
            if attached {
                cx.cue(VisualCue::Shield { target: id });
            }
        }
    }
}

impl Talent for GuardianSpirit {
    fn on_battle_start(&mut self, cx: &mut BattleContext<'_>) -> HookResult {
        self.bind(cx);
        Ok(())
    }

    fn on_turn_start(&mut self, cx: &mut BattleContext<'_>) -> HookResult {
        self.bind(cx);
        Ok(())
    }

    fn on_battle_end(&mut self, cx: &mut BattleContext<'_>) -> HookResult {
        self.slots.release(cx.battle);
        Ok(())
    }
}

pub fn guardian_spirit() -> Box<dyn Talent> {
    Box::new(GuardianSpirit::default())
}
