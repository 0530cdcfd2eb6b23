//! Damage-dealing buffs.

use battle_core::{
    BattleContext, BuffEffect, BuffRecord, HookResult, LogColor, Rarity, Talent, TalentInfo,
    Team,
};

use super::binding::BuffSlots;

// ===== berserker_blood =====

#[derive(Debug, Default)]
pub struct BerserkerBlood {
    slots: BuffSlots,
}

impl BerserkerBlood {
    pub const NAME: &'static str = "berserker_blood";
    pub const BOOST: i32 = 15;
    pub const INFO: TalentInfo = TalentInfo::new(
        Self::NAME,
        "Party members deal 15% more damage.",
        Rarity::Uncommon,
    )
    .with_icon("berserker_blood.png");

    fn bind(&mut self, cx: &mut BattleContext<'_>) {
        for id in cx.battle.living(Team::Party) {
            self.slots.ensure(cx.battle, id, || {
                BuffRecord::new("Berserker Blood", BuffEffect::damage_boost(Self::BOOST))
                    .with_description("+15% damage")
                    .from_source(Self::NAME)
            });
        }
    }
}

impl Talent for BerserkerBlood {
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

pub fn berserker_blood() -> Box<dyn Talent> {
    Box::new(BerserkerBlood::default())
}

// ===== glass_cannon =====

/// More damage dealt, more damage taken.
#[derive(Debug, Default)]
pub struct GlassCannon {
    boosts: BuffSlots,
    weaknesses: BuffSlots,
}

impl GlassCannon {
    pub const NAME: &'static str = "glass_cannon";
    pub const BOOST: i32 = 40;
    pub const VULNERABILITY: i32 = 20;
    pub const INFO: TalentInfo = TalentInfo::new(
        Self::NAME,
        "Party members deal 40% more damage but take 20% more damage.",
        Rarity::Epic,
    )
    .with_icon("glass_cannon.png");

    fn bind(&mut self, cx: &mut BattleContext<'_>) {
        for id in cx.battle.living(Team::Party) {
            self.boosts.ensure(cx.battle, id, || {
                BuffRecord::new("Glass Cannon", BuffEffect::damage_boost(Self::BOOST))
                    .with_description("+40% damage")
                    .from_source(Self::NAME)
            });
            self.weaknesses.ensure(cx.battle, id, || {
                BuffRecord::new("Glass Cannon", BuffEffect::vulnerability(Self::VULNERABILITY))
                    .with_description("+20% damage taken")
                    .from_source(Self::NAME)
            });
        }
    }
}

impl Talent for GlassCannon {
    fn on_battle_start(&mut self, cx: &mut BattleContext<'_>) -> HookResult {
        self.bind(cx);
        Ok(())
    }

    fn on_turn_start(&mut self, cx: &mut BattleContext<'_>) -> HookResult {
        self.bind(cx);
        Ok(())
    }

    fn on_battle_end(&mut self, cx: &mut BattleContext<'_>) -> HookResult {
        self.boosts.release(cx.battle);
        self.weaknesses.release(cx.battle);
        Ok(())
    }
}

pub fn glass_cannon() -> Box<dyn Talent> {
    Box::new(GlassCannon::default())
}

// ===== pack_leader =====

/// Damage boost for summoned allies, bound once each.
#[derive(Debug, Default)]
pub struct PackLeader {
    slots: BuffSlots,
}

impl PackLeader {
    pub const NAME: &'static str = "pack_leader";
    pub const BOOST: i32 = 25;
    pub const INFO: TalentInfo = TalentInfo::new(
        Self::NAME,
        "Summoned allies deal 25% more damage.",
        Rarity::Epic,
    )
    .with_icon("pack_leader.png");

    fn bind(&mut self, cx: &mut BattleContext<'_>) {
        let summons: Vec<_> = cx
            .battle
            .living(Team::Party)
            .into_iter()
            .filter(|id| cx.battle.character(*id).is_some_and(|c| c.is_summoned()))
            .collect();
        for id in summons {
            let attached = self.slots.ensure(cx.battle, id, || {
                BuffRecord::new("Pack Leader", BuffEffect::damage_boost(Self::BOOST))
                    .with_description("+25% damage")
                    .from_source(Self::NAME)
            });
            if attached {
                let name = cx
                    .battle
                    .character(id)
                    .map(|c| c.name.clone())
                    .unwrap_or_default();
                cx.log(format!("{name} answers the pack leader"), LogColor::Buff);
            }
        }
    }
}

impl Talent for PackLeader {
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

pub fn pack_leader() -> Box<dyn Talent> {
    Box::new(PackLeader::default())
}
