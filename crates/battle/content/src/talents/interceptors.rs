//! Talents that wrap party abilities with interceptor layers.
//!
//! Each talent here is a [`Wrapping`] around one [`Interceptor`]. The wrapper
//! binds the layer to every party ability on battle start, picks up abilities
//! that appear later on each turn start, and removes exactly its own layers on
//! battle end.

use std::fmt;
use std::rc::Rc;

use battle_core::{
    AbilityCall, BattleContext, BuffEffect, BuffRecord, DamageKind, EntryPoint, HookResult,
    Interceptor, LogColor, Rarity, Talent, TalentInfo, VisualCue,
};
use rand::Rng;
use tracing::debug;

use super::binding::AbilityBindings;

/// Talent that installs one interceptor on every party ability.
pub struct Wrapping {
    bindings: AbilityBindings,
    layer: Rc<dyn Interceptor>,
}

impl Wrapping {
    pub fn new(entry: EntryPoint, interceptor: impl Interceptor + 'static) -> Self {
        Self {
            bindings: AbilityBindings::new(entry),
            layer: Rc::new(interceptor),
        }
    }

    /// Number of abilities currently wrapped.
    pub fn bound(&self) -> usize {
        self.bindings.len()
    }

    fn bind(&mut self, cx: &mut BattleContext<'_>) {
        let bound = self.bindings.bind_party(cx.battle, &self.layer);
        if bound > 0 {
            debug!(
                target: "content::talents",
                interceptor = self.layer.label(),
                bound,
                "wrapped party abilities"
            );
        }
    }
}

impl fmt::Debug for Wrapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wrapping")
            .field("interceptor", &self.layer.label())
            .field("bindings", &self.bindings)
            .finish()
    }
}

impl Talent for Wrapping {
    fn on_battle_start(&mut self, cx: &mut BattleContext<'_>) -> HookResult {
        self.bind(cx);
        Ok(())
    }

    fn on_turn_start(&mut self, cx: &mut BattleContext<'_>) -> HookResult {
        self.bind(cx);
        Ok(())
    }

    fn on_battle_end(&mut self, cx: &mut BattleContext<'_>) -> HookResult {
        self.bindings.release(cx.battle);
        Ok(())
    }
}

fn caster_name(cx: &BattleContext<'_>, call: &AbilityCall) -> String {
    cx.battle
        .character(call.caster)
        .map(|c| c.name.clone())
        .unwrap_or_default()
}

// ===== vampiric_edge =====

/// Heals the caster after a damaging use.
#[derive(Clone, Copy, Debug)]
pub struct VampiricEdge {
    pub percent: i32,
}

impl Default for VampiricEdge {
    fn default() -> Self {
        Self { percent: 5 }
    }
}

impl VampiricEdge {
    pub const NAME: &'static str = "vampiric_edge";
    pub const INFO: TalentInfo = TalentInfo::new(
        Self::NAME,
        "Damaging abilities heal their caster for 5% of max health.",
        Rarity::Uncommon,
    )
    .with_icon("vampiric_edge.png");
}

impl Interceptor for VampiricEdge {
    fn label(&self) -> &'static str {
        Self::NAME
    }

    fn on_success(&self, cx: &mut BattleContext<'_>, call: &AbilityCall) {
        if !cx.battle.ability(call.ability).is_some_and(|a| a.is_damaging()) {
            return;
        }
        let Some(caster) = cx.battle.character_mut(call.caster) else {
            return;
        };
        let amount = (caster.stats.max_hp * self.percent / 100).max(1);
        let healed = caster.heal(amount);
        if healed > 0 {
            let name = caster.name.clone();
            cx.log(format!("{name} drains {healed} HP"), LogColor::Heal);
            cx.cue(VisualCue::Heal {
                target: call.caster,
                amount: healed,
            });
        }
    }
}

pub fn vampiric_edge() -> Box<dyn Talent> {
    Box::new(Wrapping::new(EntryPoint::Use, VampiricEdge::default()))
}

// ===== split_shot =====

/// Fires an extra projectile at another living enemy.
#[derive(Clone, Copy, Debug)]
pub struct SplitShot {
    pub percent: i32,
}

impl Default for SplitShot {
    fn default() -> Self {
        Self { percent: 50 }
    }
}

impl SplitShot {
    pub const NAME: &'static str = "split_shot";
    pub const INFO: TalentInfo = TalentInfo::new(
        Self::NAME,
        "Abilities fire an extra projectile for 50% damage at another enemy.",
        Rarity::Rare,
    )
    .with_icon("split_shot.png");
}

impl Interceptor for SplitShot {
    fn label(&self) -> &'static str {
        Self::NAME
    }

    fn on_success(&self, cx: &mut BattleContext<'_>, call: &AbilityCall) {
        let Some(base) = cx.battle.ability(call.ability).and_then(|a| {
            a.effects
                .iter()
                .find(|e| !matches!(e.kind, DamageKind::Healing))
                .map(|e| e.amount)
        }) else {
            return;
        };
        let extra = base * self.percent / 100;
        if extra <= 0 {
            return;
        }
        let candidates: Vec<_> = cx
            .battle
            .opponents_of(call.caster)
            .into_iter()
            .filter(|id| !call.targets.contains(id))
            .collect();
        if candidates.is_empty() {
            return;
        }
        let pick = candidates[cx.battle.rng_mut().gen_range(0..candidates.len())];
        cx.cue(VisualCue::Projectile {
            from: call.caster,
            to: pick,
        });
        let dealt = cx.battle.deal_damage(call.caster, pick, extra);
        let target = cx
            .battle
            .character(pick)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        cx.log(format!("Split shot hits {target} for {dealt}"), LogColor::Damage);
    }
}

pub fn split_shot() -> Box<dyn Talent> {
    Box::new(Wrapping::new(EntryPoint::Use, SplitShot::default()))
}

// ===== quickened_mind =====

#[derive(Clone, Copy, Debug, Default)]
pub struct QuickenedMind;

impl QuickenedMind {
    pub const NAME: &'static str = "quickened_mind";
    pub const INFO: TalentInfo = TalentInfo::new(
        Self::NAME,
        "Using an ability shortens its cooldown by 1 turn.",
        Rarity::Uncommon,
    )
    .with_icon("quickened_mind.png");
}

impl Interceptor for QuickenedMind {
    fn label(&self) -> &'static str {
        Self::NAME
    }

    fn on_success(&self, cx: &mut BattleContext<'_>, call: &AbilityCall) {
        if let Some(ability) = cx.battle.ability_mut(call.ability) {
            ability.current_cooldown = ability.current_cooldown.saturating_sub(1);
        }
    }
}

pub fn quickened_mind() -> Box<dyn Talent> {
    Box::new(Wrapping::new(EntryPoint::Use, QuickenedMind))
}

// ===== frost_crystals =====

/// Chance per target to crystallize it, raising damage it takes.
#[derive(Clone, Copy, Debug)]
pub struct FrostCrystals {
    pub chance: u32,
    pub percent: i32,
    pub turns: u32,
}

impl Default for FrostCrystals {
    fn default() -> Self {
        Self {
            chance: 25,
            percent: 30,
            turns: 2,
        }
    }
}

impl FrostCrystals {
    pub const NAME: &'static str = "frost_crystals";
    pub const INFO: TalentInfo = TalentInfo::new(
        Self::NAME,
        "Abilities have a 25% chance per target to crystallize it for 2 turns (+30% damage taken).",
        Rarity::Epic,
    )
    .with_icon("frost_crystals.png");

    pub fn with_chance(mut self, chance: u32) -> Self {
        self.chance = chance;
        self
    }
}

impl Interceptor for FrostCrystals {
    fn label(&self) -> &'static str {
        Self::NAME
    }

    fn on_success(&self, cx: &mut BattleContext<'_>, call: &AbilityCall) {
        for &target in &call.targets {
            if !cx.battle.is_alive(target) || !cx.battle.roll_percent(self.chance) {
                continue;
            }
            let record = BuffRecord::new("Crystallized", BuffEffect::crystallized(self.percent))
                .with_description(format!("+{}% damage taken", self.percent))
                .lasting(self.turns)
                .from_source(Self::NAME);
            let Some(victim) = cx.battle.character_mut(target) else {
                continue;
            };
            victim.replace_buff(record);
            let name = victim.name.clone();
            cx.cue(VisualCue::Crystallize { target });
            cx.log(format!("{name} is crystallized"), LogColor::Debuff);
        }
    }
}

pub fn frost_crystals() -> Box<dyn Talent> {
    Box::new(Wrapping::new(EntryPoint::Use, FrostCrystals::default()))
}

// ===== arcane_efficiency =====

/// Refunds part of the mana cost of abilities that have a cooldown.
#[derive(Clone, Copy, Debug)]
pub struct ArcaneEfficiency {
    pub percent: i32,
}

impl Default for ArcaneEfficiency {
    fn default() -> Self {
        Self { percent: 25 }
    }
}

impl ArcaneEfficiency {
    pub const NAME: &'static str = "arcane_efficiency";
    pub const INFO: TalentInfo = TalentInfo::new(
        Self::NAME,
        "Abilities with a cooldown refund 25% of their mana cost.",
        Rarity::Common,
    )
    .with_icon("arcane_efficiency.png");
}

impl Interceptor for ArcaneEfficiency {
    fn label(&self) -> &'static str {
        Self::NAME
    }

    fn on_success(&self, cx: &mut BattleContext<'_>, call: &AbilityCall) {
        let Some(cost) = cx
            .battle
            .ability(call.ability)
            .filter(|a| a.cooldown > 0)
            .map(|a| a.mana_cost)
        else {
            return;
        };
        let refund = cost * self.percent / 100;
        if refund <= 0 {
            return;
        }
        let restored = cx
            .battle
            .character_mut(call.caster)
            .map_or(0, |caster| caster.restore_mana(refund));
        if restored > 0 {
            let name = caster_name(cx, call);
            cx.log(format!("{name} recovers {restored} mana"), LogColor::Talent);
        }
    }
}

pub fn arcane_efficiency() -> Box<dyn Talent> {
    Box::new(Wrapping::new(EntryPoint::Use, ArcaneEfficiency::default()))
}

// ===== fickle_fate =====

/// Per-hit chance of a follow-up blow for 50-100% of the hit's damage.
#[derive(Clone, Copy, Debug)]
pub struct FickleFate {
    pub chance: u32,
    pub min_percent: i32,
    pub max_percent: i32,
}

impl Default for FickleFate {
    fn default() -> Self {
        Self {
            chance: 30,
            min_percent: 50,
            max_percent: 100,
        }
    }
}

impl FickleFate {
    pub const NAME: &'static str = "fickle_fate";
    pub const INFO: TalentInfo = TalentInfo::new(
        Self::NAME,
        "Each hit of a multi-hit ability has a 30% chance to strike again for 50-100% damage.",
        Rarity::Rare,
    )
    .with_icon("fickle_fate.png");

    pub fn with_chance(mut self, chance: u32) -> Self {
        self.chance = chance;
        self
    }
}

impl Interceptor for FickleFate {
    fn label(&self) -> &'static str {
        Self::NAME
    }

    fn on_success(&self, cx: &mut BattleContext<'_>, call: &AbilityCall) {
        let Some(target) = call.target() else {
            return;
        };
        let base = cx.battle.ability(call.ability).map_or(0, |a| a.damage());
        if base <= 0 || !cx.battle.roll_percent(self.chance) {
            return;
        }
        let percent = cx
            .battle
            .rng_mut()
            .gen_range(self.min_percent..=self.max_percent);
        let extra = (base * percent / 100).max(1);
        let dealt = cx.battle.deal_damage(call.caster, target, extra);
        if dealt > 0 {
            let name = caster_name(cx, call);
            cx.log(format!("Fate smiles on {name}: +{dealt} damage"), LogColor::Damage);
        }
    }
}

pub fn fickle_fate() -> Box<dyn Talent> {
    Box::new(Wrapping::new(EntryPoint::Hit, FickleFate::default()))
}

#[cfg(test)]
mod tests {
    use battle_core::BuffKind;

    use super::*;
    use crate::talents::testing::Arena;

    fn hp(arena: &Arena, id: battle_core::CharacterId) -> i32 {
        arena.battle.character(id).unwrap().stats.hp
    }

    #[test]
    fn double_install_does_not_double_apply() {
        let mut arena = Arena::new();
        arena.battle.character_mut(arena.hero).unwrap().take_damage(50);
        let mut talent = Wrapping::new(EntryPoint::Use, VampiricEdge::default());

        talent.on_battle_start(&mut arena.cx()).unwrap();
        talent.on_turn_start(&mut arena.cx()).unwrap();
        assert_eq!(talent.bound(), 2);
        assert_eq!(arena.battle.ability(arena.slash).unwrap().interceptor_depth(), 1);

        let (slash, hero, ogre) = (arena.slash, arena.hero, arena.ogre);
        assert!(arena.cx().use_ability(slash, hero, vec![ogre]));
        assert_eq!(hp(&arena, hero), 55);
    }

    #[test]
    fn failed_use_skips_side_effect() {
        let mut arena = Arena::new();
        arena.battle.character_mut(arena.hero).unwrap().take_damage(50);
        arena.battle.character_mut(arena.hero).unwrap().stats.mana = 0;
        let mut talent = Wrapping::new(EntryPoint::Use, VampiricEdge::default());
        talent.on_battle_start(&mut arena.cx()).unwrap();

        let (slash, hero, ogre) = (arena.slash, arena.hero, arena.ogre);
        assert!(!arena.cx().use_ability(slash, hero, vec![ogre]));
        assert_eq!(hp(&arena, hero), 50);
    }

    #[test]
    fn abilities_are_pristine_after_battle_end() {
        let mut arena = Arena::new();
        let mut talents = vec![
            vampiric_edge(),
            split_shot(),
            quickened_mind(),
            frost_crystals(),
            arcane_efficiency(),
            fickle_fate(),
        ];
        for talent in &mut talents {
            talent.on_battle_start(&mut arena.cx()).unwrap();
        }
        assert_eq!(arena.battle.interceptor_count(), 11);

        for talent in talents.iter_mut().rev() {
            talent.on_battle_end(&mut arena.cx()).unwrap();
        }
        assert_eq!(arena.battle.interceptor_count(), 0);
        for ability in arena.battle.abilities() {
            assert_eq!(ability.interceptor_depth(), 0);
        }

        let mut pristine = Arena::new();
        for arena in [&mut arena, &mut pristine] {
            arena.battle.character_mut(arena.hero).unwrap().take_damage(50);
            let (slash, flurry, hero, ogre) = (arena.slash, arena.flurry, arena.hero, arena.ogre);
            assert!(arena.cx().use_ability(slash, hero, vec![ogre]));
            assert!(arena.cx().use_ability(flurry, hero, vec![ogre]));
        }

        let (hero, ogre, goblin) = (arena.hero, arena.ogre, arena.goblin);
        assert_eq!(hp(&arena, ogre), 468);
        assert_eq!(hp(&arena, ogre), hp(&pristine, ogre));
        assert_eq!(hp(&arena, goblin), 500);
        assert_eq!(hp(&arena, hero), 50);
        assert_eq!(arena.battle.character(hero).unwrap().stats.mana, 42);
        assert_eq!(arena.battle.ability(arena.slash).unwrap().current_cooldown, 2);
        assert!(arena.battle.character(ogre).unwrap().buffs().is_empty());
        assert!(arena.effects.cues.is_empty());
    }

    #[test]
    fn release_order_does_not_matter() {
        let mut arena = Arena::new();
        let mut first = Wrapping::new(EntryPoint::Use, QuickenedMind);
        let mut second = Wrapping::new(EntryPoint::Use, ArcaneEfficiency::default());
        first.on_battle_start(&mut arena.cx()).unwrap();
        second.on_battle_start(&mut arena.cx()).unwrap();

        first.on_battle_end(&mut arena.cx()).unwrap();
        let (slash, hero, ogre) = (arena.slash, arena.hero, arena.ogre);
        assert!(arena.cx().use_ability(slash, hero, vec![ogre]));

        assert_eq!(arena.battle.ability(slash).unwrap().current_cooldown, 2);
        assert_eq!(arena.battle.character(hero).unwrap().stats.mana, 44);
    }

    #[test]
    fn split_shot_hits_another_enemy() {
        let mut arena = Arena::new();
        let mut talent = split_shot();
        talent.on_battle_start(&mut arena.cx()).unwrap();

        let (slash, hero, ogre, goblin) = (arena.slash, arena.hero, arena.ogre, arena.goblin);
        assert!(arena.cx().use_ability(slash, hero, vec![ogre]));
        assert_eq!(hp(&arena, ogre), 480);
        assert_eq!(hp(&arena, goblin), 490);
        assert_eq!(arena.effects.cues.len(), 1);
    }

    #[test]
    fn split_shot_needs_a_spare_enemy() {
        let mut arena = Arena::new();
        let mut talent = split_shot();
        talent.on_battle_start(&mut arena.cx()).unwrap();

        let (slash, hero, ogre, goblin) = (arena.slash, arena.hero, arena.ogre, arena.goblin);
        assert!(arena.cx().use_ability(slash, hero, vec![ogre, goblin]));
        assert!(arena.effects.cues.is_empty());
    }

    #[test]
    fn quickened_mind_shortens_cooldown() {
        let mut arena = Arena::new();
        let mut talent = quickened_mind();
        talent.on_battle_start(&mut arena.cx()).unwrap();

        let (slash, hero, ogre) = (arena.slash, arena.hero, arena.ogre);
        assert!(arena.cx().use_ability(slash, hero, vec![ogre]));
        assert_eq!(arena.battle.ability(slash).unwrap().current_cooldown, 1);
    }

    #[test]
    fn frost_crystals_keeps_one_crystal_per_target() {
        let mut arena = Arena::new();
        let mut talent = Wrapping::new(EntryPoint::Use, FrostCrystals::default().with_chance(100));
        talent.on_battle_start(&mut arena.cx()).unwrap();

        let (flurry, hero, ogre) = (arena.flurry, arena.hero, arena.ogre);
        assert!(arena.cx().use_ability(flurry, hero, vec![ogre]));
        assert!(arena.cx().use_ability(flurry, hero, vec![ogre]));

        let buffs = arena.battle.character(ogre).unwrap().buffs();
        assert_eq!(buffs.len(), 1);
        assert!(buffs.has_kind(BuffKind::Crystallized));
    }

    #[test]
    fn arcane_efficiency_ignores_abilities_without_cooldown() {
        let mut arena = Arena::new();
        if let Some(flurry) = arena.battle.ability_mut(arena.flurry) {
            flurry.mana_cost = 8;
        }
        let mut talent = arcane_efficiency();
        talent.on_battle_start(&mut arena.cx()).unwrap();

        let (flurry, hero, ogre) = (arena.flurry, arena.hero, arena.ogre);
        assert!(arena.cx().use_ability(flurry, hero, vec![ogre]));
        assert_eq!(arena.battle.character(hero).unwrap().stats.mana, 42);
    }

    #[test]
    fn fickle_fate_wraps_only_hit_entry_points() {
        let mut arena = Arena::new();
        let mut talent = Wrapping::new(EntryPoint::Hit, FickleFate::default().with_chance(100));
        talent.on_battle_start(&mut arena.cx()).unwrap();
        assert_eq!(talent.bound(), 1);

        let (flurry, hero, ogre) = (arena.flurry, arena.hero, arena.ogre);
        assert!(arena.cx().use_ability(flurry, hero, vec![ogre]));
        let lost = 500 - hp(&arena, ogre);
        assert!((18..=24).contains(&lost), "lost {lost}");
    }
}
