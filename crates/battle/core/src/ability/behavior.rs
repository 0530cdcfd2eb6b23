//! Pristine base behaviors.

use super::{AbilityBehavior, AbilityCall};
use crate::context::BattleContext;

/// Deals the ability's damage once to every living target.
#[derive(Clone, Copy, Debug, Default)]
pub struct Strike;

impl AbilityBehavior for Strike {
    fn execute(&self, cx: &mut BattleContext<'_>, call: &AbilityCall) -> bool {
        let Some(damage) = cx.battle.begin_use(call).ok() else {
            return false;
        };
        for &target in &call.targets {
            cx.battle.deal_damage(call.caster, target, damage);
        }
        true
    }
}

/// Runs the hit entry point `hits` times per target.
#[derive(Clone, Copy, Debug, Default)]
pub struct MultiHit;

impl AbilityBehavior for MultiHit {
    fn execute(&self, cx: &mut BattleContext<'_>, call: &AbilityCall) -> bool {
        if cx.battle.begin_use(call).is_err() {
            return false;
        }
        let hits = cx.battle.ability(call.ability).map_or(0, |a| a.hits());
        for _ in 0..hits {
            for &target in &call.targets {
                cx.execute_hit(call.ability, call.caster, target);
            }
        }
        true
    }
}

/// One blow of a multi-hit ability. Fails when the target is already down.
#[derive(Clone, Copy, Debug, Default)]
pub struct SingleHit;

impl AbilityBehavior for SingleHit {
    fn execute(&self, cx: &mut BattleContext<'_>, call: &AbilityCall) -> bool {
        let Some(target) = call.target() else {
            return false;
        };
        if !cx.battle.is_alive(target) {
            return false;
        }
        let damage = cx.battle.ability(call.ability).map_or(0, |a| a.damage());
        cx.battle.deal_damage(call.caster, target, damage);
        true
    }
}

/// Heals every living target by the ability's healing effects.
#[derive(Clone, Copy, Debug, Default)]
pub struct Mend;

impl AbilityBehavior for Mend {
    fn execute(&self, cx: &mut BattleContext<'_>, call: &AbilityCall) -> bool {
        if cx.battle.begin_use(call).is_err() {
            return false;
        }
        let amount = cx.battle.ability(call.ability).map_or(0, |a| a.healing());
        for &target in &call.targets {
            if let Some(character) = cx.battle.character_mut(target) {
                character.heal(amount);
            }
        }
        true
    }
}
