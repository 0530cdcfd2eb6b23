//! A simple auto pilot for headless battles.
//!
//! Every living, unfrozen character acts once per turn, party first. A healer
//! mends the most wounded ally when someone is hurt; otherwise each character
//! uses its hardest-hitting ready ability on the weakest opponent.

use battle_core::{AbilityCall, AbilityId, Battle, BattleLog, CharacterId, EffectSink, Team};

use crate::error::Result;
use crate::session::BattleSession;

/// Picks an ability and its targets for `caster`, if any is ready.
pub fn choose_action(
    battle: &Battle,
    caster: CharacterId,
) -> Option<(AbilityId, Vec<CharacterId>)> {
    let character = battle.character(caster)?;
    let ready: Vec<AbilityId> = character
        .abilities()
        .iter()
        .copied()
        .filter(|&id| battle.can_use(&AbilityCall::new(id, caster, Vec::new())).is_ok())
        .collect();

    let wounded = battle
        .living(character.team)
        .into_iter()
        .filter_map(|id| battle.character(id))
        .filter(|c| c.stats.hp < c.stats.max_hp)
        .min_by_key(|c| c.stats.hp_percent())
        .map(|c| c.id());
    if let Some(ally) = wounded {
        let heal = ready
            .iter()
            .copied()
            .filter_map(|id| battle.ability(id))
            .filter(|a| a.healing() > 0 && !a.is_damaging())
            .max_by_key(|a| a.healing());
        if let Some(heal) = heal {
            return Some((heal.id(), vec![ally]));
        }
    }

    let target = battle
        .opponents_of(caster)
        .into_iter()
        .filter_map(|id| battle.character(id))
        .min_by_key(|c| c.stats.hp)
        .map(|c| c.id())?;
    let strike = ready
        .iter()
        .copied()
        .filter_map(|id| battle.ability(id))
        .filter(|a| a.is_damaging())
        .max_by_key(|a| a.damage() * a.hits().max(1) as i32)?;
    Some((strike.id(), vec![target]))
}

/// Lets every character act once. Returns how many abilities were used.
pub fn play_turn<L: BattleLog, E: EffectSink>(session: &mut BattleSession<L, E>) -> Result<usize> {
    let mut order = session.battle().living(Team::Party);
    order.extend(session.battle().living(Team::Enemy));

    let mut used = 0;
    for caster in order {
        if session.outcome().is_some() {
            break;
        }
        let Some((ability, targets)) = choose_action(session.battle(), caster) else {
            continue;
        };
        if session.use_ability(ability, caster, targets)? {
            used += 1;
        }
    }
    Ok(used)
}
