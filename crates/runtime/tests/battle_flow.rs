//! Full battles with the standard talents active.

use std::rc::Rc;
use std::sync::Arc;

use battle_content::loaders::EncounterLoader;
use battle_content::standard_catalog;
use battle_core::{
    Battle, BattleContext, EntryPoint, HookResult, Interceptor, MemoryBattleLog, ModifierCatalog,
    NullEffects, Rarity, RecordingEffects, Stage, Talent, TalentInfo, Team,
};
use battle_runtime::auto::choose_action;
use battle_runtime::{
    BattleSession, InMemoryModifierRepo, ModifierManager, Outcome, Phase, RunState,
    RuntimeError, TracingBattleLog,
};

fn all_talents() -> ModifierManager {
    let mut manager = ModifierManager::new(
        standard_catalog(),
        Arc::new(InMemoryModifierRepo::new()),
        RunState::new("flow"),
        9,
    );
    let names: Vec<&str> = manager.catalog().names().collect();
    for name in names {
        manager.activate_by_name(name).unwrap();
    }
    manager
}

#[test]
fn every_talent_cleans_up_after_battle_end() {
    let spec = EncounterLoader::sample().unwrap();
    let mut battle = Battle::new(5);
    let mut encounter = spec.spawn(&mut battle);
    let mut log = MemoryBattleLog::new();
    let mut effects = RecordingEffects::default();
    let mut manager = all_talents();

    let base_defense: Vec<(battle_core::CharacterId, i32)> = battle
        .characters()
        .map(|c| (c.id(), c.stats.defense))
        .collect();

    manager.apply_battle_start(&mut BattleContext::new(
        &mut battle,
        &mut log,
        &mut effects,
        Stage::FIRST,
    ));
    for _ in 0..12 {
        let upcoming = battle.turn() + 1;
        encounter.summon_due(&mut battle, upcoming);
        battle.advance_turn();

        let mut cx = BattleContext::new(&mut battle, &mut log, &mut effects, Stage::FIRST);
        manager.apply_turn_start(&mut cx);
        let mut order = cx.battle.living(Team::Party);
        order.extend(cx.battle.living(Team::Enemy));
        for caster in order {
            if let Some((ability, targets)) = choose_action(cx.battle, caster) {
                cx.use_ability(ability, caster, targets);
            }
        }
        manager.apply_turn_end(&mut cx);
        battle.tick_buffs();
        battle.tick_cooldowns();
    }
    assert!(battle.interceptor_count() > 0);

    manager.apply_battle_end(&mut BattleContext::new(
        &mut battle,
        &mut log,
        &mut effects,
        Stage::FIRST,
    ));

    assert_eq!(battle.interceptor_count(), 0);
    for ability in battle.abilities() {
        assert!(ability.effects.iter().all(|e| e.tag.is_none()), "{}", ability.name);
    }
    for (id, defense) in base_defense {
        assert_eq!(battle.character(id).unwrap().stats.defense, defense);
    }
    assert!(log.count_containing("Runes flare") >= 1);
    assert!(log.count_containing("Time freezes") >= 1);
}

#[test]
fn sample_encounter_plays_to_an_outcome() {
    let spec = EncounterLoader::sample().unwrap();
    let mut battle = Battle::new(21);
    let mut encounter = spec.spawn(&mut battle);
    let mut manager = all_talents();
    let mut session = BattleSession::new(
        battle,
        TracingBattleLog::new(),
        RecordingEffects::default(),
        Stage::FIRST,
    );

    let outcome = session
        .run_auto(&mut manager, 40, |battle, turn| {
            encounter.summon_due(battle, turn);
        })
        .unwrap();

    assert_ne!(outcome, Outcome::Undecided);
    assert_eq!(session.phase(), Phase::Finished);
    assert_eq!(session.battle().interceptor_count(), 0);
    assert!(!session.log().lines().is_empty());
    assert!(session.battle().characters().any(|c| c.is_summoned()));
}

struct Leaky;

struct Noop;

impl Interceptor for Noop {}

impl Talent for Leaky {
    fn on_battle_start(&mut self, cx: &mut BattleContext<'_>) -> HookResult {
        for ability in cx.battle.team_abilities(Team::Party) {
            cx.battle.intercept(ability, EntryPoint::Use, Rc::new(Noop));
        }
        Ok(())
    }
}

fn leaky() -> Box<dyn Talent> {
    Box::new(Leaky)
}

#[test]
fn leaked_interceptors_are_stripped_at_finish() {
    let mut catalog = ModifierCatalog::new();
    catalog.register(TalentInfo::new("leaky", "", Rarity::Common), leaky);
    let mut manager = ModifierManager::new(
        catalog,
        Arc::new(InMemoryModifierRepo::new()),
        RunState::new("leak"),
        0,
    );
    manager.activate_by_name("leaky").unwrap();

    let spec = EncounterLoader::sample().unwrap();
    let mut battle = Battle::new(0);
    spec.spawn(&mut battle);
    let mut session = BattleSession::new(battle, MemoryBattleLog::new(), NullEffects, Stage::FIRST);

    session.begin(&mut manager).unwrap();
    assert!(session.battle().interceptor_count() > 0);
    session.finish(&mut manager).unwrap();
    assert_eq!(session.battle().interceptor_count(), 0);
}

#[test]
fn failed_auto_run_still_dispatches_battle_end() {
    let spec = EncounterLoader::sample().unwrap();
    let mut manager = all_talents();

    let mut battle = Battle::new(3);
    spec.spawn(&mut battle);
    let base_defense: Vec<i32> = battle.characters().map(|c| c.stats.defense).collect();
    let mut session = BattleSession::new(battle, MemoryBattleLog::new(), NullEffects, Stage::FIRST);

    session.begin(&mut manager).unwrap();
    let installed = session.battle().interceptor_count();
    assert!(installed > 0);

    let result = session.run_auto(&mut manager, 10, |_, _| {});
    assert!(matches!(result, Err(RuntimeError::InvalidPhase { .. })));
    assert_eq!(session.phase(), Phase::Finished);
    assert_eq!(session.battle().interceptor_count(), 0);
    let defense: Vec<i32> = session.battle().characters().map(|c| c.stats.defense).collect();
    assert_eq!(defense, base_defense);

    // Talents released their bindings, so the next battle binds afresh.
    let mut next = Battle::new(4);
    spec.spawn(&mut next);
    let mut session = BattleSession::new(next, MemoryBattleLog::new(), NullEffects, Stage::FIRST);
    session.begin(&mut manager).unwrap();
    assert_eq!(session.battle().interceptor_count(), installed);
}
