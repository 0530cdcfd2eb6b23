//! One battle from start to finish.
//!
//! [`BattleSession`] owns the arena and sequences the lifecycle:
//!
//! ```text
//! begin ─▶ battle start hooks
//! turn  ─▶ counter++ ─▶ turn start hooks ─▶ actions ─▶ turn end hooks
//!          ─▶ buff expiry ─▶ cooldown tick
//! finish ─▶ battle end hooks ─▶ leaked-interceptor check
//! ```
//!
//! The modifier manager is passed to each step rather than owned, so the same
//! manager carries its talents from one stage's session to the next.

use battle_core::{
    AbilityCall, AbilityId, Battle, BattleContext, BattleLog, CharacterId, EffectSink, LogColor,
    NullEffects, Stage, Team,
};
use tracing::{error, info, warn};

use crate::auto;
use crate::error::{Result, RuntimeError};
use crate::log::TracingBattleLog;
use crate::manager::ModifierManager;

/// Progress of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    Ready,
    InProgress,
    Finished,
}

/// How a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    Victory,
    Defeat,
    /// Turn limit reached with both sides standing.
    Undecided,
}

pub struct BattleSession<L = TracingBattleLog, E = NullEffects> {
    battle: Battle,
    log: L,
    effects: E,
    stage: Stage,
    phase: Phase,
}

impl<L: BattleLog, E: EffectSink> BattleSession<L, E> {
    pub fn new(battle: Battle, log: L, effects: E, stage: Stage) -> Self {
        Self {
            battle,
            log,
            effects,
            stage,
            phase: Phase::Ready,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn turn(&self) -> u32 {
        self.battle.turn()
    }

    pub fn battle(&self) -> &Battle {
        &self.battle
    }

    pub fn battle_mut(&mut self) -> &mut Battle {
        &mut self.battle
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut L {
        &mut self.log
    }

    pub fn effects(&self) -> &E {
        &self.effects
    }

    pub fn into_parts(self) -> (Battle, L, E) {
        (self.battle, self.log, self.effects)
    }

    fn context(&mut self) -> BattleContext<'_> {
        BattleContext::new(&mut self.battle, &mut self.log, &mut self.effects, self.stage)
    }

    fn expect_phase(&self, expected: Phase) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(RuntimeError::InvalidPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    /// Dispatches battle start.
    pub fn begin(&mut self, manager: &mut ModifierManager) -> Result<()> {
        self.expect_phase(Phase::Ready)?;
        self.phase = Phase::InProgress;
        info!(
            target: "runtime::session",
            stage = %self.stage,
            talents = manager.active_count(),
            "battle started"
        );
        manager.apply_battle_start(&mut self.context());
        Ok(())
    }

    /// Advances the turn counter and dispatches turn start. Returns the new turn.
    pub fn start_turn(&mut self, manager: &mut ModifierManager) -> Result<u32> {
        self.expect_phase(Phase::InProgress)?;
        let turn = self.battle.advance_turn();
        manager.apply_turn_start(&mut self.context());
        Ok(turn)
    }

    /// Uses an ability through its interception chain.
    ///
    /// Preconditions (caster alive and not frozen, cooldown, mana) are checked
    /// first and reported as errors; the returned flag is the chain's result.
    pub fn use_ability(
        &mut self,
        ability: AbilityId,
        caster: CharacterId,
        targets: Vec<CharacterId>,
    ) -> Result<bool> {
        self.expect_phase(Phase::InProgress)?;
        self.battle
            .can_use(&AbilityCall::new(ability, caster, targets.clone()))?;
        Ok(self.context().use_ability(ability, caster, targets))
    }

    /// Dispatches turn end, then expires buffs and ticks cooldowns.
    pub fn end_turn(&mut self, manager: &mut ModifierManager) -> Result<()> {
        self.expect_phase(Phase::InProgress)?;
        manager.apply_turn_end(&mut self.context());

        for (id, record) in self.battle.tick_buffs() {
            let name = self
                .battle
                .character(id)
                .map(|c| c.name.clone())
                .unwrap_or_default();
            self.log
                .add_message(format!("{}'s {} wore off", name, record.name), LogColor::Neutral);
        }
        self.battle.tick_cooldowns();
        Ok(())
    }

    /// Victory or defeat once one side has fallen.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.battle.living(Team::Enemy).is_empty() {
            Some(Outcome::Victory)
        } else if self.battle.living(Team::Party).is_empty() {
            Some(Outcome::Defeat)
        } else {
            None
        }
    }

    /// Dispatches battle end and verifies every interceptor was removed.
    ///
    /// Layers still installed after battle end are logged as errors and
    /// stripped.
    pub fn finish(&mut self, manager: &mut ModifierManager) -> Result<Outcome> {
        self.expect_phase(Phase::InProgress)?;
        manager.apply_battle_end(&mut self.context());

        let leaked = self.battle.interceptor_count();
        if leaked > 0 {
            error!(
                target: "runtime::session",
                leaked,
                "interceptors survived battle end, stripping"
            );
            self.battle.strip_interceptors();
        }

        self.phase = Phase::Finished;
        let outcome = self.outcome().unwrap_or(Outcome::Undecided);
        info!(
            target: "runtime::session",
            stage = %self.stage,
            turns = self.battle.turn(),
            %outcome,
            "battle finished"
        );
        Ok(outcome)
    }

    /// Ends an interrupted battle without an outcome.
    ///
    /// Battle end is still dispatched so talents release what they bound, and
    /// any layers left behind are stripped.
    pub fn abort(&mut self, manager: &mut ModifierManager) -> Result<()> {
        self.expect_phase(Phase::InProgress)?;
        manager.apply_battle_end(&mut self.context());
        let stripped = self.battle.strip_interceptors();
        self.phase = Phase::Finished;
        warn!(
            target: "runtime::session",
            stage = %self.stage,
            turns = self.battle.turn(),
            stripped,
            "battle aborted"
        );
        Ok(())
    }

    /// Plays the whole battle with the built-in auto pilot.
    ///
    /// `before_turn` runs ahead of each turn start with the upcoming turn
    /// number, which is where hosts add reinforcements. If a step fails while
    /// the battle is in progress, the battle is aborted before the error is
    /// returned.
    pub fn run_auto(
        &mut self,
        manager: &mut ModifierManager,
        max_turns: u32,
        before_turn: impl FnMut(&mut Battle, u32),
    ) -> Result<Outcome> {
        if let Err(error) = self.play_out(manager, max_turns, before_turn) {
            if self.phase == Phase::InProgress {
                self.abort(manager)?;
            }
            return Err(error);
        }
        self.finish(manager)
    }

    fn play_out(
        &mut self,
        manager: &mut ModifierManager,
        max_turns: u32,
        mut before_turn: impl FnMut(&mut Battle, u32),
    ) -> Result<()> {
        self.begin(manager)?;
        while self.outcome().is_none() && self.battle.turn() < max_turns {
            let upcoming = self.battle.turn() + 1;
            before_turn(&mut self.battle, upcoming);
            self.start_turn(manager)?;
            auto::play_turn(self)?;
            self.end_turn(manager)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use battle_core::{
        Ability, AbilityEffect, Character, CharacterStats, MemoryBattleLog, ModifierCatalog,
    };

    use super::*;
    use crate::repository::InMemoryModifierRepo;
    use crate::run::RunState;

    fn manager() -> ModifierManager {
        ModifierManager::new(
            ModifierCatalog::new(),
            Arc::new(InMemoryModifierRepo::new()),
            RunState::new("session"),
            0,
        )
    }

    fn duel() -> (BattleSession<MemoryBattleLog>, CharacterId, CharacterId, AbilityId) {
        let mut battle = Battle::new(0);
        let hero = battle.add_character(Character::new(
            "Hero",
            Team::Party,
            CharacterStats::new(50, 10, 0),
        ));
        let rat = battle.add_character(Character::new(
            "Rat",
            Team::Enemy,
            CharacterStats::new(10, 0, 0),
        ));
        let bite = battle
            .add_ability(
                hero,
                Ability::strike("Bite", vec![AbilityEffect::physical(6)]).with_cooldown(1),
            )
            .unwrap();
        let session = BattleSession::new(battle, MemoryBattleLog::new(), NullEffects, Stage::FIRST);
        (session, hero, rat, bite)
    }

    #[test]
    fn steps_require_the_right_phase() {
        let (mut session, hero, rat, bite) = duel();
        let mut manager = manager();
        assert!(matches!(
            session.start_turn(&mut manager),
            Err(RuntimeError::InvalidPhase { .. })
        ));
        assert!(session.use_ability(bite, hero, vec![rat]).is_err());

        session.begin(&mut manager).unwrap();
        assert!(session.begin(&mut manager).is_err());
        session.finish(&mut manager).unwrap();
        assert_eq!(session.phase(), Phase::Finished);
    }

    #[test]
    fn cooldowns_tick_at_turn_end() {
        let (mut session, hero, rat, bite) = duel();
        let mut manager = manager();
        session.begin(&mut manager).unwrap();

        assert_eq!(session.start_turn(&mut manager).unwrap(), 1);
        assert!(session.use_ability(bite, hero, vec![rat]).unwrap());
        assert!(matches!(
            session.use_ability(bite, hero, vec![rat]),
            Err(RuntimeError::Ability(_))
        ));
        session.end_turn(&mut manager).unwrap();

        session.start_turn(&mut manager).unwrap();
        assert!(session.use_ability(bite, hero, vec![rat]).unwrap());
        assert_eq!(session.outcome(), Some(Outcome::Victory));
    }

    #[test]
    fn auto_run_reaches_an_outcome() {
        let (mut session, ..) = duel();
        let mut manager = manager();
        let outcome = session.run_auto(&mut manager, 10, |_, _| {}).unwrap();
        assert_eq!(outcome, Outcome::Victory);
        assert_eq!(session.phase(), Phase::Finished);
    }
}
