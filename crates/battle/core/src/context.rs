//! Context passed to lifecycle hooks and ability behaviors.
//!
//! [`BattleContext`] bundles everything a talent may touch: the battle arena,
//! the battle log, the visual-effects sink and the stage being fought. Hooks
//! receive it explicitly, so nothing reaches for a global game instance.

use crate::ability::AbilityCall;
use crate::battle::Battle;
use crate::ids::{AbilityId, CharacterId};
use crate::stage::Stage;

/// Color tag of a battle-log line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum LogColor {
    #[default]
    Neutral,
    Damage,
    Heal,
    Buff,
    Debuff,
    Talent,
}

/// Player-facing battle log. Fire-and-forget.
pub trait BattleLog {
    fn add_message(&mut self, text: String, color: LogColor);
}

/// Battle log that keeps every line in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryBattleLog {
    lines: Vec<(String, LogColor)>,
}

impl MemoryBattleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[(String, LogColor)] {
        &self.lines
    }

    /// Number of lines containing `needle`.
    pub fn count_containing(&self, needle: &str) -> usize {
        self.lines.iter().filter(|(text, _)| text.contains(needle)).count()
    }
}

impl BattleLog for MemoryBattleLog {
    fn add_message(&mut self, text: String, color: LogColor) {
        self.lines.push((text, color));
    }
}

/// Cosmetic cue for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VisualCue {
    Heal { target: CharacterId, amount: i32 },
    Projectile { from: CharacterId, to: CharacterId },
    Freeze { target: CharacterId },
    Crystallize { target: CharacterId },
    Shield { target: CharacterId },
    Enchant { ability: AbilityId },
}

/// Receiver of visual cues.
pub trait EffectSink {
    fn spawn(&mut self, cue: VisualCue);
}

/// Sink that drops every cue.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullEffects;

impl EffectSink for NullEffects {
    fn spawn(&mut self, _cue: VisualCue) {}
}

/// Sink that records cues, for tests and replays.
#[derive(Clone, Debug, Default)]
pub struct RecordingEffects {
    pub cues: Vec<VisualCue>,
}

impl EffectSink for RecordingEffects {
    fn spawn(&mut self, cue: VisualCue) {
        self.cues.push(cue);
    }
}

/// Everything a hook or ability behavior may use.
pub struct BattleContext<'a> {
    pub battle: &'a mut Battle,
    pub log: &'a mut dyn BattleLog,
    pub effects: &'a mut dyn EffectSink,
    pub stage: Stage,
}

impl<'a> BattleContext<'a> {
    pub fn new(
        battle: &'a mut Battle,
        log: &'a mut dyn BattleLog,
        effects: &'a mut dyn EffectSink,
        stage: Stage,
    ) -> Self {
        Self {
            battle,
            log,
            effects,
            stage,
        }
    }

    pub fn log(&mut self, text: impl Into<String>, color: LogColor) {
        self.log.add_message(text.into(), color);
    }

    pub fn cue(&mut self, cue: VisualCue) {
        self.effects.spawn(cue);
    }

    /// Uses an ability through its full interception chain.
    ///
    /// Returns the result of the outermost layer, which is always the result
    /// of the pristine behavior.
    pub fn use_ability(
        &mut self,
        ability: AbilityId,
        caster: CharacterId,
        targets: Vec<CharacterId>,
    ) -> bool {
        let Some(chain) = self.battle.ability(ability).map(|a| a.use_chain.clone()) else {
            return false;
        };
        chain.run(self, &AbilityCall::new(ability, caster, targets))
    }

    /// Runs one hit of a multi-hit ability through its hit chain.
    ///
    /// Returns false for abilities without a hit entry point.
    pub fn execute_hit(
        &mut self,
        ability: AbilityId,
        caster: CharacterId,
        target: CharacterId,
    ) -> bool {
        let Some(chain) = self.battle.ability(ability).and_then(|a| a.hit_chain.clone()) else {
            return false;
        };
        chain.run(self, &AbilityCall::new(ability, caster, vec![target]))
    }
}
