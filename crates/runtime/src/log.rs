//! Battle-log sink that mirrors player-facing lines into `tracing`.

use battle_core::{BattleLog, LogColor};
use tracing::info;

/// Keeps every line in memory and emits it as a `battle::log` event.
#[derive(Clone, Debug, Default)]
pub struct TracingBattleLog {
    lines: Vec<(String, LogColor)>,
}

impl TracingBattleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[(String, LogColor)] {
        &self.lines
    }

    /// Removes and returns everything logged so far.
    pub fn drain(&mut self) -> Vec<(String, LogColor)> {
        std::mem::take(&mut self.lines)
    }
}

impl BattleLog for TracingBattleLog {
    fn add_message(&mut self, text: String, color: LogColor) {
        info!(target: "battle::log", color = %color, "{}", text);
        self.lines.push((text, color));
    }
}
