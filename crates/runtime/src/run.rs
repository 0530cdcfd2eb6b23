//! Identity and progress of one run.

use battle_core::Stage;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RuntimeError};

/// The run being played and the stage it is on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub run_id: String,
    pub stage: Stage,
}

impl RunState {
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            stage: Stage::FIRST,
        }
    }

    pub fn at_stage(mut self, stage: Stage) -> Self {
        self.stage = stage;
        self
    }

    /// Moves to the next stage.
    pub fn advance(&mut self) -> Result<Stage> {
        self.stage = self.stage.next().ok_or(RuntimeError::RunComplete)?;
        Ok(self.stage)
    }

    pub fn is_last_stage(&self) -> bool {
        self.stage == Stage::LAST
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_until_last_stage() {
        let mut run = RunState::new("r");
        for expected in 2..=5 {
            assert_eq!(run.advance().unwrap().number(), expected);
        }
        assert!(run.is_last_stage());
        assert!(matches!(run.advance(), Err(RuntimeError::RunComplete)));
        assert_eq!(run.stage, Stage::LAST);
    }
}
