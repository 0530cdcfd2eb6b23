//! Stage numbering for a multi-stage run.

use std::fmt;

use crate::config::BattleConfig;
use crate::error::StageError;

/// One battle encounter within a run, numbered `1..=5`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Stage(u8);

impl Stage {
    pub const FIRST: Self = Self(BattleConfig::FIRST_STAGE);
    pub const LAST: Self = Self(BattleConfig::LAST_STAGE);

    /// Validates a raw stage number.
    pub fn new(number: u8) -> Result<Self, StageError> {
        if (BattleConfig::FIRST_STAGE..=BattleConfig::LAST_STAGE).contains(&number) {
            Ok(Self(number))
        } else {
            Err(StageError::OutOfRange { number })
        }
    }

    #[inline]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// The following stage, or `None` after the last one.
    pub fn next(self) -> Option<Self> {
        Self::new(self.0 + 1).ok()
    }

    /// Every stage of a run in order.
    pub fn all() -> impl Iterator<Item = Stage> {
        (BattleConfig::FIRST_STAGE..=BattleConfig::LAST_STAGE).map(Stage)
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<u8> for Stage {
    type Error = StageError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Stage> for u8 {
    fn from(stage: Stage) -> Self {
        stage.0
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stage {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_numbers() {
        assert!(Stage::new(0).is_err());
        assert!(Stage::new(6).is_err());
        assert_eq!(Stage::new(3).map(Stage::number), Ok(3));
    }

    #[test]
    fn iterates_all_stages_in_order() {
        let numbers: Vec<u8> = Stage::all().map(Stage::number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        assert_eq!(Stage::LAST.next(), None);
    }
}
