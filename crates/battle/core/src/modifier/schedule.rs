//! Turn-number triggers.

use std::collections::HashSet;

/// Set of turns on which a timed talent fires.
///
/// Stores 1-based turn counts. A schedule is a fixed set optionally followed
/// by a periodic tail; membership is O(1) either way.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnSchedule {
    fixed: HashSet<u32>,
    tail: Option<Tail>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Tail {
    after: u32,
    every: u32,
}

impl TurnSchedule {
    /// Fires on the given 1-based turn counts.
    pub fn on_turns(turns: impl IntoIterator<Item = u32>) -> Self {
        Self {
            fixed: turns.into_iter().collect(),
            tail: None,
        }
    }

    /// Fires on the given 0-based turn indices (index `i` is turn `i + 1`).
    pub fn on_turn_indices(indices: impl IntoIterator<Item = u32>) -> Self {
        Self::on_turns(indices.into_iter().map(|i| i + 1))
    }

    /// Continues every `every` turns after the last fixed turn.
    #[must_use]
    pub fn then_every(mut self, every: u32) -> Self {
        if every > 0 {
            let after = self.fixed.iter().copied().max().unwrap_or(0);
            self.tail = Some(Tail { after, every });
        }
        self
    }

    /// Whether the schedule fires on 1-based turn `turn`.
    pub fn fires_on(&self, turn: u32) -> bool {
        if self.fixed.contains(&turn) {
            return true;
        }
        match self.tail {
            Some(Tail { after, every }) => turn > after && (turn - after) % every == 0,
            None => false,
        }
    }
}
