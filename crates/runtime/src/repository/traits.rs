//! Repository contract for talent selections.

use battle_core::Stage;

use super::Result;

/// Storage of talent ids per `(run_id, stage)`.
///
/// A run or stage that was never written reads as an empty list.
pub trait ModifierRepository: Send + Sync {
    /// Talent ids recorded for one stage, in insertion order.
    fn get_modifiers(&self, run_id: &str, stage: Stage) -> Result<Vec<String>>;

    /// Appends a talent id to one stage.
    fn add_modifier(&self, run_id: &str, talent: &str, stage: Stage) -> Result<()>;

    /// Forgets every id recorded for one stage.
    fn clear_modifiers(&self, run_id: &str, stage: Stage) -> Result<()>;

    /// Every id recorded for the run, across all stages.
    fn all_modifiers(&self, run_id: &str) -> Result<Vec<(Stage, String)>> {
        let mut all = Vec::new();
        for stage in Stage::all() {
            all.extend(
                self.get_modifiers(run_id, stage)?
                    .into_iter()
                    .map(|talent| (stage, talent)),
            );
        }
        Ok(all)
    }
}
