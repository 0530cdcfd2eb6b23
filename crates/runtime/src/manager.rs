//! Modifier manager: offering, activating, persisting and dispatching talents.
//!
//! The manager owns the active modifiers of a run, in activation order. Every
//! lifecycle event is dispatched to each active modifier in that order; a
//! failing hook is logged and the remaining modifiers still run.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use battle_core::{
    BattleContext, LifecycleEvent, Modifier, ModifierCatalog, RarityWeights, Stage,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, error, info, warn};

use crate::error::{Result, RuntimeError};
use crate::repository::ModifierRepository;
use crate::run::RunState;
use crate::sampling::draw_without_replacement;

/// An active modifier and the stage it was selected on.
struct ActiveModifier {
    modifier: Modifier,
    stage: Stage,
}

pub struct ModifierManager {
    catalog: ModifierCatalog,
    weights: RarityWeights,
    repository: Arc<dyn ModifierRepository>,
    run: RunState,
    active: Vec<ActiveModifier>,
    rng: StdRng,
}

impl ModifierManager {
    pub fn new(
        catalog: ModifierCatalog,
        repository: Arc<dyn ModifierRepository>,
        run: RunState,
        seed: u64,
    ) -> Self {
        Self {
            catalog,
            weights: RarityWeights::DEFAULT,
            repository,
            run,
            active: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub fn with_weights(mut self, weights: RarityWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn catalog(&self) -> &ModifierCatalog {
        &self.catalog
    }

    pub fn weights(&self) -> &RarityWeights {
        &self.weights
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn stage(&self) -> Stage {
        self.run.stage
    }

    /// Moves the run to `stage`. Active modifiers are kept.
    pub fn set_stage(&mut self, stage: Stage) {
        self.run.stage = stage;
    }

    /// Moves the run to the following stage.
    pub fn advance_stage(&mut self) -> Result<Stage> {
        self.run.advance()
    }

    pub fn active(&self) -> impl Iterator<Item = &Modifier> {
        self.active.iter().map(|entry| &entry.modifier)
    }

    pub fn active_names(&self) -> Vec<&'static str> {
        self.active().map(Modifier::name).collect()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active.iter().any(|entry| entry.modifier.name() == name)
    }

    /// Stage on which an active talent was selected.
    pub fn selected_on(&self, name: &str) -> Option<Stage> {
        self.active
            .iter()
            .find(|entry| entry.modifier.name() == name)
            .map(|entry| entry.stage)
    }

    // ===== offering =====

    /// Offers up to `count` fresh, inactive modifiers.
    ///
    /// Talents already selected on any stage of the run are excluded. When the
    /// remaining pool is smaller than `count` all of it is offered; otherwise
    /// candidates are drawn one at a time by rarity weight without replacement.
    pub fn offer(&mut self, count: usize) -> Result<Vec<Modifier>> {
        let mut excluded: HashSet<String> = self
            .repository
            .all_modifiers(&self.run.run_id)?
            .into_iter()
            .map(|(_, talent)| talent)
            .collect();
        excluded.extend(self.active_names().into_iter().map(str::to_owned));

        let pool = self.catalog.instantiate_except(&excluded);
        if pool.len() < count {
            debug!(
                target: "runtime::modifiers",
                pool = pool.len(),
                count,
                "pool smaller than the offer, skipping sampling"
            );
            return Ok(pool);
        }

        let weights = self.weights;
        let offered = draw_without_replacement(
            pool,
            count,
            |modifier| weights.weight(modifier.rarity()),
            &mut self.rng,
        );
        debug!(
            target: "runtime::modifiers",
            offered = ?offered.iter().map(Modifier::name).collect::<Vec<_>>(),
            "offer drawn"
        );
        Ok(offered)
    }

    // ===== activation & persistence =====

    /// Activates a modifier and records it against the current stage.
    pub fn activate_modifier(&mut self, mut modifier: Modifier) -> Result<()> {
        let name = modifier.name();
        if self.is_active(name) {
            return Err(RuntimeError::AlreadyActive(name.to_owned()));
        }
        self.repository
            .add_modifier(&self.run.run_id, name, self.run.stage)?;
        modifier.activate();
        info!(
            target: "runtime::modifiers",
            talent = name,
            stage = %self.run.stage,
            "talent activated"
        );
        self.active.push(ActiveModifier {
            modifier,
            stage: self.run.stage,
        });
        Ok(())
    }

    /// Activates a catalog talent by id.
    pub fn activate_by_name(&mut self, name: &str) -> Result<()> {
        let modifier = self
            .catalog
            .instantiate(name)
            .ok_or_else(|| RuntimeError::UnknownTalent(name.to_owned()))?;
        self.activate_modifier(modifier)
    }

    /// Rebuilds the active list from storage.
    ///
    /// Every stored id on every stage is reconstructed through the catalog and
    /// activated. Ids the catalog no longer knows are logged and skipped.
    ///
    /// Returns `true` when the run is on stage 2 and nothing is stored for
    /// stage 2, meaning the host should present a selection.
    pub fn load_modifiers(&mut self) -> Result<bool> {
        self.active.clear();
        let mut stage_two_empty = true;
        for stage in Stage::all() {
            let ids = self.repository.get_modifiers(&self.run.run_id, stage)?;
            if stage.number() == 2 {
                stage_two_empty = ids.is_empty();
            }
            for id in ids {
                let Some(mut modifier) = self.catalog.instantiate(&id) else {
                    warn!(
                        target: "runtime::modifiers",
                        talent = %id,
                        %stage,
                        "stored talent is not in the catalog, skipping"
                    );
                    continue;
                };
                if self.is_active(modifier.name()) {
                    warn!(target: "runtime::modifiers", talent = %id, "duplicate stored talent");
                    continue;
                }
                modifier.activate();
                self.active.push(ActiveModifier { modifier, stage });
            }
        }
        info!(
            target: "runtime::modifiers",
            run = %self.run.run_id,
            loaded = self.active.len(),
            "modifiers loaded"
        );
        Ok(self.run.stage.number() == 2 && stage_two_empty)
    }

    /// Forgets the active list and every stored id of the run.
    pub fn clear_modifiers(&mut self) -> Result<()> {
        for stage in Stage::all() {
            self.repository.clear_modifiers(&self.run.run_id, stage)?;
        }
        self.active.clear();
        Ok(())
    }

    /// Rewrites storage so it matches the active list exactly.
    pub fn save_modifiers(&self) -> Result<()> {
        for stage in Stage::all() {
            self.repository.clear_modifiers(&self.run.run_id, stage)?;
        }
        for entry in &self.active {
            self.repository
                .add_modifier(&self.run.run_id, entry.modifier.name(), entry.stage)?;
        }
        Ok(())
    }

    // ===== lifecycle dispatch =====

    pub fn apply_battle_start(&mut self, cx: &mut BattleContext<'_>) -> usize {
        self.dispatch(LifecycleEvent::BattleStart, cx)
    }

    pub fn apply_turn_start(&mut self, cx: &mut BattleContext<'_>) -> usize {
        self.dispatch(LifecycleEvent::TurnStart, cx)
    }

    pub fn apply_turn_end(&mut self, cx: &mut BattleContext<'_>) -> usize {
        self.dispatch(LifecycleEvent::TurnEnd, cx)
    }

    pub fn apply_battle_end(&mut self, cx: &mut BattleContext<'_>) -> usize {
        self.dispatch(LifecycleEvent::BattleEnd, cx)
    }

    /// Runs one hook on every active modifier. Returns how many failed.
    fn dispatch(&mut self, event: LifecycleEvent, cx: &mut BattleContext<'_>) -> usize {
        let mut failures = 0;
        for entry in &mut self.active {
            if let Err(error) = entry.modifier.dispatch(event, cx) {
                failures += 1;
                error!(
                    target: "runtime::modifiers",
                    talent = entry.modifier.name(),
                    %event,
                    %error,
                    "Talent hook failed, continuing"
                );
            }
        }
        failures
    }
}

impl fmt::Debug for ModifierManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModifierManager")
            .field("run", &self.run)
            .field("active", &self.active_names())
            .field("catalog", &self.catalog.len())
            .finish()
    }
}
