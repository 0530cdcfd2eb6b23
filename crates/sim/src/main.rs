//! Headless run simulator.
//!
//! Plays a seeded run end to end: before each stage it offers talents and
//! picks the first one, then auto-plays the bundled sample encounter and
//! prints the battle log. Selections are persisted between stages, so a run
//! with `BATTLE_SAVE_PATH` set resumes where it left off.
//!
//! Configuration comes from the environment (and `.env`); see
//! [`battle_runtime::RuntimeConfig::from_env`].
//!
//! ```bash
//! BATTLE_SEED=7 BATTLE_STAGES=3 cargo run -p battle-sim
//! ```

mod dirs;
mod logging;

use std::sync::Arc;

use anyhow::Result;
use battle_content::loaders::{
    EncounterLoader, EncounterSpec, RunConfig, RunConfigLoader, WeightsLoader,
};
use battle_content::{Icon, IconResolver, standard_catalog};
use battle_core::{Battle, NullEffects, Stage};
use battle_runtime::{
    BattleSession, FileModifierRepository, InMemoryModifierRepo, ModifierManager,
    ModifierRepository, Outcome, RunState, RuntimeConfig, TracingBattleLog,
};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = RuntimeConfig::from_env();
    let _guard = logging::setup_logging(&config)?;

    let mut run_config = match &config.run_config {
        Some(path) => RunConfigLoader::load(path)?,
        None => RunConfig {
            offer_size: config.offer_size,
            ..RunConfig::default()
        },
    };
    if let Some(path) = &config.weights {
        run_config.weights = WeightsLoader::load(path)?;
    }
    tracing::info!(?config, ?run_config, "Starting battle simulator");

    let mut catalog = standard_catalog();
    run_config.apply(&mut catalog);

    let repository: Arc<dyn ModifierRepository> = match &config.save_path {
        Some(dir) => Arc::new(FileModifierRepository::new(dir)?),
        None => Arc::new(InMemoryModifierRepo::new()),
    };
    let mut manager = ModifierManager::new(
        catalog,
        repository,
        RunState::new(config.run_id.clone()),
        config.seed,
    )
    .with_weights(run_config.weights);
    manager.load_modifiers()?;

    let encounter = EncounterLoader::sample()?;
    let icons = IconResolver::new(dirs::icon_dir());

    for number in 1..=config.stages {
        let stage = Stage::new(number)?;
        manager.set_stage(stage);
        println!("== {stage}: {} ==", encounter.name);

        select_talent(&mut manager, &icons, run_config.offer_size)?;
        let outcome = fight(&mut manager, &encounter, &config, stage)?;
        manager.save_modifiers()?;

        println!("-> {outcome}\n");
        if outcome == Outcome::Defeat {
            break;
        }
    }

    println!("Talents: {}", manager.active_names().join(", "));
    Ok(())
}

/// Offers talents for the current stage and activates the first offer,
/// unless the stage already has a stored selection.
fn select_talent(manager: &mut ModifierManager, icons: &IconResolver, count: usize) -> Result<()> {
    let stage = manager.stage();
    let names = manager.active_names();
    if let Some(name) = names.iter().find(|name| manager.selected_on(name) == Some(stage)) {
        println!("Resumed selection: {name}");
        return Ok(());
    }

    let offered = manager.offer(count)?;
    for modifier in &offered {
        let icon = match icons.resolve(modifier.info()) {
            Icon::Image(path) => path.display().to_string(),
            Icon::Placeholder(color) => color.hex(),
        };
        println!(
            "  offer: {:<18} {:<10} {:<10} {}",
            modifier.name(),
            modifier.rarity(),
            icon,
            modifier.description()
        );
    }
    match offered.into_iter().next() {
        Some(pick) => {
            println!("Selected: {}", pick.name());
            manager.activate_modifier(pick)?;
        }
        None => println!("No talents left to offer"),
    }
    Ok(())
}

fn fight(
    manager: &mut ModifierManager,
    spec: &EncounterSpec,
    config: &RuntimeConfig,
    stage: Stage,
) -> Result<Outcome> {
    let mut battle = Battle::new(config.seed.wrapping_add(u64::from(stage.number())));
    let mut encounter = spec.spawn(&mut battle);
    let mut session = BattleSession::new(battle, TracingBattleLog::new(), NullEffects, stage);

    let outcome = session.run_auto(manager, config.max_turns, |battle, turn| {
        encounter.summon_due(battle, turn);
    })?;

    for (line, _) in session.log().lines() {
        println!("  {line}");
    }
    Ok(outcome)
}
