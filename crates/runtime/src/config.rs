//! Runtime configuration read from the process environment.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use battle_core::BattleConfig;

/// Settings of one simulated run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub run_id: String,
    /// Seed for offers and combat rolls.
    pub seed: u64,
    pub offer_size: usize,
    /// Number of stages to play, `1..=5`.
    pub stages: u8,
    pub max_turns: u32,
    /// Directory for saved talent selections; in-memory storage when unset.
    pub save_path: Option<PathBuf>,
    /// Optional run configuration TOML.
    pub run_config: Option<PathBuf>,
    /// Optional rarity weight table TOML, overriding the run configuration's weights.
    pub weights: Option<PathBuf>,
    /// Directory for the rolling diagnostics log.
    pub log_dir: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            run_id: "local".to_owned(),
            seed: 0x5EED,
            offer_size: BattleConfig::DEFAULT_OFFER_SIZE,
            stages: BattleConfig::LAST_STAGE,
            max_turns: 30,
            save_path: None,
            run_config: None,
            weights: None,
            log_dir: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_RUN_ID` - Run identifier for saved selections (default: `local`)
    /// - `BATTLE_SEED` - RNG seed (default: fixed)
    /// - `BATTLE_OFFER_SIZE` - Talents offered per stage (default: 3)
    /// - `BATTLE_STAGES` - Stages to play (default: 5)
    /// - `BATTLE_MAX_TURNS` - Turn limit per battle (default: 30)
    /// - `BATTLE_SAVE_PATH` - Directory for saved selections (default: in memory)
    /// - `BATTLE_RUN_CONFIG` - Run configuration TOML (optional)
    /// - `BATTLE_WEIGHTS` - Rarity weight table TOML (optional)
    /// - `BATTLE_LOG_DIR` - Directory for the diagnostics log (optional)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(run_id) = read_var(&lookup, "BATTLE_RUN_ID") {
            config.run_id = run_id;
        }
        if let Some(seed) = read_env::<u64>(&lookup, "BATTLE_SEED") {
            config.seed = seed;
        }
        if let Some(size) = read_env::<usize>(&lookup, "BATTLE_OFFER_SIZE") {
            config.offer_size = size.max(1);
        }
        if let Some(stages) = read_env::<u8>(&lookup, "BATTLE_STAGES") {
            config.stages = stages.clamp(BattleConfig::FIRST_STAGE, BattleConfig::LAST_STAGE);
        }
        if let Some(turns) = read_env::<u32>(&lookup, "BATTLE_MAX_TURNS") {
            config.max_turns = turns.max(1);
        }
        config.save_path = read_var(&lookup, "BATTLE_SAVE_PATH").map(PathBuf::from);
        config.run_config = read_var(&lookup, "BATTLE_RUN_CONFIG").map(PathBuf::from);
        config.weights = read_var(&lookup, "BATTLE_WEIGHTS").map(PathBuf::from);
        config.log_dir = read_var(&lookup, "BATTLE_LOG_DIR").map(PathBuf::from);
        config
    }
}

fn read_var(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|value| !value.trim().is_empty())
}

fn read_env<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr,
{
    read_var(lookup, key)?.trim().parse().ok()
}
