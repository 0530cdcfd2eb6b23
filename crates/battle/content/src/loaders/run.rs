//! Run configuration: offer size, weights and talent roster adjustments.

use std::collections::BTreeMap;
use std::path::Path;

use battle_core::{BattleConfig, ModifierCatalog, Rarity, RarityWeights};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::loaders::{LoadResult, read_file};

/// Tunables of one run.
///
/// ```toml
/// offer_size = 3
/// disabled = ["glass_cannon"]
///
/// [weights]
/// legendary = 0.1
///
/// [rarity_overrides]
/// iron_skin = "rare"
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub offer_size: usize,
    pub weights: RarityWeights,
    /// Talents removed from the catalog for this run.
    pub disabled: Vec<String>,
    pub rarity_overrides: BTreeMap<String, Rarity>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            offer_size: BattleConfig::DEFAULT_OFFER_SIZE,
            weights: RarityWeights::DEFAULT,
            disabled: Vec::new(),
            rarity_overrides: BTreeMap::new(),
        }
    }
}

impl RunConfig {
    pub fn battle_config(&self) -> BattleConfig {
        BattleConfig::with_offer_size(self.offer_size)
    }

    /// Applies roster adjustments to `catalog`.
    ///
    /// Names the catalog does not know are logged and skipped.
    pub fn apply(&self, catalog: &mut ModifierCatalog) {
        for name in &self.disabled {
            if catalog.get(name).is_none() {
                warn!(target: "content::loaders", talent = %name, "cannot disable unknown talent");
            }
        }
        catalog.retain(|info| !self.disabled.iter().any(|name| name == info.name));

        for (name, rarity) in &self.rarity_overrides {
            if !catalog.set_rarity(name, *rarity) {
                warn!(
                    target: "content::loaders",
                    talent = %name,
                    "cannot override rarity of unknown talent"
                );
            }
        }
    }
}

/// Loader for [`RunConfig`] from TOML files.
pub struct RunConfigLoader;

impl RunConfigLoader {
    pub fn load(path: &Path) -> LoadResult<RunConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<RunConfig> {
        let config: RunConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse run config TOML: {}", e))?;
        if config.offer_size == 0 {
            anyhow::bail!("offer_size must be at least 1");
        }
        Ok(config)
    }
}
