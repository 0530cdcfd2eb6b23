//! Content loaders for reading talent tables and encounters from files.
//!
//! TOML carries tunables (rarity weights, run configuration); RON carries
//! encounter rosters.

pub mod encounter;
pub mod run;
pub mod weights;

pub use encounter::{
    AbilitySpec, CharacterSpec, Encounter, EncounterLoader, EncounterSpec, SummonSpec,
};
pub use run::{RunConfig, RunConfigLoader};
pub use weights::WeightsLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
