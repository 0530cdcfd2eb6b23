//! Concrete talents and the data files that tune them.
//!
//! - [`talents`]: the 17 standard talents and [`talents::standard_catalog`].
//! - [`loaders`]: TOML rarity weights and run configuration, RON encounters.
//! - [`icons`]: icon lookup with rarity-colored placeholders.
pub mod icons;
#[cfg(feature = "loaders")]
pub mod loaders;
pub mod talents;

pub use icons::{Icon, IconResolver};
#[cfg(feature = "loaders")]
pub use loaders::{
    EncounterLoader, EncounterSpec, LoadResult, RunConfig, RunConfigLoader, WeightsLoader,
};
pub use talents::standard_catalog;
