//! Rarity weight table loader.

use std::path::Path;

use battle_core::RarityWeights;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`RarityWeights`] from TOML files.
///
/// Missing tiers keep their default weight:
///
/// ```toml
/// common = 0.5
/// legendary = 0.0
/// ```
pub struct WeightsLoader;

impl WeightsLoader {
    pub fn load(path: &Path) -> LoadResult<RarityWeights> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<RarityWeights> {
        let weights: RarityWeights = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rarity weights TOML: {}", e))?;
        if weights.total() <= 0.0 {
            anyhow::bail!("Rarity weights must not all be zero");
        }
        Ok(weights)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use battle_core::Rarity;

    use super::*;

    #[test]
    fn partial_tables_keep_defaults() {
        let weights = WeightsLoader::parse("common = 0.5\nlegendary = 0.0\n").unwrap();
        assert_eq!(weights.weight(Rarity::Common), 0.5);
        assert_eq!(weights.weight(Rarity::Legendary), 0.0);
        assert_eq!(weights.weight(Rarity::Rare), RarityWeights::DEFAULT.rare);
    }

    #[test]
    fn all_zero_table_is_rejected() {
        let table = "common = 0\nuncommon = 0\nrare = 0\nepic = 0\nlegendary = 0\n";
        assert!(WeightsLoader::parse(table).is_err());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "epic = 0.25").unwrap();
        let weights = WeightsLoader::load(file.path()).unwrap();
        assert_eq!(weights.weight(Rarity::Epic), 0.25);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = WeightsLoader::load(Path::new("/nonexistent/weights.toml")).unwrap_err();
        assert!(err.to_string().contains("weights.toml"));
    }
}
