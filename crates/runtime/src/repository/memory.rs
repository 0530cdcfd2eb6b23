//! In-memory ModifierRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use battle_core::Stage;

use super::{ModifierRepository, RepositoryError, Result};

/// In-memory implementation of ModifierRepository.
#[derive(Debug, Default)]
pub struct InMemoryModifierRepo {
    records: RwLock<HashMap<(String, Stage), Vec<String>>>,
}

impl InMemoryModifierRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ModifierRepository for InMemoryModifierRepo {
    fn get_modifiers(&self, run_id: &str, stage: Stage) -> Result<Vec<String>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records
            .get(&(run_id.to_owned(), stage))
            .cloned()
            .unwrap_or_default())
    }

    fn add_modifier(&self, run_id: &str, talent: &str, stage: Stage) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records
            .entry((run_id.to_owned(), stage))
            .or_default()
            .push(talent.to_owned());
        Ok(())
    }

    fn clear_modifiers(&self, run_id: &str, stage: Stage) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records.remove(&(run_id.to_owned(), stage));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(n: u8) -> Stage {
        Stage::new(n).unwrap()
    }

    #[test]
    fn unknown_run_reads_empty() {
        let repo = InMemoryModifierRepo::new();
        assert!(repo.get_modifiers("nobody", stage(1)).unwrap().is_empty());
    }

    #[test]
    fn records_are_scoped_by_run_and_stage() {
        let repo = InMemoryModifierRepo::new();
        repo.add_modifier("a", "iron_skin", stage(1)).unwrap();
        repo.add_modifier("a", "hardening", stage(2)).unwrap();
        repo.add_modifier("b", "last_stand", stage(1)).unwrap();

        assert_eq!(repo.get_modifiers("a", stage(1)).unwrap(), vec!["iron_skin"]);
        assert_eq!(
            repo.all_modifiers("a").unwrap(),
            vec![
                (stage(1), "iron_skin".to_owned()),
                (stage(2), "hardening".to_owned())
            ]
        );

        repo.clear_modifiers("a", stage(1)).unwrap();
        assert!(repo.get_modifiers("a", stage(1)).unwrap().is_empty());
        assert_eq!(repo.get_modifiers("b", stage(1)).unwrap(), vec!["last_stand"]);
    }
}
