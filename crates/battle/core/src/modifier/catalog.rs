//! Catalog of modifier constructors.

use std::collections::HashSet;

use super::{Modifier, Talent, TalentInfo};
use crate::rarity::Rarity;

/// Constructor of a fresh talent instance.
pub type TalentFactory = fn() -> Box<dyn Talent>;

/// One catalog entry: identity plus constructor.
#[derive(Clone, Copy)]
pub struct CatalogEntry {
    pub info: TalentInfo,
    factory: TalentFactory,
}

impl CatalogEntry {
    /// Builds a new, inactive modifier.
    pub fn instantiate(&self) -> Modifier {
        Modifier::new(self.info, (self.factory)())
    }
}

/// Every modifier type that can be offered or restored, in registration order.
#[derive(Clone, Default)]
pub struct ModifierCatalog {
    entries: Vec<CatalogEntry>,
}

impl ModifierCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a talent. A later registration with the same name replaces the
    /// earlier one in place.
    pub fn register(&mut self, info: TalentInfo, factory: TalentFactory) -> &mut Self {
        let entry = CatalogEntry { info, factory };
        match self.entries.iter_mut().find(|e| e.info.name == info.name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.info.name == name)
    }

    /// Builds a fresh modifier by identifier.
    pub fn instantiate(&self, name: &str) -> Option<Modifier> {
        self.get(name).map(CatalogEntry::instantiate)
    }

    /// Builds one fresh modifier per entry whose name is not in `excluded`.
    pub fn instantiate_except(&self, excluded: &HashSet<String>) -> Vec<Modifier> {
        self.entries
            .iter()
            .filter(|e| !excluded.contains(e.info.name))
            .map(CatalogEntry::instantiate)
            .collect()
    }

    /// Keeps only the entries for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&TalentInfo) -> bool) {
        self.entries.retain(|e| keep(&e.info));
    }

    /// Overrides the rarity of one entry. Returns whether it exists.
    pub fn set_rarity(&mut self, name: &str, rarity: Rarity) -> bool {
        match self.entries.iter_mut().find(|e| e.info.name == name) {
            Some(entry) => {
                entry.info.rarity = rarity;
                true
            }
            None => false,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.info.name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
