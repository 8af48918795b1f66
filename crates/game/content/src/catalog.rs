//! Named archetype configurations.

use std::collections::BTreeMap;

use game_core::{Archetype, ArchetypeConfig, ConfigError};
use strum::IntoEnumIterator;

/// Archetype configurations keyed by name.
///
/// Lookups are case-insensitive; names are stored lowercased.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArchetypeCatalog {
    entries: BTreeMap<String, ArchetypeConfig>,
}

impl ArchetypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the four built-in presets.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for archetype in Archetype::iter() {
            catalog.entries.insert(archetype.to_string(), archetype.config());
        }
        catalog
    }

    /// Adds or replaces an entry after validating it.
    ///
    /// Returns the previous entry of the same name, if any.
    pub fn insert(&mut self, config: ArchetypeConfig) -> Result<Option<ArchetypeConfig>, ConfigError> {
        config.validate()?;
        Ok(self.entries.insert(config.name.to_ascii_lowercase(), config))
    }

    pub fn get(&self, name: &str) -> Option<&ArchetypeConfig> {
        self.entries.get(&name.to_ascii_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArchetypeConfig> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overlays `other` on top of `self`; entries in `other` win.
    pub fn merge(&mut self, other: ArchetypeCatalog) {
        self.entries.extend(other.entries);
    }
}
