//! Archetype catalog loader.

use std::path::Path;

use anyhow::Context;
use game_core::ArchetypeConfig;
use serde::{Deserialize, Serialize};

use crate::ArchetypeCatalog;
use crate::loaders::{LoadResult, read_file};

/// Archetype catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchetypeFile {
    pub archetypes: Vec<ArchetypeConfig>,
}

/// Loader for archetype catalogs from RON files.
pub struct ArchetypeLoader;

impl ArchetypeLoader {
    /// Load and validate every archetype in a RON file.
    ///
    /// Duplicate names and invalid parameters fail the whole file.
    pub fn load(path: &Path) -> LoadResult<ArchetypeCatalog> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<ArchetypeCatalog> {
        let file: ArchetypeFile =
            ron::from_str(content).context("Failed to parse archetype catalog RON")?;

        let mut catalog = ArchetypeCatalog::new();
        for config in file.archetypes {
            let name = config.name.clone();
            let previous = catalog
                .insert(config)
                .with_context(|| format!("invalid archetype '{name}'"))?;
            if previous.is_some() {
                anyhow::bail!("duplicate archetype '{name}'");
            }
        }
        tracing::debug!(count = catalog.len(), "loaded archetype catalog");
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::StrikeStyle;

    const CATALOG: &str = r#"
        (
            archetypes: [
                (
                    name: "halberd",
                    min_damage: 40,
                    max_damage: 80,
                    regen_rate: 5,
                    attack_speed_ms: 900,
                    attack_range: Some(2.5),
                    has_stance: true,
                    strike_style: Alternating,
                ),
                (
                    name: "pistol",
                    min_damage: 10,
                    max_damage: 20,
                    regen_rate: 0,
                    attack_speed_ms: 200,
                ),
            ],
        )
    "#;

    #[test]
    fn parses_entries_with_defaults() {
        let catalog = ArchetypeLoader::parse(CATALOG).unwrap();
        assert_eq!(catalog.len(), 2);

        let halberd = catalog.get("halberd").unwrap();
        assert_eq!(halberd.attack_range, Some(2.5));
        assert_eq!(halberd.strike_style, StrikeStyle::Alternating);
        assert_eq!(halberd.pickup_grace_ms, 0);

        let pistol = catalog.get("PISTOL").unwrap();
        assert_eq!(pistol.attack_range, None);
        assert!(!pistol.has_stance);
        assert_eq!(pistol.assets.model, "");
    }

    #[test]
    fn duplicate_names_fail() {
        let content = r#"(archetypes: [
            (name: "a", min_damage: 1, max_damage: 2, regen_rate: 0, attack_speed_ms: 1),
            (name: "A", min_damage: 1, max_damage: 2, regen_rate: 0, attack_speed_ms: 1),
        ])"#;
        let err = ArchetypeLoader::parse(content).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn invalid_damage_range_fails() {
        let content = r#"(archetypes: [
            (name: "a", min_damage: 9, max_damage: 2, regen_rate: 0, attack_speed_ms: 1),
        ])"#;
        assert!(ArchetypeLoader::parse(content).is_err());
    }
}
